use crate::config::ScanLimits;
use crate::core::{ToolError, ToolResult};
use std::fs;
use std::path::Path;

/// Content of a size-checked, lossily decoded read.
#[derive(Debug, Clone)]
pub struct ReadOutcome {
    pub content: String,
    pub size_bytes: u64,
}

/// Read a text file with the per-file size limit enforced up front and
/// undecodable bytes replaced rather than raised. Oversized files are
/// reported as a distinct error so callers never mistake "not scanned"
/// for "clean". Content is returned whole; response-payload capping is a
/// caller concern.
pub fn read_text_lossy(path: &Path, limits: &ScanLimits) -> ToolResult<ReadOutcome> {
    if !path.is_file() {
        return Err(ToolError::InvalidFile {
            path: path.to_path_buf(),
        });
    }

    let size_bytes = fs::metadata(path)
        .map_err(|e| ToolError::io(path, &e))?
        .len();
    if size_bytes > limits.max_file_size_bytes {
        return Err(ToolError::FileSizeLimitExceeded {
            path: path.to_path_buf(),
            size: size_bytes,
            limit: limits.max_file_size_bytes,
        });
    }

    let bytes = fs::read(path).map_err(|e| ToolError::io(path, &e))?;
    let content = String::from_utf8_lossy(&bytes).into_owned();

    Ok(ReadOutcome {
        content,
        size_bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn invalid_bytes_become_replacement_chars() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("latin.py");
        fs::write(&path, b"x = '\xe9'\n").unwrap();

        let outcome = read_text_lossy(&path, &ScanLimits::default()).unwrap();
        assert!(outcome.content.contains('\u{FFFD}'));
        assert_eq!(outcome.size_bytes, 9);
    }

    #[test]
    fn oversized_file_is_a_distinct_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("big.py");
        fs::write(&path, "x = 1\n".repeat(100)).unwrap();

        let limits = ScanLimits {
            max_file_size_bytes: 10,
            ..Default::default()
        };
        let err = read_text_lossy(&path, &limits).unwrap_err();
        assert_eq!(err.kind(), "FileSizeLimitExceeded");
    }

    #[test]
    fn missing_file_is_invalid_not_io() {
        let err = read_text_lossy(Path::new("/no/such.py"), &ScanLimits::default()).unwrap_err();
        assert_eq!(err.kind(), "InvalidFile");
    }
}
