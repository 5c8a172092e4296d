use crate::core::{ToolError, ToolResult};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Write `content` to `path` through a temporary file in the same directory
/// followed by an atomic rename, so a crash mid-write never leaves a
/// half-written target. The temporary artifact is removed on every exit
/// path: `NamedTempFile` unlinks itself unless the persist succeeds.
pub fn write_text_atomic(path: &Path, content: &str) -> ToolResult<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => Path::new(".").to_path_buf(),
    };
    if !parent.exists() {
        fs::create_dir_all(&parent).map_err(|e| ToolError::io(path, &e))?;
    }

    let mut tmp = NamedTempFile::new_in(&parent).map_err(|e| ToolError::io(path, &e))?;
    tmp.write_all(content.as_bytes())
        .map_err(|e| ToolError::io(path, &e))?;
    tmp.flush().map_err(|e| ToolError::io(path, &e))?;
    tmp.persist(path)
        .map_err(|e| ToolError::io(path, &e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_replaces_existing_content() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("out.py");
        fs::write(&target, "old").unwrap();

        write_text_atomic(&target, "new contents\n").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "new contents\n");
    }

    #[test]
    fn write_creates_missing_parent_dirs() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("deep/nested/out.py");

        write_text_atomic(&target, "x = 1\n").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "x = 1\n");
    }

    #[test]
    fn no_temp_artifacts_remain_after_write() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("out.py");
        write_text_atomic(&target, "done\n").unwrap();

        let entries: Vec<_> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(entries, vec!["out.py"]);
    }
}
