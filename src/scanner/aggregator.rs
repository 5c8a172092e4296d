//! Directory-level scanning: enumerate, apply limits, scan, fold.

use crate::config::ScanLimits;
use crate::core::{
    CorpusSummary, DirectoryScan, FileError, FileScanResult, SkipReason, SkippedFile, ToolError,
    ToolResult,
};
use crate::io::reader::read_text_lossy;
use crate::io::walker::find_python_files;
use crate::scanner::line_scanner::scan_source;
use std::path::Path;

/// Scan every Python file under `root`, honoring exclude globs and the
/// configured limits.
///
/// Skipped files are never conflated with clean files: an oversized file is
/// recorded with a size-limit reason, and files beyond the per-operation cap
/// are recorded with an operation-limit reason. A read failure is recorded
/// against that file and the scan of the remaining files continues; only a
/// missing or non-directory `root` aborts before any scanning starts.
pub fn scan_path(root: &Path, exclude: &[String], limits: &ScanLimits) -> ToolResult<DirectoryScan> {
    if !root.is_dir() {
        return Err(ToolError::InvalidDirectory {
            path: root.to_path_buf(),
        });
    }

    let candidates = find_python_files(root, exclude)
        .map_err(|e| ToolError::InvalidPattern(e.to_string()))?;
    log::debug!(
        "scanning {} candidate files under {}",
        candidates.len(),
        root.display()
    );

    let mut files = Vec::new();
    let mut skipped = Vec::new();
    let mut errors = Vec::new();

    for path in candidates {
        if files.len() >= limits.max_files_per_operation {
            skipped.push(SkippedFile {
                path,
                reason: SkipReason::OperationLimit,
            });
            continue;
        }

        match read_text_lossy(&path, limits) {
            Ok(outcome) => {
                let lines = outcome.content.lines().count();
                let issues = scan_source(&path, &outcome.content);
                files.push(FileScanResult::new(path, issues, lines));
            }
            Err(ToolError::FileSizeLimitExceeded { path, .. }) => {
                skipped.push(SkippedFile {
                    path,
                    reason: SkipReason::SizeLimit,
                });
            }
            Err(err) => {
                errors.push(FileError {
                    path,
                    message: err.to_string(),
                });
            }
        }
    }

    let summary = CorpusSummary::from_results(&files);
    Ok(DirectoryScan {
        root: root.to_path_buf(),
        files,
        summary,
        skipped,
        errors,
    })
}
