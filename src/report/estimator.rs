//! Effort estimation and remediation ordering.
//!
//! The effort figure is a heuristic (about two minutes of review-and-fix
//! per issue), not a calibrated measurement, and is labeled as an estimate
//! wherever it is surfaced.

use crate::core::{DirectoryScan, FileScanResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Files with fewer issues than this are quick wins; at or above it they
/// compete on density instead.
const QUICK_WIN_THRESHOLD: usize = 5;
/// Cap for each recommended-order bucket
const BUCKET_CAP: usize = 5;
/// Cap for the full priority-file listing
const PRIORITY_LIST_CAP: usize = 20;
/// Heuristic remediation minutes per issue
const MINUTES_PER_ISSUE: usize = 2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRef {
    pub file: PathBuf,
    pub issues: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DensityRef {
    pub file: PathBuf,
    pub issues: usize,
    /// Issues per hundred lines, rounded to one decimal
    pub density: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorityFile {
    pub file: PathBuf,
    pub issues: usize,
    pub lines: usize,
    pub density: f64,
}

/// Ranked remediation plan derived from one aggregate scan.
///
/// `priority_files` is capped; `additional_files` reports how many ranked
/// files fell past the cap so truncation is always signaled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationPlan {
    pub files_requiring_changes: usize,
    pub total_issues: usize,
    pub estimated_effort: String,
    pub quick_wins: Vec<FileRef>,
    pub high_density: Vec<DensityRef>,
    pub major_refactors: Vec<FileRef>,
    pub priority_files: Vec<PriorityFile>,
    pub additional_files: usize,
}

fn density_pct(file: &FileScanResult) -> f64 {
    (file.density() * 1000.0).round() / 10.0
}

/// Build the remediation plan from per-file scan results.
pub fn prioritize(scan: &DirectoryScan) -> MigrationPlan {
    // Rank by absolute issue count, heaviest first; clean files drop out.
    let mut ranked: Vec<&FileScanResult> =
        scan.files.iter().filter(|f| f.total > 0).collect();
    ranked.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.path.cmp(&b.path)));

    let total_issues: usize = ranked.iter().map(|f| f.total).sum();

    let quick_wins: Vec<FileRef> = ranked
        .iter()
        .filter(|f| f.total < QUICK_WIN_THRESHOLD)
        .take(BUCKET_CAP)
        .map(|f| FileRef {
            file: f.path.clone(),
            issues: f.total,
        })
        .collect();

    let mut dense: Vec<&FileScanResult> = ranked
        .iter()
        .copied()
        .filter(|f| f.total >= QUICK_WIN_THRESHOLD)
        .collect();
    dense.sort_by(|a, b| {
        b.density()
            .partial_cmp(&a.density())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.path.cmp(&b.path))
    });
    let high_density: Vec<DensityRef> = dense
        .iter()
        .take(BUCKET_CAP)
        .map(|f| DensityRef {
            file: f.path.clone(),
            issues: f.total,
            density: density_pct(f),
        })
        .collect();

    let major_refactors: Vec<FileRef> = ranked
        .iter()
        .take(BUCKET_CAP)
        .map(|f| FileRef {
            file: f.path.clone(),
            issues: f.total,
        })
        .collect();

    let priority_files: Vec<PriorityFile> = ranked
        .iter()
        .take(PRIORITY_LIST_CAP)
        .map(|f| PriorityFile {
            file: f.path.clone(),
            issues: f.total,
            lines: f.lines,
            density: density_pct(f),
        })
        .collect();
    let additional_files = ranked.len().saturating_sub(PRIORITY_LIST_CAP);

    MigrationPlan {
        files_requiring_changes: ranked.len(),
        total_issues,
        estimated_effort: estimate_effort(total_issues),
        quick_wins,
        high_density,
        major_refactors,
        priority_files,
        additional_files,
    }
}

/// Render the heuristic effort estimate into minutes, hours, or days.
pub fn estimate_effort(total_issues: usize) -> String {
    let minutes = total_issues * MINUTES_PER_ISSUE;
    let hours = minutes as f64 / 60.0;
    if minutes < 60 {
        format!("{} minutes", minutes)
    } else if hours < 8.0 {
        format!("{:.1} hours", hours)
    } else {
        format!("{:.1} days", hours / 8.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Category, CorpusSummary, LineIssue, Severity};
    use std::path::Path;

    fn file_with_issues(name: &str, count: usize, lines: usize) -> FileScanResult {
        let issues = (0..count)
            .map(|i| LineIssue {
                file: PathBuf::from(name),
                line: i + 1,
                code: "PY2-ITER-001".to_string(),
                message: String::new(),
                suggested_fix: String::new(),
                severity: Severity::Error,
                category: Category::Iterators,
                source: String::new(),
            })
            .collect();
        FileScanResult::new(Path::new(name).to_path_buf(), issues, lines)
    }

    fn scan_of(files: Vec<FileScanResult>) -> DirectoryScan {
        let summary = CorpusSummary::from_results(&files);
        DirectoryScan {
            root: PathBuf::from("."),
            files,
            summary,
            skipped: vec![],
            errors: vec![],
        }
    }

    #[test]
    fn buckets_split_at_the_quick_win_threshold() {
        let scan = scan_of(vec![
            file_with_issues("small.py", 2, 100),
            file_with_issues("dense.py", 20, 40),
            file_with_issues("large.py", 30, 3000),
        ]);
        let plan = prioritize(&scan);

        assert_eq!(plan.quick_wins.len(), 1);
        assert_eq!(plan.quick_wins[0].file, PathBuf::from("small.py"));

        // dense.py: 50 per 100 lines beats large.py's 1 per 100 lines.
        assert_eq!(plan.high_density[0].file, PathBuf::from("dense.py"));
        assert_eq!(plan.high_density[0].density, 50.0);

        assert_eq!(plan.major_refactors[0].file, PathBuf::from("large.py"));
        assert_eq!(plan.total_issues, 52);
    }

    #[test]
    fn zero_line_file_has_zero_density_without_error() {
        let scan = scan_of(vec![file_with_issues("weird.py", 6, 0)]);
        let plan = prioritize(&scan);
        assert_eq!(plan.high_density[0].density, 0.0);
    }

    #[test]
    fn priority_listing_signals_truncation() {
        let files: Vec<FileScanResult> = (0..25)
            .map(|i| file_with_issues(&format!("f{:02}.py", i), i + 1, 100))
            .collect();
        let plan = prioritize(&scan_of(files));

        assert_eq!(plan.priority_files.len(), 20);
        assert_eq!(plan.additional_files, 5);
        assert_eq!(plan.files_requiring_changes, 25);
    }

    #[test]
    fn effort_bands_render_minutes_hours_days() {
        assert_eq!(estimate_effort(0), "0 minutes");
        assert_eq!(estimate_effort(10), "20 minutes");
        assert_eq!(estimate_effort(60), "2.0 hours");
        assert_eq!(estimate_effort(480), "2.0 days");
    }
}
