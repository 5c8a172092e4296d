//! Common type definitions used across the codebase

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Severity levels for legacy-pattern issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

/// Categories of legacy constructs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "iterators")]
    Iterators,
    #[serde(rename = "text-types")]
    TextTypes,
    #[serde(rename = "operators")]
    Operators,
    #[serde(rename = "syntax")]
    Syntax,
    #[serde(rename = "stdlib-move")]
    StdlibMove,
    #[serde(rename = "builtins")]
    Builtins,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Iterators => "iterators",
            Category::TextTypes => "text-types",
            Category::Operators => "operators",
            Category::Syntax => "syntax",
            Category::StdlibMove => "stdlib-move",
            Category::Builtins => "builtins",
        }
    }
}

/// Severity scale for runtime-risk flags, independent of legacy severities
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskSeverity {
    High,
    Medium,
    Low,
}

impl RiskSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskSeverity::High => "high",
            RiskSeverity::Medium => "medium",
            RiskSeverity::Low => "low",
        }
    }
}

/// One occurrence of a legacy pattern on one line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineIssue {
    pub file: PathBuf,
    pub line: usize,
    pub code: String,
    pub message: String,
    pub suggested_fix: String,
    pub severity: Severity,
    pub category: Category,
    /// Trimmed source text of the flagged line
    pub source: String,
}

/// One occurrence of a runtime-semantic risk on one line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeRiskFlag {
    pub line: usize,
    pub issue: String,
    pub reason: String,
    pub severity: RiskSeverity,
    pub source: String,
}

/// Scan aggregate for a single file.
///
/// Invariant: `total == issues.len()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileScanResult {
    pub path: PathBuf,
    pub issues: Vec<LineIssue>,
    pub total: usize,
    /// Line count of the scanned file, used for density calculations
    pub lines: usize,
}

impl FileScanResult {
    pub fn new(path: PathBuf, issues: Vec<LineIssue>, lines: usize) -> Self {
        let total = issues.len();
        Self {
            path,
            issues,
            total,
            lines,
        }
    }

    /// Issues per line. A zero-line file has density 0.
    pub fn density(&self) -> f64 {
        if self.lines == 0 {
            0.0
        } else {
            self.total as f64 / self.lines as f64
        }
    }
}

/// Why a file was skipped during an aggregate scan.
///
/// Skipped files are reported distinctly: "not scanned" never counts as
/// "clean" downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    SizeLimit,
    OperationLimit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// A per-file failure recorded during a batch scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileError {
    pub path: PathBuf,
    pub message: String,
}

/// Aggregate over a scanned file set.
///
/// Invariants: `sum(by_rule) == total_issues` and
/// `files_with_issues <= files_scanned`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorpusSummary {
    pub files_scanned: usize,
    pub files_with_issues: usize,
    pub total_issues: usize,
    pub by_category: BTreeMap<String, usize>,
    pub by_severity: BTreeMap<String, usize>,
    pub by_rule: BTreeMap<String, usize>,
}

impl CorpusSummary {
    /// Pure fold over per-file results; nothing is mutated incrementally
    /// outside this constructor.
    pub fn from_results(results: &[FileScanResult]) -> Self {
        let mut summary = CorpusSummary {
            files_scanned: results.len(),
            ..Default::default()
        };
        for file in results {
            if file.total > 0 {
                summary.files_with_issues += 1;
            }
            for issue in &file.issues {
                summary.total_issues += 1;
                *summary
                    .by_category
                    .entry(issue.category.as_str().to_string())
                    .or_insert(0) += 1;
                *summary
                    .by_severity
                    .entry(issue.severity.as_str().to_string())
                    .or_insert(0) += 1;
                *summary.by_rule.entry(issue.code.clone()).or_insert(0) += 1;
            }
        }
        summary
    }
}

/// Full result of one aggregate directory scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryScan {
    pub root: PathBuf,
    pub files: Vec<FileScanResult>,
    pub summary: CorpusSummary,
    pub skipped: Vec<SkippedFile>,
    pub errors: Vec<FileError>,
}

/// Derived, transient report pairing an original scan with a converted scan
/// of the same logical file.
///
/// `fixed` is floored at zero per rule; `introduced` tracks rules present
/// only in the converted output and is kept separate from `remaining` so a
/// conversion that introduces a new pattern never skews the fix rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionDelta {
    pub fixed_by_rule: BTreeMap<String, usize>,
    pub remaining_by_rule: BTreeMap<String, usize>,
    pub introduced_by_rule: BTreeMap<String, usize>,
    pub total_original: usize,
    pub total_fixed: usize,
    pub total_remaining: usize,
    pub total_introduced: usize,
    /// `None` when the original scan had no issues (reported as "N/A")
    pub fix_rate: Option<f64>,
    pub lines_added: usize,
    pub lines_removed: usize,
}

impl ConversionDelta {
    /// Percentage rendering used in reports; "N/A" when undefined.
    pub fn fix_rate_display(&self) -> String {
        match self.fix_rate {
            Some(rate) => format!("{:.1}%", rate * 100.0),
            None => "N/A".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn issue(code: &str, category: Category, severity: Severity) -> LineIssue {
        LineIssue {
            file: PathBuf::from("a.py"),
            line: 1,
            code: code.to_string(),
            message: String::new(),
            suggested_fix: String::new(),
            severity,
            category,
            source: String::new(),
        }
    }

    #[test]
    fn corpus_summary_total_matches_rule_counts() {
        let files = vec![
            FileScanResult::new(
                Path::new("a.py").to_path_buf(),
                vec![
                    issue("PY2-ITER-001", Category::Iterators, Severity::Error),
                    issue("PY2-ITER-001", Category::Iterators, Severity::Error),
                    issue("PY2-TYPE-004", Category::TextTypes, Severity::Info),
                ],
                10,
            ),
            FileScanResult::new(Path::new("b.py").to_path_buf(), vec![], 5),
        ];
        let summary = CorpusSummary::from_results(&files);
        assert_eq!(summary.files_scanned, 2);
        assert_eq!(summary.files_with_issues, 1);
        assert_eq!(summary.total_issues, 3);
        assert_eq!(summary.by_rule.values().sum::<usize>(), summary.total_issues);
        assert_eq!(summary.by_rule["PY2-ITER-001"], 2);
        assert_eq!(summary.by_severity["info"], 1);
    }

    #[test]
    fn density_on_empty_file_is_zero() {
        let result = FileScanResult::new(PathBuf::from("empty.py"), vec![], 0);
        assert_eq!(result.density(), 0.0);
    }
}
