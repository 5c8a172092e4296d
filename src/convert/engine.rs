//! Per-file conversion orchestration and post-conversion validation.
//!
//! The engine never owns rewrite rules. It drives one file through the
//! conversion state machine: pre-scan, rewrite via the injected capability,
//! diff, optionally persist (backup first, fail closed), then re-scan the
//! converted output against both registries.

use crate::comparison::{lines_changed, unified_diff};
use crate::config::ScanLimits;
use crate::convert::rewriter::SyntaxRewriter;
use crate::convert::syntax::{check_syntax, SyntaxIssue};
use crate::core::{LineIssue, RuntimeRiskFlag, ToolError, ToolResult};
use crate::io::reader::read_text_lossy;
use crate::io::writer::write_text_atomic;
use crate::scanner::{scan_runtime_risks, scan_source};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Non-terminal outcome of the conversion step itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionStatus {
    /// No legacy patterns found, or the rewrite was a no-op
    AlreadyCompliant,
    /// Diff computed; nothing written
    ConvertedDryRun,
    /// Backup (if requested) persisted, then the target replaced atomically
    ConvertedWritten,
}

/// Terminal classification of converted output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    /// Valid syntax, no remaining legacy patterns, no runtime-risk flags
    Clean,
    /// Legacy patterns remain after conversion
    Incomplete,
    /// Syntactically clean but runtime-risk flags need human review
    NeedsReview,
    /// Output does not parse as Python 3
    Failed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewCount {
    pub high_severity: usize,
    pub medium_severity: usize,
    pub low_severity: usize,
}

/// Result of re-scanning one source text against syntax, the legacy
/// registry, and the runtime-risk registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub status: ValidationStatus,
    pub syntax_valid: bool,
    pub syntax_error: Option<SyntaxIssue>,
    pub remaining_patterns: Vec<LineIssue>,
    pub runtime_risks: Vec<RuntimeRiskFlag>,
    pub review_count: ReviewCount,
    pub test_recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutcome {
    pub file: PathBuf,
    pub status: ConversionStatus,
    pub lines_changed: usize,
    /// Unified diff, populated for dry runs
    pub diff: Option<String>,
    pub backup_file: Option<PathBuf>,
    /// Re-scan of the converted output; absent when already compliant
    pub validation: Option<ValidationReport>,
}

/// Validate one source text: syntax, remaining legacy patterns, runtime
/// risks, and derived test recommendations.
pub fn validate_source(path: &Path, source: &str) -> ValidationReport {
    let syntax = check_syntax(source);
    let remaining_patterns = scan_source(path, source);
    let runtime_risks = scan_runtime_risks(source);

    let mut review_count = ReviewCount::default();
    for flag in &runtime_risks {
        match flag.severity {
            crate::core::RiskSeverity::High => review_count.high_severity += 1,
            crate::core::RiskSeverity::Medium => review_count.medium_severity += 1,
            crate::core::RiskSeverity::Low => review_count.low_severity += 1,
        }
    }

    let status = if !syntax.valid {
        ValidationStatus::Failed
    } else if !remaining_patterns.is_empty() {
        ValidationStatus::Incomplete
    } else if !runtime_risks.is_empty() {
        ValidationStatus::NeedsReview
    } else {
        ValidationStatus::Clean
    };

    ValidationReport {
        status,
        syntax_valid: syntax.valid,
        syntax_error: syntax.error,
        test_recommendations: test_recommendations(&runtime_risks),
        remaining_patterns,
        runtime_risks,
        review_count,
    }
}

fn test_recommendations(risks: &[RuntimeRiskFlag]) -> Vec<String> {
    let has = |issue: &str| risks.iter().any(|r| r.issue == issue);
    let mut recommendations = Vec::new();

    if has("Division operator") {
        recommendations
            .push("Test all arithmetic operations for integer vs float division".to_string());
    }
    if has("File operations") || has("String encoding/decoding") {
        recommendations
            .push("Test file I/O with various encodings (UTF-8, Latin-1, etc.)".to_string());
    }
    if has("Pickle usage") {
        recommendations.push("Test pickle load/dump with data from Python 2".to_string());
    }
    if has("Socket operations") || has("Subprocess calls") {
        recommendations
            .push("Test network/subprocess operations for bytes vs str handling".to_string());
    }
    if recommendations.is_empty() {
        recommendations.push("Run existing test suite to verify behavior".to_string());
    }
    recommendations
}

pub struct ConversionEngine<'a> {
    rewriter: &'a dyn SyntaxRewriter,
    limits: &'a ScanLimits,
}

impl<'a> ConversionEngine<'a> {
    pub fn new(rewriter: &'a dyn SyntaxRewriter, limits: &'a ScanLimits) -> Self {
        Self { rewriter, limits }
    }

    /// Rewrite inline source, enforcing the code-length limit first.
    pub fn convert_source(&self, source: &str) -> ToolResult<String> {
        if source.chars().count() > self.limits.max_code_length {
            return Err(ToolError::CodeLengthLimitExceeded {
                length: source.chars().count(),
                limit: self.limits.max_code_length,
            });
        }
        self.rewriter.rewrite(source)
    }

    /// Drive one file through the conversion state machine.
    ///
    /// When `backup` is requested for a destructive run, the pre-conversion
    /// content is persisted first; a backup failure aborts before the target
    /// is touched.
    pub fn convert_file(
        &self,
        path: &Path,
        backup: bool,
        dry_run: bool,
    ) -> ToolResult<ConversionOutcome> {
        if !path.is_file() {
            return Err(ToolError::InvalidFile {
                path: path.to_path_buf(),
            });
        }
        let is_python = path
            .extension()
            .map(|ext| ext == "py" || ext == "pyw")
            .unwrap_or(false);
        if !is_python {
            return Err(ToolError::InvalidFileType {
                path: path.to_path_buf(),
            });
        }

        let original = read_text_lossy(path, self.limits)?.content;

        if scan_source(path, &original).is_empty() {
            log::debug!("{} has no legacy patterns; nothing to do", path.display());
            return Ok(ConversionOutcome {
                file: path.to_path_buf(),
                status: ConversionStatus::AlreadyCompliant,
                lines_changed: 0,
                diff: None,
                backup_file: None,
                validation: None,
            });
        }

        if !self.rewriter.is_available() {
            return Err(ToolError::MissingDependency(
                self.rewriter.name().to_string(),
            ));
        }
        let converted = self.rewriter.rewrite(&original)?;

        if converted == original {
            return Ok(ConversionOutcome {
                file: path.to_path_buf(),
                status: ConversionStatus::AlreadyCompliant,
                lines_changed: 0,
                diff: None,
                backup_file: None,
                validation: None,
            });
        }

        let changed = lines_changed(&original, &converted);
        let validation = validate_source(path, &converted);

        if dry_run {
            let diff = unified_diff(
                &original,
                &converted,
                &format!("{} (original)", path.display()),
                &format!("{} (converted)", path.display()),
            );
            return Ok(ConversionOutcome {
                file: path.to_path_buf(),
                status: ConversionStatus::ConvertedDryRun,
                lines_changed: changed,
                diff: Some(diff),
                backup_file: None,
                validation: Some(validation),
            });
        }

        let backup_file = if backup {
            let backup_path = backup_path_for(path);
            write_text_atomic(&backup_path, &original)?;
            Some(backup_path)
        } else {
            None
        };
        write_text_atomic(path, &converted)?;
        log::info!(
            "converted {} ({} lines changed, status {:?})",
            path.display(),
            changed,
            validation.status
        );

        Ok(ConversionOutcome {
            file: path.to_path_buf(),
            status: ConversionStatus::ConvertedWritten,
            lines_changed: changed,
            diff: None,
            backup_file,
            validation: Some(validation),
        })
    }
}

/// Derived backup name: the original path with `.py2.bak` appended.
pub fn backup_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".py2.bak");
    PathBuf::from(name)
}
