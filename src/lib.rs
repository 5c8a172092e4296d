// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod comparison;
pub mod config;
pub mod convert;
pub mod core;
pub mod io;
pub mod patterns;
pub mod report;
pub mod scanner;
pub mod server;

// Re-export commonly used types
pub use crate::config::{Config, ScanLimits};
pub use crate::core::{
    Category, ConversionDelta, CorpusSummary, DirectoryScan, FileScanResult, LineIssue,
    RiskSeverity, RuntimeRiskFlag, Severity, SkipReason, SkippedFile, ToolError, ToolResult,
};

pub use crate::comparison::{reconcile, DiffStats};
pub use crate::convert::{
    check_syntax, convert_print_statements, ConversionEngine, External2to3, SyntaxRewriter,
    ValidationStatus,
};
pub use crate::patterns::{legacy_rules, rule_by_code, runtime_risk_rules, PatternRule};
pub use crate::report::{estimate_effort, prioritize, MigrationPlan};
pub use crate::scanner::{scan_lines, scan_path, scan_runtime_risks, scan_source};
pub use crate::server::{run_stdio, ServerState, ToolKind, ToolResponse};
