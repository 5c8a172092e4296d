pub mod errors;
pub mod types;

pub use errors::{ToolError, ToolResult};
pub use types::{
    Category, ConversionDelta, CorpusSummary, DirectoryScan, FileError, FileScanResult, LineIssue,
    RiskSeverity, RuntimeRiskFlag, Severity, SkipReason, SkippedFile,
};
