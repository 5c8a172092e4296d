//! Shared error types for the application

use std::path::PathBuf;
use thiserror::Error;

/// Error taxonomy surfaced through the tool response envelope.
///
/// Validation variants are raised before any filesystem work beyond
/// existence checks; per-file failures inside batch operations are recorded
/// against the file instead of being raised, so only whole-operation
/// precondition failures abort a call. Nothing is retried automatically.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("'{path}' is not a valid directory")]
    InvalidDirectory { path: PathBuf },

    #[error("'{path}' is not a valid file")]
    InvalidFile { path: PathBuf },

    #[error("'{path}' is not a Python file")]
    InvalidFileType { path: PathBuf },

    #[error("File size ({size} bytes) exceeds limit ({limit} bytes)")]
    FileSizeLimitExceeded {
        path: PathBuf,
        size: u64,
        limit: u64,
    },

    #[error("Code length ({length} chars) exceeds limit ({limit} chars)")]
    CodeLengthLimitExceeded { length: usize, limit: usize },

    #[error("Requested {requested} files, limit is {limit}")]
    TooManyFiles { requested: usize, limit: usize },

    #[error("No files provided for scanning")]
    NoFilesProvided,

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("{0} is required but was not found on this system")]
    MissingDependency(String),

    #[error("Syntax error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("I/O error: {message} (path: {path})")]
    Io { path: PathBuf, message: String },
}

impl ToolError {
    /// Stable error-type name carried in the response envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            ToolError::InvalidDirectory { .. } => "InvalidDirectory",
            ToolError::InvalidFile { .. } => "InvalidFile",
            ToolError::InvalidFileType { .. } => "InvalidFileType",
            ToolError::FileSizeLimitExceeded { .. } => "FileSizeLimitExceeded",
            ToolError::CodeLengthLimitExceeded { .. } => "CodeLengthLimitExceeded",
            ToolError::TooManyFiles { .. } => "TooManyFiles",
            ToolError::NoFilesProvided => "NoFilesProvided",
            ToolError::InvalidPattern(_) => "InvalidPattern",
            ToolError::MissingDependency(_) => "MissingDependency",
            ToolError::ParseError { .. } => "ParseError",
            ToolError::Io { .. } => "IoError",
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: &std::io::Error) -> Self {
        ToolError::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }
}

/// Result type alias using the tool error taxonomy
pub type ToolResult<T> = std::result::Result<T, ToolError>;
