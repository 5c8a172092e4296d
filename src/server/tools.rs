//! The closed set of tool operations and their dispatch table.

use crate::config::ScanLimits;
use crate::convert::rewriter::{External2to3, SyntaxRewriter};
use crate::core::ToolResult;
use crate::server::envelope::{metadata_block, ToolResponse};
use crate::server::handlers;
use serde_json::{json, Value};

/// Shared, immutable per-process state. There is no other shared state
/// between invocations: every call re-reads from disk.
pub struct ServerState {
    pub limits: ScanLimits,
    pub default_exclude: Vec<String>,
    pub rewriter: Box<dyn SyntaxRewriter>,
}

impl ServerState {
    pub fn new(limits: ScanLimits, exclude: Vec<String>) -> Self {
        Self {
            limits,
            default_exclude: exclude,
            rewriter: Box::new(External2to3::discover()),
        }
    }

    pub fn with_rewriter(
        limits: ScanLimits,
        exclude: Vec<String>,
        rewriter: Box<dyn SyntaxRewriter>,
    ) -> Self {
        Self {
            limits,
            default_exclude: exclude,
            rewriter,
        }
    }

    #[cfg(test)]
    pub(crate) fn for_tests(limits: ScanLimits) -> Self {
        Self::new(limits, crate::config::default_exclude_patterns())
    }

    pub fn metadata(&self) -> Value {
        metadata_block(&self.limits, self.rewriter.is_available())
    }
}

/// Every tool this server exposes. The set is closed; dispatch is a match,
/// not reflection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    ListProjectFiles,
    ReadFiles,
    WriteFiles,
    StatFiles,
    SearchText,
    FindImport,
    AnalyzeCode,
    ScanCompat,
    AnalyzeDirectory,
    MigrationReport,
    ConvertCode,
    ConvertPrintStatements,
    CheckSyntax,
    GetMigrationGuide,
    ConvertFile,
    ValidateConversion,
    ConversionReport,
}

impl ToolKind {
    pub const ALL: &'static [ToolKind] = &[
        ToolKind::ListProjectFiles,
        ToolKind::ReadFiles,
        ToolKind::WriteFiles,
        ToolKind::StatFiles,
        ToolKind::SearchText,
        ToolKind::FindImport,
        ToolKind::AnalyzeCode,
        ToolKind::ScanCompat,
        ToolKind::AnalyzeDirectory,
        ToolKind::MigrationReport,
        ToolKind::ConvertCode,
        ToolKind::ConvertPrintStatements,
        ToolKind::CheckSyntax,
        ToolKind::GetMigrationGuide,
        ToolKind::ConvertFile,
        ToolKind::ValidateConversion,
        ToolKind::ConversionReport,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::ListProjectFiles => "list_project_files",
            ToolKind::ReadFiles => "read_files",
            ToolKind::WriteFiles => "write_files",
            ToolKind::StatFiles => "stat_files",
            ToolKind::SearchText => "search_text",
            ToolKind::FindImport => "find_import",
            ToolKind::AnalyzeCode => "analyze_code",
            ToolKind::ScanCompat => "scan_compat",
            ToolKind::AnalyzeDirectory => "analyze_directory",
            ToolKind::MigrationReport => "migration_report",
            ToolKind::ConvertCode => "convert_code",
            ToolKind::ConvertPrintStatements => "convert_print_statements",
            ToolKind::CheckSyntax => "check_syntax",
            ToolKind::GetMigrationGuide => "get_migration_guide",
            ToolKind::ConvertFile => "convert_file",
            ToolKind::ValidateConversion => "validate_conversion",
            ToolKind::ConversionReport => "conversion_report",
        }
    }

    pub fn from_name(name: &str) -> Option<ToolKind> {
        ToolKind::ALL.iter().copied().find(|t| t.name() == name)
    }

    fn handle(&self, state: &ServerState, args: &Value) -> ToolResult<Value> {
        match self {
            ToolKind::ListProjectFiles => handlers::fs::list_project_files(state, args),
            ToolKind::ReadFiles => handlers::fs::read_files(state, args),
            ToolKind::WriteFiles => handlers::fs::write_files(state, args),
            ToolKind::StatFiles => handlers::fs::stat_files(state, args),
            ToolKind::SearchText => handlers::index::search_text(state, args),
            ToolKind::FindImport => handlers::index::find_import(state, args),
            ToolKind::AnalyzeCode => handlers::migrate::analyze_code(state, args),
            ToolKind::ScanCompat => handlers::migrate::scan_compat(state, args),
            ToolKind::AnalyzeDirectory => handlers::migrate::analyze_directory(state, args),
            ToolKind::MigrationReport => handlers::migrate::migration_report(state, args),
            ToolKind::ConvertCode => handlers::migrate::convert_code(state, args),
            ToolKind::ConvertPrintStatements => {
                handlers::migrate::convert_print_statements(state, args)
            }
            ToolKind::CheckSyntax => handlers::migrate::check_syntax_tool(state, args),
            ToolKind::GetMigrationGuide => handlers::migrate::get_migration_guide(state, args),
            ToolKind::ConvertFile => handlers::migrate::convert_file(state, args),
            ToolKind::ValidateConversion => handlers::migrate::validate_conversion(state, args),
            ToolKind::ConversionReport => handlers::migrate::conversion_report(state, args),
        }
    }
}

/// Run one tool call and wrap the outcome in the response envelope.
pub fn dispatch(state: &ServerState, name: &str, args: &Value) -> ToolResponse {
    let kind = match ToolKind::from_name(name) {
        Some(kind) => kind,
        None => {
            let err = crate::core::ToolError::InvalidPattern(format!("Unknown tool: {}", name));
            return ToolResponse::failure(name, &err, None, state.metadata());
        }
    };

    log::debug!("dispatching {}", name);
    match kind.handle(state, args) {
        Ok(data) => ToolResponse::success(name, data, state.metadata()),
        Err(err) => {
            log::warn!("{} failed: {}", name, err);
            ToolResponse::failure(name, &err, None, state.metadata())
        }
    }
}

/// Tool descriptors advertised through `tools/list`.
pub fn tool_definitions() -> Value {
    json!([
        {
            "name": "list_project_files",
            "description": "List files in a directory with optional pattern matching and exclusions. Returns relative paths.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "root": {"type": "string", "description": "Root directory to list files from"},
                    "patterns": {"type": "array", "items": {"type": "string"}, "description": "Glob patterns to include (e.g., ['*.py']). Empty means all files."},
                    "exclude": {"type": "array", "items": {"type": "string"}, "description": "Patterns to exclude (e.g., ['venv', '__pycache__'])"}
                },
                "required": ["root"]
            }
        },
        {
            "name": "read_files",
            "description": "Read contents of multiple files. Returns file contents as key-value pairs with truncation if too large.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "paths": {"type": "array", "items": {"type": "string"}, "description": "List of file paths to read"}
                },
                "required": ["paths"]
            }
        },
        {
            "name": "write_files",
            "description": "Write content to multiple files atomically (temp file + rename). Reports per-file success/failure.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "files": {"type": "object", "description": "Mapping of file paths to content to write", "additionalProperties": {"type": "string"}}
                },
                "required": ["files"]
            }
        },
        {
            "name": "stat_files",
            "description": "Get file metadata including size, modification time, and optional hash.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "paths": {"type": "array", "items": {"type": "string"}, "description": "List of file paths to get stats for"},
                    "include_hash": {"type": "boolean", "description": "Include SHA256 hash of file contents (default: false)"}
                },
                "required": ["paths"]
            }
        },
        {
            "name": "search_text",
            "description": "Search for text patterns in files using regex. Returns matches with file, line, column, and context.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "pattern": {"type": "string", "description": "Regex pattern to search for"},
                    "path": {"type": "string", "description": "Directory or file to search in"},
                    "file_patterns": {"type": "array", "items": {"type": "string"}, "description": "Glob patterns for files to include"},
                    "exclude": {"type": "array", "items": {"type": "string"}, "description": "Patterns to exclude"},
                    "case_sensitive": {"type": "boolean", "description": "Case sensitive search (default: true)"},
                    "context_lines": {"type": "integer", "description": "Number of context lines before/after match (default: 0)"}
                },
                "required": ["pattern", "path"]
            }
        },
        {
            "name": "find_import",
            "description": "Find all imports of a module across files. Searches for import statements by module name or fragment.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "module": {"type": "string", "description": "Module name or fragment to find (e.g., 'os', 'json')"},
                    "path": {"type": "string", "description": "Directory to search in"},
                    "exclude": {"type": "array", "items": {"type": "string"}, "description": "Patterns to exclude"}
                },
                "required": ["module", "path"]
            }
        },
        {
            "name": "analyze_code",
            "description": "Analyze Python code for Python 2 patterns that need migration to Python 3. Returns issues with line numbers and descriptions.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "code": {"type": "string", "description": "Python code to analyze"}
                },
                "required": ["code"]
            }
        },
        {
            "name": "scan_compat",
            "description": "Run compatibility scan on specific files to detect Python 2 patterns. Returns classified issues with severity, category, and suggested fixes.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "files": {"type": "array", "items": {"type": "string"}, "description": "List of file paths to analyze"}
                },
                "required": ["files"]
            }
        },
        {
            "name": "analyze_directory",
            "description": "Scan a directory for Python 2 patterns across all .py files. Returns a summary report with issue counts per file.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "path": {"type": "string", "description": "Directory path to scan"},
                    "exclude": {"type": "array", "items": {"type": "string"}, "description": "Patterns to exclude"}
                },
                "required": ["path"]
            }
        },
        {
            "name": "migration_report",
            "description": "Generate a comprehensive migration report for a directory with prioritized files and effort estimates.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "path": {"type": "string", "description": "Directory path to analyze"},
                    "exclude": {"type": "array", "items": {"type": "string"}, "description": "Patterns to exclude"}
                },
                "required": ["path"]
            }
        },
        {
            "name": "convert_code",
            "description": "Run the external rewriter on inline code and return the converted source with a diff.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "code": {"type": "string", "description": "Python 2 code to convert"}
                },
                "required": ["code"]
            }
        },
        {
            "name": "convert_print_statements",
            "description": "Convert Python 2 print statements to Python 3 print() functions.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "code": {"type": "string", "description": "Python code with print statements"}
                },
                "required": ["code"]
            }
        },
        {
            "name": "check_syntax",
            "description": "Check if code is valid Python 3 syntax.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "code": {"type": "string", "description": "Python code to check"}
                },
                "required": ["code"]
            }
        },
        {
            "name": "get_migration_guide",
            "description": "Get a migration guide for a specific Python 2 to 3 issue.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "issue": {"type": "string", "description": "The issue type (e.g., 'print', 'unicode', 'dict_methods', 'exceptions')"}
                },
                "required": ["issue"]
            }
        },
        {
            "name": "convert_file",
            "description": "Convert a Python 2 file to Python 3 in place, with automatic backup.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "file_path": {"type": "string", "description": "Path to the Python file to convert"},
                    "backup": {"type": "boolean", "description": "Create a .py2.bak backup file (default: true)"},
                    "dry_run": {"type": "boolean", "description": "Show changes without writing (default: false)"}
                },
                "required": ["file_path"]
            }
        },
        {
            "name": "validate_conversion",
            "description": "Validate a converted Python file and identify issues requiring human or AI review. Returns syntax check, remaining patterns, and flags for manual investigation.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "file_path": {"type": "string", "description": "Path to the converted Python file to validate"}
                },
                "required": ["file_path"]
            }
        },
        {
            "name": "conversion_report",
            "description": "Generate a post-conversion report comparing original and converted files. Shows what changed, what needs review, and fix rate.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "original_path": {"type": "string", "description": "Path to original file (or .py2.bak backup)"},
                    "converted_path": {"type": "string", "description": "Path to converted Python 3 file"}
                },
                "required": ["original_path", "converted_path"]
            }
        }
    ])
}
