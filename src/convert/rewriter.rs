//! Syntax-rewriting capabilities.
//!
//! The actual Python 2 → 3 rewrite rules live in an external tool; this
//! module wraps it behind the `SyntaxRewriter` trait so the conversion
//! engine can be driven by a stub in tests and callers can observe
//! availability instead of failing on first use.

use crate::core::{ToolError, ToolResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

/// An injected capability that turns legacy-dialect source into modern
/// source. Implementations own the rewrite rules; the engine owns
/// orchestration, diffing, and re-validation.
pub trait SyntaxRewriter {
    fn name(&self) -> &str;
    fn is_available(&self) -> bool;
    fn rewrite(&self, source: &str) -> ToolResult<String>;
}

/// The `2to3` command-line tool, located at process start.
pub struct External2to3 {
    program: Option<PathBuf>,
}

impl External2to3 {
    pub fn discover() -> Self {
        let program = which::which("2to3").ok();
        match &program {
            Some(path) => log::debug!("found 2to3 at {}", path.display()),
            None => log::warn!("2to3 not found; conversion tools will be unavailable"),
        }
        Self { program }
    }
}

impl SyntaxRewriter for External2to3 {
    fn name(&self) -> &str {
        "2to3"
    }

    fn is_available(&self) -> bool {
        self.program.is_some()
    }

    fn rewrite(&self, source: &str) -> ToolResult<String> {
        let program = self
            .program
            .as_ref()
            .ok_or_else(|| ToolError::MissingDependency("2to3".to_string()))?;

        // 2to3 rewrites in place, so stage the source in a temp file; the
        // file unlinks itself on every exit path.
        let mut tmp = tempfile::Builder::new()
            .suffix(".py")
            .tempfile()
            .map_err(|e| ToolError::io("<tempfile>", &e))?;
        tmp.write_all(source.as_bytes())
            .map_err(|e| ToolError::io(tmp.path(), &e))?;
        tmp.flush().map_err(|e| ToolError::io(tmp.path(), &e))?;

        let output = Command::new(program)
            .arg("-w")
            .arg("-n")
            .arg(tmp.path())
            .output()
            .map_err(|e| ToolError::io(program, &e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ToolError::ParseError {
                line: 0,
                message: format!("2to3 failed: {}", stderr.trim()),
            });
        }

        fs::read_to_string(tmp.path()).map_err(|e| ToolError::io(tmp.path(), &e))
    }
}

static PRINT_STATEMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)print\s+(.+?)(\s*#.*)?$").expect("invalid print pattern"));

/// Built-in line-by-line rewrite of Python 2 print statements into print()
/// calls. Narrower than the external tool but always available.
pub fn convert_print_statements(code: &str) -> String {
    code.split('\n')
        .map(convert_print_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn convert_print_line(line: &str) -> String {
    let caps = match PRINT_STATEMENT.captures(line) {
        Some(caps) => caps,
        None => return line.to_string(),
    };
    let content = caps[2].trim_end();
    // Already a function call
    if content.starts_with('(') {
        return line.to_string();
    }
    let indent = &caps[1];
    let comment = caps.get(3).map(|m| m.as_str()).unwrap_or("");

    // A trailing comma suppressed the newline in Python 2
    match content.strip_suffix(',') {
        Some(stripped) => format!("{}print({}, end=' '){}", indent, stripped.trim_end(), comment),
        None => format!("{}print({}){}", indent, content, comment),
    }
}
