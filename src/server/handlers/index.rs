//! Code-index tool family: regex text search and import discovery.

use crate::core::{ToolError, ToolResult};
use crate::io::reader::read_text_lossy;
use crate::io::walker::FileWalker;
use crate::server::handlers::{arg_bool, arg_str, arg_str_list, arg_usize};
use crate::server::tools::ServerState;
use regex::RegexBuilder;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Candidate files for a search rooted at a path that may be a single file
/// or a directory, capped at the per-operation limit.
fn collect_files(
    root: &Path,
    name_patterns: Vec<String>,
    exclude: Vec<String>,
    state: &ServerState,
) -> ToolResult<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }
    if !root.is_dir() {
        return Ok(vec![]);
    }
    let mut files = FileWalker::new(root.to_path_buf())
        .with_name_patterns(name_patterns)
        .with_exclude_patterns(exclude)
        .walk()
        .map_err(|e| ToolError::InvalidPattern(e.to_string()))?;
    files.truncate(state.limits.max_files_per_operation);
    Ok(files)
}

/// `search_text {pattern, path, file_patterns?, exclude?, case_sensitive?,
/// context_lines?}`
pub fn search_text(state: &ServerState, args: &Value) -> ToolResult<Value> {
    let pattern = arg_str(args, "pattern");
    if pattern.is_empty() {
        return Err(ToolError::InvalidPattern("Pattern cannot be empty".to_string()));
    }
    let case_sensitive = arg_bool(args, "case_sensitive", true);
    let context_lines = arg_usize(args, "context_lines", 0);

    let regex = RegexBuilder::new(&pattern)
        .case_insensitive(!case_sensitive)
        .build()
        .map_err(|e| ToolError::InvalidPattern(format!("Invalid regex pattern: {}", e)))?;

    let root = PathBuf::from(arg_str(args, "path"));
    let file_patterns = arg_str_list(args, "file_patterns").unwrap_or_default();
    let exclude = arg_str_list(args, "exclude").unwrap_or_else(|| state.default_exclude.clone());
    let files = collect_files(&root, file_patterns, exclude, state)?;

    let max_results = state.limits.max_results;
    let mut matches = Vec::new();
    let mut files_with_matches = 0usize;
    let mut files_searched = 0usize;

    'files: for path in &files {
        let outcome = match read_text_lossy(path, &state.limits) {
            Ok(outcome) => outcome,
            // Oversized and unreadable files are passed over, not fatal.
            Err(_) => continue,
        };
        files_searched += 1;
        let lines: Vec<&str> = outcome.content.lines().collect();
        let mut matched_in_file = false;

        for (idx, line) in lines.iter().enumerate() {
            for found in regex.find_iter(line) {
                if matches.len() >= max_results {
                    break 'files;
                }
                let mut entry = Map::new();
                entry.insert("file".to_string(), json!(path));
                entry.insert("line".to_string(), json!(idx + 1));
                entry.insert("column".to_string(), json!(found.start() + 1));
                entry.insert("text".to_string(), json!(line));
                entry.insert("match".to_string(), json!(found.as_str()));
                if context_lines > 0 {
                    let start = idx.saturating_sub(context_lines);
                    let end = (idx + 1 + context_lines).min(lines.len());
                    if start < idx {
                        entry.insert("context_before".to_string(), json!(lines[start..idx]));
                    }
                    if idx + 1 < end {
                        entry.insert("context_after".to_string(), json!(lines[idx + 1..end]));
                    }
                }
                matches.push(Value::Object(entry));
                if !matched_in_file {
                    matched_in_file = true;
                    files_with_matches += 1;
                }
            }
        }
    }

    let truncated = matches.len() >= max_results;
    Ok(json!({
        "matches": matches,
        "total_matches": matches.len(),
        "files_searched": files_searched,
        "files_with_matches": files_with_matches,
        "truncated": truncated,
    }))
}

/// `find_import {module, path, exclude?}` — Python import statements that
/// mention the module, flat plus grouped by file.
pub fn find_import(state: &ServerState, args: &Value) -> ToolResult<Value> {
    let module = arg_str(args, "module");
    if module.is_empty() {
        return Err(ToolError::InvalidPattern("Module name cannot be empty".to_string()));
    }

    // import module / from module import x / from pkg import module
    let escaped = regex::escape(&module);
    let combined = format!(
        r"\bimport\s+[\w,\s]*\b{m}\b|\bfrom\s+{m}(?:\.\w+)*\s+import\b|\bfrom\s+\w+(?:\.\w+)*\s+import\s+[\w,\s]*\b{m}\b",
        m = escaped
    );
    let regex = RegexBuilder::new(&combined)
        .build()
        .map_err(|e| ToolError::InvalidPattern(format!("Invalid module pattern: {}", e)))?;

    let root = PathBuf::from(arg_str(args, "path"));
    let exclude = arg_str_list(args, "exclude").unwrap_or_else(|| state.default_exclude.clone());
    let files = collect_files(&root, vec!["*.py".to_string()], exclude, state)?;

    let max_results = state.limits.max_results;
    let mut imports = Vec::new();
    let mut by_file: BTreeMap<String, Vec<Value>> = BTreeMap::new();
    let mut files_searched = 0usize;

    'files: for path in &files {
        let outcome = match read_text_lossy(path, &state.limits) {
            Ok(outcome) => outcome,
            Err(_) => continue,
        };
        files_searched += 1;
        for (idx, line) in outcome.content.lines().enumerate() {
            if regex.is_match(line) {
                if imports.len() >= max_results {
                    break 'files;
                }
                imports.push(json!({
                    "file": path,
                    "line": idx + 1,
                    "text": line,
                }));
                by_file
                    .entry(path.to_string_lossy().to_string())
                    .or_default()
                    .push(json!({"line": idx + 1, "text": line}));
            }
        }
    }

    let truncated = imports.len() >= max_results;
    Ok(json!({
        "module": module,
        "imports": imports,
        "by_file": by_file,
        "total_imports": imports.len(),
        "files_searched": files_searched,
        "files_with_imports": by_file.len(),
        "truncated": truncated,
    }))
}
