//! Filesystem tool family: list, read, write, stat.

use crate::core::{ToolError, ToolResult};
use crate::io::reader::read_text_lossy;
use crate::io::walker::FileWalker;
use crate::io::writer::write_text_atomic;
use crate::server::handlers::{arg_bool, arg_str, arg_str_list};
use crate::server::tools::ServerState;
use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// `list_project_files {root, patterns?, exclude?}`
pub fn list_project_files(state: &ServerState, args: &Value) -> ToolResult<Value> {
    let root = PathBuf::from(arg_str(args, "root"));
    if !root.is_dir() {
        return Err(ToolError::InvalidDirectory { path: root });
    }
    let patterns = arg_str_list(args, "patterns").unwrap_or_default();
    let exclude = arg_str_list(args, "exclude").unwrap_or_else(|| state.default_exclude.clone());

    let all = FileWalker::new(root.clone())
        .with_name_patterns(patterns)
        .with_exclude_patterns(exclude)
        .walk()
        .map_err(|e| ToolError::InvalidPattern(e.to_string()))?;

    let limit = state.limits.max_files_per_operation;
    let truncated = all.len() > limit;
    let files: Vec<String> = all
        .iter()
        .take(limit)
        .map(|p| {
            p.strip_prefix(&root)
                .unwrap_or(p)
                .to_string_lossy()
                .to_string()
        })
        .collect();

    Ok(json!({
        "root": root,
        "files": files,
        "count": files.len(),
        "truncated": truncated,
    }))
}

/// `read_files {paths}`
pub fn read_files(state: &ServerState, args: &Value) -> ToolResult<Value> {
    let paths = arg_str_list(args, "paths").unwrap_or_default();
    check_batch_size(paths.len(), state)?;

    let mut results = Map::new();
    let mut errors = Map::new();
    for path in &paths {
        match read_text_lossy(Path::new(path), &state.limits) {
            Ok(outcome) => {
                // Cap the response payload, never the file on disk.
                let mut content = outcome.content;
                let mut truncated = false;
                if content.chars().count() > state.limits.max_code_length {
                    content = content.chars().take(state.limits.max_code_length).collect();
                    truncated = true;
                }
                results.insert(
                    path.clone(),
                    json!({
                        "content": content,
                        "truncated": truncated,
                        "size": outcome.size_bytes,
                    }),
                );
            }
            Err(err) => {
                errors.insert(path.clone(), Value::String(err.to_string()));
            }
        }
    }

    Ok(json!({
        "files": results,
        "errors": nullable(&errors),
        "read_count": results.len(),
        "error_count": errors.len(),
    }))
}

/// `write_files {files: {path: content}}` — each write is atomic; failures
/// are per-file and never abort the batch.
pub fn write_files(state: &ServerState, args: &Value) -> ToolResult<Value> {
    let files = match args.get("files").and_then(|v| v.as_object()) {
        Some(map) => map,
        None => return Err(ToolError::NoFilesProvided),
    };
    check_batch_size(files.len(), state)?;

    let mut results = Map::new();
    let mut errors = Map::new();
    for (path, content) in files {
        let content = content.as_str().unwrap_or("");
        if content.chars().count() > state.limits.max_code_length {
            errors.insert(
                path.clone(),
                Value::String(format!(
                    "Content too large ({} chars, limit {})",
                    content.chars().count(),
                    state.limits.max_code_length
                )),
            );
            continue;
        }
        match write_text_atomic(Path::new(path), content) {
            Ok(()) => {
                results.insert(
                    path.clone(),
                    json!({"written": true, "size": content.len()}),
                );
            }
            Err(err) => {
                errors.insert(path.clone(), Value::String(err.to_string()));
            }
        }
    }

    Ok(json!({
        "results": results,
        "errors": nullable(&errors),
        "written_count": results.len(),
        "error_count": errors.len(),
    }))
}

/// `stat_files {paths, include_hash?}`
pub fn stat_files(state: &ServerState, args: &Value) -> ToolResult<Value> {
    let paths = arg_str_list(args, "paths").unwrap_or_default();
    check_batch_size(paths.len(), state)?;
    let include_hash = arg_bool(args, "include_hash", false);

    let mut results = Map::new();
    let mut errors = Map::new();
    for path_str in &paths {
        let path = Path::new(path_str);
        if !path.exists() {
            errors.insert(path_str.clone(), Value::String("File not found".to_string()));
            continue;
        }
        match stat_one(path, include_hash, state) {
            Ok(info) => {
                results.insert(path_str.clone(), info);
            }
            Err(err) => {
                errors.insert(path_str.clone(), Value::String(err.to_string()));
            }
        }
    }

    Ok(json!({
        "files": results,
        "errors": nullable(&errors),
        "stat_count": results.len(),
        "error_count": errors.len(),
    }))
}

fn stat_one(path: &Path, include_hash: bool, state: &ServerState) -> ToolResult<Value> {
    let meta = fs::metadata(path).map_err(|e| ToolError::io(path, &e))?;
    let mut info = Map::new();
    info.insert("size".to_string(), json!(meta.len()));
    if let Ok(mtime) = meta.modified() {
        info.insert("mtime".to_string(), json!(format_systime(mtime)));
    }
    if let Ok(ctime) = meta.created() {
        info.insert("ctime".to_string(), json!(format_systime(ctime)));
    }
    info.insert("is_file".to_string(), json!(meta.is_file()));
    info.insert("is_dir".to_string(), json!(meta.is_dir()));

    if include_hash && meta.is_file() {
        if meta.len() <= state.limits.max_file_size_bytes {
            info.insert("sha256".to_string(), json!(hash_file(path)?));
        } else {
            info.insert("sha256".to_string(), Value::Null);
            info.insert("hash_skipped".to_string(), json!("File too large"));
        }
    }
    Ok(Value::Object(info))
}

fn format_systime(time: std::time::SystemTime) -> String {
    DateTime::<Utc>::from(time)
        .format("%Y-%m-%dT%H:%M:%SZ")
        .to_string()
}

fn hash_file(path: &Path) -> ToolResult<String> {
    let mut file = fs::File::open(path).map_err(|e| ToolError::io(path, &e))?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = file.read(&mut buf).map_err(|e| ToolError::io(path, &e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

fn nullable(map: &Map<String, Value>) -> Value {
    if map.is_empty() {
        Value::Null
    } else {
        Value::Object(map.clone())
    }
}

fn check_batch_size(requested: usize, state: &ServerState) -> ToolResult<()> {
    if requested > state.limits.max_files_per_operation {
        return Err(ToolError::TooManyFiles {
            requested,
            limit: state.limits.max_files_per_operation,
        });
    }
    Ok(())
}
