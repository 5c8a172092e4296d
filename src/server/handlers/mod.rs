//! Tool handlers grouped by family. Each handler validates its arguments,
//! performs the operation, and returns the `data` payload; envelope
//! wrapping happens at the dispatch layer.

pub mod fs;
pub mod index;
pub mod migrate;

use serde_json::Value;

pub(crate) fn arg_str(args: &Value, key: &str) -> String {
    args[key].as_str().unwrap_or("").to_string()
}

pub(crate) fn arg_str_list(args: &Value, key: &str) -> Option<Vec<String>> {
    args.get(key)?.as_array().map(|items| {
        items
            .iter()
            .filter_map(|v| v.as_str())
            .map(|s| s.to_string())
            .collect()
    })
}

pub(crate) fn arg_bool(args: &Value, key: &str, default: bool) -> bool {
    args.get(key).and_then(|v| v.as_bool()).unwrap_or(default)
}

pub(crate) fn arg_usize(args: &Value, key: &str, default: usize) -> usize {
    args.get(key)
        .and_then(|v| v.as_u64())
        .map(|n| n as usize)
        .unwrap_or(default)
}
