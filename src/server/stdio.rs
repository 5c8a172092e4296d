//! Newline-delimited JSON-RPC 2.0 transport over stdio.
//!
//! Requests are processed strictly one at a time: each tool invocation runs
//! to completion before the next line is read, so the subsystem is
//! non-reentrant by construction.

use crate::server::tools::{dispatch, tool_definitions, ServerState};
use serde_json::{json, Value};
use std::io::{BufRead, Write};

const PROTOCOL_VERSION: &str = "2025-06-18";
const QUICKREF_URI: &str = "guide://py2to3-quickref";

/// Serve requests from stdin until EOF.
pub fn run_stdio(state: &ServerState) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    log::info!(
        "tool server ready ({} tools, rewriter available: {})",
        crate::server::tools::ToolKind::ALL.len(),
        state.rewriter.is_available()
    );

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if let Some(response) = handle_line(state, &line) {
            let mut out = stdout.lock();
            writeln!(out, "{}", response)?;
            out.flush()?;
        }
    }
    Ok(())
}

/// Handle one raw request line; `None` means a notification with no reply.
pub fn handle_line(state: &ServerState, line: &str) -> Option<String> {
    let message: Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(_) => {
            return Some(
                json!({
                    "jsonrpc": "2.0",
                    "id": null,
                    "error": {"code": -32700, "message": "Parse error"}
                })
                .to_string(),
            );
        }
    };

    let method = message["method"].as_str().unwrap_or("");
    if method.starts_with("notifications/") {
        return None;
    }
    let id = message.get("id").cloned().unwrap_or(Value::Null);

    let response = match method {
        "initialize" => json!({
            "jsonrpc": "2.0",
            "id": id,
            "result": {
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {"tools": {}, "resources": {}},
                "serverInfo": {
                    "name": env!("CARGO_PKG_NAME"),
                    "version": env!("CARGO_PKG_VERSION"),
                },
            }
        }),
        "tools/list" => json!({
            "jsonrpc": "2.0",
            "id": id,
            "result": {"tools": tool_definitions()}
        }),
        "tools/call" => {
            let name = message["params"]["name"].as_str().unwrap_or("");
            let arguments = message["params"]
                .get("arguments")
                .cloned()
                .unwrap_or_else(|| json!({}));
            let envelope = dispatch(state, name, &arguments);
            let is_error = envelope.status == "error";
            json!({
                "jsonrpc": "2.0",
                "id": id,
                "result": {
                    "content": [{"type": "text", "text": envelope.to_json()}],
                    "isError": is_error,
                }
            })
        }
        "resources/list" => json!({
            "jsonrpc": "2.0",
            "id": id,
            "result": {
                "resources": [{
                    "uri": QUICKREF_URI,
                    "name": "Python 2 to 3 Quick Reference",
                    "description": "Quick reference for common Python 2 to 3 migration patterns",
                    "mimeType": "text/markdown",
                }]
            }
        }),
        "resources/read" => {
            let uri = message["params"]["uri"].as_str().unwrap_or("");
            if uri == QUICKREF_URI {
                json!({
                    "jsonrpc": "2.0",
                    "id": id,
                    "result": {
                        "contents": [{
                            "uri": uri,
                            "mimeType": "text/markdown",
                            "text": crate::report::guides::quick_reference(),
                        }]
                    }
                })
            } else {
                json!({
                    "jsonrpc": "2.0",
                    "id": id,
                    "error": {"code": -32602, "message": format!("Resource not found: {}", uri)}
                })
            }
        }
        "ping" => json!({"jsonrpc": "2.0", "id": id, "result": {}}),
        _ => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": {"code": -32601, "message": "Method not found"}
        }),
    };

    Some(response.to_string())
}
