//! The uniform response envelope shared by every tool.

use crate::config::ScanLimits;
use crate::core::ToolError;
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

/// UTC timestamp at second precision, e.g. `2026-08-06T12:34:56Z`.
pub fn timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// Every tool call returns exactly one of these, serialized as JSON.
#[derive(Debug, Serialize)]
pub struct ToolResponse {
    pub tool: String,
    pub status: &'static str,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl ToolResponse {
    pub fn success(tool: &str, data: Value, metadata: Value) -> Self {
        Self {
            tool: tool.to_string(),
            status: "success",
            timestamp: timestamp(),
            data: Some(data),
            error: None,
            metadata: Some(metadata),
        }
    }

    pub fn failure(tool: &str, error: &ToolError, context: Option<String>, metadata: Value) -> Self {
        Self {
            tool: tool.to_string(),
            status: "error",
            timestamp: timestamp(),
            data: None,
            error: Some(ErrorDetail {
                kind: error.kind().to_string(),
                message: error.to_string(),
                context,
            }),
            metadata: Some(metadata),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| {
            format!(
                r#"{{"tool":"{}","status":"error","error":{{"type":"SerializationError","message":"{}"}}}}"#,
                self.tool, e
            )
        })
    }
}

/// Metadata block carried on every response: active limits plus whether the
/// external rewrite capability is present.
pub fn metadata_block(limits: &ScanLimits, rewriter_available: bool) -> Value {
    serde_json::json!({
        "limits": limits,
        "rewriter_available": rewriter_available,
    })
}
