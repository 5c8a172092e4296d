//! `legacymap compare` — before/after reconciliation of two files.

use crate::commands::{emit, exit_code};
use crate::server::tools::{dispatch, ServerState};
use anyhow::Result;
use serde_json::json;
use std::path::PathBuf;

pub fn handle_compare(state: &ServerState, original: PathBuf, converted: PathBuf) -> Result<i32> {
    let args = json!({
        "original_path": original,
        "converted_path": converted,
    });
    let response = dispatch(state, "conversion_report", &args);
    emit(&response, None)?;
    Ok(exit_code(&response))
}
