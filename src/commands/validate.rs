//! `legacymap validate` — post-conversion validation of one file.

use crate::commands::{emit, exit_code};
use crate::server::tools::{dispatch, ServerState};
use anyhow::Result;
use serde_json::json;
use std::path::PathBuf;

pub fn handle_validate(state: &ServerState, file: PathBuf) -> Result<i32> {
    let response = dispatch(state, "validate_conversion", &json!({"file_path": file}));
    emit(&response, None)?;
    Ok(exit_code(&response))
}
