//! `legacymap scan` — directory scan with per-file issue counts.

use crate::commands::{emit, exit_code};
use crate::server::tools::{dispatch, ServerState};
use anyhow::Result;
use serde_json::json;
use std::path::PathBuf;

pub fn handle_scan(
    state: &ServerState,
    path: PathBuf,
    exclude: Option<Vec<String>>,
    output: Option<PathBuf>,
) -> Result<i32> {
    let mut args = json!({"path": path});
    if let Some(exclude) = exclude {
        args["exclude"] = json!(exclude);
    }
    let response = dispatch(state, "analyze_directory", &args);
    emit(&response, output.as_ref())?;
    Ok(exit_code(&response))
}
