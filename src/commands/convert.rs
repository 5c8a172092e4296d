//! `legacymap convert` — in-place conversion of one file.

use crate::commands::{emit, exit_code};
use crate::server::tools::{dispatch, ServerState};
use anyhow::Result;
use serde_json::json;
use std::path::PathBuf;

pub fn handle_convert(
    state: &ServerState,
    file: PathBuf,
    no_backup: bool,
    dry_run: bool,
) -> Result<i32> {
    let args = json!({
        "file_path": file,
        "backup": !no_backup,
        "dry_run": dry_run,
    });
    let response = dispatch(state, "convert_file", &args);
    emit(&response, None)?;
    Ok(exit_code(&response))
}
