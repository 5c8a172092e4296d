//! CLI command implementations.
//!
//! Each command drives the same tool handlers as the stdio server and
//! prints the uniform response envelope, so the CLI and the server surface
//! cannot drift apart.

pub mod compare;
pub mod convert;
pub mod report;
pub mod scan;
pub mod serve;
pub mod validate;

use crate::server::envelope::ToolResponse;
use anyhow::Result;
use std::path::PathBuf;

/// Print an envelope to stdout or write it to a file.
pub(crate) fn emit(response: &ToolResponse, output: Option<&PathBuf>) -> Result<()> {
    let rendered = response.to_json();
    match output {
        Some(path) => std::fs::write(path, rendered)?,
        None => println!("{}", rendered),
    }
    Ok(())
}

/// Exit code policy: error envelopes map to a nonzero process exit.
pub(crate) fn exit_code(response: &ToolResponse) -> i32 {
    if response.status == "error" {
        1
    } else {
        0
    }
}
