//! `legacymap serve` — the stdio JSON-RPC tool server.

use crate::server::stdio::run_stdio;
use crate::server::tools::ServerState;
use anyhow::Result;

pub fn handle_serve(state: &ServerState) -> Result<i32> {
    run_stdio(state)?;
    Ok(0)
}
