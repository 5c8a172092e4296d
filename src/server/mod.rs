//! The stdio tool server: JSON-RPC transport, tool dispatch, and the
//! uniform response envelope.

pub mod envelope;
pub mod handlers;
pub mod stdio;
pub mod tools;

pub use envelope::{ErrorDetail, ToolResponse};
pub use stdio::run_stdio;
pub use tools::{ServerState, ToolKind};
