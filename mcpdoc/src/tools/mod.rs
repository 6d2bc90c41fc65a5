//! Tool system exposed to MCP clients
//!
//! Each tool takes JSON input and produces a text `ToolResult`. Failures are
//! reported as error results, never as faults.

mod executor;
mod traits;

pub mod builtin;

pub use executor::ToolExecutor;
pub use traits::{Tool, ToolDefinition, ToolResult};
