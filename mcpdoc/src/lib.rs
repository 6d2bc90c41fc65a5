//! mcpdoc - MCP server for llms.txt documentation
//!
//! Exposes two tools to MCP clients: `list_doc_sources`, which enumerates the
//! configured documentation sources, and `fetch_docs`, which fetches a remote
//! page or a local file and returns it as markdown.
//!
//! # Core Concepts
//!
//! - **Sources**: an ordered list of llms.txt URLs, `file://` URLs or paths
//! - **Allowlist**: remote fetches must start with an allowed origin, derived
//!   once at startup from the sources plus any extra domains
//! - **Errors as results**: every fetch failure is returned to the client as
//!   a message, never as a fault
//!
//! # Modules
//!
//! - [`source`] - Documentation sources, locator classification, listing
//! - [`allowlist`] - Allowed origins for remote fetches
//! - [`fetch`] - Fetch dispatch and markdown conversion
//! - [`tools`] - Tool trait, executor and built-in tools
//! - [`server`] - MCP handler and transports
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod allowlist;
pub mod cli;
pub mod config;
pub mod fetch;
pub mod server;
pub mod source;
pub mod tools;

// Re-export commonly used types
pub use allowlist::AllowedDomains;
pub use config::{Config, ServerConfig, Transport};
pub use fetch::{FetchDispatcher, FetchError, FetchOptions};
pub use server::DocServer;
pub use source::{DocSource, Locator, SourceRegistry};
pub use tools::{Tool, ToolExecutor, ToolResult};
