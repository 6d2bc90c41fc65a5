//! CLI command definitions and config overrides

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use crate::config::{Config, Transport};
use crate::source::DocSource;

/// mcpdoc - MCP server for llms.txt documentation
#[derive(Debug, Parser)]
#[command(
    name = "mcpdoc",
    version,
    about = "MCP server exposing llms.txt documentation sources",
    after_help = "Examples:\n  \
        mcpdoc --urls LangGraph:https://langchain-ai.github.io/langgraph/llms.txt\n  \
        mcpdoc --config docs.yml --transport http --port 8082\n  \
        mcpdoc list --urls ./llms.txt\n  \
        mcpdoc fetch https://a.com/guide.html --urls https://a.com/llms.txt"
)]
pub struct Cli {
    /// Path to config file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    /// Documentation sources as `name:url` or `url` (URL, file:// URL or path)
    #[arg(short, long = "urls", global = true, num_args = 1.., value_name = "SOURCE")]
    pub urls: Vec<String>,

    /// Follow HTTP redirects when fetching
    #[arg(long, global = true)]
    pub follow_redirects: bool,

    /// Request timeout in seconds
    #[arg(long, global = true, value_name = "SECONDS")]
    pub timeout: Option<f64>,

    /// Extra allowed origins for remote fetches; `*` allows all
    #[arg(long = "allowed-domains", global = true, num_args = 1.., value_name = "ORIGIN")]
    pub allowed_domains: Vec<String>,

    /// MCP transport
    #[arg(long, global = true, value_enum)]
    pub transport: Option<Transport>,

    /// Bind host for the HTTP transport
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Bind port for the HTTP transport
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// Subcommand to execute (default: serve)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the MCP server
    Serve,

    /// Print the configured documentation sources and allowed domains
    List,

    /// Fetch one document and print it as markdown
    Fetch {
        /// URL, file:// URL or local path
        locator: String,
    },
}

impl Cli {
    /// Apply command-line overrides on top of a loaded config.
    ///
    /// `--urls` and `--allowed-domains` append to the file's values; scalar
    /// flags replace them.
    pub fn apply_to(&self, config: &mut Config) {
        debug!(urls = self.urls.len(), "Cli::apply_to: called");
        config.sources.extend(self.urls.iter().map(|entry| parse_source_entry(entry)));
        config.allowed_domains.extend(self.allowed_domains.iter().cloned());

        if self.follow_redirects {
            config.follow_redirects = true;
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if let Some(level) = &self.log_level {
            config.log_level = Some(level.clone());
        }
        if let Some(transport) = self.transport {
            config.server.transport = transport;
        }
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}

/// Parse a `--urls` entry: `name:locator` or a bare locator.
///
/// A prefix followed by `//` is a URL scheme, not a name.
pub fn parse_source_entry(entry: &str) -> DocSource {
    match entry.split_once(':') {
        Some((name, rest)) if !name.is_empty() && !rest.is_empty() && !rest.starts_with("//") => {
            DocSource::new(rest).with_name(name)
        }
        _ => DocSource::new(entry),
    }
}
