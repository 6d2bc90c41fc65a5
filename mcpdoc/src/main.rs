//! mcpdoc - MCP server for llms.txt documentation
//!
//! CLI entry point: serve over MCP, list sources, or fetch one document.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::info;

use mcpdoc::cli::{Cli, Command};
use mcpdoc::config::{Config, Transport};
use mcpdoc::{AllowedDomains, DocServer, FetchDispatcher, SourceRegistry, ToolExecutor};

fn setup_logging(log_level: Option<&str>) -> Result<()> {
    // Log to a file: stdout carries the stdio transport
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mcpdoc")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let level = match log_level.map(|s| s.to_uppercase()).as_deref() {
        Some("TRACE") => tracing::Level::TRACE,
        Some("DEBUG") => tracing::Level::DEBUG,
        Some("INFO") | None => tracing::Level::INFO,
        Some("WARN") | Some("WARNING") => tracing::Level::WARN,
        Some("ERROR") => tracing::Level::ERROR,
        Some(other) => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", other);
            tracing::Level::INFO
        }
    };

    let log_file = fs::File::create(log_dir.join("mcpdoc.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Log level early, so config loading is logged: CLI > config > INFO
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| Config::load_log_level(cli.config.as_ref()));
    setup_logging(log_level.as_deref()).context("Failed to setup logging")?;

    // Load configuration, then layer CLI flags on top
    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    cli.apply_to(&mut config);

    config.validate().context("Invalid configuration")?;

    let registry = Arc::new(SourceRegistry::new(config.sources.clone()));
    let dispatcher = Arc::new(
        FetchDispatcher::new(config.allowed(), &config.fetch_options()?).context("Failed to create fetch dispatcher")?,
    );
    info!(
        sources = registry.len(),
        allowed = %dispatcher.allowed_domains(),
        "mcpdoc loaded config"
    );

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => cmd_serve(&config, registry, dispatcher).await,
        Command::List => cmd_list(&registry, dispatcher.allowed_domains()),
        Command::Fetch { locator } => cmd_fetch(&dispatcher, &locator).await,
    }
}

/// Run the MCP server on the configured transport
async fn cmd_serve(config: &Config, registry: Arc<SourceRegistry>, dispatcher: Arc<FetchDispatcher>) -> Result<()> {
    let executor = Arc::new(ToolExecutor::standard(registry, dispatcher));
    let server = DocServer::new(executor);

    match config.server.transport {
        Transport::Stdio => server.serve_stdio().await,
        Transport::Http => server.serve_http(&config.server.host, config.server.port).await,
    }
}

/// Print the source listing and the effective allowlist
fn cmd_list(registry: &SourceRegistry, allowed: &AllowedDomains) -> Result<()> {
    print!("{}", registry.list_sources());
    println!("{} {}", "Allowed domains:".bold(), allowed.to_string().cyan());
    Ok(())
}

/// Fetch one document and print it
async fn cmd_fetch(dispatcher: &FetchDispatcher, locator: &str) -> Result<()> {
    match dispatcher.fetch(locator).await {
        Ok(content) => {
            println!("{}", content);
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {}", "✗".red(), e);
            Err(eyre::eyre!("fetch failed for {}", locator))
        }
    }
}
