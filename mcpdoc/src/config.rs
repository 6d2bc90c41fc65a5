//! mcpdoc configuration types and loading

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::allowlist::AllowedDomains;
use crate::fetch::{DEFAULT_TIMEOUT_SECS, FetchOptions};
use crate::source::DocSource;

/// Main mcpdoc configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation sources, in listing order
    pub sources: Vec<DocSource>,

    /// Follow HTTP redirects when fetching
    #[serde(rename = "follow-redirects")]
    pub follow_redirects: bool,

    /// Per-request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: f64,

    /// Extra origins remote fetches may target; `*` allows all
    #[serde(rename = "allowed-domains")]
    pub allowed_domains: Vec<String>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level", skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// MCP transport settings
    pub server: ServerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            follow_redirects: false,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            allowed_domains: Vec::new(),
            log_level: None,
            server: ServerConfig::default(),
        }
    }
}

/// Accepted config file shapes: a full config, or a bare list of sources
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ConfigFile {
    Sources(Vec<DocSource>),
    Full(Config),
}

impl Config {
    /// Validate configuration before use
    ///
    /// At least one documentation source is required; without one there is
    /// nothing to serve.
    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            return Err(eyre::eyre!(
                "No documentation sources configured. Pass --urls or add `sources` to a config file."
            ));
        }

        if let Some(source) = self.sources.iter().find(|s| s.llms_txt.trim().is_empty()) {
            return Err(eyre::eyre!(
                "Documentation source {:?} has an empty llms_txt locator",
                source.name.as_deref().unwrap_or("<unnamed>")
            ));
        }

        self.timeout().map(|_| ())
    }

    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Result<Duration> {
        if self.timeout_secs <= 0.0 {
            return Err(eyre::eyre!("timeout must be positive, got {}", self.timeout_secs));
        }
        Duration::try_from_secs_f64(self.timeout_secs)
            .map_err(|e| eyre::eyre!("invalid timeout {}: {}", self.timeout_secs, e))
    }

    /// HTTP options for the fetch dispatcher
    pub fn fetch_options(&self) -> Result<FetchOptions> {
        Ok(FetchOptions {
            follow_redirects: self.follow_redirects,
            timeout: self.timeout()?,
        })
    }

    /// Allowlist derived from the sources and extra domains
    pub fn allowed(&self) -> AllowedDomains {
        AllowedDomains::from_sources(&self.sources, &self.allowed_domains)
    }

    /// Load configuration with fallback chain
    ///
    /// An explicit path must load. Otherwise `.mcpdoc.yml` and then the user
    /// config are tried; a file that fails to load is reported and skipped.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        for candidate in Self::candidate_paths() {
            if !candidate.exists() {
                continue;
            }
            match Self::load_from_file(&candidate) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {:#}", candidate.display(), e);
                    eprintln!("Warning: skipping config {}: {:#}", candidate.display(), e);
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read just the log level, before logging is initialized
    ///
    /// Uses the explicit path or the first existing file in the chain. Any
    /// read or parse failure yields `None`; `load` reports it later.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        let path = match config_path {
            Some(path) => path.clone(),
            None => Self::candidate_paths().into_iter().find(|p| p.exists())?,
        };
        let content = fs::read_to_string(path).ok()?;
        Self::parse(&content).ok()?.log_level
    }

    /// Implicit config locations, in priority order
    fn candidate_paths() -> Vec<PathBuf> {
        // Project-local: .mcpdoc.yml, then user: ~/.config/mcpdoc/mcpdoc.yml
        let mut paths = vec![PathBuf::from(".mcpdoc.yml")];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("mcpdoc").join("mcpdoc.yml"));
        }
        paths
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config = Self::parse(&content)?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Parse YAML or JSON config text
    pub fn parse(content: &str) -> Result<Self> {
        let file: ConfigFile = serde_yaml::from_str(content).context("Failed to parse config file")?;
        Ok(match file {
            ConfigFile::Sources(sources) => Self {
                sources,
                ..Self::default()
            },
            ConfigFile::Full(config) => config,
        })
    }
}

/// MCP transport selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// MCP over stdin/stdout
    #[default]
    Stdio,
    /// Streamable HTTP MCP endpoint
    Http,
}

impl std::fmt::Display for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stdio => write!(f, "stdio"),
            Self::Http => write!(f, "http"),
        }
    }
}

/// Server transport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub transport: Transport,

    /// Bind host for the HTTP transport
    pub host: String,

    /// Bind port for the HTTP transport
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: Transport::Stdio,
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}
