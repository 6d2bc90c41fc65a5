//! Domain allowlist for remote fetches

use std::collections::BTreeSet;
use std::fmt;

use tracing::{debug, warn};

use crate::source::{DocSource, extract_origin};

/// Configured extra-domain value that allows every remote origin
pub const ALLOW_ALL: &str = "*";

/// Origins a remote locator must start with, or the allow-all sentinel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedDomains {
    All,
    Origins(BTreeSet<String>),
}

impl AllowedDomains {
    /// Build the allowlist from the configured sources and extra domains.
    ///
    /// - `*` among the extra domains allows everything.
    /// - Otherwise the allowlist is the origin of every remote source plus the
    ///   extra domains.
    /// - If that leaves nothing and at least one source is local, everything
    ///   is allowed. With no local sources an empty allowlist stays empty and
    ///   rejects every remote locator.
    pub fn from_sources(sources: &[DocSource], extra_domains: &[String]) -> Self {
        debug!(
            sources = sources.len(),
            extra = extra_domains.len(),
            "AllowedDomains::from_sources: called"
        );

        if extra_domains.iter().any(|d| d == ALLOW_ALL) {
            debug!("AllowedDomains::from_sources: wildcard configured");
            return Self::All;
        }

        let mut origins = BTreeSet::new();
        let mut has_local = false;

        for source in sources {
            if source.locator().is_local() {
                has_local = true;
                continue;
            }
            match extract_origin(&source.llms_txt) {
                Some(origin) => {
                    origins.insert(origin);
                }
                None => warn!(locator = %source.llms_txt, "Source is neither a local file nor a URL with a host"),
            }
        }

        origins.extend(extra_domains.iter().filter(|d| !d.is_empty()).cloned());

        if origins.is_empty() && has_local {
            debug!("AllowedDomains::from_sources: local-only sources, allowing all domains");
            return Self::All;
        }

        Self::Origins(origins)
    }

    pub fn allows_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Whether a remote locator starts with one of the allowed origins
    pub fn is_allowed(&self, url: &str) -> bool {
        match self {
            Self::All => true,
            Self::Origins(origins) => origins.iter().any(|origin| url.starts_with(origin.as_str())),
        }
    }

    /// Allowed origins in sorted order (`["*"]` for allow-all)
    pub fn origins(&self) -> Vec<String> {
        match self {
            Self::All => vec![ALLOW_ALL.to_string()],
            Self::Origins(origins) => origins.iter().cloned().collect(),
        }
    }
}

impl fmt::Display for AllowedDomains {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.origins().join(", "))
    }
}
