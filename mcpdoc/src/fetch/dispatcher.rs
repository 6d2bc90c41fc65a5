//! FetchDispatcher - routes locators to local reads or allowlisted HTTP GETs

use std::path::Path;
use std::time::Duration;

use tracing::{debug, warn};

use super::{FetchError, to_markdown};
use crate::allowlist::AllowedDomains;
use crate::source::Locator;

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: f64 = 10.0;

/// Redirect hop limit when redirects are followed
pub const MAX_REDIRECTS: usize = 20;

const USER_AGENT: &str = concat!("mcpdoc/", env!("CARGO_PKG_VERSION"));

/// HTTP behavior for remote fetches
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub follow_redirects: bool,
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            follow_redirects: false,
            timeout: Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Fetches documents by locator
///
/// Holds the pooled HTTP client and the allowlist fixed at startup. Safe to
/// share across concurrent tool calls.
#[derive(Debug, Clone)]
pub struct FetchDispatcher {
    client: reqwest::Client,
    allowed: AllowedDomains,
    timeout: Duration,
}

impl FetchDispatcher {
    pub fn new(allowed: AllowedDomains, options: &FetchOptions) -> Result<Self, FetchError> {
        debug!(%allowed, ?options, "FetchDispatcher::new: called");

        let redirect = if options.follow_redirects {
            reqwest::redirect::Policy::limited(MAX_REDIRECTS)
        } else {
            reqwest::redirect::Policy::none()
        };

        let client = reqwest::Client::builder()
            .timeout(options.timeout)
            .redirect(redirect)
            .user_agent(USER_AGENT)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            client,
            allowed,
            timeout: options.timeout,
        })
    }

    pub fn allowed_domains(&self) -> &AllowedDomains {
        &self.allowed
    }

    /// Fetch a document and return its markdown, or the error message.
    ///
    /// Never fails: every error is reported as the returned string.
    pub async fn fetch_document(&self, locator: &str) -> String {
        match self.fetch(locator).await {
            Ok(content) => content,
            Err(e) => {
                warn!(%locator, error = %e, "Fetch failed");
                e.to_string()
            }
        }
    }

    /// Fetch a document and convert it to markdown
    pub async fn fetch(&self, locator: &str) -> Result<String, FetchError> {
        debug!(%locator, "FetchDispatcher::fetch: called");
        match Locator::resolve(locator).await {
            Locator::Local(path) => self.read_local(&path).await,
            Locator::Remote(url) => self.fetch_remote(&url).await,
        }
    }

    async fn read_local(&self, path: &Path) -> Result<String, FetchError> {
        debug!(?path, "FetchDispatcher::read_local: called");
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| FetchError::LocalRead {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(len = content.len(), "FetchDispatcher::read_local: file read");
        Ok(to_markdown(&content))
    }

    async fn fetch_remote(&self, url: &str) -> Result<String, FetchError> {
        debug!(%url, "FetchDispatcher::fetch_remote: called");

        if !self.allowed.is_allowed(url) {
            debug!(%url, "FetchDispatcher::fetch_remote: domain not allowed");
            return Err(FetchError::DomainNotAllowed {
                url: url.to_string(),
                allowed: self.allowed.origins(),
            });
        }

        let response = self.client.get(url).timeout(self.timeout).send().await?;
        let status = response.status();
        debug!(%status, "FetchDispatcher::fetch_remote: response received");

        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                url: response.url().to_string(),
            });
        }

        let body = response.text().await?;
        debug!(len = body.len(), "FetchDispatcher::fetch_remote: body read");
        Ok(to_markdown(&body))
    }
}
