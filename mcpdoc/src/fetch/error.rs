//! Fetch error types

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while fetching a document
///
/// The display strings are what tool callers see.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Error reading local file: {source}")]
    LocalRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error: URL not allowed. Must start with one of the following domains: {}", .allowed.join(", "))]
    DomainNotAllowed { url: String, allowed: Vec<String> },

    #[error("Encountered an HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Encountered an HTTP error: HTTP status {status} for url {url}")]
    Status { status: StatusCode, url: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl FetchError {
    /// Whether this error came from a remote request exceeding its timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_read_message() {
        let err = FetchError::LocalRead {
            path: PathBuf::from("/srv/docs/llms.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
        };

        let msg = err.to_string();
        assert!(msg.starts_with("Error reading local file: "));
        assert!(msg.contains("No such file or directory"));
    }

    #[test]
    fn test_domain_not_allowed_lists_origins() {
        let err = FetchError::DomainNotAllowed {
            url: "https://b.com/page".to_string(),
            allowed: vec!["https://a.com/".to_string(), "https://c.com/".to_string()],
        };

        assert_eq!(
            err.to_string(),
            "Error: URL not allowed. Must start with one of the following domains: https://a.com/, https://c.com/"
        );
    }

    #[test]
    fn test_status_message() {
        let err = FetchError::Status {
            status: StatusCode::NOT_FOUND,
            url: "https://a.com/missing".to_string(),
        };

        let msg = err.to_string();
        assert!(msg.starts_with("Encountered an HTTP error"));
        assert!(msg.contains("404"));
        assert!(msg.contains("https://a.com/missing"));
        assert!(!err.is_timeout());
    }
}
