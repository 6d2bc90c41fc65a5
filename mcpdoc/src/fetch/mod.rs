//! Fetch dispatch: local reads, allowlisted HTTP GETs, markdown conversion

mod dispatcher;
mod error;

pub use dispatcher::{DEFAULT_TIMEOUT_SECS, FetchDispatcher, FetchOptions, MAX_REDIRECTS};
pub use error::FetchError;

/// Convert fetched text (HTML or otherwise) to markdown
pub fn to_markdown(raw: &str) -> String {
    html2md::rewrite_html(raw, false)
}
