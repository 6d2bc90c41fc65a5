//! Built-in documentation tools

mod fetch_docs;
mod list_doc_sources;

pub use fetch_docs::FetchDocsTool;
pub use list_doc_sources::ListDocSourcesTool;
