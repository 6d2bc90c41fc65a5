//! fetch_docs tool - fetch a documentation page or local file as markdown

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::fetch::FetchDispatcher;
use crate::tools::{Tool, ToolResult};

/// Fetch documentation from an allowed URL or a local file
pub struct FetchDocsTool {
    dispatcher: Arc<FetchDispatcher>,
}

impl FetchDocsTool {
    pub fn new(dispatcher: Arc<FetchDispatcher>) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl Tool for FetchDocsTool {
    fn name(&self) -> &'static str {
        "fetch_docs"
    }

    fn description(&self) -> &'static str {
        "Fetch documentation from a URL or local file and return it as markdown. \
         Use it after list_doc_sources: fetch an llms.txt file first, pick the URLs in it \
         that are relevant to the question, then fetch those pages. \
         Remote URLs must belong to an allowed domain."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "url": {
                    "type": "string",
                    "description": "URL from an allowed domain, a local file path (absolute or relative), or a file:// URL"
                }
            },
            "required": ["url"]
        })
    }

    async fn execute(&self, input: Value) -> ToolResult {
        debug!(?input, "FetchDocsTool::execute: called");
        let url = match input["url"].as_str() {
            Some(u) => u,
            None => {
                debug!("FetchDocsTool::execute: missing url parameter");
                return ToolResult::error("url is required");
            }
        };

        match self.dispatcher.fetch(url).await {
            Ok(content) => ToolResult::success(content),
            Err(e) => {
                debug!(%e, "FetchDocsTool::execute: fetch failed");
                ToolResult::error(e.to_string())
            }
        }
    }
}
