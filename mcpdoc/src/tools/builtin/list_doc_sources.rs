//! list_doc_sources tool - enumerate the configured documentation sources

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::source::SourceRegistry;
use crate::tools::{Tool, ToolResult};

/// List the documentation sources available to the client
pub struct ListDocSourcesTool {
    registry: Arc<SourceRegistry>,
}

impl ListDocSourcesTool {
    pub fn new(registry: Arc<SourceRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl Tool for ListDocSourcesTool {
    fn name(&self) -> &'static str {
        "list_doc_sources"
    }

    fn description(&self) -> &'static str {
        "List all available documentation sources. Call this first: it returns the llms.txt URLs \
         and local file paths the user has made available, each with a name and optional description."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _input: Value) -> ToolResult {
        debug!("ListDocSourcesTool::execute: called");
        ToolResult::success(self.registry.list_sources())
    }
}
