//! ToolExecutor - registry and dispatch for the server's tools

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use super::builtin::{FetchDocsTool, ListDocSourcesTool};
use super::{Tool, ToolDefinition, ToolResult};
use crate::fetch::FetchDispatcher;
use crate::source::SourceRegistry;

/// Manages the tools served to MCP clients
pub struct ToolExecutor {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolExecutor {
    /// Create executor with the documentation tools
    pub fn standard(registry: Arc<SourceRegistry>, dispatcher: Arc<FetchDispatcher>) -> Self {
        debug!("ToolExecutor::standard: called");
        let mut executor = Self::empty();
        executor.add_tool(Box::new(ListDocSourcesTool::new(registry)));
        executor.add_tool(Box::new(FetchDocsTool::new(dispatcher)));
        executor
    }

    /// Create an empty executor (for testing)
    pub fn empty() -> Self {
        Self { tools: HashMap::new() }
    }

    /// Add a tool to the executor
    pub fn add_tool(&mut self, tool: Box<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Get tool definitions, sorted by name
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut defs: Vec<ToolDefinition> = self
            .tools
            .values()
            .map(|t| ToolDefinition {
                name: t.name().to_string(),
                description: t.description().to_string(),
                input_schema: t.input_schema(),
            })
            .collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    /// Execute a tool by name
    pub async fn execute(&self, name: &str, input: Value) -> ToolResult {
        debug!(%name, "ToolExecutor::execute: called");
        match self.tools.get(name) {
            Some(tool) => tool.execute(input).await,
            None => ToolResult::error(format!("Unknown tool: {}", name)),
        }
    }

    /// Check if a tool exists
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get tool names
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allowlist::AllowedDomains;
    use crate::fetch::FetchOptions;
    use crate::source::DocSource;
    use std::fs;
    use tempfile::tempdir;

    fn executor(sources: Vec<DocSource>) -> ToolExecutor {
        let allowed = AllowedDomains::from_sources(&sources, &[]);
        let dispatcher = FetchDispatcher::new(allowed, &FetchOptions::default()).unwrap();
        ToolExecutor::standard(Arc::new(SourceRegistry::new(sources)), Arc::new(dispatcher))
    }

    #[test]
    fn test_standard_executor_has_doc_tools() {
        let executor = executor(vec![]);

        assert!(executor.has_tool("list_doc_sources"));
        assert!(executor.has_tool("fetch_docs"));
        assert_eq!(executor.tool_names().len(), 2);
    }

    #[test]
    fn test_definitions_sorted() {
        let defs = executor(vec![]).definitions();
        let names: Vec<&str> = defs.iter().map(|d| d.name.as_str()).collect();

        assert_eq!(names, vec!["fetch_docs", "list_doc_sources"]);
        assert!(defs.iter().all(|d| !d.description.is_empty()));
    }

    #[tokio::test]
    async fn test_execute_unknown_tool() {
        let result = ToolExecutor::empty().execute("nope", serde_json::json!({})).await;

        assert!(result.is_error);
        assert!(result.content.contains("Unknown tool: nope"));
    }

    #[tokio::test]
    async fn test_execute_dispatches_by_name() {
        let temp = tempdir().unwrap();
        let file_path = temp.path().join("llms.txt");
        fs::write(&file_path, "local index").unwrap();
        let local = file_path.to_str().unwrap().to_string();

        let executor = executor(vec![DocSource::new(local.clone()).with_name("Local")]);

        let listing = executor.execute("list_doc_sources", serde_json::json!({})).await;
        assert!(!listing.is_error);
        assert!(listing.content.contains("Local\nPath: "));

        let fetched = executor.execute("fetch_docs", serde_json::json!({"url": local})).await;
        assert!(!fetched.is_error);
        assert!(fetched.content.contains("local index"));
    }
}
