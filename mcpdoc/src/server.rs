//! MCP server: exposes the tool executor over stdio or streamable HTTP

use std::sync::Arc;

use axum::Router;
use eyre::{Context, Result};
use rmcp::model::{
    CallToolRequestParams, CallToolResult, Content, Implementation, JsonObject, ListToolsResult,
    PaginatedRequestParams, ServerCapabilities, ServerInfo, Tool as McpTool,
};
use rmcp::service::RequestContext;
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::transport::streamable_http_server::StreamableHttpService;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler, ServiceExt};
use serde_json::Value;
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::tools::{ToolExecutor, ToolResult};

/// Server name reported to MCP clients
pub const SERVER_NAME: &str = "mcpdoc";

const SERVER_INSTRUCTIONS: &str = "Use the list_doc_sources tool to see the available documentation \
     sources. Once you have a source, use fetch_docs to get its llms.txt and then the pages it links to.";

/// MCP handler backed by a `ToolExecutor`
#[derive(Clone)]
pub struct DocServer {
    executor: Arc<ToolExecutor>,
}

impl DocServer {
    pub fn new(executor: Arc<ToolExecutor>) -> Self {
        Self { executor }
    }

    /// Tool list advertised to clients
    pub fn tools(&self) -> Vec<McpTool> {
        self.executor
            .definitions()
            .into_iter()
            .map(|def| {
                let schema: JsonObject = match def.input_schema {
                    Value::Object(map) => map,
                    _ => JsonObject::new(),
                };
                McpTool::new(def.name, def.description, Arc::new(schema))
            })
            .collect()
    }

    /// Run a tool by name.
    ///
    /// Tool failures come back as error results; only an unknown tool name
    /// is a protocol error.
    pub async fn call(&self, name: &str, arguments: Option<JsonObject>) -> Result<CallToolResult, McpError> {
        debug!(%name, ?arguments, "DocServer::call: called");
        if !self.executor.has_tool(name) {
            return Err(McpError::invalid_params(format!("Unknown tool: {}", name), None));
        }

        let input = Value::Object(arguments.unwrap_or_default());
        let result = self.executor.execute(name, input).await;
        Ok(to_call_result(result))
    }

    /// Serve MCP over stdin/stdout until the client disconnects
    pub async fn serve_stdio(self) -> Result<()> {
        info!("Starting MCP server on stdio");
        let service = self
            .serve(rmcp::transport::stdio())
            .await
            .context("Failed to start stdio MCP server")?;

        let reason = service.waiting().await.context("stdio MCP server task failed")?;
        info!(?reason, "MCP stdio server stopped");
        Ok(())
    }

    /// Serve streamable HTTP MCP at `/mcp` (plus `/health`) until Ctrl-C
    pub async fn serve_http(self, host: &str, port: u16) -> Result<()> {
        let service = StreamableHttpService::new(
            move || Ok(self.clone()),
            Arc::new(LocalSessionManager::default()),
            Default::default(),
        );

        let router = Router::new()
            .nest_service("/mcp", service)
            .route("/health", axum::routing::get(health_check));

        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr)
            .await
            .context(format!("Failed to bind {}", bind_addr))?;

        info!("MCP HTTP server listening on http://{}/mcp", bind_addr);
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                info!("Shutdown signal received");
            })
            .await
            .context("MCP HTTP server error")?;

        Ok(())
    }
}

impl ServerHandler for DocServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: Some("llms.txt documentation server".into()),
                ..Default::default()
            },
            instructions: Some(SERVER_INSTRUCTIONS.into()),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        self.call(&request.name, request.arguments).await
    }
}

fn to_call_result(result: ToolResult) -> CallToolResult {
    let content = vec![Content::text(result.content)];
    if result.is_error {
        CallToolResult::error(content)
    } else {
        CallToolResult::success(content)
    }
}

async fn health_check() -> &'static str {
    "OK"
}
