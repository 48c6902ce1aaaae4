//! MCP server exposing the tool registry over stdio.

use std::sync::Arc;

use log::{debug, warn};
use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, ServiceExt, model::*,
    service::RequestContext, transport::stdio,
};

use crate::outcome::into_call_result;
use crate::registry::{RegistryError, ToolRegistry};

/// Error type for MCP server operations.
#[derive(Debug)]
pub enum ServerError {
    /// Tool registry could not be built
    Registry(RegistryError),
    /// MCP protocol error
    Mcp(String),
}

impl From<RegistryError> for ServerError {
    fn from(err: RegistryError) -> Self {
        ServerError::Registry(err)
    }
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServerError::Registry(err) => write!(f, "Registry error: {}", err),
            ServerError::Mcp(msg) => write!(f, "MCP error: {}", msg),
        }
    }
}

impl std::error::Error for ServerError {}

/// MCP server for a Salesforce org.
///
/// Every tool in the registry shares one session; the registry is never
/// modified once the server is built.
#[derive(Clone)]
pub struct SalesforceMcpServer {
    registry: Arc<ToolRegistry>,
}

impl SalesforceMcpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        debug!("Creating MCP server with {} tools", registry.len());
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Run one tool call and wrap its outcome in a response envelope.
    ///
    /// Unknown tools are a protocol error. Invalid arguments come back as an
    /// error envelope naming the offending fields.
    pub async fn call(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        match self.registry.dispatch(name, arguments).await {
            Ok(outcome) => Ok(into_call_result(outcome)),
            Err(RegistryError::UnknownTool(name)) => {
                warn!("Call to unknown tool '{}'", name);
                Err(McpError::invalid_params(
                    format!("Unknown tool '{}'", name),
                    None,
                ))
            }
            Err(err) => {
                warn!("{}", err);
                Ok(CallToolResult::error(vec![Content::text(err.to_string())]))
            }
        }
    }

    /// Serve MCP over stdio (stdin/stdout).
    ///
    /// This method blocks until the connection is closed.
    pub async fn serve_stdio(self) -> Result<(), ServerError> {
        debug!("Starting MCP server on stdio");
        let service = self
            .serve(stdio())
            .await
            .map_err(|e| ServerError::Mcp(format!("Failed to start server: {}", e)))?;
        service
            .waiting()
            .await
            .map_err(|e| ServerError::Mcp(format!("Server error: {}", e)))?;
        Ok(())
    }
}

impl ServerHandler for SalesforceMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Salesforce MCP server. Use tools to retrieve, query, count and update records, \
                 run anonymous Apex, create custom fields and list Apex triggers."
                    .into(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        debug!("Listing tools");
        Ok(ListToolsResult {
            tools: self.registry.definitions().map(|d| d.to_tool()).collect(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.call(&request.name, request.arguments).await
    }
}
