//! MCP Server implementation and lifecycle management.
//!
//! The server handler delegates tool calls to the rmcp `ToolRouter` (STDIO)
//! or the `ToolRegistry` (HTTP), and resource reads to the `ResourceService`.
//! Which tools and resources exist depends on the configured service.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, handler::server::tool::ToolRouter, model::*,
    service::RequestContext, tool_handler,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::{Config, ServiceKind};
use crate::domains::{
    expenses::ExpenseStore,
    resources::{ResourceError, ResourceService},
    tools::{ToolRegistry, build_tool_router},
};

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Service for handling resource-related requests.
    resource_service: Arc<ResourceService>,

    /// Registry used for HTTP tool dispatch and listing.
    tool_registry: Arc<ToolRegistry>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// For the expense service this creates the `expenses` table if needed,
    /// so a storage problem surfaces at startup rather than on the first call.
    pub fn new(config: Config) -> super::Result<Self> {
        let config = Arc::new(config);

        if config.service == ServiceKind::Expense {
            ExpenseStore::from_config(&config.expenses).init_schema()?;
        }

        let resource_service = Arc::new(ResourceService::new(config.clone()));
        let tool_registry = Arc::new(ToolRegistry::new(config.clone()));

        Ok(Self {
            tool_router: build_tool_router::<Self>(config.clone()),
            config,
            resource_service,
            tool_registry,
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Instructions sent to clients on initialize.
    pub fn instructions(&self) -> &'static str {
        match self.tool_registry.service() {
            ServiceKind::Calculator => {
                "Simple calculator server: add two numbers or draw a random integer. \
                 Read info://server for server metadata."
            }
            ServiceKind::Expense => {
                "Expense tracker: add, list, edit, delete and summarize expenses. \
                 Dates are compared as text, use YYYY-MM-DD. \
                 Read expense://categories for the category list."
            }
        }
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_registry
            .tools()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema,
                    "outputSchema": t.output_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        self.tool_registry.call_tool(name, arguments)
    }

    /// List all available resources (for HTTP transport).
    pub async fn list_resources(&self) -> Vec<serde_json::Value> {
        let resources = self.resource_service.list_resources().await;

        resources
            .into_iter()
            .map(|r| {
                serde_json::json!({
                    "uri": r.uri,
                    "name": r.name,
                    "description": r.description,
                    "mimeType": r.mime_type
                })
            })
            .collect()
    }

    /// Read a resource by URI (for HTTP transport).
    ///
    /// The error stays typed so the transport can tell an unknown URI from
    /// an unreadable backing file.
    pub async fn read_resource(&self, uri: &str) -> Result<serde_json::Value, ResourceError> {
        let result = self.resource_service.read_resource(uri).await?;
        Ok(serde_json::json!({
            "contents": result.contents
        }))
    }
}

fn resource_error_to_mcp(error: ResourceError) -> McpError {
    if error.is_not_found() {
        McpError::resource_not_found(error.to_string(), None)
    } else {
        McpError::internal_error(error.to_string(), None)
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(self.instructions().to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        let resources = self.resource_service.list_resources().await;
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.resource_service
            .read_resource(&request.uri)
            .await
            .map_err(resource_error_to_mcp)
    }
}
