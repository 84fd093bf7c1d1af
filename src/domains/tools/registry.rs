//! Tool Registry - registration and HTTP dispatch for the configured service.
//!
//! The registry is the name → handler map the HTTP transport dispatches
//! through. It is built once per server from the configuration and only
//! exposes the tools of the configured [`ServiceKind`].

use std::sync::Arc;
#[cfg(feature = "http")]
use tracing::warn;

use rmcp::model::Tool;

use crate::core::config::{Config, ServiceKind};

use super::definitions::{
    AddExpenseTool, AddTool, DeleteExpenseTool, EditExpenseTool, ListExpenseRangeTool,
    ListExpensesTool, RandomNumberTool, SummarizeTool,
};
#[cfg(feature = "http")]
use super::ToolError;

/// Tool registry - manages the tools of one service.
pub struct ToolRegistry {
    config: Arc<Config>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// The service whose tools this registry exposes.
    pub fn service(&self) -> ServiceKind {
        self.config.service
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        match self.config.service {
            ServiceKind::Calculator => vec![AddTool::NAME, RandomNumberTool::NAME],
            ServiceKind::Expense => vec![
                AddExpenseTool::NAME,
                ListExpensesTool::NAME,
                ListExpenseRangeTool::NAME,
                EditExpenseTool::NAME,
                DeleteExpenseTool::NAME,
                SummarizeTool::NAME,
            ],
        }
    }

    /// Get all tools as Tool models (metadata).
    pub fn tools(&self) -> Vec<Tool> {
        match self.config.service {
            ServiceKind::Calculator => vec![AddTool::to_tool(), RandomNumberTool::to_tool()],
            ServiceKind::Expense => vec![
                AddExpenseTool::to_tool(),
                ListExpensesTool::to_tool(),
                ListExpenseRangeTool::to_tool(),
                EditExpenseTool::to_tool(),
                DeleteExpenseTool::to_tool(),
                SummarizeTool::to_tool(),
            ],
        }
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    ///
    /// Tools of the other service are reported as unknown.
    #[cfg(feature = "http")]
    pub fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        let config = self.config.clone();
        match (self.config.service, name) {
            (ServiceKind::Calculator, AddTool::NAME) => AddTool::http_handler(arguments),
            (ServiceKind::Calculator, RandomNumberTool::NAME) => {
                RandomNumberTool::http_handler(arguments)
            }
            (ServiceKind::Expense, AddExpenseTool::NAME) => {
                AddExpenseTool::http_handler(arguments, config)
            }
            (ServiceKind::Expense, ListExpensesTool::NAME) => {
                ListExpensesTool::http_handler(arguments, config)
            }
            (ServiceKind::Expense, ListExpenseRangeTool::NAME) => {
                ListExpenseRangeTool::http_handler(arguments, config)
            }
            (ServiceKind::Expense, EditExpenseTool::NAME) => {
                EditExpenseTool::http_handler(arguments, config)
            }
            (ServiceKind::Expense, DeleteExpenseTool::NAME) => {
                DeleteExpenseTool::http_handler(arguments, config)
            }
            (ServiceKind::Expense, SummarizeTool::NAME) => {
                SummarizeTool::http_handler(arguments, config)
            }
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name).to_string())
            }
        }
    }
}
