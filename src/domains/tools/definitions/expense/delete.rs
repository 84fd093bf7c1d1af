//! Delete-expense tool definition.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::super::common::{json_result, parse_params, run_blocking, tool_error_result};
use crate::core::config::Config;
use crate::domains::expenses::{ExpenseStore, MutationOutcome};
use crate::domains::tools::ToolError;

/// Parameters for the delete-expense tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct DeleteExpenseParams {
    /// Id of the expense to delete. Required.
    #[serde(default)]
    pub id: Option<i64>,
}

/// Delete-expense tool - removes an expense by id.
pub struct DeleteExpenseTool;

impl DeleteExpenseTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "delete_expense";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Delete an expense by id. Returns status 'not_found' if no expense has that id.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(id = ?params.id))]
    pub fn execute(params: &DeleteExpenseParams, store: &ExpenseStore) -> CallToolResult {
        let Some(id) = params.id else {
            return tool_error_result(&ToolError::MissingRequiredField("id"));
        };

        match store.delete(id) {
            Ok(outcome) => {
                if outcome.is_success() {
                    info!("Deleted expense {}", id);
                } else {
                    warn!("No expense with id {}", id);
                }
                json_result(&outcome)
            }
            Err(e) => tool_error_result(&ToolError::from(e)),
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, String> {
        use super::super::common::{http_result, parse_http_params};

        let params: DeleteExpenseParams = parse_http_params(arguments)?;
        let store = ExpenseStore::from_config(&config.expenses);
        http_result(Self::execute(&params, &store))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<DeleteExpenseParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<MutationOutcome>().into()),
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for rmcp transports.
    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        let store = ExpenseStore::from_config(&config.expenses);
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone();
            let store = store.clone();
            async move {
                let params: DeleteExpenseParams = parse_params(args)?;
                run_blocking(move || Self::execute(&params, &store)).await
            }
            .boxed()
        })
    }
}
