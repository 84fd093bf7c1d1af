//! List-expenses tool definition.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, instrument};

use super::super::common::{
    ValueResult, json_result, parse_params, run_blocking, tool_error_result,
};
use crate::core::config::Config;
use crate::domains::expenses::{Expense, ExpenseStore};
use crate::domains::tools::ToolError;

/// The list-expenses tool takes no parameters.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListExpensesParams {}

/// List-expenses tool - returns every expense ordered by id.
pub struct ListExpensesTool;

impl ListExpensesTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "list_Expenses";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "List all expenses in the database, ordered by id.";

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub fn execute(_params: &ListExpensesParams, store: &ExpenseStore) -> CallToolResult {
        match store.list_all() {
            Ok(expenses) => {
                debug!("Listed {} expenses", expenses.len());
                json_result(&expenses)
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

        let params: ListExpensesParams = parse_http_params(arguments)?;
        let store = ExpenseStore::from_config(&config.expenses);
        http_result(Self::execute(&params, &store))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<ListExpensesParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<ValueResult<Vec<Expense>>>().into()),
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
                let params: ListExpensesParams = parse_params(args)?;
                run_blocking(move || Self::execute(&params, &store)).await
            }
            .boxed()
        })
    }
}
