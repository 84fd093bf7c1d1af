//! Edit-expense tool definition.

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
use crate::domains::expenses::{ExpenseDraft, ExpenseStore, MutationOutcome};
use crate::domains::tools::ToolError;

/// Parameters for the edit-expense tool.
///
/// Every field except `id` is replaced; omitted optional fields reset to "".
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct EditExpenseParams {
    /// Id of the expense to edit. Required.
    #[serde(default)]
    pub id: Option<i64>,

    /// New date.
    pub date: String,

    /// New amount.
    pub amount: f64,

    /// New category.
    pub category: String,

    /// New subcategory.
    #[serde(default)]
    pub subcategory: String,

    /// New note.
    #[serde(default)]
    pub note: String,
}

/// Edit-expense tool - replaces the fields of an existing expense.
pub struct EditExpenseTool;

impl EditExpenseTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "edit_expense";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Edit an existing expense by id. Returns status 'not_found' if no expense has that id.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(id = ?params.id))]
    pub fn execute(params: &EditExpenseParams, store: &ExpenseStore) -> CallToolResult {
        let Some(id) = params.id else {
            return tool_error_result(&ToolError::MissingRequiredField("id"));
        };

        let draft = ExpenseDraft::new(&params.date, params.amount, &params.category)
            .with_subcategory(&params.subcategory)
            .with_note(&params.note);

        match store.update(id, &draft) {
            Ok(outcome) => {
                if outcome.is_success() {
                    info!("Updated expense {}", id);
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

        let params: EditExpenseParams = parse_http_params(arguments)?;
        let store = ExpenseStore::from_config(&config.expenses);
        http_result(Self::execute(&params, &store))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<EditExpenseParams>().into(),
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
                let params: EditExpenseParams = parse_params(args)?;
                run_blocking(move || Self::execute(&params, &store)).await
            }
            .boxed()
        })
    }
}
