//! List-expenses-in-range tool definition.

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

/// Parameters for the range listing tool.
///
/// Bounds are compared to the stored dates as text, both ends inclusive.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListExpenseRangeParams {
    /// First date to include, e.g. `2024-01-01`.
    pub start_date: String,

    /// Last date to include, e.g. `2024-01-31`.
    pub end_date: String,
}

/// Range listing tool - returns expenses between two dates, ordered by date.
pub struct ListExpenseRangeTool;

impl ListExpenseRangeTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "list_expense_in_range";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "List expenses whose date falls between start_date and end_date (inclusive). \
         Dates are compared as text, so use YYYY-MM-DD.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(start = %params.start_date, end = %params.end_date))]
    pub fn execute(params: &ListExpenseRangeParams, store: &ExpenseStore) -> CallToolResult {
        match store.list_in_range(&params.start_date, &params.end_date) {
            Ok(expenses) => {
                debug!("Found {} expenses in range", expenses.len());
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

        let params: ListExpenseRangeParams = parse_http_params(arguments)?;
        let store = ExpenseStore::from_config(&config.expenses);
        http_result(Self::execute(&params, &store))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<ListExpenseRangeParams>().into(),
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
                let params: ListExpenseRangeParams = parse_params(args)?;
                run_blocking(move || Self::execute(&params, &store)).await
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::expenses::ExpenseDraft;
    use crate::domains::tools::definitions::expense::test_support::temp_store;

    fn range(start: &str, end: &str) -> ListExpenseRangeParams {
        ListExpenseRangeParams {
            start_date: start.to_string(),
            end_date: end.to_string(),
        }
    }

    #[test]
    fn test_range_filters_and_orders() {
        let (_dir, store) = temp_store();
        for date in ["2024-03-01", "2024-01-15", "2023-12-31", "2024-02-10"] {
            store.create(&ExpenseDraft::new(date, 1.0, "misc")).unwrap();
        }

        let result = ListExpenseRangeTool::execute(&range("2024-01-01", "2024-02-29"), &store);
        let rows = result.structured_content.unwrap()["result"].clone();
        let dates: Vec<_> = rows
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["date"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(dates, vec!["2024-01-15", "2024-02-10"]);
    }

    #[test]
    fn test_range_inverted_bounds_is_empty() {
        let (_dir, store) = temp_store();
        store.create(&ExpenseDraft::new("2024-01-15", 1.0, "misc")).unwrap();

        let result = ListExpenseRangeTool::execute(&range("2024-12-31", "2024-01-01"), &store);
        assert_eq!(result.is_error, Some(false));
        assert_eq!(
            result.structured_content,
            Some(serde_json::json!({ "result": [] }))
        );
    }
}
