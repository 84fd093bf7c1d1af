//! Add-expense tool definition.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

use super::super::common::{json_result, parse_params, run_blocking, tool_error_result};
use crate::core::config::Config;
use crate::domains::expenses::{ExpenseDraft, ExpenseStore, MutationOutcome};
use crate::domains::tools::ToolError;

/// Parameters for the add-expense tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddExpenseParams {
    /// Expense date, ISO-8601 (`YYYY-MM-DD`) recommended.
    pub date: String,

    /// Amount spent.
    pub amount: f64,

    /// Category name.
    pub category: String,

    /// Optional subcategory.
    #[serde(default)]
    pub subcategory: String,

    /// Optional note.
    #[serde(default)]
    pub note: String,
}

impl AddExpenseParams {
    fn draft(&self) -> ExpenseDraft {
        ExpenseDraft::new(&self.date, self.amount, &self.category)
            .with_subcategory(&self.subcategory)
            .with_note(&self.note)
    }
}

/// Add-expense tool - inserts a new expense row.
pub struct AddExpenseTool;

impl AddExpenseTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "add_expenses";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Add a new expense entry to the database.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(date = %params.date, category = %params.category))]
    pub fn execute(params: &AddExpenseParams, store: &ExpenseStore) -> CallToolResult {
        match store.create(&params.draft()) {
            Ok(outcome) => {
                info!("Added expense {}", outcome.id);
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

        let params: AddExpenseParams = parse_http_params(arguments)?;
        let store = ExpenseStore::from_config(&config.expenses);
        http_result(Self::execute(&params, &store))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<AddExpenseParams>().into(),
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
                let params: AddExpenseParams = parse_params(args)?;
                run_blocking(move || Self::execute(&params, &store)).await
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::first_text;
    use crate::domains::tools::definitions::expense::test_support::temp_store;

    fn params(date: &str, amount: f64, category: &str) -> AddExpenseParams {
        AddExpenseParams {
            date: date.to_string(),
            amount,
            category: category.to_string(),
            subcategory: String::new(),
            note: String::new(),
        }
    }

    #[test]
    fn test_add_expense_returns_success_and_id() {
        let (_dir, store) = temp_store();
        let result = AddExpenseTool::execute(&params("2024-01-01", 10.0, "food"), &store);

        assert_eq!(result.is_error, Some(false));
        let structured = result.structured_content.unwrap();
        assert_eq!(structured["status"], "success");
        let id = structured["id"].as_i64().unwrap();

        let rows = store.list_all().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, id);
    }

    #[test]
    fn test_add_expense_defaults_optional_fields() {
        let parsed: AddExpenseParams = serde_json::from_value(serde_json::json!({
            "date": "2024-01-01",
            "amount": 3,
            "category": "food"
        }))
        .unwrap();
        assert_eq!(parsed.subcategory, "");
        assert_eq!(parsed.note, "");
    }

    #[test]
    fn test_add_expense_keeps_negative_amounts() {
        let (_dir, store) = temp_store();
        AddExpenseTool::execute(&params("2024-01-01", -4.5, "refund"), &store);
        assert_eq!(store.list_all().unwrap()[0].amount, -4.5);
    }

    #[test]
    fn test_add_expense_storage_failure() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let store = ExpenseStore::new(temp_dir.path().join("no_such_dir").join("x.db"));

        let result = AddExpenseTool::execute(&params("2024-01-01", 1.0, "food"), &store);
        assert!(result.is_error.unwrap_or(false));
        assert!(first_text(&result).contains("Storage unavailable"));
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_add_expense_http_handler() {
        let (dir, store) = temp_store();
        let mut config = Config::for_service(crate::core::ServiceKind::Expense);
        config.expenses.db_path = dir.path().join("expenses.db");

        let result = AddExpenseTool::http_handler(
            serde_json::json!({ "date": "2024-01-01", "amount": 2.0, "category": "food" }),
            Arc::new(config),
        )
        .unwrap();
        assert_eq!(result["structuredContent"]["status"], "success");
        assert_eq!(store.list_all().unwrap().len(), 1);
    }
}
