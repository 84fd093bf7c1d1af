//! Summarize tool definition.

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
use crate::domains::expenses::{CategoryTotal, ExpenseStore};
use crate::domains::tools::ToolError;

/// Parameters for the summarize tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SummarizeParams {
    /// First date to include.
    pub start_date: String,

    /// Last date to include.
    pub end_date: String,

    /// Restrict the summary to this category.
    #[serde(default)]
    pub category: Option<String>,
}

/// Summarize tool - per-category totals over a date range.
pub struct SummarizeTool;

impl SummarizeTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "summarize";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Summarize expenses by category within an inclusive date range, \
         optionally restricted to a single category.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(start = %params.start_date, end = %params.end_date, category = ?params.category))]
    pub fn execute(params: &SummarizeParams, store: &ExpenseStore) -> CallToolResult {
        match store.summarize(
            &params.start_date,
            &params.end_date,
            params.category.as_deref(),
        ) {
            Ok(totals) => {
                debug!("Summarized {} categories", totals.len());
                json_result(&totals)
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

        let params: SummarizeParams = parse_http_params(arguments)?;
        let store = ExpenseStore::from_config(&config.expenses);
        http_result(Self::execute(&params, &store))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<SummarizeParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<ValueResult<Vec<CategoryTotal>>>().into()),
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
                let params: SummarizeParams = parse_params(args)?;
                run_blocking(move || Self::execute(&params, &store)).await
            }
            .boxed()
        })
    }
}
