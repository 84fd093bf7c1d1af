//! Add tool definition.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::super::common::{ValueResult, json_result, parse_params};

/// Parameters for the add tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddParams {
    /// First operand.
    pub a: f64,

    /// Second operand.
    pub b: f64,
}

/// Add tool - returns the sum of two numbers.
pub struct AddTool;

impl AddTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "add";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Returns the sum of two numbers.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(a = params.a, b = params.b))]
    pub fn execute(params: &AddParams) -> CallToolResult {
        let sum = params.a + params.b;
        debug!("add = {}", sum);
        json_result(&sum)
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(arguments: serde_json::Value) -> Result<serde_json::Value, String> {
        use super::super::common::{http_result, parse_http_params};

        let params: AddParams = parse_http_params(arguments)?;
        http_result(Self::execute(&params))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<AddParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<ValueResult<f64>>().into()),
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for rmcp transports.
    pub fn create_route<S>() -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone();
            async move {
                let params: AddParams = parse_params(args)?;
                Ok(Self::execute(&params))
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_sums() {
        let result = AddTool::execute(&AddParams { a: 2.5, b: 4.0 });
        assert_eq!(result.is_error, Some(false));
        let structured = result.structured_content.unwrap();
        assert_eq!(structured["result"], 6.5);
    }

    #[test]
    fn test_add_matches_float_addition() {
        for (a, b) in [(0.1, 0.2), (-3.0, 3.0), (1e300, 1e300), (-7.25, -0.75)] {
            let result = AddTool::execute(&AddParams { a, b });
            let structured = result.structured_content.unwrap();
            assert_eq!(structured["result"].as_f64(), Some(a + b));
        }
    }

    #[test]
    fn test_to_tool_metadata() {
        let tool = AddTool::to_tool();
        assert_eq!(tool.name, "add");
        assert!(tool.output_schema.is_some());
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_add_http_handler() {
        let result = AddTool::http_handler(serde_json::json!({ "a": 1, "b": 2 })).unwrap();
        assert_eq!(result["structuredContent"]["result"], 3.0);
        assert_eq!(result["isError"], false);
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_add_http_handler_missing_param() {
        assert!(AddTool::http_handler(serde_json::json!({ "a": 1 })).is_err());
    }
}
