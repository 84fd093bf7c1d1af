//! Random number tool definition.

use futures::FutureExt;
use rand::Rng;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::super::common::{ValueResult, json_result, parse_params, tool_error_result};
use crate::domains::tools::ToolError;

/// Parameters for the random number tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RandomNumberParams {
    /// Inclusive lower bound.
    pub min_value: i64,

    /// Inclusive upper bound.
    pub max_value: i64,
}

/// Pick an integer uniformly from `[min, max]`.
pub fn random_integer<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64) -> Result<i64, ToolError> {
    if min > max {
        return Err(ToolError::invalid_range(min, max));
    }
    Ok(rng.random_range(min..=max))
}

/// Random number tool - generates an integer in an inclusive range.
pub struct RandomNumberTool;

impl RandomNumberTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "random_number";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Generates a random integer between min_value and max_value.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(min = params.min_value, max = params.max_value))]
    pub fn execute(params: &RandomNumberParams) -> CallToolResult {
        match random_integer(&mut rand::rng(), params.min_value, params.max_value) {
            Ok(value) => {
                debug!("random_number = {}", value);
                json_result(&value)
            }
            Err(e) => tool_error_result(&e),
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(arguments: serde_json::Value) -> Result<serde_json::Value, String> {
        use super::super::common::{http_result, parse_http_params};

        let params: RandomNumberParams = parse_http_params(arguments)?;
        http_result(Self::execute(&params))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<RandomNumberParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<ValueResult<i64>>().into()),
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
                let params: RandomNumberParams = parse_params(args)?;
                Ok(Self::execute(&params))
            }
            .boxed()
        })
    }
}
