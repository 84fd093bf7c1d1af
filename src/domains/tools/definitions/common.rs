//! Helpers shared by every tool definition.
//!
//! Result shaping: the text content always carries the compact JSON of the
//! tool's return value, and the structured content carries the same value as
//! an object. Non-object values (numbers, lists) are wrapped as
//! `{"result": value}` because MCP structured content must be an object.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content, JsonObject},
};
use schemars::JsonSchema;
use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;

use crate::domains::tools::ToolError;

/// Structured wrapper for tools whose return value is not an object.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ValueResult<T> {
    /// The tool's return value.
    pub result: T,
}

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Create an error result from a tool error.
pub fn tool_error_result(error: &ToolError) -> CallToolResult {
    error_result(&error.to_string())
}

/// Create a success result carrying `value` as both text and structured content.
pub fn json_result<T: Serialize>(value: &T) -> CallToolResult {
    let value = match serde_json::to_value(value) {
        Ok(v) => v,
        Err(e) => return error_result(&format!("Failed to serialize result: {}", e)),
    };

    let structured = if value.is_object() {
        value.clone()
    } else {
        serde_json::json!({ "result": value })
    };

    CallToolResult {
        content: vec![Content::text(value.to_string())],
        structured_content: Some(structured),
        is_error: Some(false),
        meta: None,
    }
}

/// Deserialize rmcp call arguments into a params struct.
pub fn parse_params<P: DeserializeOwned>(arguments: Option<JsonObject>) -> Result<P, McpError> {
    let args = arguments.unwrap_or_default();
    serde_json::from_value(serde_json::Value::Object(args)).map_err(|e| {
        McpError::invalid_params(ToolError::invalid_arguments(e.to_string()).to_string(), None)
    })
}

/// Run a synchronous tool body (SQLite access) on the blocking pool.
pub async fn run_blocking<F>(body: F) -> Result<CallToolResult, McpError>
where
    F: FnOnce() -> CallToolResult + Send + 'static,
{
    tokio::task::spawn_blocking(body)
        .await
        .map_err(|e| McpError::internal_error(format!("Task execution failed: {}", e), None))
}

/// Deserialize HTTP call arguments into a params struct.
#[cfg(feature = "http")]
pub fn parse_http_params<P: DeserializeOwned>(arguments: serde_json::Value) -> Result<P, String> {
    let arguments = if arguments.is_null() {
        serde_json::json!({})
    } else {
        arguments
    };
    serde_json::from_value(arguments)
        .map_err(|e| ToolError::invalid_arguments(e.to_string()).to_string())
}

/// Serialize a CallToolResult for the HTTP transport.
#[cfg(feature = "http")]
pub fn http_result(result: CallToolResult) -> Result<serde_json::Value, String> {
    serde_json::to_value(&result).map_err(|e| e.to_string())
}

/// Text of the first content block, if any.
#[cfg(test)]
pub fn first_text(result: &CallToolResult) -> &str {
    match result.content.first().map(|c| &c.raw) {
        Some(rmcp::model::RawContent::Text(text)) => &text.text,
        _ => panic!("Expected text content"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_result_wraps_scalars() {
        let result = json_result(&3.5_f64);
        assert_eq!(result.is_error, Some(false));
        assert_eq!(first_text(&result), "3.5");
        assert_eq!(
            result.structured_content,
            Some(serde_json::json!({ "result": 3.5 }))
        );
    }

    #[test]
    fn test_json_result_keeps_objects() {
        let result = json_result(&serde_json::json!({ "status": "success", "id": 1 }));
        assert_eq!(
            result.structured_content,
            Some(serde_json::json!({ "status": "success", "id": 1 }))
        );
    }

    #[test]
    fn test_error_result_flags_error() {
        let result = tool_error_result(&ToolError::MissingRequiredField("id"));
        assert!(result.is_error.unwrap_or(false));
        assert!(first_text(&result).contains("id"));
    }

    #[test]
    fn test_parse_params_rejects_bad_types() {
        #[derive(Debug, serde::Deserialize)]
        struct P {
            #[allow(dead_code)]
            a: f64,
        }
        let mut args = JsonObject::new();
        args.insert("a".to_string(), serde_json::json!("nope"));
        let err = parse_params::<P>(Some(args)).unwrap_err();
        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);
        assert!(err.message.starts_with("Invalid arguments:"));
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_parse_http_params_message() {
        #[derive(Debug, serde::Deserialize)]
        struct P {
            #[allow(dead_code)]
            id: i64,
        }
        let err = parse_http_params::<P>(serde_json::json!({ "id": "seven" })).unwrap_err();
        assert!(err.starts_with("Invalid arguments:"));
    }

    #[tokio::test]
    async fn test_run_blocking_returns_body_result() {
        let result = run_blocking(|| json_result(&42_i64)).await.unwrap();
        assert_eq!(first_text(&result), "42");
    }

    #[tokio::test]
    async fn test_run_blocking_reports_panics() {
        let err = run_blocking(|| panic!("store exploded")).await.unwrap_err();
        assert_eq!(err.code, rmcp::model::ErrorCode::INTERNAL_ERROR);
    }
}
