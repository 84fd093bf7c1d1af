//! Tool-specific error types.

use thiserror::Error;

use crate::domains::expenses::StoreError;

/// Errors that can occur during tool operations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Invalid arguments were provided to the tool.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// A random range whose lower bound exceeds the upper bound.
    #[error("Invalid range: min_value ({min}) is greater than max_value ({max})")]
    InvalidRange { min: i64, max: i64 },

    /// A field the operation cannot run without was omitted.
    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),

    /// The backing store failed.
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "invalid range" error.
    pub fn invalid_range(min: i64, max: i64) -> Self {
        Self::InvalidRange { min, max }
    }
}
