//! MCP tool servers.
//!
//! Two small Model Context Protocol services share this crate:
//!
//! - **calculator**: `add`, `random_number` and the `info://server` resource
//! - **expense**: expense CRUD and summaries over a SQLite file, plus the
//!   `expense://categories` resource
//!
//! One process serves one of them, selected by [`core::ServiceKind`].
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server handler and transports
//! - **domains**: tools, resources and expense storage
//!
//! # Example
//!
//! ```rust,no_run
//! use tool_servers::core::{Config, McpServer, ServiceKind};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::for_service(ServiceKind::Expense);
//!     let server = McpServer::new(config)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result, ServiceKind};
