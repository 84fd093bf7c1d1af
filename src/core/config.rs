//! Configuration management for the tool servers.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables or defaults.

use super::error::Error;
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

/// Main configuration structure.
///
/// One process serves exactly one [`ServiceKind`]; everything the selected
/// service needs (file paths, transport, logging) lives here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Which tool set this process exposes.
    pub service: ServiceKind,

    /// Expense service storage configuration.
    pub expenses: ExpenseConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// The tool set served by a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    /// `add`, `random_number` and the `info://server` resource.
    #[default]
    Calculator,

    /// Expense CRUD tools and the `expense://categories` resource.
    Expense,
}

impl ServiceKind {
    /// Name reported to clients when `MCP_SERVER_NAME` is not set.
    pub fn default_server_name(self) -> &'static str {
        match self {
            Self::Calculator => "Simple calculator server",
            Self::Expense => "ExpenseTracker",
        }
    }

    /// Short label used in log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Calculator => "calculator",
            Self::Expense => "expense",
        }
    }
}

impl FromStr for ServiceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "calculator" | "calc" => Ok(Self::Calculator),
            "expense" | "expenses" | "expense_tracker" => Ok(Self::Expense),
            other => Err(format!("unknown service '{}'", other)),
        }
    }
}

/// Paths used by the expense service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseConfig {
    /// SQLite database file. Created on startup if missing.
    pub db_path: PathBuf,

    /// Category definitions served verbatim as `expense://categories`.
    pub categories_path: PathBuf,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

impl Default for ExpenseConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("expenses.db"),
            categories_path: PathBuf::from("categories.json"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let service = ServiceKind::default();
        Self {
            server: ServerConfig {
                name: service.default_server_name().to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            service,
            expenses: ExpenseConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration for the given service.
    pub fn for_service(service: ServiceKind) -> Self {
        let mut config = Self::default();
        config.service = service;
        config.server.name = service.default_server_name().to_string();
        config
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVICE`, `MCP_LOG_LEVEL`, `MCP_EXPENSE_DB_PATH`.
    ///
    /// An unset `MCP_SERVICE` selects the calculator; an unrecognised one is
    /// a configuration error.
    pub fn from_env() -> super::Result<Self> {
        dotenvy::dotenv().ok();

        let service = match std::env::var("MCP_SERVICE") {
            Ok(raw) => raw
                .parse::<ServiceKind>()
                .map_err(|e| Error::config(format!("MCP_SERVICE: {}", e)))?,
            Err(_) => ServiceKind::default(),
        };

        let mut config = Self::for_service(service);

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(db_path) = std::env::var("MCP_EXPENSE_DB_PATH") {
            config.expenses.db_path = PathBuf::from(db_path);
        }

        if let Ok(categories_path) = std::env::var("MCP_EXPENSE_CATEGORIES_PATH") {
            config.expenses.categories_path = PathBuf::from(categories_path);
        }

        if service == ServiceKind::Expense {
            info!(
                "Expense storage: db={:?}, categories={:?}",
                config.expenses.db_path, config.expenses.categories_path
            );
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        Ok(config)
    }
}
