//! Server configuration for the docgate HTTP API.
//!
//! This module provides configuration types for the server, supporting
//! command line arguments, environment variables and programmatic construction.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `DOCGATE_PORT` | 8080 | Server port |
//! | `DOCGATE_HOST` | 127.0.0.1 | Host to bind |
//! | `DOCGATE_LOG_LEVEL` | info | Log level |
//! | `DOCGATE_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `DOCGATE_ENABLE_CORS` | true | Enable CORS |
//! | `DOCGATE_CORS_ORIGINS` | * | Allowed origins |
//! | `DOCGATE_BACKEND` | memory | Store backend (`memory` or `mongodb`) |
//! | `DOCGATE_DATABASE_URL` | | MongoDB connection string |
//! | `DOCGATE_DATABASE_NAME` | docgate | MongoDB database name |
//! | `DOCGATE_STRING_ID_COLLECTIONS` | | Extra collections matched by string `_id` only |
//!
//! # Example
//!
//! ```rust,ignore
//! use docgate_server::ServerConfig;
//!
//! let config = ServerConfig {
//!     port: 3000,
//!     host: "0.0.0.0".to_string(),
//!     ..Default::default()
//! };
//! ```

use std::fmt;

use clap::{Parser, ValueEnum};
use docgate::config::CollectionConfigs;

/// Store backend the server runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum BackendKind {
    /// Process-local store, lost on restart.
    #[default]
    Memory,
    /// MongoDB database (requires the `mongodb` feature).
    Mongodb,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Memory => write!(f, "memory"),
            BackendKind::Mongodb => write!(f, "mongodb"),
        }
    }
}

/// Server configuration for the docgate HTTP API.
#[derive(Debug, Clone, Parser)]
#[command(name = "docgate-server")]
#[command(about = "Generic HTTP gateway over schema-less document collections")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "DOCGATE_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "DOCGATE_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "DOCGATE_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Request timeout in seconds.
    #[arg(long, env = "DOCGATE_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "DOCGATE_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "DOCGATE_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Store backend.
    #[arg(long, env = "DOCGATE_BACKEND", value_enum, default_value_t = BackendKind::Memory)]
    pub backend: BackendKind,

    /// Database connection string.
    #[arg(long, env = "DOCGATE_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Database name.
    #[arg(long, env = "DOCGATE_DATABASE_NAME", default_value = "docgate")]
    pub database_name: String,

    /// Additional collections whose `_id` is always a plain string (comma-separated).
    #[arg(long, env = "DOCGATE_STRING_ID_COLLECTIONS", value_delimiter = ',')]
    pub string_id_collections: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            backend: BackendKind::Memory,
            database_url: None,
            database_name: "docgate".to_string(),
            string_id_collections: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Builds the per-collection configuration table: the built-in string-id
    /// collections plus the configured ones.
    pub fn collection_configs(&self) -> CollectionConfigs {
        CollectionConfigs::default().with_string_ids(
            self.string_id_collections
                .iter()
                .map(|name| name.trim())
                .filter(|name| !name.is_empty()),
        )
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.database_name.trim().is_empty() {
            errors.push("Database name cannot be empty".to_string());
        }

        if self.backend == BackendKind::Mongodb && self.database_url.is_none() {
            errors.push("The mongodb backend requires a database URL".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    pub fn for_testing() -> Self {
        Self {
            port: 0, // Let OS assign port
            log_level: "debug".to_string(),
            request_timeout: 5,
            enable_cors: false,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use docgate::config::IdMode;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.backend, BackendKind::Memory);
        assert!(config.enable_cors);
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            port: 3000,
            host: "0.0.0.0".to_string(),
            ..Default::default()
        };
        assert_eq!(config.socket_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_validate_valid() {
        assert!(ServerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let config = ServerConfig {
            port: 0,
            request_timeout: 0,
            backend: BackendKind::Mongodb,
            ..Default::default()
        };
        let errors = config.validate().unwrap_err();

        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e.contains("Port")));
        assert!(errors.iter().any(|e| e.contains("database URL")));
    }

    #[test]
    fn test_parse_args() {
        let config = ServerConfig::try_parse_from([
            "docgate-server",
            "--port",
            "9000",
            "--backend",
            "mongodb",
            "--database-url",
            "mongodb://localhost:27017",
            "--string-id-collections",
            "legacy,imports",
        ])
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.backend, BackendKind::Mongodb);
        assert_eq!(config.string_id_collections, ["legacy", "imports"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_rejects_invalid_values() {
        let result = ServerConfig::try_parse_from(["docgate-server", "--backend", "postgres"]);
        assert!(result.is_err());

        let result = ServerConfig::try_parse_from(["docgate-server", "--port", "not-a-port"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_collection_configs_include_builtin_and_extra() {
        let config = ServerConfig {
            string_id_collections: vec!["legacy".to_string(), " ".to_string()],
            ..Default::default()
        };
        let configs = config.collection_configs();

        assert_eq!(configs.get("shiftwise_data").id_mode, IdMode::String);
        assert_eq!(configs.get("legacy").id_mode, IdMode::String);
        assert_eq!(configs.get("users").id_mode, IdMode::Flexible);
    }

    #[test]
    fn test_for_testing() {
        let config = ServerConfig::for_testing();
        assert_eq!(config.port, 0);
        assert!(!config.enable_cors);
    }
}
