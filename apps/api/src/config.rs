//! API server configuration.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults - there is no config file on the server side.

use std::env;
use std::path::PathBuf;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// HTTP listen port.
    pub port: u16,

    /// Directory holding the JSON collection files.
    pub data_dir: PathBuf,
}

impl ApiConfig {
    /// Loads configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?;

        let data_dir = env::var("DUKAAN_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("database"));

        Ok(ApiConfig { port, data_dir })
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
