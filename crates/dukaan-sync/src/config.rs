//! # Sync Configuration
//!
//! Configuration for the client side.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     DUKAAN_API_URL=http://localhost:5000/api                           │
//! │     DUKAAN_QUEUE_PATH=/tmp/queue.json                                  │
//! │     DUKAAN_TIMEOUT_SECS=10                                             │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/dukaan/sync.toml (Linux)                                 │
//! │     ~/Library/Application Support/com.dukaan.shop/sync.toml (macOS)    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     api_base_url = "http://localhost:5000/api"                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # sync.toml
//! api_base_url = "http://localhost:5000/api"
//! queue_path = "/home/asha/.local/share/dukaan/local_queue.json"
//! request_timeout_secs = 10
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{SyncError, SyncResult};

/// Queue file name used when no explicit path is configured.
const DEFAULT_QUEUE_FILE: &str = "local_queue.json";

/// Complete client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Base URL of the REST API, including the `/api` prefix.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Where the offline queue file lives. Defaults to the per-platform
    /// data directory.
    #[serde(default)]
    pub queue_path: Option<PathBuf>,

    /// Per-request timeout for API calls.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            api_base_url: default_api_base_url(),
            queue_path: None,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl SyncConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (sync.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> SyncResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "loading sync config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| SyncError::ConfigLoad(e.to_string()))?;
                config = toml::from_str(&contents)
                    .map_err(|e| SyncError::ConfigLoad(e.to_string()))?;
            } else {
                debug!(?path, "config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns defaults if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("failed to load sync config: {}. using defaults", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> SyncResult<()> {
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            return Err(SyncError::InvalidConfig(format!(
                "api_base_url must start with http:// or https://, got: {}",
                self.api_base_url
            )));
        }

        if self.request_timeout_secs == 0 {
            return Err(SyncError::InvalidConfig(
                "request_timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("DUKAAN_API_URL") {
            debug!(url = %url, "overriding API URL from environment");
            self.api_base_url = url;
        }

        if let Ok(path) = std::env::var("DUKAAN_QUEUE_PATH") {
            debug!(path = %path, "overriding queue path from environment");
            self.queue_path = Some(PathBuf::from(path));
        }

        if let Ok(timeout) = std::env::var("DUKAAN_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse::<u64>() {
                self.request_timeout_secs = secs;
            }
        }
    }

    /// Resolved queue file path: the configured one, or
    /// `<platform data dir>/local_queue.json`, or the working directory as a
    /// last resort.
    pub fn queue_path(&self) -> PathBuf {
        if let Some(path) = &self.queue_path {
            return path.clone();
        }
        directories::ProjectDirs::from("com", "dukaan", "shop")
            .map(|dirs| dirs.data_dir().join(DEFAULT_QUEUE_FILE))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_QUEUE_FILE))
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "dukaan", "shop")
            .map(|dirs| dirs.config_dir().join("sync.toml"))
    }
}
