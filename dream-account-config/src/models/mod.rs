pub mod sources;

use std::path::PathBuf;
use std::time::Duration;

use dream_account_contracts::AccountSettings;

use crate::constants::DEFAULT_TIMEOUT;

/// Effective configuration after all layers are merged and validated.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub server: ServerConfig,
    pub metadata: ConfigMetadata,
}

impl Config {
    /// Settings for the core, or `None` when no base URL is configured.
    pub fn account_settings(&self) -> Option<AccountSettings> {
        self.server
            .base_url
            .as_ref()
            .map(|url| AccountSettings::new(url.as_str(), self.server.timeout))
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Normalised: scheme present, no trailing slash.
    pub base_url: Option<String>,
    pub timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Where the configuration came from.
#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub env_file_loaded: bool,
    pub config_path: Option<PathBuf>,
}
