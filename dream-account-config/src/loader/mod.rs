pub mod error;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::constants::DEFAULT_CONFIG_FILE;
use crate::models::sources::{EnvConfig, FileConfig};
use crate::models::{Config, ConfigMetadata, ServerConfig};
use crate::validation::{ConfigWarnings, normalize_base_url, parse_timeout};
use error::ConfigLoadError;

/// Configuration plus the non-fatal problems found while building it.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

/// Layered loader: defaults, then TOML file, then environment.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    load_dotenv: bool,
    env: Option<EnvConfig>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            config_path: None,
            load_dotenv: true,
            env: None,
        }
    }

    /// Read this file instead of looking one up.
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Skip the `.env` file.
    pub fn without_dotenv(mut self) -> Self {
        self.load_dotenv = false;
        self
    }

    /// Use these values instead of the process environment.
    pub fn with_env(mut self, env: EnvConfig) -> Self {
        self.env = Some(env);
        self
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = self.load_dotenv && load_dotenv_file()?;

        let env = match &self.env {
            Some(env) => env.clone(),
            None => EnvConfig::from_env(),
        };

        let config_path = self
            .config_path
            .clone()
            .or_else(|| env.config_path.clone())
            .or_else(|| {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                default.is_file().then_some(default)
            });

        let file = match config_path.as_deref() {
            Some(path) => {
                debug!(path = %path.display(), "reading account config file");
                FileConfig::load(path)?
            }
            None => FileConfig::default(),
        };

        let mut warnings = ConfigWarnings::default();
        let server = merge_server(&file, &env, &mut warnings)?;

        Ok(ConfigLoad {
            config: Config {
                server,
                metadata: ConfigMetadata {
                    env_file_loaded,
                    config_path,
                },
            },
            warnings,
        })
    }

    /// Parse a TOML document on its own, without touching the environment.
    pub fn load_from_str(
        contents: &str,
        origin: &Path,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let file = FileConfig::parse(contents, origin)?;
        let mut warnings = ConfigWarnings::default();
        let server = merge_server(&file, &EnvConfig::default(), &mut warnings)?;
        Ok(ConfigLoad {
            config: Config {
                server,
                metadata: ConfigMetadata {
                    env_file_loaded: false,
                    config_path: Some(origin.to_path_buf()),
                },
            },
            warnings,
        })
    }
}

fn load_dotenv_file() -> Result<bool, ConfigLoadError> {
    match dotenvy::dotenv() {
        Ok(path) => {
            debug!(path = %path.display(), "loaded .env file");
            Ok(true)
        }
        Err(err) if err.not_found() => Ok(false),
        Err(err) => Err(err.into()),
    }
}

fn merge_server(
    file: &FileConfig,
    env: &EnvConfig,
    warnings: &mut ConfigWarnings,
) -> Result<ServerConfig, ConfigLoadError> {
    let mut server = ServerConfig::default();

    let raw_url = env
        .base_url
        .as_deref()
        .or(file.server.base_url.as_deref())
        .filter(|value| !value.trim().is_empty());
    match raw_url {
        Some(raw) => server.base_url = Some(normalize_base_url(raw, warnings)?),
        None => warnings.push_with_hint(
            "no account server base URL configured",
            "set DREAM_ACCOUNT_BASE_URL or [server].base_url; network operations will fail locally",
        ),
    }

    if let Some(raw) = env.timeout.as_deref().or(file.server.timeout.as_deref()) {
        server.timeout = parse_timeout(raw)?;
    }

    Ok(server)
}
