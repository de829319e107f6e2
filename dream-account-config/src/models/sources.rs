use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{ENV_BASE_URL, ENV_CONFIG_PATH, ENV_TIMEOUT};
use crate::loader::error::ConfigLoadError;

/// Raw configuration as written in a TOML file.
///
/// ```toml
/// [server]
/// base_url = "https://accounts.example.com"
/// timeout = "10s"
/// ```
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub server: FileServerConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileServerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents = std::fs::read_to_string(path).map_err(|source| {
            ConfigLoadError::FileIo {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Self::parse(&contents, path)
    }

    pub fn parse(contents: &str, origin: &Path) -> Result<Self, ConfigLoadError> {
        toml::from_str(contents).map_err(|source| ConfigLoadError::FileParse {
            path: origin.to_path_buf(),
            source,
        })
    }
}

/// Raw values read from the environment.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub base_url: Option<String>,
    pub timeout: Option<String>,
    pub config_path: Option<PathBuf>,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key).filter(|value| !value.trim().is_empty())
        };
        Self {
            base_url: read(ENV_BASE_URL),
            timeout: read(ENV_TIMEOUT),
            config_path: read(ENV_CONFIG_PATH).map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn file_config_tolerates_missing_sections() {
        let parsed = FileConfig::parse("", Path::new("inline")).unwrap();
        assert!(parsed.server.base_url.is_none());

        let parsed = FileConfig::parse(
            "[server]\nbase_url = \"https://a.example\"\ntimeout = \"5s\"\n",
            Path::new("inline"),
        )
        .unwrap();
        assert_eq!(parsed.server.base_url.as_deref(), Some("https://a.example"));
        assert_eq!(parsed.server.timeout.as_deref(), Some("5s"));
    }

    #[test]
    fn env_lookup_skips_blank_values() {
        let vars: HashMap<&str, &str> =
            [(ENV_BASE_URL, "  "), (ENV_TIMEOUT, "3s")].into_iter().collect();
        let env = EnvConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert!(env.base_url.is_none());
        assert_eq!(env.timeout.as_deref(), Some("3s"));
        assert!(env.config_path.is_none());
    }
}
