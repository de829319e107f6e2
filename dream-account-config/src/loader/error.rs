use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file {path}")]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}")]
    FileParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid base URL '{value}'")]
    InvalidBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported base URL scheme '{scheme}' (expected http or https)")]
    UnsupportedScheme { scheme: String },
    #[error("invalid timeout '{value}'")]
    InvalidTimeout {
        value: String,
        #[source]
        source: humantime::DurationError,
    },
    #[error("timeout must be greater than zero")]
    ZeroTimeout,
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}
