//! Configuration for the Dream account client.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! the process environment (after loading a `.env` file if one exists). The
//! result is handed to the core through a [`SettingsProvider`] so nothing
//! downstream reaches for globals.
//!
//! [`SettingsProvider`]: dream_account_contracts::SettingsProvider
#![allow(missing_docs)]

pub mod constants;
pub mod loader;
pub mod models;
pub mod provider;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoader, error::ConfigLoadError};
pub use models::sources::{EnvConfig, FileConfig, FileServerConfig};
pub use models::{Config, ConfigMetadata, ServerConfig};
pub use provider::{SharedSettings, StaticSettings};
pub use validation::{ConfigWarning, ConfigWarnings};
