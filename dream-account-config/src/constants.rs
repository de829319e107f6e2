use std::time::Duration;

/// Base URL of the account server, e.g. `https://accounts.example.com`.
pub const ENV_BASE_URL: &str = "DREAM_ACCOUNT_BASE_URL";
/// Request timeout in humantime syntax, e.g. `10s` or `1m 30s`.
pub const ENV_TIMEOUT: &str = "DREAM_ACCOUNT_TIMEOUT";
/// Path to a TOML settings file.
pub const ENV_CONFIG_PATH: &str = "DREAM_ACCOUNT_CONFIG_PATH";

/// File picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "dream-account.toml";

pub const DEFAULT_TIMEOUT: Duration = dream_account_contracts::DEFAULT_TIMEOUT;
