use std::sync::Arc;
use std::time::Duration;

/// Fallback used when no timeout is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// What the client needs to reach the account server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSettings {
    base_url: String,
    timeout: Duration,
}

impl AccountSettings {
    /// Trailing slashes are dropped from `base_url`; a zero timeout falls
    /// back to [`DEFAULT_TIMEOUT`].
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        let timeout = if timeout.is_zero() {
            DEFAULT_TIMEOUT
        } else {
            timeout
        };
        Self { base_url, timeout }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Join an endpoint path onto the base URL with exactly one slash.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Source of [`AccountSettings`].
///
/// `None` means the settings are unavailable; network operations turn that
/// into a local error without sending anything.
pub trait SettingsProvider: Send + Sync {
    fn settings(&self) -> Option<AccountSettings>;
}

impl SettingsProvider for AccountSettings {
    fn settings(&self) -> Option<AccountSettings> {
        Some(self.clone())
    }
}

impl<T> SettingsProvider for Arc<T>
where
    T: SettingsProvider + ?Sized,
{
    fn settings(&self) -> Option<AccountSettings> {
        (**self).settings()
    }
}

impl<T> SettingsProvider for Option<T>
where
    T: SettingsProvider,
{
    fn settings(&self) -> Option<AccountSettings> {
        self.as_ref().and_then(SettingsProvider::settings)
    }
}
