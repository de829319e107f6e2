use std::sync::Arc;

use dream_account_contracts::{AccountSettings, SettingsProvider};
use parking_lot::RwLock;

use crate::models::Config;

/// Fixed settings captured at construction.
#[derive(Debug, Clone)]
pub struct StaticSettings {
    settings: Option<AccountSettings>,
}

impl StaticSettings {
    pub fn new(settings: AccountSettings) -> Self {
        Self {
            settings: Some(settings),
        }
    }

    /// A provider that never has settings.
    pub fn unavailable() -> Self {
        Self { settings: None }
    }
}

impl From<&Config> for StaticSettings {
    fn from(config: &Config) -> Self {
        Self {
            settings: config.account_settings(),
        }
    }
}

impl SettingsProvider for StaticSettings {
    fn settings(&self) -> Option<AccountSettings> {
        self.settings.clone()
    }
}

/// Settings that can be swapped or withdrawn while clients hold the provider.
///
/// Every read takes a fresh snapshot, so an operation sees either the old or
/// the new settings, never a mix.
#[derive(Debug, Clone, Default)]
pub struct SharedSettings {
    inner: Arc<RwLock<Option<AccountSettings>>>,
}

impl SharedSettings {
    pub fn new(settings: Option<AccountSettings>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(settings)),
        }
    }

    pub fn replace(&self, settings: AccountSettings) {
        *self.inner.write() = Some(settings);
    }

    pub fn clear(&self) {
        *self.inner.write() = None;
    }
}

impl SettingsProvider for SharedSettings {
    fn settings(&self) -> Option<AccountSettings> {
        self.inner.read().clone()
    }
}
