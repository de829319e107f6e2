//! Trait surfaces for the collaborators the account client depends on but
//! does not implement: the HTTP transport and the settings provider.
//!
//! The core crate only talks to these traits, so tests can swap in scripted
//! transports and settings that disappear at runtime.
#![allow(missing_docs)]

pub mod http;
pub mod settings;

pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};
pub use settings::{AccountSettings, DEFAULT_TIMEOUT, SettingsProvider};

/// Frequently used imports for transport and settings implementors.
pub mod prelude {
    pub use super::http::{
        HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError,
    };
    pub use super::settings::{AccountSettings, SettingsProvider};
}
