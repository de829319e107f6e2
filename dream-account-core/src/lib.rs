//! Asynchronous request/response pipeline for the Dream account server.
//!
//! The [`AccountSession`] is the entry point. Each of its network operations
//! runs the same sequence: validate input locally, hand a request to the
//! [`RequestDispatcher`], decode whatever comes back, classify it into an
//! [`ErrorKind`](dream_account_model::ErrorKind), update the session token if
//! needed and finally notify the caller. Every operation completes with an
//! [`OperationResult`](dream_account_model::OperationResult); nothing is
//! thrown past the session.
//!
//! Callers that want fire-once event objects instead of callbacks use the
//! [`bridge`] module, which also hosts the standalone latency probe.

pub mod bridge;
pub mod classifier;
pub mod decoder;
pub mod dispatcher;
pub mod session;
pub mod transport;

pub use bridge::{
    AccountOperation, OperationCompletion, OperationEvent, PING_FAILED,
    PingOperation,
};
pub use classifier::classify;
pub use decoder::{DecodeOutcome, DecodeStrategy, Payload, decode};
pub use dispatcher::{RequestDispatcher, TransportOutcome};
pub use session::{AccountSession, ObserverId, TokenChanged, WeakSession};
pub use transport::ReqwestTransport;

pub use dream_account_contracts as contracts;
pub use dream_account_model as model;

/// Imports most callers need.
pub mod prelude {
    pub use crate::bridge::{AccountOperation, OperationEvent, PingOperation};
    pub use crate::session::{AccountSession, TokenChanged, WeakSession};
    pub use crate::transport::ReqwestTransport;
    pub use dream_account_contracts::{
        AccountSettings, HttpTransport, SettingsProvider,
    };
    pub use dream_account_model::{
        Credentials, ErrorKind, OperationKind, OperationResult, UserRecord,
    };
}
