//! Value types shared across the Dream account crates.
//!
//! Everything here is plain data: credentials going out, user records and
//! operation results coming back, and the closed error taxonomy the core
//! classifies every outcome into.
#![allow(missing_docs)]

pub mod credentials;
pub mod error_kind;
pub mod operation;
pub mod result;
pub mod user;
pub mod wire;

pub use credentials::Credentials;
pub use error_kind::{ErrorFamily, ErrorKind};
pub use operation::OperationKind;
pub use result::OperationResult;
pub use user::UserRecord;
