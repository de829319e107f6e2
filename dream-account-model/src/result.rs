use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{ErrorKind, OperationKind, UserRecord};

/// Outcome of one account operation.
///
/// Every completed operation, successful or not, yields a result with
/// `is_valid() == true`. Only [`OperationResult::default`] is invalid.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct OperationResult {
    kind: OperationKind,
    error: ErrorKind,
    user: UserRecord,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    token: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "String::is_empty"))]
    message: String,
    valid: bool,
}

impl OperationResult {
    pub fn success(
        kind: OperationKind,
        user: UserRecord,
        token: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            error: ErrorKind::Normal,
            user,
            token: token.filter(|t| !t.is_empty()),
            message: message.into(),
            valid: true,
        }
    }

    /// A failure with the default user and no token.
    pub fn failure(kind: OperationKind, error: ErrorKind) -> Self {
        Self::failure_with_message(kind, error, String::new())
    }

    pub fn failure_with_message(
        kind: OperationKind,
        error: ErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            error,
            user: UserRecord::default(),
            token: None,
            message: message.into(),
            valid: true,
        }
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn error(&self) -> ErrorKind {
        self.error
    }

    pub fn user(&self) -> &UserRecord {
        &self.user
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Server supplied text, empty when there was none.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn is_success(&self) -> bool {
        self.valid && self.error.is_normal()
    }
}

impl Default for OperationResult {
    /// The never-executed value. Its error is `Unknown` so it can not be
    /// mistaken for a success.
    fn default() -> Self {
        Self {
            kind: OperationKind::None,
            error: ErrorKind::Unknown,
            user: UserRecord::default(),
            token: None,
            message: String::new(),
            valid: false,
        }
    }
}

impl fmt::Debug for OperationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationResult")
            .field("kind", &self.kind)
            .field("error", &self.error)
            .field("user", &self.user)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("message", &self.message)
            .field("valid", &self.valid)
            .finish()
    }
}
