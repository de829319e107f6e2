use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Name/password pair supplied by the caller for register and login.
///
/// Never stored by the session. The password is wiped when the value is
/// dropped and is redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Credentials {
    #[cfg_attr(feature = "serde", serde(rename = "user_name"))]
    name: String,
    #[cfg_attr(feature = "serde", serde(rename = "user_password"))]
    password: String,
}

impl Credentials {
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Both fields must be non-empty before anything is sent.
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("name", &self.name)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
