use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which endpoint produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OperationKind {
    /// Never executed.
    #[default]
    None,
    Register,
    Login,
    Auth,
}

impl OperationKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Register => "register",
            Self::Login => "login",
            Self::Auth => "auth",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
