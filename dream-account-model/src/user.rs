#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Account as reported by the server.
///
/// Only ever built from a decoded response. Missing fields fall back to an
/// empty name and [`UserRecord::DEFAULT_ID`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UserRecord {
    name: String,
    id: i64,
}

impl UserRecord {
    /// Sentinel id meaning "unknown or not parsed".
    pub const DEFAULT_ID: i64 = 9999;

    pub fn new(name: impl Into<String>, id: i64) -> Self {
        Self {
            name: name.into(),
            id,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    /// False while the id is still the sentinel.
    pub fn is_known(&self) -> bool {
        self.id != Self::DEFAULT_ID
    }
}

impl Default for UserRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            id: Self::DEFAULT_ID,
        }
    }
}
