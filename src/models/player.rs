//! Player identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, unique player identifier.
///
/// The engine assumes nothing about its contents beyond equality and a
/// total order (used to keep every internal collection deterministic).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Creates a player ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The underlying token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
