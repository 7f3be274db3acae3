//! Session identifiers
//!
//! The workflow keeps per-session memory keyed by `sessionId`, so one id is
//! generated per run and reused for every request of that conversation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque token correlating all requests of one conversation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh id: the prefix followed by a random v4 uuid
    pub fn generate(prefix: &str) -> Self {
        Self(format!("{}{}", prefix, uuid::Uuid::new_v4().simple()))
    }

    /// Wrap an existing id (e.g. one handed over by another front-end)
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
