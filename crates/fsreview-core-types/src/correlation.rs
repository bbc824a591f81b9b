//! Correlation types for comparison sessions
//!
//! Every comparison run gets a `SessionId` so that log lines and errors
//! emitted by the store, the engine and the CLI can be tied together.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one comparison session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a new SessionId using UUIDv7 (time ordered)
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Context carried through one comparison run
#[derive(Debug, Clone)]
pub struct RunContext {
    pub session_id: SessionId,
    pub hostname: Option<String>,
}

impl RunContext {
    /// Create a new context with a fresh SessionId
    pub fn new() -> Self {
        Self {
            session_id: SessionId::new(),
            hostname: None,
        }
    }

    /// Attach the host under review
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}
