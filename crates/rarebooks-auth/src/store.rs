//! Persistence for the signed-in session.

use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use crate::{AuthError, AuthToken, User};

/// What survives a page reload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: AuthToken,
    pub user: User,
}

impl StoredSession {
    pub fn to_json(&self) -> Result<String, AuthError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(raw: &str) -> Result<Self, AuthError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Backing store for the session, a cookie in the browser.
pub trait TokenStore {
    fn load(&self) -> Result<Option<StoredSession>, AuthError>;
    fn save(&self, session: &StoredSession) -> Result<(), AuthError>;
    fn clear(&self) -> Result<(), AuthError>;
}

/// In-memory store holding the serialized session.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    raw: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a raw value, which may be garbage.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Mutex::new(Some(raw.into())),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.raw.lock().map(|raw| raw.is_none()).unwrap_or(true)
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<StoredSession>, AuthError> {
        let raw = self
            .raw
            .lock()
            .map_err(|e| AuthError::Store(e.to_string()))?;
        raw.as_deref().map(StoredSession::from_json).transpose()
    }

    fn save(&self, session: &StoredSession) -> Result<(), AuthError> {
        let json = session.to_json()?;
        *self
            .raw
            .lock()
            .map_err(|e| AuthError::Store(e.to_string()))? = Some(json);
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        *self
            .raw
            .lock()
            .map_err(|e| AuthError::Store(e.to_string()))? = None;
        Ok(())
    }
}
