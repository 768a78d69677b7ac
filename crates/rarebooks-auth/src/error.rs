//! Authentication errors.

use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The API rejected the email/password pair.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Login form input failed client-side checks.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Session expired.
    #[error("session expired")]
    SessionExpired,

    /// Token is not a well-formed bearer token.
    #[error("token invalid")]
    InvalidToken,

    /// The token store could not be read or written.
    #[error("token store error: {0}")]
    Store(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl AuthError {
    /// Check if this is an authentication failure.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials | AuthError::SessionExpired | AuthError::InvalidToken
        )
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(e: serde_json::Error) -> Self {
        AuthError::Serialization(e.to_string())
    }
}
