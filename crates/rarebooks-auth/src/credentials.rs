//! Login request and response bodies.

use serde::{Deserialize, Serialize};

use crate::{AuthError, AuthToken, User};

/// Body of `POST /auth/login`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: password.into(),
        }
    }

    /// Client-side checks before hitting the API.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.email.is_empty() {
            return Err(AuthError::InvalidInput("email is required".into()));
        }
        if !self.email.contains('@') {
            return Err(AuthError::InvalidInput("email is malformed".into()));
        }
        if self.password.is_empty() {
            return Err(AuthError::InvalidInput("password is required".into()));
        }
        Ok(())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Successful login.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub token: AuthToken,
    pub user: User,
}
