//! Bearer tokens.
//!
//! Tokens are opaque to the client except for the optional JWT `exp` claim,
//! which is read to drop a session before the API starts rejecting it.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::AuthError;

/// Bearer token issued by the login endpoint.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

/// Claims the client cares about.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct TokenClaims {
    /// Expiry as a Unix timestamp in seconds.
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(default)]
    pub sub: Option<String>,
}

impl AuthToken {
    /// Wrap a raw token, rejecting empty or whitespace-containing values.
    pub fn new(raw: impl Into<String>) -> Result<Self, AuthError> {
        let raw = raw.into();
        if raw.is_empty() || raw.chars().any(char::is_whitespace) {
            return Err(AuthError::InvalidToken);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode the JWT payload. Non-JWT tokens yield empty claims.
    pub fn claims(&self) -> TokenClaims {
        let mut parts = self.0.split('.');
        let (Some(_header), Some(payload), Some(_signature)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return TokenClaims::default();
        };

        URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .ok()
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
            .unwrap_or_default()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.claims()
            .exp
            .and_then(|exp| Utc.timestamp_opt(exp, 0).single())
    }

    /// Tokens without an `exp` claim never expire client-side.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|exp| exp <= now)
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.0.chars().take(6).collect();
        write!(f, "AuthToken({prefix}…)")
    }
}

impl AsRef<str> for AuthToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
pub(crate) fn jwt_with_exp(exp: i64) -> AuthToken {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"7","exp":{exp}}}"#));
    AuthToken::new(format!("{header}.{payload}.c2lnbmF0dXJl")).unwrap()
}
