//! API error types.

use rarebooks_auth::AuthError;
use rarebooks_data::FetchError;
use thiserror::Error;

/// Errors returned by [`SearchApi`](crate::SearchApi) calls.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Transport or HTTP status failure.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The body did not have any of the expected shapes.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Login rejected or refused client-side.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl ApiError {
    /// The bearer token was refused; the session should be dropped.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            ApiError::Fetch(e) => e.is_unauthorized(),
            ApiError::Auth(e) => matches!(e, AuthError::SessionExpired | AuthError::InvalidToken),
            ApiError::Malformed(_) => false,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, ApiError::Malformed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_from_status() {
        let err = ApiError::from(FetchError::HttpError {
            status: 401,
            message: String::new(),
        });
        assert!(err.is_unauthorized());

        let err = ApiError::from(FetchError::HttpError {
            status: 500,
            message: String::new(),
        });
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_invalid_credentials_is_not_a_session_failure() {
        assert!(!ApiError::from(AuthError::InvalidCredentials).is_unauthorized());
        assert!(ApiError::from(AuthError::SessionExpired).is_unauthorized());
    }
}
