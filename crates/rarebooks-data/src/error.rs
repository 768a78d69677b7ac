//! HTTP client error types.

use thiserror::Error;

/// Errors that can occur when talking to the marketplace API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The transport rejected the request (network down, CORS, DNS).
    #[error("Request failed: {0}")]
    RequestError(String),

    /// The request URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Non-2xx response.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// Body was not valid for the requested representation.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// JSON serialization of a request body failed.
    #[error("JSON error: {0}")]
    JsonError(String),
}

impl FetchError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The server refused the bearer token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::JsonError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_only_for_http_errors() {
        let err = FetchError::HttpError {
            status: 503,
            message: "maintenance".to_string(),
        };
        assert_eq!(err.status(), Some(503));
        assert_eq!(FetchError::RequestError("offline".to_string()).status(), None);
    }

    #[test]
    fn test_is_unauthorized() {
        let err = FetchError::HttpError {
            status: 401,
            message: String::new(),
        };
        assert!(err.is_unauthorized());
        assert!(!FetchError::ParseError("x".to_string()).is_unauthorized());
    }
}
