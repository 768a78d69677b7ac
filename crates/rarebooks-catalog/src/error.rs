//! Catalog error types.

use thiserror::Error;

/// Errors raised while turning route and query parameters into typed queries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A required route or query parameter is absent.
    #[error("Missing parameter: {0}")]
    MissingParam(&'static str),

    /// A parameter is present but does not parse.
    #[error("Invalid value for {field}: {value:?}")]
    InvalidParam { field: &'static str, value: String },
}
