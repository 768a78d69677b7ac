//! HTTP client for the rare-books marketplace API.
//!
//! Provides a small builder API over a pluggable [`Transport`], with JSON
//! bodies, bearer authentication and query-string encoding.
//!
//! # Example
//!
//! ```rust,ignore
//! use rarebooks_data::FetchClient;
//!
//! let client = FetchClient::new().with_base_url("https://books.example/api");
//!
//! let categories: Vec<Category> = client
//!     .get("/categories")
//!     .send()
//!     .await?
//!     .error_for_status()?
//!     .json()?;
//! ```

mod error;
mod request;
mod response;
mod transport;

use std::rc::Rc;

pub use error::FetchError;
pub use request::{Method, Request, RequestBuilder};
pub use response::Response;
pub use transport::{ReqwestTransport, Transport};

#[cfg(any(test, feature = "test-util"))]
pub use transport::StaticTransport;

/// HTTP client for outbound API requests.
///
/// Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct FetchClient {
    base_url: Option<String>,
    default_headers: Vec<(String, String)>,
    transport: Rc<dyn Transport>,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchClient")
            .field("base_url", &self.base_url)
            .field("default_headers", &self.default_headers)
            .finish_non_exhaustive()
    }
}

impl FetchClient {
    /// Create a client backed by [`ReqwestTransport`].
    pub fn new() -> Self {
        Self::with_transport(Rc::new(ReqwestTransport::new()))
    }

    /// Create a client over an explicit transport.
    pub fn with_transport(transport: Rc<dyn Transport>) -> Self {
        Self {
            base_url: None,
            default_headers: Vec::new(),
            transport,
        }
    }

    /// Prepend `base_url` to every relative request URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.push((key.into(), value.into()));
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Get, url)
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Post, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) if !url.starts_with("http://") && !url.starts_with("https://") => {
                format!("{}{}", base.trim_end_matches('/'), url)
            }
            _ => url,
        };

        let mut builder = RequestBuilder::new(method, full_url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            builder,
            transport: Rc::clone(&self.transport),
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    builder: RequestBuilder,
    transport: Rc<dyn Transport>,
}

impl ClientRequestBuilder {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.builder = self.builder.query(key, value);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Add a bearer token authorization header.
    pub fn bearer_auth(mut self, token: impl AsRef<str>) -> Self {
        self.builder = self.builder.bearer_auth(token);
        self
    }

    /// Add a bearer token only when one is present.
    pub fn maybe_bearer_auth(self, token: Option<&str>) -> Self {
        match token {
            Some(token) => self.bearer_auth(token),
            None => self,
        }
    }

    /// Set the Accept header.
    pub fn accept(mut self, content_type: impl Into<String>) -> Self {
        self.builder = self.builder.accept(content_type);
        self
    }

    /// Send the request and return the response.
    pub async fn send(self) -> Result<Response, FetchError> {
        let request = self.builder.build()?;
        tracing::debug!(method = request.method.as_str(), url = %request.url, "sending request");
        self.transport.execute(request).await
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, Method, Response, Transport};
}
