//! Pluggable request execution.
//!
//! The client is single-threaded (browser event loop), so transports return
//! `?Send` futures.

use async_trait::async_trait;

use crate::{FetchError, Method, Request, Response};

/// Executes a built request and reads the whole response body.
#[async_trait(?Send)]
pub trait Transport {
    async fn execute(&self, request: Request) -> Result<Response, FetchError>;
}

/// `reqwest`-backed transport. Uses `fetch` on wasm32, hyper elsewhere.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: Request) -> Result<Response, FetchError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.http.request(method, &request.url);
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| FetchError::RequestError(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::RequestError(e.to_string()))?
            .to_vec();

        Ok(Response::new(status, headers, body))
    }
}

#[cfg(any(test, feature = "test-util"))]
pub use scripted::StaticTransport;

#[cfg(any(test, feature = "test-util"))]
mod scripted {
    use std::cell::RefCell;

    use async_trait::async_trait;

    use super::Transport;
    use crate::{FetchError, Method, Request, Response};

    /// Transport answering from a fixed routing table and recording every
    /// request it sees.
    ///
    /// Routes match when the request's path and query starts with the route
    /// prefix; the longest matching prefix wins. Unmatched requests get a 404.
    #[derive(Debug, Default)]
    pub struct StaticTransport {
        routes: RefCell<Vec<(Method, String, Result<Response, FetchError>)>>,
        requests: RefCell<Vec<Request>>,
    }

    impl StaticTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Answer `GET <prefix>...` with a JSON body.
        pub fn get_json(self, prefix: impl Into<String>, body: impl Into<String>) -> Self {
            self.route(Method::Get, prefix, Ok(Response::json_body(body.into())))
        }

        /// Answer `method <prefix>...` with a fixed result.
        pub fn route(
            self,
            method: Method,
            prefix: impl Into<String>,
            result: Result<Response, FetchError>,
        ) -> Self {
            self.routes
                .borrow_mut()
                .push((method, prefix.into(), result));
            self
        }

        /// Every request executed so far, in order.
        pub fn requests(&self) -> Vec<Request> {
            self.requests.borrow().clone()
        }
    }

    #[async_trait(?Send)]
    impl Transport for StaticTransport {
        async fn execute(&self, request: Request) -> Result<Response, FetchError> {
            let path = request.path_and_query().to_string();
            let method = request.method;
            self.requests.borrow_mut().push(request);

            self.routes
                .borrow()
                .iter()
                .filter(|(m, prefix, _)| *m == method && path.starts_with(prefix.as_str()))
                .max_by_key(|(_, prefix, _)| prefix.len())
                .map(|(_, _, result)| result.clone())
                .unwrap_or_else(|| {
                    Ok(Response::new(404, Vec::new(), b"no route".to_vec()))
                })
        }
    }
}
