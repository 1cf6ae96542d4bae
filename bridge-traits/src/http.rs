//! HTTP Client Abstraction
//!
//! A single HTTP exchange. Retry, delay and cancellation policy belong to the
//! caller (see `core_runtime::transport`), so implementations perform exactly
//! one attempt per call and report every status code as a response.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::Result;

/// GET request builder
///
/// Both catalog services are read-only query APIs, so GET is the only method.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub headers: HashMap<String, String>,
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
            timeout: None,
        }
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }
}

/// HTTP response
#[derive(Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
}

impl HttpResponse {
    /// Exact `200 OK`, the only status the catalog services answer with on success
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Async HTTP client trait
///
/// Implementations handle connection pooling, TLS and per-request timeouts.
/// Connectivity failures map to [`BridgeError::Connection`] and timeouts to
/// [`BridgeError::Timeout`]; any status code, including 4xx/5xx, is returned
/// as `Ok(HttpResponse)`.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::http::{HttpClient, HttpRequest};
///
/// async fn fetch(client: &dyn HttpClient) -> Result<Bytes> {
///     let response = client.execute(HttpRequest::get("https://example.com/data")).await?;
///     Ok(response.body)
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Execute one HTTP request
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Network connection fails
    /// - TLS validation fails
    /// - Request times out
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}
