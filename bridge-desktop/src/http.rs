//! HTTP Client Implementation using Reqwest

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    http::{HttpClient, HttpRequest, HttpResponse},
};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Construction options for [`ReqwestHttpClient`]
#[derive(Debug, Clone)]
pub struct HttpClientOptions {
    /// Timeout applied to requests that do not carry their own
    pub timeout: Duration,
    /// Accept any TLS certificate. Off unless explicitly enabled.
    pub insecure_skip_verify: bool,
    pub user_agent: String,
}

impl Default for HttpClientOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            insecure_skip_verify: false,
            user_agent: concat!("albumcheck/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpClientOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_insecure_skip_verify(mut self, enabled: bool) -> Self {
        self.insecure_skip_verify = enabled;
        self
    }
}

/// Reqwest-based HTTP client implementation
///
/// Performs exactly one attempt per [`HttpClient::execute`] call and returns
/// every status code as a response. Connection pooling and TLS come from
/// reqwest.
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Create a client with default options
    pub fn new() -> Result<Self> {
        Self::with_options(HttpClientOptions::default())
    }

    /// Create a client with custom options
    pub fn with_options(options: HttpClientOptions) -> Result<Self> {
        if options.insecure_skip_verify {
            warn!("TLS certificate verification is disabled");
        }

        let client = Client::builder()
            .timeout(options.timeout)
            .connect_timeout(options.timeout)
            .pool_max_idle_per_host(4)
            .user_agent(options.user_agent)
            .danger_accept_invalid_certs(options.insecure_skip_verify)
            .build()
            .map_err(|e| {
                BridgeError::NotAvailable(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }

    /// Build reqwest request from bridge request
    fn build_request(&self, request: HttpRequest) -> reqwest::RequestBuilder {
        let mut req = self.client.get(&request.url);

        for (key, value) in request.headers {
            req = req.header(key, value);
        }

        if let Some(timeout) = request.timeout {
            req = req.timeout(timeout);
        }

        req
    }

    /// Map a reqwest failure onto the bridge error taxonomy
    fn map_error(e: reqwest::Error) -> BridgeError {
        if e.is_timeout() {
            BridgeError::Timeout(e.to_string())
        } else if e.is_connect() {
            BridgeError::Connection(e.to_string())
        } else {
            BridgeError::OperationFailed(e.to_string())
        }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let path = request
            .url
            .split('?')
            .next()
            .unwrap_or_default()
            .to_string();
        debug!(url = %path, "Executing HTTP request");

        let response = self
            .build_request(request)
            .send()
            .await
            .map_err(Self::map_error)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(Self::map_error)?;

        debug!(status, bytes = body.len(), "HTTP response received");
        Ok(HttpResponse { status, body })
    }
}
