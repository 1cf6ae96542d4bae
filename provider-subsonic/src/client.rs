//! Subsonic API client
//!
//! ## API Endpoint
//!
//! - **Album search**: `{server}/rest/search3.view?u={user}&t={token}&s={salt}&v=1.16.1&c=albumcheck&f=json&query={title}`
//!
//! The search text is normalized before it is sent, so a history title such as
//! `"Abbey Road (Remastered)"` searches for `"Abbey Road"`.

use async_trait::async_trait;
use bridge_traits::http::{HttpRequest, HttpResponse};
use bridge_traits::time::Clock;
use core_library::{normalize, CatalogError, LibraryCandidate, LibraryProvider};
use core_runtime::config::DEFAULT_REQUEST_TIMEOUT;
use core_runtime::RetryingTransport;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

use crate::auth::{token, SaltGenerator};
use crate::error::{Result, SubsonicError};
use crate::types::ResponseEnvelope;

/// Search endpoint, relative to the server base URL
pub const SEARCH_PATH: &str = "/rest/search3.view";

/// Protocol version announced to the server
pub const PROTOCOL_VERSION: &str = "1.16.1";

/// Client identifier announced to the server
pub const CLIENT_ID: &str = "albumcheck";

/// Subsonic API client
pub struct SubsonicClient {
    transport: Arc<RetryingTransport>,
    salts: SaltGenerator,
    server: String,
    user: String,
    password: String,
    request_timeout: Duration,
}

impl SubsonicClient {
    /// Create a client for `server` (base URL, trailing slash optional)
    pub fn new(
        transport: Arc<RetryingTransport>,
        server: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            transport,
            salts: SaltGenerator::new(clock),
            server: server.into().trim().trim_end_matches('/').to_string(),
            user: user.into(),
            password: password.into(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    fn search_url(&self, query: &str, salt: &str) -> String {
        format!(
            "{}{}?u={}&t={}&s={}&v={}&c={}&f=json&query={}",
            self.server,
            SEARCH_PATH,
            urlencoding::encode(&self.user),
            token(&self.password, salt),
            salt,
            PROTOCOL_VERSION,
            CLIENT_ID,
            urlencoding::encode(query)
        )
    }

    /// Search the library for albums titled like `title`
    ///
    /// # Errors
    ///
    /// - [`SubsonicError::Transport`] when the transport gives up or is cancelled
    /// - [`SubsonicError::Api`] when the server reports `status: "failed"`
    /// - [`SubsonicError::Parse`] when the envelope is missing or malformed
    #[instrument(skip(self, cancel))]
    pub async fn search_albums(
        &self,
        title: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<LibraryCandidate>> {
        let query = normalize(title);
        let salt = self.salts.next_salt();

        let request = HttpRequest::get(self.search_url(&query, &salt))
            .header("Accept", "application/json")
            .timeout(self.request_timeout);

        let response = self.transport.execute(request, cancel).await?;
        let candidates = Self::decode(&response)?;

        debug!(query = %query, count = candidates.len(), "Library search complete");
        Ok(candidates)
    }

    fn decode(response: &HttpResponse) -> Result<Vec<LibraryCandidate>> {
        let envelope: ResponseEnvelope = serde_json::from_slice(&response.body)
            .map_err(|e| SubsonicError::Parse(e.to_string()))?;
        let body = envelope.subsonic_response;

        if body.status == "failed" {
            let (code, message) = body
                .error
                .map(|e| (e.code, e.message))
                .unwrap_or((0, "request failed without error detail".to_string()));
            warn!(code, message = %message, "Subsonic returned an error");
            return Err(SubsonicError::Api { code, message });
        }

        Ok(body
            .search_result3
            .unwrap_or_default()
            .album
            .into_iter()
            .map(|album| {
                LibraryCandidate::new(
                    album.name.unwrap_or_default(),
                    album.artist.unwrap_or_default(),
                )
            })
            .collect())
    }
}

#[async_trait]
impl LibraryProvider for SubsonicClient {
    async fn search(
        &self,
        title: &str,
        cancel: &CancellationToken,
    ) -> core_library::Result<Vec<LibraryCandidate>> {
        self.search_albums(title, cancel)
            .await
            .map_err(CatalogError::from)
    }
}
