//! Last.fm API client
//!
//! ## API Endpoint
//!
//! - **Top albums**: `http://ws.audioscrobbler.com/2.0/?method=user.gettopalbums&user={user}&api_key={key}&format=json&period=12month&limit={limit}`
//!
//! Retries and cancellation are handled by the shared transport; this client
//! only builds the query and decodes the answer.

use async_trait::async_trait;
use bridge_traits::http::{HttpRequest, HttpResponse};
use core_library::{CatalogError, HistoryProvider, HistoryRecord};
use core_runtime::config::DEFAULT_REQUEST_TIMEOUT;
use core_runtime::RetryingTransport;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

use crate::error::{LastFmError, Result};
use crate::types::{ErrorResponse, TopAlbumsResponse};

/// Last.fm API base URL
pub const LASTFM_API_URL: &str = "http://ws.audioscrobbler.com/2.0/";

/// Recency window requested for top albums
pub const TOP_ALBUMS_PERIOD: &str = "12month";

/// Last.fm API client
pub struct LastFmClient {
    transport: Arc<RetryingTransport>,
    api_key: String,
    base_url: String,
    request_timeout: Duration,
}

impl LastFmClient {
    /// Create a client against the public Last.fm endpoint
    pub fn new(transport: Arc<RetryingTransport>, api_key: impl Into<String>) -> Self {
        Self {
            transport,
            api_key: api_key.into(),
            base_url: LASTFM_API_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Override the endpoint (used against local test servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    fn top_albums_url(&self, user: &str, limit: u32) -> String {
        format!(
            "{}?method=user.gettopalbums&user={}&api_key={}&format=json&period={}&limit={}",
            self.base_url,
            urlencoding::encode(user),
            urlencoding::encode(&self.api_key),
            TOP_ALBUMS_PERIOD,
            limit
        )
    }

    /// Fetch the user's top albums, ranked as Last.fm ranks them
    ///
    /// # Errors
    ///
    /// - [`LastFmError::Transport`] when the transport gives up or is cancelled
    /// - [`LastFmError::Api`] when the service returns an error envelope
    /// - [`LastFmError::Parse`] when the payload does not match the envelope
    #[instrument(skip(self, cancel))]
    pub async fn fetch_top_albums(
        &self,
        user: &str,
        limit: u32,
        cancel: &CancellationToken,
    ) -> Result<Vec<HistoryRecord>> {
        let request = HttpRequest::get(self.top_albums_url(user, limit))
            .header("Accept", "application/json")
            .timeout(self.request_timeout);

        let response = self.transport.execute(request, cancel).await?;
        let records = Self::decode(&response)?;

        debug!(count = records.len(), "Fetched top albums");
        Ok(records)
    }

    fn decode(response: &HttpResponse) -> Result<Vec<HistoryRecord>> {
        if let Ok(error) = serde_json::from_slice::<ErrorResponse>(&response.body) {
            warn!(code = error.error, message = %error.message, "Last.fm returned an error");
            return Err(LastFmError::Api {
                code: error.error,
                message: error.message,
            });
        }

        let parsed: TopAlbumsResponse = serde_json::from_slice(&response.body)
            .map_err(|e| LastFmError::Parse(e.to_string()))?;

        Ok(parsed
            .topalbums
            .album
            .into_iter()
            .map(|album| HistoryRecord::new(album.name, album.artist.name, album.url))
            .collect())
    }
}

#[async_trait]
impl HistoryProvider for LastFmClient {
    async fn fetch_top(
        &self,
        user: &str,
        limit: u32,
        cancel: &CancellationToken,
    ) -> core_library::Result<Vec<HistoryRecord>> {
        self.fetch_top_albums(user, limit, cancel)
            .await
            .map_err(CatalogError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::error::Result as BridgeResult;
    use bridge_traits::http::HttpClient;
    use bytes::Bytes;
    use core_runtime::RetryPolicy;
    use mockall::mock;

    mock! {
        HttpClient {}

        #[async_trait]
        impl HttpClient for HttpClient {
            async fn execute(&self, request: HttpRequest) -> BridgeResult<HttpResponse>;
        }
    }

    fn client() -> LastFmClient {
        let transport = RetryingTransport::new(
            Arc::new(MockHttpClient::new()),
            RetryPolicy::new(1, Duration::ZERO),
        );
        LastFmClient::new(Arc::new(transport), "k&y")
    }

    fn body(json: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            body: Bytes::from(json.to_string()),
        }
    }

    #[test]
    fn test_top_albums_url() {
        let url = client().top_albums_url("some user", 500);

        assert!(url.starts_with("http://ws.audioscrobbler.com/2.0/?method=user.gettopalbums"));
        assert!(url.contains("user=some%20user"));
        assert!(url.contains("api_key=k%26y"));
        assert!(url.contains("format=json"));
        assert!(url.contains("period=12month"));
        assert!(url.ends_with("limit=500"));
    }

    #[test]
    fn test_decode_missing_album_list() {
        let records = LastFmClient::decode(&body(r#"{"topalbums":{}}"#)).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_decode_missing_url_defaults_empty() {
        let records = LastFmClient::decode(&body(
            r#"{"topalbums":{"album":[{"name":"A","artist":{"name":"B"}}]}}"#,
        ))
        .unwrap();
        assert_eq!(records, vec![HistoryRecord::new("A", "B", "")]);
    }

    #[test]
    fn test_decode_rejects_wrong_shape() {
        let err = LastFmClient::decode(&body(r#"{"albums":[]}"#)).unwrap_err();
        assert!(matches!(err, LastFmError::Parse(_)));

        let err = LastFmClient::decode(&body("<html>")).unwrap_err();
        assert!(matches!(err, LastFmError::Parse(_)));
    }

    #[test]
    fn test_decode_error_envelope() {
        let err = LastFmClient::decode(&body(r#"{"error":10,"message":"Invalid API key"}"#))
            .unwrap_err();
        assert!(matches!(err, LastFmError::Api { code: 10, .. }));
    }
}
