//! End-to-end behaviour of the Last.fm client over a mocked HTTP layer

use async_trait::async_trait;
use bridge_traits::error::{BridgeError, Result as BridgeResult};
use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse};
use bytes::Bytes;
use core_library::{CatalogError, HistoryProvider, HistoryRecord};
use core_runtime::{RetryPolicy, RetryingTransport, TransportError};
use mockall::mock;
use provider_lastfm::{LastFmClient, LastFmError};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

mock! {
    HttpClient {}

    #[async_trait]
    impl HttpClient for HttpClient {
        async fn execute(&self, request: HttpRequest) -> BridgeResult<HttpResponse>;
    }
}

const TOP_ALBUMS: &str = r#"{
  "topalbums": {
    "album": [
      {"name": "Test Album 1", "artist": {"name": "Test Artist 1"}, "url": "https://www.last.fm/music/Test+Artist+1/Test+Album+1", "playcount": "42"},
      {"name": "Test Album 2", "artist": {"name": "Test Artist 2"}, "url": "https://www.last.fm/music/Test+Artist+2/Test+Album+2", "playcount": "17"}
    ],
    "@attr": {"user": "listener", "page": "1", "total": "2"}
  }
}"#;

fn response(status: u16, body: &'static str) -> HttpResponse {
    HttpResponse {
        status,
        body: Bytes::from_static(body.as_bytes()),
    }
}

fn client_with(mock: MockHttpClient, attempts: u32) -> LastFmClient {
    let transport = RetryingTransport::new(
        Arc::new(mock),
        RetryPolicy::new(attempts, Duration::from_millis(1)),
    );
    LastFmClient::new(Arc::new(transport), "test-key")
        .with_base_url("http://lastfm.test/2.0/")
        .with_request_timeout(Duration::from_secs(2))
}

#[tokio::test]
async fn fetch_top_preserves_service_order() {
    let mut mock = MockHttpClient::new();
    mock.expect_execute()
        .withf(|request| {
            request.url.starts_with("http://lastfm.test/2.0/?method=user.gettopalbums")
                && request.url.contains("user=listener")
                && request.url.contains("limit=500")
                && request.timeout == Some(Duration::from_secs(2))
        })
        .times(1)
        .returning(|_| Ok(response(200, TOP_ALBUMS)));

    let client = client_with(mock, 3);
    let records = client
        .fetch_top("listener", 500, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(
        records,
        vec![
            HistoryRecord::new(
                "Test Album 1",
                "Test Artist 1",
                "https://www.last.fm/music/Test+Artist+1/Test+Album+1"
            ),
            HistoryRecord::new(
                "Test Album 2",
                "Test Artist 2",
                "https://www.last.fm/music/Test+Artist+2/Test+Album+2"
            ),
        ]
    );
}

#[tokio::test]
async fn fetch_top_recovers_from_transient_failure() {
    let mut mock = MockHttpClient::new();
    let mut calls = 0;
    mock.expect_execute().times(2).returning(move |_| {
        calls += 1;
        if calls == 1 {
            Err(BridgeError::Connection("connection reset".to_string()))
        } else {
            Ok(response(200, TOP_ALBUMS))
        }
    });

    let client = client_with(mock, 3);
    let records = client
        .fetch_top_albums("listener", 10, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn fetch_top_reports_exhausted_retries() {
    let mut mock = MockHttpClient::new();
    mock.expect_execute()
        .times(2)
        .returning(|_| Ok(response(503, "Service Unavailable")));

    let client = client_with(mock, 2);
    let err = client
        .fetch_top_albums("listener", 10, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        LastFmError::Transport(TransportError::Status {
            status: 503,
            attempts: 2
        })
    ));
}

#[tokio::test]
async fn fetch_top_surfaces_api_errors_as_catalog_errors() {
    let mut mock = MockHttpClient::new();
    mock.expect_execute()
        .times(1)
        .returning(|_| Ok(response(200, r#"{"error":6,"message":"User not found"}"#)));

    let client = client_with(mock, 3);
    let err = client
        .fetch_top("nobody", 10, &CancellationToken::new())
        .await
        .unwrap_err();

    match err {
        CatalogError::Api {
            provider,
            code,
            message,
        } => {
            assert_eq!(provider, "Last.fm");
            assert_eq!(code, 6);
            assert_eq!(message, "User not found");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn fetch_top_rejects_malformed_payload() {
    let mut mock = MockHttpClient::new();
    mock.expect_execute()
        .times(1)
        .returning(|_| Ok(response(200, r#"{"topalbums": {"album": "nope"}}"#)));

    let client = client_with(mock, 3);
    let err = client
        .fetch_top("listener", 10, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::Parse { .. }));
}
