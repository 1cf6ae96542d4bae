//! End-to-end runs of the service over a mocked HTTP layer
//!
//! Requests are routed by URL: the Last.fm top-albums call returns a fixed
//! history and each Subsonic search answers according to its query.

use async_trait::async_trait;
use bridge_traits::error::Result as BridgeResult;
use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse};
use bridge_traits::progress::{ProgressDisplay, ProgressMode, ProgressSink};
use bridge_traits::time::Clock;
use bytes::Bytes;
use chrono::{DateTime, TimeZone, Utc};
use core_library::IgnoreSet;
use core_reconcile::ReconcileError;
use core_runtime::{AppConfig, RetryPolicy};
use core_service::{CoreDependencies, CoreError, CoreService, FETCH_MESSAGE, SCAN_MESSAGE};
use mockall::mock;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

mock! {
    HttpClient {}

    #[async_trait]
    impl HttpClient for HttpClient {
        async fn execute(&self, request: HttpRequest) -> BridgeResult<HttpResponse>;
    }
}

struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Display recording which indicators were started and finished
#[derive(Default, Clone)]
struct RecordingDisplay {
    events: Arc<Mutex<Vec<String>>>,
}

struct RecordingSink {
    label: String,
    events: Arc<Mutex<Vec<String>>>,
}

impl ProgressDisplay for RecordingDisplay {
    fn start(&self, message: &str, mode: ProgressMode) -> Box<dyn ProgressSink> {
        self.events
            .lock()
            .unwrap()
            .push(format!("start {message} {mode:?}"));
        Box::new(RecordingSink {
            label: message.to_string(),
            events: self.events.clone(),
        })
    }
}

#[async_trait]
impl ProgressSink for RecordingSink {
    fn update(&self, _current: usize, _total: usize) {}

    async fn finish(&self) {
        self.events
            .lock()
            .unwrap()
            .push(format!("finish {}", self.label));
    }
}

const HISTORY: &str = r#"{"topalbums":{"album":[
  {"name":"Existing Album","artist":{"name":"Existing Artist"},"url":"https://www.last.fm/music/Existing+Artist/Existing+Album"},
  {"name":"Missing Album 1","artist":{"name":"Missing Artist 1"},"url":"https://www.last.fm/music/Missing+Artist+1/Missing+Album+1"},
  {"name":"Missing Album 2","artist":{"name":"Missing Artist 2"},"url":"https://www.last.fm/music/Missing+Artist+2/Missing+Album+2"}
]}}"#;

const LIBRARY: &str = r#"{"subsonic-response":{"status":"ok","searchResult3":{"album":[{"name":"Existing Album","artist":"Existing Artist"}]}}}"#;

fn ok(body: &'static str) -> HttpResponse {
    HttpResponse {
        status: 200,
        body: Bytes::from_static(body.as_bytes()),
    }
}

fn config() -> AppConfig {
    AppConfig::builder()
        .lastfm_api_key("key")
        .lastfm_user("listener")
        .subsonic_server("http://subsonic.test")
        .subsonic_user("admin")
        .subsonic_password("secret")
        .retry_policy(RetryPolicy::new(1, Duration::ZERO))
        .build()
        .unwrap()
}

fn service(mock: MockHttpClient) -> CoreService {
    let clock = FixedClock(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap());
    CoreService::new(
        &config(),
        CoreDependencies::new(Arc::new(mock), Arc::new(clock)),
    )
}

fn routed_mock() -> MockHttpClient {
    let mut mock = MockHttpClient::new();
    mock.expect_execute().returning(|request| {
        if request.url.contains("method=user.gettopalbums") {
            Ok(ok(HISTORY))
        } else if request.url.starts_with("http://subsonic.test/rest/search3.view?") {
            Ok(ok(LIBRARY))
        } else {
            panic!("unexpected request: {}", request.url);
        }
    });
    mock
}

#[tokio::test]
async fn run_recommends_albums_missing_from_library() {
    let service = service(routed_mock());
    let display = RecordingDisplay::default();

    let outcome = service
        .run(&IgnoreSet::new(), &display, &CancellationToken::new())
        .await
        .unwrap();

    let titles: Vec<&str> = outcome
        .recommendations
        .iter()
        .map(|r| r.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Missing Album 1", "Missing Album 2"]);
    assert_eq!(outcome.stats.total, 3);
    assert!(!outcome.stats.has_failures());

    assert_eq!(
        *display.events.lock().unwrap(),
        vec![
            format!("start {FETCH_MESSAGE} Spinner"),
            format!("finish {FETCH_MESSAGE}"),
            format!("start {SCAN_MESSAGE} Bar {{ total: 3 }}"),
            format!("finish {SCAN_MESSAGE}"),
        ]
    );
}

#[tokio::test]
async fn run_honours_ignore_list() {
    let service = service(routed_mock());
    let ignore = IgnoreSet::parse("https://www.last.fm/music/Missing+Artist+1/Missing+Album+1\n");

    let outcome = service
        .run(&ignore, &RecordingDisplay::default(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(outcome.recommendations.len(), 1);
    assert_eq!(outcome.recommendations[0].title, "Missing Album 2");
}

#[tokio::test]
async fn history_failure_aborts_the_run() {
    let mut mock = MockHttpClient::new();
    mock.expect_execute().times(1).returning(|_| {
        Ok(HttpResponse {
            status: 500,
            body: Bytes::new(),
        })
    });
    let service = service(mock);
    let display = RecordingDisplay::default();

    let err = service
        .run(&IgnoreSet::new(), &display, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CoreError::Reconcile(ReconcileError::History(_))
    ));
    // The scan never started, but the spinner was torn down
    assert_eq!(
        *display.events.lock().unwrap(),
        vec![
            format!("start {FETCH_MESSAGE} Spinner"),
            format!("finish {FETCH_MESSAGE}"),
        ]
    );
}

#[tokio::test]
async fn cancelled_run_reports_cancellation() {
    let mut mock = MockHttpClient::new();
    mock.expect_execute().times(0);
    let service = service(mock);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = service
        .run(&IgnoreSet::new(), &RecordingDisplay::default(), &cancel)
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
}
