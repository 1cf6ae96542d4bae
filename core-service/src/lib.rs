//! Core service façade and bootstrap helpers.
//!
//! This crate wires host-provided bridge implementations (HTTP client, clock)
//! into the catalog clients and the reconciliation engine. Desktop binaries
//! enable the `desktop-shims` feature (which depends on `bridge-desktop`) and
//! call [`bootstrap_desktop`]; tests build a [`CoreService`] from their own
//! doubles.
//!
//! One [`RetryingTransport`] is created per service and shared by both
//! clients.

pub mod error;

pub use error::{CoreError, Result};

use std::sync::Arc;

use bridge_traits::{
    http::HttpClient,
    progress::{ProgressDisplay, ProgressMode},
    time::Clock,
};
use core_library::{HistoryProvider, IgnoreSet, LibraryProvider};
use core_reconcile::{ReconcileConfig, ReconcileOutcome, ReconciliationEngine};
use core_runtime::{AppConfig, RetryingTransport};
use provider_lastfm::LastFmClient;
use provider_subsonic::SubsonicClient;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

/// Indicator label while the history is fetched
pub const FETCH_MESSAGE: &str = "Fetching Last.fm top albums...";

/// Indicator label while the library is scanned
pub const SCAN_MESSAGE: &str = "Checking albums in library...";

/// Aggregated handle to all bridge dependencies the core requires.
pub struct CoreDependencies {
    pub http_client: Arc<dyn HttpClient>,
    pub clock: Arc<dyn Clock>,
}

impl CoreDependencies {
    /// Construct a dependency bundle from explicit bridge handles.
    pub fn new(http_client: Arc<dyn HttpClient>, clock: Arc<dyn Clock>) -> Self {
        Self { http_client, clock }
    }
}

/// One configured reconciliation run
pub struct CoreService {
    user: String,
    engine: ReconciliationEngine,
}

impl CoreService {
    /// Build the Last.fm and Subsonic clients over a shared transport
    pub fn new(config: &AppConfig, deps: CoreDependencies) -> Self {
        let transport = Arc::new(RetryingTransport::new(
            deps.http_client,
            config.retry_policy.clone(),
        ));

        let history = LastFmClient::new(transport.clone(), config.lastfm_api_key.clone())
            .with_request_timeout(config.request_timeout);
        let library = SubsonicClient::new(
            transport,
            config.subsonic_server.clone(),
            config.subsonic_user.clone(),
            config.subsonic_password.clone(),
            deps.clock,
        )
        .with_request_timeout(config.request_timeout);

        Self::with_providers(config, Arc::new(history), Arc::new(library))
    }

    /// Build a service over arbitrary providers
    pub fn with_providers(
        config: &AppConfig,
        history: Arc<dyn HistoryProvider>,
        library: Arc<dyn LibraryProvider>,
    ) -> Self {
        let engine = ReconciliationEngine::new(
            history,
            library,
            ReconcileConfig {
                history_limit: config.history_limit,
                max_recommendations: config.max_recommendations,
            },
        );

        Self {
            user: config.lastfm_user.clone(),
            engine,
        }
    }

    /// Fetch the history, then scan it against the library
    ///
    /// A spinner runs during the fetch and a bar during the scan; both are
    /// finished before this returns.
    #[instrument(skip_all, fields(user = %self.user))]
    pub async fn run(
        &self,
        ignore: &IgnoreSet,
        display: &dyn ProgressDisplay,
        cancel: &CancellationToken,
    ) -> Result<ReconcileOutcome> {
        let spinner = display.start(FETCH_MESSAGE, ProgressMode::Spinner);
        let fetched = self.engine.fetch_history(&self.user, cancel).await;
        spinner.finish().await;
        let records = fetched?;

        let bar = display.start(
            SCAN_MESSAGE,
            ProgressMode::Bar {
                total: records.len(),
            },
        );
        let outcome = self
            .engine
            .scan(&records, ignore, bar.as_ref(), cancel)
            .await?;

        info!(
            recommendations = outcome.recommendations.len(),
            "Reconciliation finished"
        );
        Ok(outcome)
    }
}

/// Build a service over the desktop bridges (reqwest, system clock)
#[cfg(feature = "desktop-shims")]
pub fn bootstrap_desktop(config: &AppConfig) -> Result<CoreService> {
    use bridge_desktop::{HttpClientOptions, ReqwestHttpClient};
    use bridge_traits::time::SystemClock;

    let options = HttpClientOptions::default()
        .with_timeout(config.request_timeout)
        .with_insecure_skip_verify(config.insecure_skip_verify);
    let http_client = ReqwestHttpClient::with_options(options)?;

    Ok(CoreService::new(
        config,
        CoreDependencies::new(Arc::new(http_client), Arc::new(SystemClock)),
    ))
}
