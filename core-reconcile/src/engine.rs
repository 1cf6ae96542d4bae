//! # Reconciliation Engine
//!
//! Sequential scan of a ranked history against a library.
//!
//! ## Scan rules
//!
//! For each record, in input order:
//!
//! 1. A record whose source URL is in the ignore set is skipped without a
//!    lookup and without touching any counter.
//! 2. Otherwise the library is asked whether it holds the record. A failed
//!    lookup is counted, categorized and remembered; the scan continues.
//! 3. A successful lookup that finds nothing appends the record to the
//!    recommendations.
//! 4. A progress observation `(index, total)` is emitted, 1-based, after every
//!    record including skipped and failed ones.
//! 5. The scan stops once the recommendation cap is reached.
//!
//! Lookups run one at a time. Each library request mints a fresh credential
//! salt and progress must follow input order.
//!
//! Cancellation is the one per-record condition that ends the scan early: it
//! returns [`ReconcileError::Cancelled`] instead of a silently truncated list.

use bridge_traits::progress::ProgressSink;
use core_library::{HistoryProvider, HistoryRecord, IgnoreSet, LibraryProvider};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::error::{ReconcileError, Result};
use crate::stats::{ErrorCategory, ErrorStats};

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileConfig {
    /// Number of history records requested
    pub history_limit: u32,
    /// Maximum recommendations returned
    pub max_recommendations: usize,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            history_limit: 500,
            max_recommendations: 5,
        }
    }
}

/// A lookup that failed during the scan
#[derive(Debug, Clone)]
pub struct RecordFailure {
    pub record: HistoryRecord,
    pub category: ErrorCategory,
    pub message: String,
}

/// Result of one scan
#[derive(Debug, Clone, Default)]
pub struct ReconcileOutcome {
    /// Missing albums, in history order, at most the configured cap
    pub recommendations: Vec<HistoryRecord>,
    pub stats: ErrorStats,
    pub failures: Vec<RecordFailure>,
}

/// Reconciles a history provider against a library provider
pub struct ReconciliationEngine {
    history: Arc<dyn HistoryProvider>,
    library: Arc<dyn LibraryProvider>,
    config: ReconcileConfig,
}

impl ReconciliationEngine {
    pub fn new(
        history: Arc<dyn HistoryProvider>,
        library: Arc<dyn LibraryProvider>,
        config: ReconcileConfig,
    ) -> Self {
        Self {
            history,
            library,
            config,
        }
    }

    pub fn config(&self) -> &ReconcileConfig {
        &self.config
    }

    /// Fetch the ranked history for `user`
    ///
    /// Failure here is fatal for the run.
    #[instrument(skip(self, cancel))]
    pub async fn fetch_history(
        &self,
        user: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<HistoryRecord>> {
        let records = self
            .history
            .fetch_top(user, self.config.history_limit, cancel)
            .await
            .map_err(|e| {
                if e.is_cancelled() {
                    ReconcileError::Cancelled
                } else {
                    ReconcileError::History(e)
                }
            })?;

        info!(count = records.len(), "Fetched listening history");
        Ok(records)
    }

    /// Scan `records` and collect the ones missing from the library
    ///
    /// `progress` is finished on every return path.
    #[instrument(skip_all, fields(records = records.len(), ignored = ignore.len()))]
    pub async fn scan(
        &self,
        records: &[HistoryRecord],
        ignore: &IgnoreSet,
        progress: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<ReconcileOutcome> {
        let result = self.scan_records(records, ignore, progress, cancel).await;
        progress.finish().await;

        if let Ok(outcome) = &result {
            info!(
                recommendations = outcome.recommendations.len(),
                lookups = outcome.stats.total,
                failed = outcome.stats.failed,
                "Scan complete"
            );
        }
        result
    }

    async fn scan_records(
        &self,
        records: &[HistoryRecord],
        ignore: &IgnoreSet,
        progress: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<ReconcileOutcome> {
        let total = records.len();
        let cap = self.config.max_recommendations;
        let mut outcome = ReconcileOutcome::default();

        for (index, record) in records.iter().enumerate() {
            if cancel.is_cancelled() {
                return Err(ReconcileError::Cancelled);
            }

            if ignore.contains(&record.source_url) {
                debug!(album = %record, "Skipping ignored album");
            } else {
                outcome.stats.total += 1;

                match self.library.exists(record, cancel).await {
                    Ok(true) => {
                        outcome.stats.record_success();
                    }
                    Ok(false) => {
                        outcome.stats.record_success();
                        debug!(album = %record, "Album missing from library");
                        outcome.recommendations.push(record.clone());
                    }
                    Err(e) if e.is_cancelled() => return Err(ReconcileError::Cancelled),
                    Err(e) => {
                        let message = e.to_string();
                        let category = outcome.stats.record_failure(&message);
                        warn!(album = %record, %category, error = %message, "Library lookup failed");
                        outcome.failures.push(RecordFailure {
                            record: record.clone(),
                            category,
                            message,
                        });
                    }
                }
            }

            progress.update(index + 1, total);

            if outcome.recommendations.len() >= cap {
                debug!(cap, "Recommendation cap reached");
                break;
            }
        }

        Ok(outcome)
    }
}
