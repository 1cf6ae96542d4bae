//! Progress Reporting Abstraction
//!
//! The core reports progress as `(current, total)` observations and never
//! renders anything itself. Hosts decide how (or whether) to display it.
//!
//! A [`ProgressDisplay`] starts one indicator per phase and hands back a
//! [`ProgressSink`]. `update` must not block the caller on display cadence;
//! `finish` stops the indicator and returns only once nothing more will be
//! drawn for it.

use async_trait::async_trait;

/// How an indicator is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    /// Indeterminate activity (total unknown)
    Spinner,
    /// Determinate progress over `total` items
    Bar { total: usize },
}

/// Receiver of progress observations for one running indicator
#[async_trait]
pub trait ProgressSink: Send + Sync {
    /// Record that `current` of `total` items have been processed
    fn update(&self, current: usize, total: usize);

    /// Stop the indicator and wait until it has been torn down
    async fn finish(&self);
}

/// Factory for progress indicators
pub trait ProgressDisplay: Send + Sync {
    fn start(&self, message: &str, mode: ProgressMode) -> Box<dyn ProgressSink>;
}
