//! Catalog service traits
//!
//! The reconciliation engine talks to both services only through these
//! traits. Implementations live in `provider-lastfm` and `provider-subsonic`;
//! tests substitute in-memory fakes.

use crate::error::Result;
use crate::matcher::matches;
use crate::models::{HistoryRecord, LibraryCandidate};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Source of the user's ranked listening history
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Fetch up to `limit` top albums for `user`, preserving the service's order
    async fn fetch_top(
        &self,
        user: &str,
        limit: u32,
        cancel: &CancellationToken,
    ) -> Result<Vec<HistoryRecord>>;
}

/// Searchable personal music library
#[async_trait]
pub trait LibraryProvider: Send + Sync {
    /// Search albums by title
    ///
    /// Implementations normalize `title` before sending it.
    async fn search(
        &self,
        title: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<LibraryCandidate>>;

    /// Whether the library already holds `record`
    async fn exists(&self, record: &HistoryRecord, cancel: &CancellationToken) -> Result<bool> {
        let candidates = self.search(&record.title, cancel).await?;
        Ok(matches(record, &candidates))
    }
}
