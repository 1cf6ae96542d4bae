//! Domain models shared by the history and library services
//!
//! Records are created by parsing one service response and consumed within a
//! single reconciliation run. Nothing here is persisted.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

// =============================================================================
// Records
// =============================================================================

/// One album from the user's listening history, in the service's own ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub title: String,
    pub artist_name: String,
    /// Canonical page of the album on the history service; doubles as the
    /// identifier matched against the ignore list
    pub source_url: String,
}

impl HistoryRecord {
    pub fn new(
        title: impl Into<String>,
        artist_name: impl Into<String>,
        source_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist_name: artist_name.into(),
            source_url: source_url.into(),
        }
    }
}

impl fmt::Display for HistoryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.artist_name, self.title)
    }
}

/// One album returned by a library search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryCandidate {
    pub title: String,
    pub artist_name: String,
}

impl LibraryCandidate {
    pub fn new(title: impl Into<String>, artist_name: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist_name: artist_name.into(),
        }
    }
}

// =============================================================================
// Ignore list
// =============================================================================

/// Source URLs the user never wants recommended
///
/// Entries are opaque and compared verbatim after trimming surrounding
/// whitespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreSet {
    entries: HashSet<String>,
}

impl IgnoreSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse newline-delimited identifiers, skipping blank lines
    pub fn parse(contents: &str) -> Self {
        contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }

    pub fn contains(&self, source_url: &str) -> bool {
        self.entries.contains(source_url)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for IgnoreSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(Into::into).collect(),
        }
    }
}
