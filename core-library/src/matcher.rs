//! Equality-after-normalization matching between history and library albums

use crate::models::{HistoryRecord, LibraryCandidate};
use crate::normalize::normalize;
use unicase::UniCase;

/// True if any candidate has the same normalized title and artist as `record`
///
/// Comparison uses Unicode case folding, so `"ΟΔΟΣ"` equals `"οδος"`.
/// There is no fuzzy scoring.
pub fn matches(record: &HistoryRecord, candidates: &[LibraryCandidate]) -> bool {
    let title = normalize(&record.title);
    let artist = normalize(&record.artist_name);

    candidates.iter().any(|candidate| {
        eq_ignore_case(&normalize(&candidate.title), &title)
            && eq_ignore_case(&normalize(&candidate.artist_name), &artist)
    })
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    UniCase::new(a) == UniCase::new(b)
}
