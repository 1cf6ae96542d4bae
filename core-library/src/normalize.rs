//! Name normalization
//!
//! Canonical form used for searching and comparing album and artist names:
//!
//! 1. trim surrounding whitespace
//! 2. drop one trailing parenthesized group, e.g. `" (Deluxe Edition)"`
//! 3. delete every character that is not a letter, an ASCII digit or a space
//! 4. collapse whitespace runs into one space
//! 5. trim again
//!
//! The function is idempotent, and both sides of a comparison must pass
//! through it.

use regex::Regex;
use std::sync::LazyLock;

static TRAILING_PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)$").unwrap());

static DISALLOWED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^0-9\p{L} ]").unwrap());

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Canonicalize an album or artist name
pub fn normalize(text: &str) -> String {
    let trimmed = text.trim();
    let without_suffix = TRAILING_PARENTHETICAL.replace(trimmed, "");
    let filtered = DISALLOWED.replace_all(&without_suffix, "");
    let collapsed = WHITESPACE_RUN.replace_all(&filtered, " ");
    collapsed.trim().to_string()
}
