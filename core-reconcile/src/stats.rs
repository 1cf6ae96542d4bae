//! Lookup statistics and error categorization

use std::fmt;

const RATE_LIMIT_MARKERS: &[&str] = &["429", "rate limit", "too many requests"];

const SERVER_ERROR_MARKERS: &[&str] = &[
    "500",
    "502",
    "503",
    "504",
    "internal server error",
    "bad gateway",
    "service unavailable",
    "gateway timeout",
];

const NETWORK_MARKERS: &[&str] = &["connection", "timeout", "network", "dial", "no such host"];

/// Coarse cause of a failed lookup, derived from its error text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    RateLimited,
    ServerError,
    Network,
    Other,
}

impl ErrorCategory {
    /// Classify an error message
    ///
    /// Categories are checked in priority order: rate limiting, then server
    /// errors, then network problems. The first one whose marker appears in
    /// the lowercased text wins.
    pub fn classify(message: &str) -> Self {
        let lower = message.to_lowercase();
        let has_any = |markers: &[&str]| markers.iter().any(|m| lower.contains(m));

        if has_any(RATE_LIMIT_MARKERS) {
            ErrorCategory::RateLimited
        } else if has_any(SERVER_ERROR_MARKERS) {
            ErrorCategory::ServerError
        } else if has_any(NETWORK_MARKERS) {
            ErrorCategory::Network
        } else {
            ErrorCategory::Other
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorCategory::RateLimited => "rate limited",
            ErrorCategory::ServerError => "server error",
            ErrorCategory::Network => "network",
            ErrorCategory::Other => "other",
        };
        f.write_str(label)
    }
}

/// Counters for one scan
///
/// `total` counts lookups attempted (ignored records excluded), so
/// `successful + failed == total` once a scan has finished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorStats {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub rate_limited: usize,
    pub server_error: usize,
    pub network: usize,
    pub other: usize,
}

impl ErrorStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self) {
        self.successful += 1;
    }

    /// Count a failed lookup and return the category it was filed under
    pub fn record_failure(&mut self, message: &str) -> ErrorCategory {
        let category = ErrorCategory::classify(message);
        self.failed += 1;
        match category {
            ErrorCategory::RateLimited => self.rate_limited += 1,
            ErrorCategory::ServerError => self.server_error += 1,
            ErrorCategory::Network => self.network += 1,
            ErrorCategory::Other => self.other += 1,
        }
        category
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// Count filed under `category`
    pub fn count(&self, category: ErrorCategory) -> usize {
        match category {
            ErrorCategory::RateLimited => self.rate_limited,
            ErrorCategory::ServerError => self.server_error,
            ErrorCategory::Network => self.network,
            ErrorCategory::Other => self.other,
        }
    }
}
