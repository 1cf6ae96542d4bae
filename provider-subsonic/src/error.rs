//! Error types for the Subsonic provider

use core_library::CatalogError;
use core_runtime::TransportError;
use thiserror::Error;

const PROVIDER: &str = "Subsonic";

/// Subsonic provider errors
#[derive(Error, Debug)]
pub enum SubsonicError {
    /// Transport gave up (retries exhausted or cancelled)
    #[error("Subsonic request failed: {0}")]
    Transport(#[from] TransportError),

    /// Response body did not contain a `subsonic-response` envelope
    #[error("Failed to parse Subsonic response: {0}")]
    Parse(String),

    /// Envelope carried `status: "failed"`
    #[error("Subsonic API error {code}: {message}")]
    Api { code: i64, message: String },
}

/// Result type for Subsonic operations
pub type Result<T> = std::result::Result<T, SubsonicError>;

impl From<SubsonicError> for CatalogError {
    fn from(error: SubsonicError) -> Self {
        match error {
            SubsonicError::Transport(source) => CatalogError::Transport {
                provider: PROVIDER,
                source,
            },
            SubsonicError::Parse(message) => CatalogError::Parse {
                provider: PROVIDER,
                message,
            },
            SubsonicError::Api { code, message } => CatalogError::Api {
                provider: PROVIDER,
                code,
                message,
            },
        }
    }
}
