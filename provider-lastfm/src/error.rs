//! Error types for the Last.fm provider

use core_library::CatalogError;
use core_runtime::TransportError;
use thiserror::Error;

const PROVIDER: &str = "Last.fm";

/// Last.fm provider errors
#[derive(Error, Debug)]
pub enum LastFmError {
    /// Transport gave up (retries exhausted or cancelled)
    #[error("Last.fm API request failed: {0}")]
    Transport(#[from] TransportError),

    /// Response body did not match the expected envelope
    #[error("Failed to parse Last.fm response: {0}")]
    Parse(String),

    /// Service answered with an error envelope
    #[error("Last.fm API error {code}: {message}")]
    Api { code: i64, message: String },
}

/// Result type for Last.fm operations
pub type Result<T> = std::result::Result<T, LastFmError>;

impl From<LastFmError> for CatalogError {
    fn from(error: LastFmError) -> Self {
        match error {
            LastFmError::Transport(source) => CatalogError::Transport {
                provider: PROVIDER,
                source,
            },
            LastFmError::Parse(message) => CatalogError::Parse {
                provider: PROVIDER,
                message,
            },
            LastFmError::Api { code, message } => CatalogError::Api {
                provider: PROVIDER,
                code,
                message,
            },
        }
    }
}
