use core_runtime::TransportError;
use thiserror::Error;

/// Failure reported by a catalog service client
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("{provider} request failed: {source}")]
    Transport {
        provider: &'static str,
        #[source]
        source: TransportError,
    },

    #[error("{provider} returned an unreadable response: {message}")]
    Parse {
        provider: &'static str,
        message: String,
    },

    #[error("{provider} API error {code}: {message}")]
    Api {
        provider: &'static str,
        code: i64,
        message: String,
    },
}

impl CatalogError {
    /// True when the run's cancellation token stopped the request
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CatalogError::Transport { source, .. } if source.is_cancelled())
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancellation_detection() {
        let cancelled = CatalogError::Transport {
            provider: "Subsonic",
            source: TransportError::Cancelled,
        };
        assert!(cancelled.is_cancelled());

        let failed = CatalogError::Transport {
            provider: "Subsonic",
            source: TransportError::Status {
                status: 503,
                attempts: 3,
            },
        };
        assert!(!failed.is_cancelled());
        assert_eq!(
            failed.to_string(),
            "Subsonic request failed: request failed with status 503 after 3 attempts"
        );
    }
}
