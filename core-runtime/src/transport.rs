//! # Retrying Transport
//!
//! Executes one logical request against an [`HttpClient`] with a bounded
//! number of attempts, a fixed delay between them, and cooperative
//! cancellation.
//!
//! ## Semantics
//!
//! - An attempt succeeds only on an exact `200` status. Any other status and
//!   any transport-level failure are retried.
//! - The discarded response of a failed attempt is dropped before the next
//!   attempt starts.
//! - Cancellation is observed both while a request is in flight (the request
//!   future is dropped, aborting it) and while waiting between attempts.
//!   Once observed, no further attempts are made.
//! - Exhausting the budget yields an error naming the last status (or the
//!   last transport failure) together with the attempt count.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::transport::{RetryPolicy, RetryingTransport};
//! use tokio_util::sync::CancellationToken;
//!
//! let transport = RetryingTransport::new(http_client, RetryPolicy::default());
//! let cancel = CancellationToken::new();
//! let response = transport.execute(HttpRequest::get(url), &cancel).await?;
//! ```

use bridge_traits::error::BridgeError;
use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

/// Default number of attempts per logical request
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default pause between attempts
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Why a logical request gave up
#[derive(Error, Debug)]
pub enum TransportError {
    /// Every attempt got a response, the last one with a non-success status
    #[error("request failed with status {status} after {attempts} attempts")]
    Status { status: u16, attempts: u32 },

    /// The last attempt failed below HTTP (connect, DNS, timeout, ...)
    #[error("failed to get response after {attempts} attempts: {source}")]
    Exhausted {
        attempts: u32,
        #[source]
        source: BridgeError,
    },

    /// The cancellation token fired
    #[error("request cancelled before completion")]
    Cancelled,
}

impl TransportError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, TransportError::Cancelled)
    }
}

/// Retry policy configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Fixed delay between attempts
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }
}

/// Outcome of the most recent failed attempt
enum Failure {
    Status(u16),
    Bridge(BridgeError),
}

/// Bounded-retry wrapper around an [`HttpClient`]
///
/// Constructed once by the composing entry point and shared (behind an
/// `Arc`) by every catalog client.
pub struct RetryingTransport {
    client: Arc<dyn HttpClient>,
    policy: RetryPolicy,
}

impl RetryingTransport {
    pub fn new(client: Arc<dyn HttpClient>, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Execute `request` until it returns `200`, the attempt budget runs out,
    /// or `cancel` fires.
    #[instrument(skip_all, fields(max_attempts = self.policy.max_attempts))]
    pub async fn execute(
        &self,
        request: HttpRequest,
        cancel: &CancellationToken,
    ) -> Result<HttpResponse, TransportError> {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut last_failure = None;

        for attempt in 1..=max_attempts {
            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(TransportError::Cancelled),
                result = self.client.execute(request.clone()) => result,
            };

            match outcome {
                Ok(response) if response.is_ok() => {
                    debug!(attempt, "request succeeded");
                    return Ok(response);
                }
                Ok(response) => {
                    let status = response.status;
                    drop(response);
                    warn!(attempt, status, "request returned non-success status");
                    last_failure = Some(Failure::Status(status));
                }
                Err(e) => {
                    warn!(attempt, error = %e, "request failed");
                    last_failure = Some(Failure::Bridge(e));
                }
            }

            if attempt < max_attempts {
                debug!(delay_ms = self.policy.delay.as_millis() as u64, "retrying after delay");
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return Err(TransportError::Cancelled),
                    _ = tokio::time::sleep(self.policy.delay) => {}
                }
            }
        }

        Err(match last_failure {
            Some(Failure::Status(status)) => TransportError::Status {
                status,
                attempts: max_attempts,
            },
            Some(Failure::Bridge(source)) => TransportError::Exhausted {
                attempts: max_attempts,
                source,
            },
            None => TransportError::Exhausted {
                attempts: max_attempts,
                source: BridgeError::OperationFailed("no attempt was made".to_string()),
            },
        })
    }
}
