//! # Host Bridge Traits
//!
//! Capability contracts between the reconciliation core and the host it runs in.
//!
//! ## Overview
//!
//! Each trait represents something the core needs but does not implement
//! itself. The desktop implementations live in `bridge-desktop`; tests
//! substitute doubles without touching any global state.
//!
//! ## Traits
//!
//! - [`HttpClient`](http::HttpClient) - One HTTP exchange (retry policy lives in the core)
//! - [`Clock`](time::Clock) - Time source for deterministic testing
//! - [`ProgressDisplay`](progress::ProgressDisplay) / [`ProgressSink`](progress::ProgressSink) -
//!   Progress indicators fed with `(current, total)` observations
//!
//! ## Error Handling
//!
//! All bridge traits use [`BridgeError`](error::BridgeError). Implementations
//! should convert platform-specific errors into it and keep the messages
//! actionable (connection vs. timeout vs. other failures).
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` so implementations can be shared
//! across async tasks behind an `Arc`.

pub mod error;
pub mod http;
pub mod progress;
pub mod time;

pub use error::BridgeError;

// Re-export commonly used types
pub use http::{HttpClient, HttpRequest, HttpResponse};
pub use progress::{ProgressDisplay, ProgressMode, ProgressSink};
pub use time::{Clock, LogLevel, SystemClock};
