//! # Desktop Bridge Implementations
//!
//! Default implementations of the bridge traits for desktop platforms
//! (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! - [`ReqwestHttpClient`]: `HttpClient` using `reqwest` with rustls; TLS
//!   verification can only be disabled explicitly through
//!   [`HttpClientOptions::with_insecure_skip_verify`]
//! - [`TerminalProgress`]: spinner and bar indicators drawn on stdout
//! - [`load_ignore_list`]: ignore-list reading via `tokio::fs`
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{HttpClientOptions, ReqwestHttpClient, TerminalProgress};
//! use std::sync::Arc;
//!
//! let http_client = Arc::new(ReqwestHttpClient::with_options(HttpClientOptions::default())?);
//! let progress = TerminalProgress::stdout();
//! ```

mod filesystem;
mod http;
mod progress;

pub use filesystem::load_ignore_list;
pub use http::{HttpClientOptions, ReqwestHttpClient, DEFAULT_TIMEOUT};
pub use progress::{TerminalProgress, REDRAW_INTERVAL};
