//! # Last.fm History Provider
//!
//! Reads a user's most-played albums of the last twelve months from the
//! Last.fm web service.
//!
//! ## Overview
//!
//! - [`LastFmClient`] builds the `user.gettopalbums` query, runs it through the
//!   shared [`RetryingTransport`](core_runtime::RetryingTransport) and decodes
//!   the nested JSON envelope into [`HistoryRecord`](core_library::HistoryRecord)s
//!   in the service's own ranking order.
//! - Error envelopes (`{"error": 6, "message": "User not found"}`) surface as
//!   [`LastFmError::Api`] instead of an empty history.
//!
//! ## Usage
//!
//! ```ignore
//! use provider_lastfm::LastFmClient;
//! use core_library::HistoryProvider;
//!
//! let client = LastFmClient::new(transport, api_key);
//! let records = client.fetch_top("listener", 500, &cancel).await?;
//! ```

pub mod client;
pub mod error;
pub mod types;

pub use client::{LastFmClient, LASTFM_API_URL, TOP_ALBUMS_PERIOD};
pub use error::{LastFmError, Result};
