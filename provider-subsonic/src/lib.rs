//! # Subsonic Library Provider
//!
//! Searches a Subsonic-compatible music server (Navidrome, Airsonic, ...) for
//! albums by title.
//!
//! ## Authentication
//!
//! Every request carries the legacy token scheme: `t = md5(password + s)` with
//! a fresh salt `s` per call. See [`auth`] for why this is wire compatibility
//! only and not a security boundary.
//!
//! ## Usage
//!
//! ```ignore
//! use provider_subsonic::SubsonicClient;
//! use core_library::LibraryProvider;
//!
//! let client = SubsonicClient::new(transport, server, user, password, clock);
//! let owned = client.exists(&record, &cancel).await?;
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod types;

pub use auth::{token, SaltGenerator};
pub use client::{SubsonicClient, CLIENT_ID, PROTOCOL_VERSION, SEARCH_PATH};
pub use error::{Result, SubsonicError};
