//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the reconciliation core:
//! - Logging and tracing infrastructure
//! - Configuration management
//! - The retrying request transport shared by every catalog client
//!
//! ## Overview
//!
//! This crate contains the runtime utilities that other modules depend on.
//! It establishes the retry/cancellation semantics of outbound requests and
//! the logging conventions used throughout the system.

pub mod config;
pub mod error;
pub mod logging;
pub mod transport;

pub use config::{AppConfig, AppConfigBuilder};
pub use error::{Error, Result};
pub use transport::{RetryPolicy, RetryingTransport, TransportError};
