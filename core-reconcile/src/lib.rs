//! # Reconciliation Module
//!
//! Walks a ranked listening history against a music library and collects the
//! first albums the library is missing.
//!
//! ## Components
//!
//! - **Engine** (`engine`): the sequential scan with ignore-list filtering,
//!   per-record failure absorption, progress reporting and the
//!   recommendation cap
//! - **Statistics** (`stats`): request counters and the error categories used
//!   for the end-of-run hints

pub mod engine;
pub mod error;
pub mod stats;

pub use engine::{ReconcileConfig, ReconcileOutcome, ReconciliationEngine, RecordFailure};
pub use error::{ReconcileError, Result};
pub use stats::{ErrorCategory, ErrorStats};
