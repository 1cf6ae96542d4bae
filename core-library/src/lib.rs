//! # Library Matching Module
//!
//! Domain model shared by both catalog services and the rules that decide
//! whether a listened-to album is already owned.
//!
//! ## Overview
//!
//! This module provides:
//! - [`HistoryRecord`], [`LibraryCandidate`] and [`IgnoreSet`]
//! - [`normalize`], the single text canonicalization applied to both sides
//!   of every comparison
//! - [`matches`], equality-after-normalization between a record and a list
//!   of search candidates
//! - The [`HistoryProvider`] and [`LibraryProvider`] traits implemented by the
//!   provider crates, and the [`CatalogError`] they report through

pub mod error;
pub mod matcher;
pub mod models;
pub mod normalize;
pub mod provider;

pub use error::{CatalogError, Result};
pub use matcher::matches;
pub use models::{HistoryRecord, IgnoreSet, LibraryCandidate};
pub use normalize::normalize;
pub use provider::{HistoryProvider, LibraryProvider};
