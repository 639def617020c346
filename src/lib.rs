//! # Casefinder
//!
//! Search and filter engine for missing-person case records.
//!
//! Given an in-memory collection of [`CaseRecord`]s and a [`FilterCriteria`]
//! snapshot, [`evaluate`] returns the records matching the free-text query
//! and every structured filter, in their original order.
//!
//! ## Features
//!
//! - Case-insensitive substring search over name, location and description
//! - Location, age bracket, time-since-last-seen and status filters
//! - Injectable clock for the time-based filter
//! - `key:value` filter query syntax
//! - JSON, YAML and CSV record files
//!
//! ## Example
//!
//! ```rust
//! use casefinder::{FilterCriteria, evaluate};
//! use casefinder::models::sample_cases;
//!
//! let cases = sample_cases();
//! let criteria = FilterCriteria::new().with_query("MARIA");
//! let hits = evaluate(&cases, &criteria, chrono::Utc::now());
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].name, "Maria Silva");
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

pub mod cli;
pub mod config;
pub mod io;
pub mod models;
pub mod observability;
pub mod rendering;
pub mod services;

pub use config::CasefinderConfig;
pub use models::{
    AgeBracket, CaseId, CaseRecord, CaseStatus, ElapsedBracket, FilterCriteria, Gender,
    RawCriteria, SearchResult,
};
pub use services::{
    Clock, FixedClock, SearchService, SystemClock, clear_criteria, evaluate, parse_filter_query,
};

/// Error type for casefinder operations.
///
/// The evaluator itself never fails; errors come from the surfaces around
/// it (record files, configuration, logging setup).
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Malformed record file, unsupported format, bad CLI value |
/// | `OperationFailed` | I/O errors, config parse errors, logging init failures |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    ///
    /// Raised when:
    /// - A record file is not valid JSON, YAML or CSV
    /// - A CSV file lacks a required column or has a bad cell
    /// - A file extension or `--format` value is not recognized
    /// - A `--now` value is not a date or RFC 3339 timestamp
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    ///
    /// Raised when:
    /// - A records or config file cannot be opened or read
    /// - Output cannot be written
    /// - Logging is initialized twice
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

/// Result type alias for casefinder operations.
pub type Result<T> = std::result::Result<T, Error>;
