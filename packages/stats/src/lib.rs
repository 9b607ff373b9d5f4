#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Departmental crime statistics preparation.
//!
//! Reads the semicolon-delimited statistics file published by the Ministry
//! of the Interior, coerces each row into a typed
//! [`StatisticsRecord`](crime_dash_stats_models::StatisticsRecord), keeps
//! the rows of one region and a set of tracked indicators, and collapses
//! duplicates into one
//! [`AggregatedRecord`](crime_dash_stats_models::AggregatedRecord) per
//! (department, indicator, year, population).

pub mod aggregate;
pub mod filter;
pub mod load;
pub mod parsing;

use thiserror::Error;

/// Errors that can occur while preparing statistics.
#[derive(Debug, Error)]
pub enum StatsError {
    /// The statistics file could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not readable as delimited text.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The header row lacks required columns.
    #[error("Missing required columns: {}", missing.join(", "))]
    MissingColumns {
        /// Names of the absent columns.
        missing: Vec<String>,
    },

    /// A field failed type coercion.
    #[error("Line {line}: invalid {column} '{value}': {message}")]
    InvalidField {
        /// 1-based line number in the source file.
        line: u64,
        /// Column name.
        column: &'static str,
        /// Raw field value.
        value: String,
        /// Description of what went wrong.
        message: String,
    },
}

impl StatsError {
    /// Returns `true` for field coercion failures, as opposed to the file
    /// being missing or structurally unreadable.
    #[must_use]
    pub const fn is_parse_error(&self) -> bool {
        matches!(self, Self::InvalidField { .. })
    }
}
