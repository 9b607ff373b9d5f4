#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! The joined crime statistics dataset.
//!
//! [`pipeline::load`] reads the boundary and statistics sources once at
//! startup, filters and aggregates the statistics, and inner-joins them
//! with the boundaries into an immutable [`Dataset`]. Everything after
//! startup is a read-only filter of that table via [`Dataset::select`].

pub mod join;
pub mod pipeline;
pub mod progress;
pub mod table;

use std::path::PathBuf;

use crime_dash_crime_models::Indicator;
use crime_dash_geography::{BoundaryFields, BoundarySource, GeoError};
use crime_dash_geography_models::regions::ILE_DE_FRANCE;
use crime_dash_stats::StatsError;
use crime_dash_stats::filter::StatsFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use table::{Dataset, JoinedRecord, Selection};

/// Default boundary document: French departments.
pub const DEFAULT_BOUNDARIES_URL: &str =
    "https://france-geojson.gregoiredavid.fr/repo/departements.geojson";

/// Default statistics file name.
pub const DEFAULT_STATISTICS_PATH: &str = "délinquance.csv";

/// Broad classification of startup failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A source is unreachable, missing, or structurally unreadable.
    Load,
    /// A field failed type coercion.
    Parse,
}

/// Errors that abort the startup load.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The boundary source could not be loaded.
    #[error("Failed to load boundaries from {location}: {error}")]
    Boundaries {
        /// URL or path of the boundary source.
        location: String,
        /// Underlying error.
        #[source]
        error: GeoError,
    },

    /// The statistics file could not be loaded or parsed.
    #[error("Failed to load statistics from {}: {error}", path.display())]
    Statistics {
        /// Path of the statistics file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        error: StatsError,
    },

    /// A blocking load task panicked or was cancelled.
    #[error("Load task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl PipelineError {
    /// Returns whether this is a load or a parse failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Statistics { error, .. } if error.is_parse_error() => ErrorKind::Parse,
            _ => ErrorKind::Load,
        }
    }
}

/// Inputs and filter of the startup load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct PipelineConfig {
    /// Boundary document URL or path.
    pub boundaries: BoundarySource,
    /// Feature property names in the boundary document.
    pub boundary_fields: BoundaryFields,
    /// Statistics file path.
    pub statistics: PathBuf,
    /// Statistics field delimiter.
    pub delimiter: char,
    /// INSEE region code to keep.
    pub region_code: u32,
    /// Indicators to keep, in display order.
    pub indicators: Vec<Indicator>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            boundaries: BoundarySource::Url(DEFAULT_BOUNDARIES_URL.to_string()),
            boundary_fields: BoundaryFields::default(),
            statistics: PathBuf::from(DEFAULT_STATISTICS_PATH),
            delimiter: ';',
            region_code: ILE_DE_FRANCE,
            indicators: Indicator::TRACKED.to_vec(),
        }
    }
}

impl PipelineConfig {
    /// Returns the statistics filter described by this config.
    #[must_use]
    pub fn filter(&self) -> StatsFilter {
        StatsFilter {
            region_code: self.region_code,
            indicators: self.indicators.clone(),
        }
    }

    /// Returns the delimiter as a byte, falling back to `;` for
    /// multi-byte characters.
    #[must_use]
    pub fn delimiter_byte(&self) -> u8 {
        u8::try_from(self.delimiter).unwrap_or_else(|_| {
            log::warn!(
                "Delimiter '{}' is not a single byte, using ';'",
                self.delimiter
            );
            b';'
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_tracks_five_indicators_in_ile_de_france() {
        let config = PipelineConfig::default();
        assert_eq!(config.region_code, 11);
        assert_eq!(config.indicators.len(), 5);
        assert_eq!(config.delimiter_byte(), b';');
    }

    #[test]
    fn parse_kind_only_for_field_errors() {
        let parse = PipelineError::Statistics {
            path: PathBuf::from("x.csv"),
            error: StatsError::InvalidField {
                line: 2,
                column: "taux_pour_mille",
                value: "x".to_string(),
                message: "expected a decimal".to_string(),
            },
        };
        assert_eq!(parse.kind(), ErrorKind::Parse);

        let load = PipelineError::Statistics {
            path: PathBuf::from("x.csv"),
            error: StatsError::MissingColumns {
                missing: vec!["annee".to_string()],
            },
        };
        assert_eq!(load.kind(), ErrorKind::Load);
    }
}
