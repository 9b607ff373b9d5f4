#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Row types for the departmental crime statistics file.
//!
//! A row moves through three shapes: [`RawStatisticsRow`] exactly as read
//! from the CSV, [`StatisticsRecord`] after type coercion and code
//! normalization, and [`AggregatedRecord`] after filtering and grouping.

use crime_dash_crime_models::Indicator;
use crime_dash_geography_models::DepartmentCode;
use serde::{Deserialize, Serialize};

/// Region code column.
pub const COLUMN_REGION: &str = "Code_region";
/// Department code column.
pub const COLUMN_DEPARTMENT: &str = "Code_departement";
/// Indicator label column.
pub const COLUMN_INDICATOR: &str = "indicateur";
/// Year column.
pub const COLUMN_YEAR: &str = "annee";
/// Population column.
pub const COLUMN_POPULATION: &str = "insee_pop";
/// Case count column.
pub const COLUMN_COUNT: &str = "nombre";
/// Rate per 1,000 inhabitants column (comma decimal separator).
pub const COLUMN_RATE: &str = "taux_pour_mille";

/// Columns that must be present in the header row.
pub const REQUIRED_COLUMNS: &[&str] = &[
    COLUMN_REGION,
    COLUMN_DEPARTMENT,
    COLUMN_INDICATOR,
    COLUMN_YEAR,
    COLUMN_POPULATION,
    COLUMN_COUNT,
    COLUMN_RATE,
];

/// A CSV row before any type coercion. Every field is kept as text so
/// parse failures can be reported with the offending value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawStatisticsRow {
    #[serde(rename = "Code_region")]
    pub region_code: String,
    #[serde(rename = "Code_departement")]
    pub department_code: String,
    #[serde(rename = "indicateur")]
    pub indicator: String,
    #[serde(rename = "annee")]
    pub year: String,
    #[serde(rename = "insee_pop")]
    pub population: String,
    #[serde(rename = "nombre")]
    pub count: String,
    #[serde(rename = "taux_pour_mille")]
    pub rate_per_thousand: String,
}

/// A typed statistics row.
///
/// The indicator stays a free-form label here: the file publishes more
/// indicators than the dashboard tracks, and unknown labels are filtered
/// out rather than rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsRecord {
    /// INSEE region code.
    pub region_code: u32,
    /// Normalized department code.
    pub department_code: DepartmentCode,
    /// Indicator label as published.
    pub indicator: String,
    /// Reference year.
    pub year: u16,
    /// Department population used for the rate.
    pub population: u64,
    /// Number of recorded cases.
    pub count: u64,
    /// Cases per 1,000 inhabitants.
    pub rate_per_thousand: f64,
}

/// Grouping key for aggregation.
///
/// Ordered by department code, then indicator label (as published, not
/// enum order), then year, then population.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AggregationKey {
    pub department_code: DepartmentCode,
    pub indicator: Indicator,
    pub year: u16,
    pub population: u64,
}

impl Ord for AggregationKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.department_code
            .cmp(&other.department_code)
            .then_with(|| self.indicator.label().cmp(other.indicator.label()))
            .then_with(|| self.year.cmp(&other.year))
            .then_with(|| self.population.cmp(&other.population))
    }
}

impl PartialOrd for AggregationKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// One row per (department, indicator, year, population).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedRecord {
    /// Normalized department code.
    pub department_code: DepartmentCode,
    /// Tracked indicator.
    pub indicator: Indicator,
    /// Reference year.
    pub year: u16,
    /// Department population.
    pub population: u64,
    /// Sum of case counts over the grouped rows.
    pub count: u64,
    /// Mean of the per-1,000 rates over the grouped rows.
    pub rate_per_thousand: f64,
    /// Number of source rows collapsed into this one.
    pub source_rows: usize,
}

impl AggregatedRecord {
    /// Returns the grouping key of this row.
    #[must_use]
    pub fn key(&self) -> AggregationKey {
        AggregationKey {
            department_code: self.department_code.clone(),
            indicator: self.indicator,
            year: self.year,
            population: self.population,
        }
    }
}
