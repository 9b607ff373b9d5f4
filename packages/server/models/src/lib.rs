#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the crime dashboard server.
//!
//! Chart and map payloads are the view models of `crime_dash_render`
//! serialized as-is; this crate only holds the envelope types and query
//! parameters.

use crime_dash_crime_models::{CrimeCategory, Indicator};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Server version.
    pub version: String,
}

/// An indicator choice offered by the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiIndicator {
    /// Published label, also the query value.
    pub name: Indicator,
    /// Parent category.
    pub category: CrimeCategory,
}

impl From<Indicator> for ApiIndicator {
    fn from(indicator: Indicator) -> Self {
        Self {
            name: indicator,
            category: indicator.category(),
        }
    }
}

/// Indicators of one crime category, for grouping the sidebar choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCategoryGroup {
    pub category: CrimeCategory,
    pub indicators: Vec<Indicator>,
}

impl ApiCategoryGroup {
    /// Groups `indicators` by category, in category order.
    ///
    /// Indicators keep their relative order within a group and categories
    /// with no indicator are left out.
    #[must_use]
    pub fn group(indicators: &[Indicator]) -> Vec<Self> {
        CrimeCategory::all()
            .iter()
            .filter_map(|&category| {
                let members = Indicator::for_category(category);
                let indicators: Vec<Indicator> = indicators
                    .iter()
                    .copied()
                    .filter(|indicator| members.contains(indicator))
                    .collect();

                (!indicators.is_empty()).then_some(Self {
                    category,
                    indicators,
                })
            })
            .collect()
    }
}

/// Sidebar choices and their initial values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiOptions {
    /// Available years, ascending.
    pub years: Vec<u16>,
    /// Available indicators, in dataset order.
    pub indicators: Vec<ApiIndicator>,
    /// The same indicators grouped by category.
    pub categories: Vec<ApiCategoryGroup>,
    /// Earliest year, if any.
    pub default_year: Option<u16>,
    /// First indicator, if any.
    pub default_indicator: Option<Indicator>,
    /// Number of joined rows.
    pub row_count: usize,
}

/// Query parameters for `GET /api/charts`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartsQueryParams {
    /// Selected year.
    pub year: u16,
    /// Selected indicator label.
    pub indicator: Indicator,
}

/// Query parameters for `GET /api/map`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapQueryParams {
    /// Selected year.
    pub year: u16,
}
