#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! View models for the dashboard.
//!
//! Every builder here is a pure function of a [`Selection`] (or the rows
//! of one year) plus explicit configuration. The output is fully resolved
//! (titles, series, colors, tooltip text), so a frontend only has to draw
//! it.
//!
//! [`Selection`]: crime_dash_dataset::Selection

pub mod charts;
pub mod color;
pub mod format;
pub mod map;

use crime_dash_crime_models::Indicator;

/// Header of the charts tab.
#[must_use]
pub fn charts_header(year: u16, indicator: Indicator) -> String {
    format!("Évolution temporelle et répartition par département : {indicator} ({year})")
}

/// Header of the map tab.
#[must_use]
pub fn map_header(year: u16) -> String {
    format!("Carte interactive par indicateur ({year})")
}
