#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Department boundary loading.
//!
//! Reads a `GeoJSON` `FeatureCollection` of French departments from a URL
//! or a local file and converts each feature into a
//! [`DepartmentBoundary`](crime_dash_geography_models::DepartmentBoundary).
//! Also computes the map extent covering a set of boundaries.

pub mod extent;
pub mod fetch;
pub mod parse;

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading boundaries.
#[derive(Debug, Error)]
pub enum GeoError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Reading a local boundary file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid `GeoJSON`.
    #[error("GeoJSON error: {0}")]
    GeoJson(Box<geojson::Error>),

    /// A feature could not be converted into a boundary.
    #[error("Conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}

impl From<geojson::Error> for GeoError {
    fn from(e: geojson::Error) -> Self {
        Self::GeoJson(Box::new(e))
    }
}

/// Where the boundary document lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BoundarySource {
    /// Remote document fetched over HTTP(S).
    Url(String),
    /// Local file.
    Path(PathBuf),
}

impl FromStr for BoundarySource {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(Self::Url(s.to_string()))
        } else {
            Ok(Self::Path(PathBuf::from(s)))
        }
    }
}

impl TryFrom<String> for BoundarySource {
    type Error = std::convert::Infallible;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BoundarySource> for String {
    fn from(source: BoundarySource) -> Self {
        match source {
            BoundarySource::Url(url) => url,
            BoundarySource::Path(path) => path.to_string_lossy().into_owned(),
        }
    }
}

impl std::fmt::Display for BoundarySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Feature property names holding the department code and name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryFields {
    /// Property holding the department code (e.g. `"code"`).
    pub code: String,
    /// Property holding the department name (e.g. `"nom"`).
    pub name: String,
}

impl Default for BoundaryFields {
    fn default() -> Self {
        Self {
            code: "code".to_string(),
            name: "nom".to_string(),
        }
    }
}
