#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! French department and region types.
//!
//! Department codes appear in two sources that disagree on formatting: the
//! boundary `GeoJSON` stores text codes (`"08"`), while the statistics CSV
//! may carry unpadded numbers (`8`). [`DepartmentCode`] is the single
//! normalized form both sides are converted to before joining.

pub mod regions;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Minimum width of a department code after zero-filling.
pub const DEPARTMENT_CODE_WIDTH: usize = 2;

/// A normalized department code (e.g. `"08"`, `"75"`, `"2A"`).
///
/// Numeric codes are left-padded with zeros to [`DEPARTMENT_CODE_WIDTH`]
/// characters. Zero-filling never truncates, so overseas codes such as
/// `"971"` keep their three characters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DepartmentCode(String);

impl DepartmentCode {
    /// Normalizes a raw code string.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDepartmentCode`] if the trimmed input is empty or
    /// contains characters other than ASCII letters and digits.
    pub fn normalize(raw: &str) -> Result<Self, InvalidDepartmentCode> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(InvalidDepartmentCode {
                value: raw.to_string(),
            });
        }

        Ok(Self(format!(
            "{trimmed:0>width$}",
            width = DEPARTMENT_CODE_WIDTH
        )))
    }

    /// Builds a code from a numeric department number.
    #[must_use]
    pub fn from_number(number: u32) -> Self {
        Self(format!("{number:0>width$}", width = DEPARTMENT_CODE_WIDTH))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DepartmentCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DepartmentCode {
    type Err = InvalidDepartmentCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::normalize(s)
    }
}

impl TryFrom<String> for DepartmentCode {
    type Error = InvalidDepartmentCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::normalize(&value)
    }
}

impl From<DepartmentCode> for String {
    fn from(code: DepartmentCode) -> Self {
        code.0
    }
}

/// Error returned when a department code cannot be normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidDepartmentCode {
    /// The raw value that was rejected.
    pub value: String,
}

impl std::fmt::Display for InvalidDepartmentCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid department code '{}'", self.value)
    }
}

impl std::error::Error for InvalidDepartmentCode {}

/// A department outline as loaded from the boundary source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentBoundary {
    /// Normalized department code.
    pub code: DepartmentCode,
    /// Department name (e.g. "Seine-Saint-Denis").
    pub name: String,
    /// `Polygon` or `MultiPolygon` outline.
    pub geometry: geojson::Geometry,
}

/// Bounding box of a set of boundaries, in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapExtent {
    /// Western edge (minimum longitude).
    pub west: f64,
    /// Southern edge (minimum latitude).
    pub south: f64,
    /// Eastern edge (maximum longitude).
    pub east: f64,
    /// Northern edge (maximum latitude).
    pub north: f64,
}

impl MapExtent {
    /// Returns the center as `(latitude, longitude)`.
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }

    /// Returns the smallest extent covering both `self` and `other`.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            west: self.west.min(other.west),
            south: self.south.min(other.south),
            east: self.east.max(other.east),
            north: self.north.max(other.north),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_union_and_center() {
        let a = MapExtent {
            west: 2.0,
            south: 48.0,
            east: 3.0,
            north: 49.0,
        };
        let b = MapExtent {
            west: 1.5,
            south: 48.5,
            east: 2.5,
            north: 49.5,
        };
        let u = a.union(b);
        assert!((u.west - 1.5).abs() < f64::EPSILON);
        assert!((u.north - 49.5).abs() < f64::EPSILON);
        let (lat, lon) = u.center();
        assert!((lat - 48.75).abs() < 1e-9);
        assert!((lon - 2.25).abs() < 1e-9);
    }

    #[test]
    fn pads_single_digit_codes() {
        assert_eq!(DepartmentCode::normalize("8").unwrap().as_str(), "08");
        assert_eq!(DepartmentCode::from_number(8).as_str(), "08");
    }

    #[test]
    fn keeps_padded_and_corsican_codes() {
        assert_eq!(DepartmentCode::normalize("08").unwrap().as_str(), "08");
        assert_eq!(DepartmentCode::normalize(" 75 ").unwrap().as_str(), "75");
        assert_eq!(DepartmentCode::normalize("2A").unwrap().as_str(), "2A");
    }

    #[test]
    fn never_truncates_overseas_codes() {
        assert_eq!(DepartmentCode::normalize("971").unwrap().as_str(), "971");
    }

    #[test]
    fn metropolitan_codes_are_two_characters() {
        for raw in ["1", "01", "9", "75", "93", "2B"] {
            let code = DepartmentCode::normalize(raw).unwrap();
            assert_eq!(code.as_str().len(), DEPARTMENT_CODE_WIDTH, "{raw}");
        }
    }

    #[test]
    fn rejects_empty_and_punctuated_codes() {
        assert!(DepartmentCode::normalize("").is_err());
        assert!(DepartmentCode::normalize("   ").is_err());
        assert!(DepartmentCode::normalize("7.5").is_err());
    }

    #[test]
    fn deserializes_through_normalization() {
        let code: DepartmentCode = serde_json::from_str("\"8\"").unwrap();
        assert_eq!(code.as_str(), "08");
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"08\"");
    }
}
