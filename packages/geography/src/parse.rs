//! Conversion of `GeoJSON` features into [`DepartmentBoundary`] values.
//!
//! Uses [`BoundaryFields`] to find the code and name properties, so the
//! same parser handles any department boundary file regardless of its
//! property naming.

use std::collections::BTreeSet;

use crime_dash_geography_models::{DepartmentBoundary, DepartmentCode};
use geojson::{Feature, FeatureCollection, GeoJson};

use crate::{BoundaryFields, GeoError};

/// Parses a `GeoJSON` `FeatureCollection` into department boundaries.
///
/// Every feature must carry a code, a name and a polygonal geometry. When
/// two features share a department code the first one wins.
///
/// # Errors
///
/// Returns [`GeoError`] if the document is not a `FeatureCollection` or
/// any feature is missing a required property or geometry.
pub fn parse_boundaries(
    body: &str,
    fields: &BoundaryFields,
) -> Result<Vec<DepartmentBoundary>, GeoError> {
    let geojson: GeoJson = body.parse()?;
    let collection = FeatureCollection::try_from(geojson)?;

    let mut seen = BTreeSet::new();
    let mut boundaries = Vec::with_capacity(collection.features.len());

    for (index, feature) in collection.features.into_iter().enumerate() {
        let boundary = parse_feature(index, feature, fields)?;
        if seen.insert(boundary.code.clone()) {
            boundaries.push(boundary);
        } else {
            log::warn!(
                "Duplicate boundary for department {}, keeping the first",
                boundary.code
            );
        }
    }

    Ok(boundaries)
}

/// Converts a single feature.
fn parse_feature(
    index: usize,
    feature: Feature,
    fields: &BoundaryFields,
) -> Result<DepartmentBoundary, GeoError> {
    let raw_code = match feature.property(&fields.code) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => {
            return Err(GeoError::Conversion {
                message: format!("Feature {index} has no '{}' property", fields.code),
            });
        }
    };

    let code = DepartmentCode::normalize(&raw_code).map_err(|e| GeoError::Conversion {
        message: format!("Feature {index}: {e}"),
    })?;

    let name = feature
        .property(&fields.name)
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| GeoError::Conversion {
            message: format!(
                "Feature {index} (department {code}) has no '{}' property",
                fields.name
            ),
        })?
        .to_string();

    let geometry = feature.geometry.ok_or_else(|| GeoError::Conversion {
        message: format!("Department {code} has no geometry"),
    })?;

    if let Some(kind) = non_polygonal_kind(&geometry.value) {
        return Err(GeoError::Conversion {
            message: format!("Department {code} has non-polygonal geometry '{kind}'"),
        });
    }

    Ok(DepartmentBoundary {
        code,
        name,
        geometry,
    })
}

/// Returns the geometry type name unless it is a `Polygon` or `MultiPolygon`.
const fn non_polygonal_kind(value: &geojson::Value) -> Option<&'static str> {
    match value {
        geojson::Value::Polygon(_) | geojson::Value::MultiPolygon(_) => None,
        geojson::Value::Point(_) => Some("Point"),
        geojson::Value::MultiPoint(_) => Some("MultiPoint"),
        geojson::Value::LineString(_) => Some("LineString"),
        geojson::Value::MultiLineString(_) => Some("MultiLineString"),
        geojson::Value::GeometryCollection(_) => Some("GeometryCollection"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_DEPARTMENTS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": {"code": "08", "nom": "Ardennes"},
             "geometry": {"type": "Polygon", "coordinates": [[[4.0,49.5],[5.0,49.5],[5.0,50.0],[4.0,49.5]]]}},
            {"type": "Feature", "properties": {"code": 75, "nom": "Paris"},
             "geometry": {"type": "MultiPolygon", "coordinates": [[[[2.2,48.8],[2.4,48.8],[2.4,48.9],[2.2,48.8]]]]}}
        ]
    }"#;

    #[test]
    fn parses_polygon_and_multipolygon_features() {
        let boundaries = parse_boundaries(TWO_DEPARTMENTS, &BoundaryFields::default()).unwrap();
        assert_eq!(boundaries.len(), 2);
        assert_eq!(boundaries[0].code.as_str(), "08");
        assert_eq!(boundaries[0].name, "Ardennes");
        assert_eq!(boundaries[1].code.as_str(), "75");
    }

    #[test]
    fn normalizes_numeric_codes() {
        let body = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"code":8,"nom":"Ardennes"},
             "geometry":{"type":"Polygon","coordinates":[[[4.0,49.5],[5.0,49.5],[5.0,50.0],[4.0,49.5]]]}}
        ]}"#;
        let boundaries = parse_boundaries(body, &BoundaryFields::default()).unwrap();
        assert_eq!(boundaries[0].code.as_str(), "08");
    }

    #[test]
    fn uses_configured_property_names() {
        let body = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"DEP":"93","LIBELLE":"Seine-Saint-Denis"},
             "geometry":{"type":"Polygon","coordinates":[[[2.3,48.8],[2.6,48.8],[2.6,49.0],[2.3,48.8]]]}}
        ]}"#;
        let fields = BoundaryFields {
            code: "DEP".to_string(),
            name: "LIBELLE".to_string(),
        };
        let boundaries = parse_boundaries(body, &fields).unwrap();
        assert_eq!(boundaries[0].name, "Seine-Saint-Denis");
    }

    #[test]
    fn keeps_first_duplicate() {
        let body = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"code":"75","nom":"Paris"},
             "geometry":{"type":"Polygon","coordinates":[[[2.2,48.8],[2.4,48.8],[2.4,48.9],[2.2,48.8]]]}},
            {"type":"Feature","properties":{"code":"75","nom":"Paris bis"},
             "geometry":{"type":"Polygon","coordinates":[[[2.2,48.8],[2.4,48.8],[2.4,48.9],[2.2,48.8]]]}}
        ]}"#;
        let boundaries = parse_boundaries(body, &BoundaryFields::default()).unwrap();
        assert_eq!(boundaries.len(), 1);
        assert_eq!(boundaries[0].name, "Paris");
    }

    #[test]
    fn rejects_missing_code() {
        let body = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"nom":"Paris"},
             "geometry":{"type":"Polygon","coordinates":[[[2.2,48.8],[2.4,48.8],[2.4,48.9],[2.2,48.8]]]}}
        ]}"#;
        let err = parse_boundaries(body, &BoundaryFields::default()).unwrap_err();
        assert!(matches!(err, GeoError::Conversion { .. }));
    }

    #[test]
    fn rejects_point_geometry() {
        let body = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"code":"75","nom":"Paris"},
             "geometry":{"type":"Point","coordinates":[2.35,48.85]}}
        ]}"#;
        assert!(parse_boundaries(body, &BoundaryFields::default()).is_err());
    }

    #[test]
    fn rejects_bare_geometry_document() {
        let body = r#"{"type":"Point","coordinates":[2.35,48.85]}"#;
        assert!(matches!(
            parse_boundaries(body, &BoundaryFields::default()),
            Err(GeoError::GeoJson(_))
        ));
    }
}
