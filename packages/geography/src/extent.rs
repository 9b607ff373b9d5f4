//! Map extent of a boundary set.

use crime_dash_geography_models::{DepartmentBoundary, MapExtent};
use geo::BoundingRect as _;

/// Computes the bounding box covering every boundary.
///
/// Returns `None` if `boundaries` is empty or no geometry converts to a
/// `geo` geometry with a bounding rectangle.
#[must_use]
pub fn compute_extent<'a>(
    boundaries: impl IntoIterator<Item = &'a DepartmentBoundary>,
) -> Option<MapExtent> {
    boundaries
        .into_iter()
        .filter_map(|boundary| {
            let geometry: geo::Geometry<f64> = match boundary.geometry.clone().try_into() {
                Ok(g) => g,
                Err(e) => {
                    log::warn!(
                        "Failed to convert geometry for department {}: {e}",
                        boundary.code
                    );
                    return None;
                }
            };
            geometry.bounding_rect()
        })
        .map(|rect| MapExtent {
            west: rect.min().x,
            south: rect.min().y,
            east: rect.max().x,
            north: rect.max().y,
        })
        .reduce(MapExtent::union)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoundaryFields;
    use crate::parse::parse_boundaries;

    #[test]
    fn covers_all_boundaries() {
        let body = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"code":"75","nom":"Paris"},
             "geometry":{"type":"Polygon","coordinates":[[[2.2,48.8],[2.4,48.8],[2.4,48.9],[2.2,48.8]]]}},
            {"type":"Feature","properties":{"code":"93","nom":"Seine-Saint-Denis"},
             "geometry":{"type":"Polygon","coordinates":[[[2.3,48.85],[2.6,48.85],[2.6,49.0],[2.3,48.85]]]}}
        ]}"#;
        let boundaries = parse_boundaries(body, &BoundaryFields::default()).unwrap();
        let extent = compute_extent(&boundaries).unwrap();

        assert!((extent.west - 2.2).abs() < 1e-9);
        assert!((extent.south - 48.8).abs() < 1e-9);
        assert!((extent.east - 2.6).abs() < 1e-9);
        assert!((extent.north - 49.0).abs() < 1e-9);
    }

    #[test]
    fn empty_set_has_no_extent() {
        assert!(compute_extent(std::iter::empty()).is_none());
    }
}
