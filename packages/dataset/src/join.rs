//! Inner join of aggregated statistics with department boundaries.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crime_dash_geography_models::{DepartmentBoundary, DepartmentCode};
use crime_dash_stats_models::AggregatedRecord;

use crate::table::JoinedRecord;

/// Joined rows plus the department codes each side failed to match.
#[derive(Debug, Default)]
pub struct JoinOutcome {
    /// Rows present on both sides, in aggregated order.
    pub rows: Vec<JoinedRecord>,
    /// Departments with statistics but no boundary.
    pub unmatched_statistics: BTreeSet<DepartmentCode>,
    /// Departments with a boundary but no statistics.
    pub unmatched_boundaries: BTreeSet<DepartmentCode>,
}

/// Joins aggregated rows with boundaries on department code.
///
/// Unmatched departments on either side are dropped from the rows and
/// listed in the outcome.
#[must_use]
pub fn inner_join(
    aggregated: Vec<AggregatedRecord>,
    boundaries: &[Arc<DepartmentBoundary>],
) -> JoinOutcome {
    let by_code: BTreeMap<&DepartmentCode, &Arc<DepartmentBoundary>> =
        boundaries.iter().map(|b| (&b.code, b)).collect();

    let mut outcome = JoinOutcome::default();
    let mut matched: BTreeSet<DepartmentCode> = BTreeSet::new();

    for record in aggregated {
        let Some(boundary) = by_code.get(&record.department_code) else {
            outcome.unmatched_statistics.insert(record.department_code);
            continue;
        };

        matched.insert(record.department_code);
        outcome.rows.push(JoinedRecord {
            boundary: Arc::clone(boundary),
            indicator: record.indicator,
            year: record.year,
            population: record.population,
            count: record.count,
            rate_per_thousand: record.rate_per_thousand,
        });
    }

    outcome.unmatched_boundaries = by_code
        .keys()
        .filter(|code| !matched.contains(**code))
        .map(|code| (*code).clone())
        .collect();

    if !outcome.unmatched_statistics.is_empty() {
        log::warn!(
            "Dropping statistics for departments without a boundary: {}",
            join_codes(&outcome.unmatched_statistics)
        );
    }
    if !outcome.unmatched_boundaries.is_empty() {
        log::warn!(
            "Dropping boundaries without statistics in the selected region: {}",
            join_codes(&outcome.unmatched_boundaries)
        );
    }

    outcome
}

fn join_codes(codes: &BTreeSet<DepartmentCode>) -> String {
    codes
        .iter()
        .map(DepartmentCode::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use crime_dash_crime_models::Indicator;

    use super::*;

    fn boundary(code: &str) -> Arc<DepartmentBoundary> {
        Arc::new(DepartmentBoundary {
            code: DepartmentCode::normalize(code).unwrap(),
            name: format!("Département {code}"),
            geometry: geojson::Geometry::new(geojson::Value::Polygon(vec![vec![
                vec![0.0, 0.0],
                vec![1.0, 0.0],
                vec![1.0, 1.0],
                vec![0.0, 0.0],
            ]])),
        })
    }

    fn aggregated(code: &str, year: u16) -> AggregatedRecord {
        AggregatedRecord {
            department_code: DepartmentCode::normalize(code).unwrap(),
            indicator: Indicator::Homicides,
            year,
            population: 1_000,
            count: 1,
            rate_per_thousand: 1.0,
            source_rows: 1,
        }
    }

    #[test]
    fn keeps_only_departments_on_both_sides() {
        let boundaries = vec![boundary("75"), boundary("77"), boundary("01")];
        let outcome = inner_join(
            vec![aggregated("75", 2020), aggregated("93", 2020)],
            &boundaries,
        );

        assert_eq!(outcome.rows.len(), 1);
        assert_eq!(outcome.rows[0].department_code().as_str(), "75");
        assert_eq!(outcome.rows[0].department_name(), "Département 75");
        assert!(
            outcome
                .unmatched_statistics
                .contains(&DepartmentCode::normalize("93").unwrap())
        );
        assert_eq!(outcome.unmatched_boundaries.len(), 2);
    }

    #[test]
    fn unmatched_boundary_codes_are_listed_in_order() {
        let boundaries = vec![boundary("77"), boundary("75"), boundary("1")];
        let outcome = inner_join(vec![aggregated("75", 2020)], &boundaries);

        assert_eq!(join_codes(&outcome.unmatched_boundaries), "01, 77");
        assert!(outcome.unmatched_statistics.is_empty());
    }

    #[test]
    fn distinct_departments_bounded_by_both_sides() {
        let boundaries = vec![boundary("75"), boundary("92")];
        let stats = vec![
            aggregated("75", 2020),
            aggregated("75", 2021),
            aggregated("92", 2020),
            aggregated("93", 2020),
            aggregated("94", 2020),
        ];
        let stats_departments = 4;

        let outcome = inner_join(stats, &boundaries);
        let joined: BTreeSet<&DepartmentCode> =
            outcome.rows.iter().map(JoinedRecord::department_code).collect();

        assert!(joined.len() <= boundaries.len().min(stats_departments));
        for code in joined {
            assert!(boundaries.iter().any(|b| &b.code == code));
        }
    }

    #[test]
    fn empty_inputs_join_to_nothing() {
        let outcome = inner_join(Vec::new(), &[boundary("75")]);
        assert!(outcome.rows.is_empty());
        assert_eq!(outcome.unmatched_boundaries.len(), 1);
    }
}
