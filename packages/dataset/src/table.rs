//! The immutable joined table and its selections.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crime_dash_crime_models::Indicator;
use crime_dash_geography_models::{DepartmentBoundary, DepartmentCode};

/// An aggregated statistics row enriched with its department boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedRecord {
    /// Boundary of the department (shared between all its rows).
    pub boundary: Arc<DepartmentBoundary>,
    /// Tracked indicator.
    pub indicator: Indicator,
    /// Reference year.
    pub year: u16,
    /// Department population.
    pub population: u64,
    /// Summed case count.
    pub count: u64,
    /// Mean rate per 1,000 inhabitants.
    pub rate_per_thousand: f64,
}

impl JoinedRecord {
    /// Department code.
    #[must_use]
    pub fn department_code(&self) -> &DepartmentCode {
        &self.boundary.code
    }

    /// Department name.
    #[must_use]
    pub fn department_name(&self) -> &str {
        &self.boundary.name
    }
}

/// The two views derived from a (year, indicator) choice.
#[derive(Debug, Clone, Default)]
pub struct Selection<'a> {
    /// Rows matching both the year and the indicator.
    pub exact: Vec<&'a JoinedRecord>,
    /// Rows matching the indicator, across all years.
    pub by_indicator: Vec<&'a JoinedRecord>,
}

/// The joined table, built once at startup and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    rows: Vec<JoinedRecord>,
    boundaries: Vec<Arc<DepartmentBoundary>>,
}

impl Dataset {
    /// Wraps joined rows and the full boundary list.
    ///
    /// `boundaries` keeps every loaded department, including those without
    /// statistics, so maps can still outline them.
    #[must_use]
    pub const fn new(rows: Vec<JoinedRecord>, boundaries: Vec<Arc<DepartmentBoundary>>) -> Self {
        Self { rows, boundaries }
    }

    /// All joined rows.
    #[must_use]
    pub fn rows(&self) -> &[JoinedRecord] {
        &self.rows
    }

    /// All loaded boundaries, joined or not.
    #[must_use]
    pub fn boundaries(&self) -> &[Arc<DepartmentBoundary>] {
        &self.boundaries
    }

    /// Boundaries of the departments that have at least one joined row,
    /// ordered by department code.
    #[must_use]
    pub fn joined_boundaries(&self) -> Vec<Arc<DepartmentBoundary>> {
        self.rows
            .iter()
            .map(|row| (row.department_code(), &row.boundary))
            .collect::<BTreeMap<_, _>>()
            .into_values()
            .map(Arc::clone)
            .collect()
    }

    /// Number of joined rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct years, ascending.
    #[must_use]
    pub fn years(&self) -> Vec<u16> {
        self.rows
            .iter()
            .map(|row| row.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct indicators in order of first appearance.
    #[must_use]
    pub fn indicators(&self) -> Vec<Indicator> {
        let mut seen = BTreeSet::new();
        self.rows
            .iter()
            .map(|row| row.indicator)
            .filter(|indicator| seen.insert(*indicator))
            .collect()
    }

    /// Distinct department codes, ascending.
    #[must_use]
    pub fn departments(&self) -> Vec<&DepartmentCode> {
        self.rows
            .iter()
            .map(JoinedRecord::department_code)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Filters the table for a (year, indicator) choice.
    ///
    /// Never fails: an unknown year or indicator yields empty views.
    #[must_use]
    pub fn select(&self, year: u16, indicator: Indicator) -> Selection<'_> {
        let by_indicator: Vec<&JoinedRecord> = self
            .rows
            .iter()
            .filter(|row| row.indicator == indicator)
            .collect();

        let exact = by_indicator
            .iter()
            .copied()
            .filter(|row| row.year == year)
            .collect();

        Selection {
            exact,
            by_indicator,
        }
    }

    /// All rows of `year`, every indicator included.
    #[must_use]
    pub fn select_year(&self, year: u16) -> Vec<&JoinedRecord> {
        self.rows.iter().filter(|row| row.year == year).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boundary(code: u32, name: &str) -> Arc<DepartmentBoundary> {
        Arc::new(DepartmentBoundary {
            code: DepartmentCode::from_number(code),
            name: name.to_string(),
            geometry: geojson::Geometry::new(geojson::Value::Polygon(vec![vec![
                vec![2.0, 48.0],
                vec![3.0, 48.0],
                vec![3.0, 49.0],
                vec![2.0, 48.0],
            ]])),
        })
    }

    fn row(b: &Arc<DepartmentBoundary>, indicator: Indicator, year: u16, count: u64) -> JoinedRecord {
        JoinedRecord {
            boundary: Arc::clone(b),
            indicator,
            year,
            population: 1_000,
            count,
            rate_per_thousand: 0.5,
        }
    }

    fn sample() -> Dataset {
        let paris = boundary(75, "Paris");
        let ssd = boundary(93, "Seine-Saint-Denis");
        Dataset::new(
            vec![
                row(&paris, Indicator::Homicides, 2020, 10),
                row(&paris, Indicator::Homicides, 2021, 12),
                row(&paris, Indicator::Vandalism, 2021, 500),
                row(&ssd, Indicator::Homicides, 2021, 20),
                row(&ssd, Indicator::DrugTrafficking, 2019, 300),
            ],
            vec![paris, ssd],
        )
    }

    #[test]
    fn exact_selection_matches_both_fields() {
        let dataset = sample();
        let selection = dataset.select(2021, Indicator::Homicides);

        assert_eq!(selection.exact.len(), 2);
        for row in &selection.exact {
            assert_eq!(row.year, 2021);
            assert_eq!(row.indicator, Indicator::Homicides);
        }
    }

    #[test]
    fn indicator_selection_spans_years() {
        let dataset = sample();
        let selection = dataset.select(2021, Indicator::Homicides);

        assert_eq!(selection.by_indicator.len(), 3);
        assert!(
            selection
                .by_indicator
                .iter()
                .all(|row| row.indicator == Indicator::Homicides)
        );
        let years: BTreeSet<u16> = selection.by_indicator.iter().map(|r| r.year).collect();
        assert_eq!(years.into_iter().collect::<Vec<_>>(), vec![2020, 2021]);
    }

    #[test]
    fn unknown_choice_is_empty_not_an_error() {
        let dataset = sample();
        let selection = dataset.select(1990, Indicator::Fraud);
        assert!(selection.exact.is_empty());
        assert!(selection.by_indicator.is_empty());
    }

    #[test]
    fn distinct_years_and_indicators() {
        let dataset = sample();
        assert_eq!(dataset.years(), vec![2019, 2020, 2021]);
        assert_eq!(
            dataset.indicators(),
            vec![
                Indicator::Homicides,
                Indicator::Vandalism,
                Indicator::DrugTrafficking
            ]
        );
        assert_eq!(dataset.departments().len(), 2);
    }

    #[test]
    fn joined_boundaries_exclude_departments_without_rows() {
        let paris = boundary(75, "Paris");
        let marseille = boundary(13, "Bouches-du-Rhône");
        let dataset = Dataset::new(
            vec![row(&paris, Indicator::Homicides, 2020, 3)],
            vec![Arc::clone(&marseille), Arc::clone(&paris)],
        );

        let joined = dataset.joined_boundaries();
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].code.as_str(), "75");
        assert_eq!(dataset.boundaries().len(), 2);
    }

    #[test]
    fn select_year_covers_all_indicators() {
        let dataset = sample();
        assert_eq!(dataset.select_year(2021).len(), 3);
    }
}
