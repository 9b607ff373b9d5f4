//! Grouping of filtered rows.
//!
//! Rows sharing (department, indicator, year, population) collapse into a
//! single [`AggregatedRecord`]: counts are summed, rates averaged.
//!
//! The published file carries one population per department and year, so
//! this normally yields one row per (department, indicator, year). When two
//! populations do occur for the same triple, both rows are kept and
//! reported by [`population_conflicts`].

use std::collections::BTreeMap;

use crime_dash_crime_models::Indicator;
use crime_dash_geography_models::DepartmentCode;
use crime_dash_stats_models::{AggregatedRecord, AggregationKey, StatisticsRecord};

/// Running totals for one group.
#[derive(Default)]
struct Accumulator {
    count: u64,
    rate_sum: f64,
    rows: usize,
}

/// Aggregates rows by (department, indicator, year, population).
///
/// The result is sorted by department code, then indicator label, then
/// year, then population.
#[must_use]
pub fn aggregate(rows: Vec<(Indicator, StatisticsRecord)>) -> Vec<AggregatedRecord> {
    let input_len = rows.len();
    let mut groups: BTreeMap<AggregationKey, Accumulator> = BTreeMap::new();

    for (indicator, record) in rows {
        let key = AggregationKey {
            department_code: record.department_code,
            indicator,
            year: record.year,
            population: record.population,
        };

        let acc = groups.entry(key).or_default();
        acc.count += record.count;
        acc.rate_sum += record.rate_per_thousand;
        acc.rows += 1;
    }

    let aggregated: Vec<AggregatedRecord> = groups
        .into_iter()
        .map(|(key, acc)| {
            #[allow(clippy::cast_precision_loss)]
            let rate_per_thousand = acc.rate_sum / acc.rows as f64;
            AggregatedRecord {
                department_code: key.department_code,
                indicator: key.indicator,
                year: key.year,
                population: key.population,
                count: acc.count,
                rate_per_thousand,
                source_rows: acc.rows,
            }
        })
        .collect();

    log::debug!(
        "Aggregated {input_len} rows into {} groups",
        aggregated.len()
    );

    for (code, indicator, year) in population_conflicts(&aggregated) {
        log::warn!(
            "Department {code} has several populations for {indicator} in {year}, keeping one row per population"
        );
    }

    aggregated
}

/// Lists the (department, indicator, year) triples that appear with more
/// than one population in sorted aggregated rows.
#[must_use]
pub fn population_conflicts(
    aggregated: &[AggregatedRecord],
) -> Vec<(DepartmentCode, Indicator, u16)> {
    let mut conflicts: Vec<(DepartmentCode, Indicator, u16)> = Vec::new();

    for pair in aggregated.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if a.department_code == b.department_code
            && a.indicator == b.indicator
            && a.year == b.year
        {
            let triple = (a.department_code.clone(), a.indicator, a.year);
            if conflicts.last() != Some(&triple) {
                conflicts.push(triple);
            }
        }
    }

    conflicts
}
