//! Dataset summary printing.

use std::collections::BTreeMap;

use console::style;
use crime_dash_crime_models::Indicator;
use crime_dash_dataset::Dataset;
use crime_dash_geography_models::regions::{ILE_DE_FRANCE, ILE_DE_FRANCE_DEPARTMENTS, region_name};

/// Rows per indicator, in dataset order.
pub fn rows_per_indicator(dataset: &Dataset) -> Vec<(Indicator, usize)> {
    let mut counts: BTreeMap<Indicator, usize> = BTreeMap::new();
    for row in dataset.rows() {
        *counts.entry(row.indicator).or_default() += 1;
    }

    dataset
        .indicators()
        .into_iter()
        .map(|indicator| (indicator, counts.get(&indicator).copied().unwrap_or(0)))
        .collect()
}

/// Île-de-France departments without any joined row.
pub fn missing_ile_de_france(dataset: &Dataset) -> Vec<&'static str> {
    let present = dataset.departments();
    ILE_DE_FRANCE_DEPARTMENTS
        .iter()
        .filter(|(code, _)| !present.iter().any(|p| p.as_str() == *code))
        .map(|(_, name)| *name)
        .collect()
}

/// Prints years, departments and per-indicator row counts.
pub fn print(dataset: &Dataset, region_code: u32) {
    println!("{}", style("Dataset summary").bold());
    println!("  Region:      {} ({region_code})", region_name(region_code));
    println!("  Rows:        {}", dataset.len());
    println!(
        "  Departments: {} joined / {} boundaries",
        dataset.departments().len(),
        dataset.boundaries().len()
    );

    if region_code == ILE_DE_FRANCE {
        let missing = missing_ile_de_france(dataset);
        if !missing.is_empty() {
            println!("  Missing:     {}", style(missing.join(", ")).yellow());
        }
    }

    let years = dataset.years();
    match (years.first(), years.last()) {
        (Some(first), Some(last)) => {
            println!("  Years:       {first}-{last} ({} years)", years.len());
        }
        _ => println!("  Years:       none"),
    }

    println!("  Indicators:");
    for (indicator, rows) in rows_per_indicator(dataset) {
        println!("    {:<45} {rows:>6}", indicator.label());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crime_dash_dataset::JoinedRecord;
    use crime_dash_geography_models::{DepartmentBoundary, DepartmentCode};

    use super::*;

    #[test]
    fn counts_rows_in_first_appearance_order() {
        let paris = Arc::new(DepartmentBoundary {
            code: DepartmentCode::from_number(75),
            name: "Paris".to_string(),
            geometry: geojson::Geometry::new(geojson::Value::Point(vec![2.35, 48.85])),
        });
        let row = |indicator, year| JoinedRecord {
            boundary: Arc::clone(&paris),
            indicator,
            year,
            population: 1,
            count: 1,
            rate_per_thousand: 1.0,
        };
        let dataset = Dataset::new(
            vec![
                row(Indicator::Vandalism, 2020),
                row(Indicator::Homicides, 2020),
                row(Indicator::Vandalism, 2021),
            ],
            vec![Arc::clone(&paris)],
        );

        assert_eq!(
            rows_per_indicator(&dataset),
            vec![(Indicator::Vandalism, 2), (Indicator::Homicides, 1)]
        );
        assert_eq!(missing_ile_de_france(&dataset).len(), 7);
        assert!(!missing_ile_de_france(&dataset).contains(&"Paris"));
    }
}
