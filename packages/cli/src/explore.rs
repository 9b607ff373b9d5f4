//! Terminal exploration of (year, indicator) selections.
//!
//! Shows the same two views as the dashboard's charts tab: case counts by
//! department for the chosen year, and the rate series of each department
//! across years.

use console::style;
use crime_dash_crime_models::Indicator;
use crime_dash_dataset::Dataset;
use crime_dash_render::charts::{BarChartView, LineChartView, build_charts};
use crime_dash_render::format::{format_decimal, format_integer};
use dialoguer::{Confirm, Select};

/// Prompts for selections until the user stops.
///
/// # Errors
///
/// Returns an error if a prompt cannot be shown.
pub fn run(dataset: &Dataset) -> Result<(), Box<dyn std::error::Error>> {
    let years = dataset.years();
    let indicators = dataset.indicators();

    if years.is_empty() || indicators.is_empty() {
        println!("The dataset is empty, nothing to explore.");
        return Ok(());
    }

    let year_labels: Vec<String> = years.iter().map(ToString::to_string).collect();
    let indicator_labels: Vec<&str> = indicators.iter().copied().map(Indicator::label).collect();

    let mut year_idx = 0;
    let mut indicator_idx = 0;

    loop {
        year_idx = Select::new()
            .with_prompt("Année")
            .items(&year_labels)
            .default(year_idx)
            .interact()?;

        indicator_idx = Select::new()
            .with_prompt("Indicateur")
            .items(&indicator_labels)
            .default(indicator_idx)
            .interact()?;

        let year = years[year_idx];
        let indicator = indicators[indicator_idx];
        let view = build_charts(&dataset.select(year, indicator), year, indicator);

        println!();
        println!("{}", style(&view.header).bold());
        println!();
        print_bars(&view.bar);
        println!();
        print_series(&view.line, &years);
        println!();

        if !Confirm::new()
            .with_prompt("Another selection?")
            .default(true)
            .interact()?
        {
            break;
        }
    }

    Ok(())
}

fn print_bars(view: &BarChartView) {
    println!("{}", style(&view.title).underlined());
    if view.bars.is_empty() {
        println!("  {}", style("(aucune donnée)").dim());
        return;
    }

    let width = view
        .bars
        .iter()
        .map(|bar| bar.label.chars().count())
        .max()
        .unwrap_or(0);

    for bar in &view.bars {
        println!(
            "  {:<4} {:<width$} {:>10}",
            bar.color_key.as_str(),
            bar.label,
            format_integer(bar.value),
        );
    }
}

fn print_series(view: &LineChartView, years: &[u16]) {
    println!("{}", style(&view.title).underlined());
    if view.series.is_empty() {
        println!("  {}", style("(aucune donnée)").dim());
        return;
    }

    let header: String = years.iter().map(|year| format!("{year:>8}")).collect();
    println!("  {:<4}{header}", style("Dép.").bold());

    for series in &view.series {
        let cells: String = years
            .iter()
            .map(|year| {
                series
                    .points
                    .iter()
                    .find(|point| point.year == *year)
                    .map_or_else(
                        || format!("{:>8}", "-"),
                        |point| format!("{:>8}", format_decimal(point.rate_per_thousand, 2)),
                    )
            })
            .collect();
        println!("  {:<4}{cells}", series.department_code.as_str());
    }
}
