//! Export of a selection's views to JSON files.
//!
//! Writes `charts_{year}.json` (line and bar views), `map_{year}.json`
//! (the full map view) and one `GeoJSON` file per map layer, so the views
//! can be drawn by any chart or map tool without the server.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crime_dash_config::DashboardConfig;
use crime_dash_crime_models::Indicator;
use crime_dash_dataset::Dataset;
use crime_dash_render::charts::build_charts;
use crime_dash_render::map::build_map_view;
use serde::Serialize;

/// File-name-safe form of an indicator label.
pub fn slug(indicator: Indicator) -> String {
    let mut slug = String::new();
    for ch in indicator.label().chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.ends_with('_') {
            slug.push('_');
        }
    }
    slug.trim_end_matches('_').to_string()
}

fn write_json(path: &Path, value: &impl Serialize) -> Result<(), Box<dyn std::error::Error>> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, value)?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

/// Exports the views of one selection into `output`.
///
/// Missing `year`/`indicator` default to the earliest year and the first
/// indicator of the dataset. Returns the written paths.
///
/// # Errors
///
/// Returns an error if the dataset is empty or a file cannot be written.
pub fn run(
    dataset: &Dataset,
    config: &DashboardConfig,
    year: Option<u16>,
    indicator: Option<Indicator>,
    output: &Path,
) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let year = year
        .or_else(|| dataset.years().first().copied())
        .ok_or("dataset has no years to export")?;
    let indicator = indicator
        .or_else(|| dataset.indicators().first().copied())
        .ok_or("dataset has no indicators to export")?;

    std::fs::create_dir_all(output)?;
    let mut written = Vec::new();

    let charts = build_charts(&dataset.select(year, indicator), year, indicator);
    let path = output.join(format!("charts_{year}.json"));
    write_json(&path, &charts)?;
    written.push(path);

    let map = build_map_view(dataset, year, &config.pipeline.indicators, &config.map);
    let path = output.join(format!("map_{year}.json"));
    write_json(&path, &map)?;
    written.push(path);

    for layer in &map.layers {
        let path = output.join(format!("layer_{year}_{}.geojson", slug(layer.indicator)));
        write_json(&path, &layer.features)?;
        written.push(path);
    }

    println!(
        "Exported {} files for {indicator} ({year}) to {}",
        written.len(),
        output.display()
    );

    Ok(written)
}
