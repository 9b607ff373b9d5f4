//! Statistics file reader.
//!
//! The header row is validated once before any data row is read, so a file
//! from a different dataset fails fast with the list of missing columns
//! instead of failing on its first row.

use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use crime_dash_stats_models::{REQUIRED_COLUMNS, RawStatisticsRow, StatisticsRecord};

use crate::StatsError;
use crate::parsing::normalize_row;

/// Default field delimiter of the statistics file.
pub const DEFAULT_DELIMITER: u8 = b';';

/// Opens and parses the statistics file at `path`.
///
/// # Errors
///
/// Returns [`StatsError`] if the file is missing, required columns are
/// absent, or any field fails type coercion.
pub fn load_statistics(path: &Path, delimiter: u8) -> Result<Vec<StatisticsRecord>, StatsError> {
    log::info!("Reading statistics from {}", path.display());
    let file = std::fs::File::open(path)?;
    let records = read_statistics(file, delimiter)?;
    log::info!(
        "Parsed {} statistics rows from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

/// Parses statistics rows from any reader.
///
/// # Errors
///
/// Returns [`StatsError`] if the input is not delimited text, required
/// columns are absent, or any field fails type coercion.
pub fn read_statistics<R: Read>(
    reader: R,
    delimiter: u8,
) -> Result<Vec<StatisticsRecord>, StatsError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_reader(reader);

    let headers = clean_headers(reader.headers()?);
    check_columns(&headers)?;

    let mut records = Vec::new();

    for result in reader.records() {
        let row = result?;
        let line = row.position().map_or(0, csv::Position::line);
        let raw: RawStatisticsRow = row.deserialize(Some(&headers))?;
        records.push(normalize_row(&raw, line)?);
    }

    Ok(records)
}

/// Trims whitespace and a leading byte-order mark from every header.
fn clean_headers(headers: &csv::StringRecord) -> csv::StringRecord {
    headers
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim())
        .collect()
}

/// Fails if any required column is absent. Extra columns are ignored.
fn check_columns(headers: &csv::StringRecord) -> Result<(), StatsError> {
    let present: BTreeSet<&str> = headers.iter().collect();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !present.contains(*column))
        .map(ToString::to_string)
        .collect();

    if !missing.is_empty() {
        return Err(StatsError::MissingColumns { missing });
    }

    let extra: Vec<&str> = present
        .iter()
        .copied()
        .filter(|column| !REQUIRED_COLUMNS.contains(column))
        .collect();
    if !extra.is_empty() {
        log::debug!("Ignoring statistics columns: {}", extra.join(", "));
    }

    Ok(())
}
