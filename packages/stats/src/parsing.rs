//! Field coercion for raw statistics rows.
//!
//! The rate column uses a French decimal comma (`"1,23"`). Parsing first
//! swaps the comma for a period, so already-normalized values parse to the
//! same number.

use crime_dash_geography_models::DepartmentCode;
use crime_dash_stats_models::{
    COLUMN_COUNT, COLUMN_DEPARTMENT, COLUMN_POPULATION, COLUMN_RATE, COLUMN_REGION, COLUMN_YEAR,
    RawStatisticsRow, StatisticsRecord,
};

use crate::StatsError;

/// Parses a decimal that may use a comma as the decimal separator.
///
/// Returns `None` for empty, non-numeric or non-finite input.
#[must_use]
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses an unsigned integer, tolerating surrounding whitespace.
#[must_use]
pub fn parse_unsigned(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok()
}

/// Coerces a raw CSV row into a [`StatisticsRecord`].
///
/// `line` is only used for error reporting.
///
/// # Errors
///
/// Returns [`StatsError::InvalidField`] for the first field that fails to
/// parse.
pub fn normalize_row(raw: &RawStatisticsRow, line: u64) -> Result<StatisticsRecord, StatsError> {
    let invalid = |column: &'static str, value: &str, message: &str| StatsError::InvalidField {
        line,
        column,
        value: value.to_string(),
        message: message.to_string(),
    };

    let region_code = parse_unsigned(&raw.region_code)
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| invalid(COLUMN_REGION, &raw.region_code, "expected a region number"))?;

    let department_code = DepartmentCode::normalize(&raw.department_code)
        .map_err(|e| invalid(COLUMN_DEPARTMENT, &raw.department_code, &e.to_string()))?;

    let year = parse_unsigned(&raw.year)
        .and_then(|v| u16::try_from(v).ok())
        .ok_or_else(|| invalid(COLUMN_YEAR, &raw.year, "expected a year"))?;

    let population = parse_unsigned(&raw.population)
        .ok_or_else(|| invalid(COLUMN_POPULATION, &raw.population, "expected an integer"))?;

    let count = parse_unsigned(&raw.count)
        .ok_or_else(|| invalid(COLUMN_COUNT, &raw.count, "expected an integer"))?;

    let rate_per_thousand = parse_decimal(&raw.rate_per_thousand)
        .ok_or_else(|| invalid(COLUMN_RATE, &raw.rate_per_thousand, "expected a decimal"))?;

    Ok(StatisticsRecord {
        region_code,
        department_code,
        indicator: raw.indicator.trim().to_string(),
        year,
        population,
        count,
        rate_per_thousand,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(rate: &str) -> RawStatisticsRow {
        RawStatisticsRow {
            region_code: "11".to_string(),
            department_code: "8".to_string(),
            indicator: " Homicides ".to_string(),
            year: "2020".to_string(),
            population: "270000".to_string(),
            count: "2".to_string(),
            rate_per_thousand: rate.to_string(),
        }
    }

    #[test]
    fn comma_and_period_rates_agree() {
        let comma = parse_decimal("1,23").unwrap();
        let period = parse_decimal("1.23").unwrap();
        assert!((comma - 1.23).abs() < f64::EPSILON);
        assert!((comma - period).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_non_numeric_rates() {
        assert!(parse_decimal("").is_none());
        assert!(parse_decimal("abc").is_none());
        assert!(parse_decimal("1,2,3").is_none());
        assert!(parse_decimal("NaN").is_none());
    }

    #[test]
    fn normalizes_row() {
        let record = normalize_row(&raw("0,5"), 2).unwrap();
        assert_eq!(record.region_code, 11);
        assert_eq!(record.department_code.as_str(), "08");
        assert_eq!(record.indicator, "Homicides");
        assert_eq!(record.year, 2020);
        assert_eq!(record.count, 2);
        assert!((record.rate_per_thousand - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn reports_invalid_rate_with_line() {
        let err = normalize_row(&raw("n/a"), 17).unwrap_err();
        assert!(err.is_parse_error());
        match err {
            StatsError::InvalidField {
                line,
                column,
                value,
                ..
            } => {
                assert_eq!(line, 17);
                assert_eq!(column, COLUMN_RATE);
                assert_eq!(value, "n/a");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn reports_invalid_count() {
        let mut row = raw("0,5");
        row.count = "deux".to_string();
        assert!(matches!(
            normalize_row(&row, 3),
            Err(StatsError::InvalidField {
                column: COLUMN_COUNT,
                ..
            })
        ));
    }
}
