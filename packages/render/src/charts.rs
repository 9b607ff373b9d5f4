//! Line and bar chart view models.

use std::collections::BTreeMap;

use crime_dash_crime_models::Indicator;
use crime_dash_dataset::{JoinedRecord, Selection};
use crime_dash_geography_models::DepartmentCode;
use serde::{Deserialize, Serialize};

use crate::charts_header;

/// Axis label of the rate series.
pub const RATE_LABEL: &str = "Taux pour 1 000 hab.";
/// Axis label of the count bars.
pub const COUNT_LABEL: &str = "Nombre de cas";
/// Axis label of the year axis.
pub const YEAR_LABEL: &str = "Année";
/// Rotation of bar chart category labels, in degrees.
pub const BAR_TICK_ANGLE: i16 = -45;

/// One (year, rate) point of a department series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinePoint {
    pub year: u16,
    pub rate_per_thousand: f64,
}

/// The time series of one department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSeries {
    /// Series label and color key.
    pub department_code: DepartmentCode,
    pub department_name: String,
    /// Points ordered by year.
    pub points: Vec<LinePoint>,
}

/// Rate per 1,000 inhabitants over time, one series per department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineChartView {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub markers: bool,
    pub series: Vec<LineSeries>,
}

/// One department bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bar {
    /// Department name, shown on the category axis.
    pub label: String,
    /// Department code, used as the color key.
    pub color_key: DepartmentCode,
    /// Summed case count.
    pub value: u64,
}

/// Case counts by department for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarChartView {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub tick_angle: i16,
    pub bars: Vec<Bar>,
}

/// Everything the charts tab shows for a (year, indicator) choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartsView {
    pub header: String,
    pub year: u16,
    pub indicator: Indicator,
    pub line: LineChartView,
    pub bar: BarChartView,
}

/// Builds the time-series view from the indicator-only rows.
///
/// Series are ordered by department code and points by year.
#[must_use]
pub fn build_line_chart(indicator: Indicator, rows: &[&JoinedRecord]) -> LineChartView {
    let mut by_department: BTreeMap<&DepartmentCode, LineSeries> = BTreeMap::new();

    for row in rows {
        by_department
            .entry(row.department_code())
            .or_insert_with(|| LineSeries {
                department_code: row.department_code().clone(),
                department_name: row.department_name().to_string(),
                points: Vec::new(),
            })
            .points
            .push(LinePoint {
                year: row.year,
                rate_per_thousand: row.rate_per_thousand,
            });
    }

    let series = by_department
        .into_values()
        .map(|mut series| {
            series.points.sort_by_key(|point| point.year);
            series
        })
        .collect();

    LineChartView {
        title: format!("Taux pour 1 000 habitants - {indicator}"),
        x_label: YEAR_LABEL.to_string(),
        y_label: RATE_LABEL.to_string(),
        markers: true,
        series,
    }
}

/// Builds the bar view from the exact-match rows.
///
/// Bars are ordered by department code.
#[must_use]
pub fn build_bar_chart(year: u16, indicator: Indicator, rows: &[&JoinedRecord]) -> BarChartView {
    let mut bars: Vec<Bar> = rows
        .iter()
        .map(|row| Bar {
            label: row.department_name().to_string(),
            color_key: row.department_code().clone(),
            value: row.count,
        })
        .collect();
    bars.sort_by(|a, b| a.color_key.cmp(&b.color_key));

    BarChartView {
        title: format!("Nombre de {indicator} par département en {year}"),
        x_label: String::new(),
        y_label: COUNT_LABEL.to_string(),
        tick_angle: BAR_TICK_ANGLE,
        bars,
    }
}

/// Builds both charts and the tab header for a selection.
#[must_use]
pub fn build_charts(selection: &Selection<'_>, year: u16, indicator: Indicator) -> ChartsView {
    ChartsView {
        header: charts_header(year, indicator),
        year,
        indicator,
        line: build_line_chart(indicator, &selection.by_indicator),
        bar: build_bar_chart(year, indicator, &selection.exact),
    }
}
