//! Region and indicator filtering.

use std::str::FromStr as _;

use crime_dash_crime_models::Indicator;
use crime_dash_stats_models::StatisticsRecord;

/// Which rows to keep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsFilter {
    /// INSEE region code to keep.
    pub region_code: u32,
    /// Indicators to keep.
    pub indicators: Vec<Indicator>,
}

/// Rows that passed the filter, each paired with its typed indicator.
#[derive(Debug, Default)]
pub struct FilterOutcome {
    /// Kept rows.
    pub kept: Vec<(Indicator, StatisticsRecord)>,
    /// Rows dropped because they belong to another region.
    pub other_region: usize,
    /// Rows dropped because their indicator is not tracked.
    pub untracked_indicator: usize,
}

impl StatsFilter {
    /// Splits `records` into kept rows and drop counts.
    ///
    /// Dropped rows are counted, not reported as errors.
    #[must_use]
    pub fn apply(&self, records: Vec<StatisticsRecord>) -> FilterOutcome {
        let mut outcome = FilterOutcome::default();

        for record in records {
            if record.region_code != self.region_code {
                outcome.other_region += 1;
                continue;
            }

            match Indicator::from_str(&record.indicator) {
                Ok(indicator) if self.indicators.contains(&indicator) => {
                    outcome.kept.push((indicator, record));
                }
                _ => outcome.untracked_indicator += 1,
            }
        }

        log::info!(
            "Kept {} statistics rows for region {} ({} from other regions, {} untracked indicators dropped)",
            outcome.kept.len(),
            self.region_code,
            outcome.other_region,
            outcome.untracked_indicator,
        );

        outcome
    }
}
