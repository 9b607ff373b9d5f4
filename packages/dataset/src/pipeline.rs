//! Startup load: boundaries + statistics → [`Dataset`].
//!
//! Steps, in order: load boundaries, load statistics (codes and rates are
//! normalized while parsing), filter to the configured region and
//! indicators, aggregate, join. Any load or parse failure aborts the whole
//! load; there is no partial dataset.

use std::sync::Arc;

use crime_dash_geography::fetch::load_boundaries;
use crime_dash_geography_models::DepartmentBoundary;
use crime_dash_stats::aggregate::aggregate;
use crime_dash_stats::filter::StatsFilter;
use crime_dash_stats::load::load_statistics;
use crime_dash_stats_models::StatisticsRecord;

use crate::join::inner_join;
use crate::progress::ProgressCallback;
use crate::{Dataset, PipelineConfig, PipelineError};

/// Number of progress steps reported by [`load`].
pub const LOAD_STEPS: u64 = 3;

/// Filters, aggregates and joins already-loaded sources.
#[must_use]
pub fn prepare(
    boundaries: Vec<DepartmentBoundary>,
    statistics: Vec<StatisticsRecord>,
    filter: &StatsFilter,
) -> Dataset {
    let filtered = filter.apply(statistics);
    let aggregated = aggregate(filtered.kept);

    let boundaries: Vec<Arc<DepartmentBoundary>> = boundaries.into_iter().map(Arc::new).collect();
    let joined = inner_join(aggregated, &boundaries);

    log::info!(
        "Prepared {} rows across {} departments",
        joined.rows.len(),
        boundaries.len() - joined.unmatched_boundaries.len()
    );

    Dataset::new(joined.rows, boundaries)
}

/// Loads both sources described by `config` and prepares the dataset.
///
/// # Errors
///
/// Returns [`PipelineError`] if either source cannot be loaded or a
/// statistics field fails to parse.
pub async fn load(
    config: &PipelineConfig,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<Dataset, PipelineError> {
    progress.set_total(LOAD_STEPS);

    progress.set_message("Loading boundaries".to_string());
    let boundaries = load_boundaries(&config.boundaries, &config.boundary_fields)
        .await
        .map_err(|error| PipelineError::Boundaries {
            location: config.boundaries.to_string(),
            error,
        })?;
    progress.inc(1);

    progress.set_message("Loading statistics".to_string());
    let path = config.statistics.clone();
    let delimiter = config.delimiter_byte();
    let statistics = tokio::task::spawn_blocking(move || load_statistics(&path, delimiter))
        .await?
        .map_err(|error| PipelineError::Statistics {
            path: config.statistics.clone(),
            error,
        })?;
    progress.inc(1);

    progress.set_message("Joining".to_string());
    let dataset = prepare(boundaries, statistics, &config.filter());
    progress.inc(1);

    progress.finish(format!("Loaded {} rows", dataset.len()));

    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crime_dash_crime_models::Indicator;
    use crime_dash_geography::BoundarySource;
    use crime_dash_geography_models::DepartmentCode;

    use super::*;
    use crate::ErrorKind;
    use crate::progress::null_progress;

    const BOUNDARIES: &str = r#"{"type":"FeatureCollection","features":[
        {"type":"Feature","properties":{"code":"08","nom":"Ardennes"},
         "geometry":{"type":"Polygon","coordinates":[[[4.0,49.5],[5.0,49.5],[5.0,50.0],[4.0,49.5]]]}},
        {"type":"Feature","properties":{"code":"75","nom":"Paris"},
         "geometry":{"type":"Polygon","coordinates":[[[2.2,48.8],[2.4,48.8],[2.4,48.9],[2.2,48.8]]]}}
    ]}"#;

    const STATISTICS: &str = "Code_region;Code_departement;indicateur;annee;insee_pop;nombre;taux_pour_mille\n\
        11;08;Homicides;2020;270000;2;0,5\n\
        11;75;Homicides;2020;2100000;10;1,2\n";

    struct TempFiles(Vec<PathBuf>);

    impl TempFiles {
        fn write(&mut self, name: &str, contents: &str) -> PathBuf {
            let path = std::env::temp_dir().join(format!(
                "crime_dash_pipeline_{}_{name}",
                std::process::id()
            ));
            std::fs::write(&path, contents).unwrap();
            self.0.push(path.clone());
            path
        }
    }

    impl Drop for TempFiles {
        fn drop(&mut self) {
            for path in &self.0 {
                std::fs::remove_file(path).ok();
            }
        }
    }

    fn config(files: &mut TempFiles, tag: &str, statistics: &str) -> PipelineConfig {
        PipelineConfig {
            boundaries: BoundarySource::Path(
                files.write(&format!("{tag}.geojson"), BOUNDARIES),
            ),
            statistics: files.write(&format!("{tag}.csv"), statistics),
            ..PipelineConfig::default()
        }
    }

    #[tokio::test]
    async fn end_to_end_two_departments() {
        let mut files = TempFiles(Vec::new());
        let config = config(&mut files, "e2e", STATISTICS);

        let dataset = load(&config, &null_progress()).await.unwrap();

        assert_eq!(dataset.len(), 2);
        let rows = dataset.rows();
        assert!(rows.iter().all(|r| r.indicator == Indicator::Homicides));
        assert!(rows.iter().all(|r| r.year == 2020));
        assert_eq!(rows[0].department_code(), &DepartmentCode::from_number(8));
        assert!((rows[0].rate_per_thousand - 0.5).abs() < f64::EPSILON);
        assert_eq!(rows[1].department_code(), &DepartmentCode::from_number(75));
        assert!((rows[1].rate_per_thousand - 1.2).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn bad_rate_is_a_parse_error() {
        let mut files = TempFiles(Vec::new());
        let stats = "Code_region;Code_departement;indicateur;annee;insee_pop;nombre;taux_pour_mille\n\
            11;75;Homicides;2020;2100000;10;douze\n";
        let config = config(&mut files, "bad_rate", stats);

        let err = load(&config, &null_progress()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[tokio::test]
    async fn missing_statistics_file_is_a_load_error() {
        let mut files = TempFiles(Vec::new());
        let mut config = config(&mut files, "missing", STATISTICS);
        config.statistics = PathBuf::from("/nonexistent/délinquance.csv");

        let err = load(&config, &null_progress()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Load);
        assert!(matches!(err, PipelineError::Statistics { .. }));
    }

    #[tokio::test]
    async fn missing_boundaries_is_a_load_error() {
        let mut files = TempFiles(Vec::new());
        let mut config = config(&mut files, "no_geo", STATISTICS);
        config.boundaries = BoundarySource::Path(PathBuf::from("/nonexistent/departements.geojson"));

        let err = load(&config, &null_progress()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Load);
        assert!(matches!(err, PipelineError::Boundaries { .. }));
    }

    #[test]
    fn prepare_drops_other_regions_and_untracked_indicators() {
        let boundaries = crime_dash_geography::parse::parse_boundaries(
            BOUNDARIES,
            &crime_dash_geography::BoundaryFields::default(),
        )
        .unwrap();
        let stats = crime_dash_stats::load::read_statistics(
            "Code_region;Code_departement;indicateur;annee;insee_pop;nombre;taux_pour_mille\n\
             11;75;Homicides;2020;2100000;3;0,1\n\
             11;75;Homicides;2020;2100000;5;0,3\n\
             11;75;Cambriolages de logement;2020;2100000;900;4,2\n\
             44;08;Homicides;2020;270000;1;0,2\n"
                .as_bytes(),
            b';',
        )
        .unwrap();

        let dataset = prepare(boundaries, stats, &PipelineConfig::default().filter());

        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.rows()[0].count, 8);
        assert!((dataset.rows()[0].rate_per_thousand - 0.2).abs() < 1e-12);
        assert_eq!(dataset.boundaries().len(), 2);
    }
}
