#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Standalone dashboard server.
//!
//! Reads the configuration from the file named by `CRIME_DASH_CONFIG`
//! (embedded default otherwise), loads the dataset and serves it.

use std::path::PathBuf;
use std::sync::Arc;

use crime_dash_dataset::pipeline;
use crime_dash_dataset::progress::null_progress;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let config_path = std::env::var_os("CRIME_DASH_CONFIG").map(PathBuf::from);
    let mut config = crime_dash_config::load(config_path.as_deref())?;
    config.server = config.server.with_env_overrides();

    log::info!("Loading dataset...");
    let dataset = pipeline::load(&config.pipeline, &null_progress()).await?;

    crime_dash_server::run_server(config, Arc::new(dataset)).await?;

    Ok(())
}
