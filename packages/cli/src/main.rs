#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line entry point for the crime dashboard.
//!
//! `crime_dash serve` loads the dataset and starts the web dashboard;
//! `explore` browses selections in the terminal; `export` writes the chart
//! and map views of a selection to JSON files; `summary` prints what the
//! dataset contains. Without a subcommand an interactive menu is shown.
//!
//! Uses `indicatif-log-bridge` (via [`crime_dash_cli_utils::init_logger`])
//! to route `log` output through `indicatif::MultiProgress` so that log
//! lines and progress bars never fight for the terminal.

mod explore;
mod export;
mod summary;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use crime_dash_cli_utils::{IndicatifProgress, MultiProgress};
use crime_dash_config::DashboardConfig;
use crime_dash_crime_models::Indicator;
use crime_dash_dataset::{Dataset, pipeline};
use dialoguer::Select;

#[derive(Parser)]
#[command(
    name = "crime_dash",
    about = "Île-de-France crime indicator dashboard"
)]
struct Cli {
    /// Configuration file (TOML). Uses the built-in defaults when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the dataset and serve the web dashboard
    Serve {
        /// Address to bind (overrides `BIND_ADDR` and the config file)
        #[arg(long)]
        bind_addr: Option<String>,

        /// Port to listen on (overrides `PORT` and the config file)
        #[arg(long)]
        port: Option<u16>,

        /// Directory of the static frontend
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
    /// Browse selections interactively in the terminal
    Explore,
    /// Write the chart and map views of a selection to JSON files
    Export {
        /// Year to export (earliest year when omitted)
        #[arg(long)]
        year: Option<u16>,

        /// Indicator to export (first indicator when omitted)
        #[arg(long)]
        indicator: Option<Indicator>,

        /// Output directory
        #[arg(long, default_value = "export")]
        output: PathBuf,
    },
    /// Print the years, indicators and row counts of the dataset
    Summary,
}

/// Top-level tool selection for the interactive menu.
enum Tool {
    Serve,
    Explore,
    Export,
    Summary,
}

impl Tool {
    const ALL: &[Self] = &[Self::Serve, Self::Explore, Self::Export, Self::Summary];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Serve => "Start dashboard server",
            Self::Explore => "Explore selections",
            Self::Export => "Export views",
            Self::Summary => "Dataset summary",
        }
    }
}

async fn load_dataset(
    config: &DashboardConfig,
    multi: &MultiProgress,
) -> Result<Arc<Dataset>, Box<dyn std::error::Error>> {
    let progress = IndicatifProgress::steps_bar(multi, "Loading dataset");
    match pipeline::load(&config.pipeline, &progress).await {
        Ok(dataset) => Ok(Arc::new(dataset)),
        Err(e) => {
            progress.finish(format!("Load failed ({:?})", e.kind()));
            Err(e.into())
        }
    }
}

async fn serve(
    config: DashboardConfig,
    dataset: Arc<Dataset>,
    interactive: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // The server uses actix-web's runtime, so it runs in a blocking task
    // to avoid nesting tokio runtimes.
    tokio::task::spawn_blocking(move || {
        actix_web::rt::System::new().block_on(async move {
            if interactive {
                crime_dash_server::interactive::run(config, dataset).await
            } else {
                crime_dash_server::run_server(config, dataset).await
            }
        })
    })
    .await??;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = crime_dash_cli_utils::init_logger();
    let cli = Cli::parse();

    let mut config = crime_dash_config::load(cli.config.as_deref())?;
    config.server = config.server.with_env_overrides();

    let Some(command) = cli.command else {
        return run_menu(config, &multi).await;
    };

    match command {
        Commands::Serve {
            bind_addr,
            port,
            static_dir,
        } => {
            if let Some(bind_addr) = bind_addr {
                config.server.bind_addr = bind_addr;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(static_dir) = static_dir {
                config.server.static_dir = static_dir;
            }
            let dataset = load_dataset(&config, &multi).await?;
            serve(config, dataset, false).await?;
        }
        Commands::Explore => {
            let dataset = load_dataset(&config, &multi).await?;
            explore::run(&dataset)?;
        }
        Commands::Export {
            year,
            indicator,
            output,
        } => {
            let dataset = load_dataset(&config, &multi).await?;
            export::run(&dataset, &config, year, indicator, &output)?;
        }
        Commands::Summary => {
            let dataset = load_dataset(&config, &multi).await?;
            summary::print(&dataset, config.pipeline.region_code);
        }
    }

    Ok(())
}

async fn run_menu(
    config: DashboardConfig,
    multi: &MultiProgress,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Crime Dashboard");
    println!();

    let labels: Vec<&str> = Tool::ALL.iter().map(Tool::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    let dataset = load_dataset(&config, multi).await?;

    match Tool::ALL[idx] {
        Tool::Serve => serve(config, dataset, true).await?,
        Tool::Explore => explore::run(&dataset)?,
        Tool::Export => {
            let output = PathBuf::from("export");
            export::run(&dataset, &config, None, None, &output)?;
        }
        Tool::Summary => summary::print(&dataset, config.pipeline.region_code),
    }

    Ok(())
}
