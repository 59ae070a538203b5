use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use steelflow_loader::config::{AcquisitionConfig, InputsConfig, LoaderConfig};
use steelflow_loader::sources::comtrade::{build_query_url, read_response_file};
use steelflow_models::{IdentityConfig, OutputShape};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "steelflow",
    about = "Sector-level steel and iron content of national trade flows"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Correct, allocate and aggregate trade data, then write the output tables
    Aggregate {
        /// CSV file mapping SITC codes to sectors, stages and multipliers
        #[arg(long)]
        allocation: Option<String>,

        /// CSV file with the iron content of each sector
        #[arg(long)]
        steel_contents: Option<String>,

        /// Write separate import and export tables
        #[arg(long)]
        split_by_direction: bool,

        /// Skip the pre-aggregation checking table
        #[arg(long)]
        no_checking_table: bool,

        /// Saved Comtrade response documents (override configured inputs)
        files: Vec<String>,
    },

    /// Check a saved Comtrade response for one year
    Verify {
        #[arg(long)]
        year: i32,

        file: PathBuf,
    },

    /// Print the Comtrade query URL for one year
    Url {
        #[arg(long)]
        year: i32,
    },
}

fn load_config(path: &str) -> Result<LoaderConfig> {
    let config_str = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {path}"))?;
    LoaderConfig::from_toml(&config_str).with_context(|| "Failed to parse config")
}

/// Identity and acquisition settings, from the config file when given.
fn acquisition_settings(config: Option<&str>) -> Result<(IdentityConfig, AcquisitionConfig)> {
    match config {
        Some(path) => {
            let config = load_config(path)?;
            Ok((config.pipeline.identity, config.acquisition))
        }
        None => Ok((IdentityConfig::default(), AcquisitionConfig::default())),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Aggregate {
            allocation,
            steel_contents,
            split_by_direction,
            no_checking_table,
            files,
        } => {
            let mut config = match &cli.config {
                Some(path) => load_config(path)?,
                None => {
                    let (Some(allocation), Some(steel_contents)) = (&allocation, &steel_contents)
                    else {
                        bail!("--allocation and --steel-contents are required without --config");
                    };
                    LoaderConfig {
                        pipeline: Default::default(),
                        inputs: InputsConfig {
                            allocation: allocation.clone(),
                            steel_contents: steel_contents.clone(),
                            comtrade_files: vec![],
                            trade_table: None,
                            comtrade_pattern: None,
                            years: vec![],
                        },
                        acquisition: Default::default(),
                        output: Default::default(),
                    }
                }
            };
            if let Some(allocation) = allocation {
                config.inputs.allocation = allocation;
            }
            if let Some(steel_contents) = steel_contents {
                config.inputs.steel_contents = steel_contents;
            }
            if !files.is_empty() {
                config.inputs.comtrade_files = files;
            }
            if split_by_direction {
                config.pipeline.output_shape = OutputShape::SplitByDirection;
            }
            if no_checking_table {
                config.output.checking_table = None;
            }

            let summary = steelflow::run(&config).await.context("Aggregation failed")?;
            tracing::info!(
                records = summary.records,
                corrected = summary.corrected_rows,
                unmatched = summary.unmatched_records,
                flows = summary.flows,
                groups = summary.groups,
                "Aggregation complete"
            );
            for path in &summary.tables {
                println!("{}", path.display());
            }
        }
        Command::Verify { year, file } => {
            let (identity, acquisition) = acquisition_settings(cli.config.as_deref())?;
            let records = read_response_file(&file, Some(year), &identity, &acquisition)
                .with_context(|| format!("Check failed for {}", file.display()))?;
            println!("{}: {} records for {year}", file.display(), records.len());
        }
        Command::Url { year } => {
            let (_, acquisition) = acquisition_settings(cli.config.as_deref())?;
            println!("{}", build_query_url(year, &acquisition));
        }
    }

    Ok(())
}
