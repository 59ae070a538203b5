//! steelflow - sector-level steel and iron content of national trade flows
//!
//! Attributes customs trade records to economic sectors through an
//! allocation table, applies known data corrections, and aggregates traded
//! mass and embodied iron per direction, sector, stage and year.
//!
//! # Library Usage
//!
//! ```rust,no_run
//! use steelflow::engine::Pipeline;
//! use steelflow::loader::LoaderConfig;
//! use steelflow::models::{AllocationRule, SectorCategory, TradeRecord};
//! ```

pub use steelflow_core as engine;
pub use steelflow_loader as loader;
pub use steelflow_models as models;

use std::path::{Path, PathBuf};

use steelflow_core::Pipeline;
use steelflow_loader::acquire::load_trade;
use steelflow_loader::tables::{read_allocation_table, read_sector_categories};
use steelflow_loader::writer::CsvWriter;
use steelflow_loader::LoaderConfig;

/// What one run read and wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub records: usize,
    pub corrected_rows: usize,
    pub unmatched_records: usize,
    pub flows: usize,
    pub groups: usize,
    pub tables: Vec<PathBuf>,
    pub checking_table: Option<PathBuf>,
}

/// Load inputs, run the pipeline, and write the configured outputs.
pub async fn run(config: &LoaderConfig) -> Result<RunSummary, anyhow::Error> {
    let records = load_trade(config).await?;
    let rules = read_allocation_table(Path::new(&config.inputs.allocation))?;
    let categories = read_sector_categories(Path::new(&config.inputs.steel_contents))?;
    let record_count = records.len();

    let output = Pipeline::new(config.pipeline.clone()).run(records, rules, categories)?;

    let writer = CsvWriter::new(config.output.clone());
    let checking_table = writer.write_checking(&output.checking)?;
    let tables = writer.write_tables(&output.tables)?;

    Ok(RunSummary {
        records: record_count,
        corrected_rows: output.corrected_rows,
        unmatched_records: output.join.records_unmatched,
        flows: output.checking.len(),
        groups: output.aggregated.len(),
        tables,
        checking_table,
    })
}
