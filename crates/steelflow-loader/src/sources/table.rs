use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use steelflow_models::{Direction, TradeRecord};

use crate::error::LoaderError;
use crate::sources::TradeSource;

/// One row of the delimited trade table.
#[derive(Debug, Deserialize)]
struct TradeRow {
    reporter: String,
    partner: String,
    commodity_code: String,
    direction: String,
    year: i32,
    net_weight_kg: Option<f64>,
}

/// Read the whole delimited trade table.
pub fn read_trade_table(path: &Path) -> Result<Vec<TradeRecord>, LoaderError> {
    let table_err = |source| LoaderError::Table {
        path: path.display().to_string(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(table_err)?;

    let mut records = Vec::new();
    for (idx, result) in reader.deserialize::<TradeRow>().enumerate() {
        let row = result.map_err(table_err)?;
        let direction: Direction = row.direction.parse().map_err(|e| {
            // +2: header line, then 1-based
            LoaderError::Parse(format!("{} line {}: {e}", path.display(), idx + 2))
        })?;
        records.push(TradeRecord {
            reporter: row.reporter,
            partner: row.partner,
            commodity_code: row.commodity_code,
            direction,
            year: row.year,
            net_weight_kg: row.net_weight_kg.unwrap_or(0.0),
        });
    }
    Ok(records)
}

/// Serves years out of a single delimited trade table, read once on open.
pub struct CsvTradeSource {
    path: PathBuf,
    records: Vec<TradeRecord>,
}

impl CsvTradeSource {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LoaderError> {
        let path = path.into();
        let records = read_trade_table(&path)?;
        tracing::debug!(path = %path.display(), rows = records.len(), "Read trade table");
        Ok(Self { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every record in the table, regardless of year.
    pub fn into_records(self) -> Vec<TradeRecord> {
        self.records
    }
}

#[async_trait]
impl TradeSource for CsvTradeSource {
    fn name(&self) -> &str {
        "trade-table"
    }

    async fn fetch_year(&self, year: i32) -> Result<Vec<TradeRecord>, LoaderError> {
        Ok(self
            .records
            .iter()
            .filter(|r| r.year == year)
            .cloned()
            .collect())
    }
}
