use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use steelflow_models::{AllocationRule, SectorCategory};

use crate::error::LoaderError;

/// One row of the allocation table. Extra columns are ignored.
#[derive(Debug, Deserialize)]
struct AllocationRow {
    #[serde(rename = "SITC_code", alias = "commodity_code")]
    commodity_code: String,
    #[serde(default)]
    sector_code: Option<String>,
    #[serde(default)]
    stage: Option<String>,
    #[serde(default)]
    multiplier: Option<f64>,
}

impl From<AllocationRow> for AllocationRule {
    fn from(row: AllocationRow) -> Self {
        AllocationRule {
            commodity_code: row.commodity_code,
            sector_code: row.sector_code.filter(|s| !s.is_empty()),
            stage: row.stage.filter(|s| !s.is_empty()),
            // Blank multipliers mark unallocated codes.
            multiplier: row.multiplier.unwrap_or(0.0),
        }
    }
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, LoaderError> {
    let table_err = |source| LoaderError::Table {
        path: path.display().to_string(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(table_err)?;
    reader
        .deserialize()
        .collect::<Result<Vec<T>, csv::Error>>()
        .map_err(table_err)
}

/// Load allocation rules in file order.
pub fn read_allocation_table(path: &Path) -> Result<Vec<AllocationRule>, LoaderError> {
    let rules: Vec<AllocationRule> = read_rows::<AllocationRow>(path)?
        .into_iter()
        .map(AllocationRule::from)
        .collect();
    tracing::info!(path = %path.display(), rules = rules.len(), "Loaded allocation table");
    Ok(rules)
}

/// Load sector categories (`sector_code, sector_group, sector_name, iron_content`).
pub fn read_sector_categories(path: &Path) -> Result<Vec<SectorCategory>, LoaderError> {
    let categories: Vec<SectorCategory> = read_rows(path)?;
    tracing::info!(
        path = %path.display(),
        categories = categories.len(),
        "Loaded sector categories"
    );
    Ok(categories)
}
