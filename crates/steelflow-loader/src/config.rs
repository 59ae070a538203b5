use serde::{Deserialize, Serialize};
use steelflow_models::output_schema::default_paths;
use steelflow_models::PipelineConfig;

use crate::error::LoaderError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoaderConfig {
    #[serde(default)]
    pub pipeline: PipelineConfig,
    pub inputs: InputsConfig,
    #[serde(default)]
    pub acquisition: AcquisitionConfig,
    #[serde(default)]
    pub output: OutputPathsConfig,
}

impl LoaderConfig {
    pub fn from_toml(toml_str: &str) -> Result<Self, LoaderError> {
        toml::from_str(toml_str).map_err(|e| LoaderError::Config(e.to_string()))
    }
}

/// Where the trade data and lookup tables come from.
///
/// Trade data is taken from the first configured of: explicit Comtrade
/// files, a delimited trade table, or a per-year Comtrade file pattern.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputsConfig {
    /// Allocation table: commodity code to sector/stage/multiplier.
    pub allocation: String,
    /// Sector category table with iron contents.
    pub steel_contents: String,
    /// Saved Comtrade response documents, one per year.
    #[serde(default)]
    pub comtrade_files: Vec<String>,
    /// Delimited trade table with one row per record.
    #[serde(default)]
    pub trade_table: Option<String>,
    /// Path pattern for per-year Comtrade documents; `{year}` is substituted.
    #[serde(default)]
    pub comtrade_pattern: Option<String>,
    /// Years to load. Empty means every year present (table input only).
    #[serde(default)]
    pub years: Vec<i32>,
}

/// Comtrade query parameters and response limits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AcquisitionConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Numeric reporter code in the query (826 = United Kingdom).
    #[serde(default = "default_reporter_code")]
    pub reporter_code: u32,
    /// Numeric partner code in the query (0 = World).
    #[serde(default)]
    pub partner_code: u32,
    /// Classification (`S2` = SITC rev. 2).
    #[serde(default = "default_classification")]
    pub classification: String,
    /// A response reporting this many results or more was cut off.
    #[serde(default = "default_max_results")]
    pub max_results: u64,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            reporter_code: default_reporter_code(),
            partner_code: 0,
            classification: default_classification(),
            max_results: default_max_results(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputPathsConfig {
    #[serde(default = "default_combined")]
    pub combined: String,
    #[serde(default = "default_imports")]
    pub imports: String,
    #[serde(default = "default_exports")]
    pub exports: String,
    /// Pre-aggregation audit table. An empty path disables it.
    #[serde(default = "default_checking_table")]
    pub checking_table: Option<String>,
}

impl OutputPathsConfig {
    /// Where to write the checking table, if anywhere.
    pub fn checking_table_path(&self) -> Option<&str> {
        self.checking_table.as_deref().filter(|p| !p.trim().is_empty())
    }
}

impl Default for OutputPathsConfig {
    fn default() -> Self {
        Self {
            combined: default_combined(),
            imports: default_imports(),
            exports: default_exports(),
            checking_table: default_checking_table(),
        }
    }
}

fn default_base_url() -> String {
    "https://comtrade.un.org/api/get".to_string()
}
fn default_reporter_code() -> u32 {
    826
}
fn default_classification() -> String {
    "S2".to_string()
}
fn default_max_results() -> u64 {
    50_000
}
fn default_combined() -> String {
    default_paths::COMBINED_TABLE.to_string()
}
fn default_imports() -> String {
    default_paths::IMPORTS_TABLE.to_string()
}
fn default_exports() -> String {
    default_paths::EXPORTS_TABLE.to_string()
}
fn default_checking_table() -> Option<String> {
    Some(default_paths::CHECKING_TABLE.to_string())
}
