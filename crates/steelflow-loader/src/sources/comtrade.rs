use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use steelflow_models::{Direction, IdentityConfig, TradeRecord};

use crate::config::AcquisitionConfig;
use crate::error::LoaderError;
use crate::sources::TradeSource;

/// A Comtrade API response document.
#[derive(Debug, Clone, Deserialize)]
pub struct ComtradeResponse {
    pub validation: Validation,
    #[serde(default)]
    pub dataset: Vec<ComtradeRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Validation {
    pub status: ValidationStatus,
    pub count: ValidationCount,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValidationStatus {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValidationCount {
    pub value: u64,
}

/// One row of the `dataset` array. Unlisted fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ComtradeRecord {
    #[serde(rename = "rt3ISO")]
    pub reporter: String,
    #[serde(rename = "pt3ISO")]
    pub partner: String,
    pub yr: i32,
    pub period: i32,
    #[serde(rename = "cmdCode")]
    pub cmd_code: String,
    #[serde(rename = "rgDesc")]
    pub rg_desc: String,
    #[serde(rename = "NetWeight")]
    pub net_weight: Option<f64>,
}

/// Query URL for one year of annual data, all flows and commodities.
pub fn build_query_url(year: i32, config: &AcquisitionConfig) -> String {
    format!(
        "{}?max={}&freq=A&px={}&ps={}&r={}&p={}&rg=all&cc=all&fmt=json",
        config.base_url,
        config.max_results,
        config.classification,
        year,
        config.reporter_code,
        config.partner_code,
    )
}

/// Check the response envelope: status, truncation, and that every record
/// echoes the requested reporter, partner and year.
pub fn check_response(
    response: &ComtradeResponse,
    year: i32,
    identity: &IdentityConfig,
    config: &AcquisitionConfig,
) -> Result<(), LoaderError> {
    let status = &response.validation.status.name;
    if status != "Ok" {
        return Err(LoaderError::QueryFailed {
            year,
            status: status.clone(),
        });
    }

    let count = response.validation.count.value;
    if count >= config.max_results {
        return Err(LoaderError::ResultTruncated {
            year,
            count,
            max_results: config.max_results,
        });
    }

    for record in &response.dataset {
        if record.reporter != identity.reporter {
            return Err(mismatch(year, "reporter", &identity.reporter, &record.reporter));
        }
        if record.partner != identity.partner {
            return Err(mismatch(year, "partner", &identity.partner, &record.partner));
        }
        if record.yr != year {
            return Err(mismatch(year, "year", &year.to_string(), &record.yr.to_string()));
        }
    }
    Ok(())
}

fn mismatch(year: i32, field: &'static str, expected: &str, actual: &str) -> LoaderError {
    LoaderError::SchemaMismatch {
        year,
        field,
        expected: expected.to_string(),
        actual: actual.to_string(),
    }
}

/// Convert dataset rows to trade records.
///
/// Re-import and re-export rows fall outside the accounting and are skipped.
/// A null net weight counts as zero.
pub fn to_trade_records(dataset: Vec<ComtradeRecord>) -> Result<Vec<TradeRecord>, LoaderError> {
    let mut records = Vec::with_capacity(dataset.len());
    let mut skipped_reflows = 0usize;
    let mut missing_weight = 0usize;

    for row in dataset {
        let direction = match row.rg_desc.as_str() {
            "Re-Import" | "Re-Export" => {
                skipped_reflows += 1;
                continue;
            }
            other => other
                .parse::<Direction>()
                .map_err(|e| LoaderError::Parse(format!("{} {}: {e}", row.cmd_code, row.period)))?,
        };
        let net_weight_kg = row.net_weight.unwrap_or_else(|| {
            missing_weight += 1;
            0.0
        });
        records.push(TradeRecord {
            reporter: row.reporter,
            partner: row.partner,
            commodity_code: row.cmd_code,
            direction,
            year: row.period,
            net_weight_kg,
        });
    }

    if skipped_reflows > 0 {
        tracing::info!(count = skipped_reflows, "Skipped re-import/re-export rows");
    }
    if missing_weight > 0 {
        tracing::warn!(count = missing_weight, "Rows without net weight read as zero");
    }
    Ok(records)
}

pub fn parse_response(json: &str) -> Result<ComtradeResponse, LoaderError> {
    Ok(serde_json::from_str(json)?)
}

/// Read one saved response, check it, and return its records.
///
/// Without an expected year, the year of the first record is used and every
/// other record must agree with it.
pub fn read_response_file(
    path: &Path,
    year: Option<i32>,
    identity: &IdentityConfig,
    config: &AcquisitionConfig,
) -> Result<Vec<TradeRecord>, LoaderError> {
    let json = std::fs::read_to_string(path)?;
    let response = parse_response(&json)?;
    let year = year
        .or_else(|| response.dataset.first().map(|r| r.yr))
        .unwrap_or_default();
    check_response(&response, year, identity, config)?;
    if response.dataset.is_empty() {
        tracing::warn!(path = %path.display(), "Comtrade document has no records");
    }
    let records = to_trade_records(response.dataset)?;
    tracing::info!(path = %path.display(), year, count = records.len(), "Loaded Comtrade file");
    Ok(records)
}

/// Reads per-year response documents saved under a path pattern.
pub struct ComtradeFileSource {
    /// Path with a `{year}` placeholder, e.g. `build/comtrade/{year}.json`.
    pattern: String,
    identity: IdentityConfig,
    config: AcquisitionConfig,
}

impl ComtradeFileSource {
    pub fn new(pattern: &str, identity: IdentityConfig, config: AcquisitionConfig) -> Self {
        Self {
            pattern: pattern.to_string(),
            identity,
            config,
        }
    }

    pub fn path_for(&self, year: i32) -> String {
        self.pattern.replace("{year}", &year.to_string())
    }
}

#[async_trait]
impl TradeSource for ComtradeFileSource {
    fn name(&self) -> &str {
        "comtrade-file"
    }

    async fn fetch_year(&self, year: i32) -> Result<Vec<TradeRecord>, LoaderError> {
        let path = self.path_for(year);
        tracing::debug!(
            path = %path,
            url = %build_query_url(year, &self.config),
            "Reading saved Comtrade response"
        );
        let json = tokio::fs::read_to_string(&path).await?;
        let response = parse_response(&json)?;
        check_response(&response, year, &self.identity, &self.config)?;
        to_trade_records(response.dataset)
    }
}
