use std::path::Path;

use steelflow_models::TradeRecord;

use crate::config::LoaderConfig;
use crate::error::LoaderError;
use crate::sources::comtrade::{read_response_file, ComtradeFileSource};
use crate::sources::table::CsvTradeSource;
use crate::sources::load_years;

/// Load the trade dataset from whichever input the config names.
///
/// Precedence: explicit Comtrade files, then the trade table, then the
/// per-year Comtrade pattern.
pub async fn load_trade(config: &LoaderConfig) -> Result<Vec<TradeRecord>, LoaderError> {
    let inputs = &config.inputs;
    let identity = &config.pipeline.identity;

    if !inputs.comtrade_files.is_empty() {
        let mut records = Vec::new();
        for file in &inputs.comtrade_files {
            records.extend(read_response_file(
                Path::new(file),
                None,
                identity,
                &config.acquisition,
            )?);
        }
        return Ok(records);
    }

    if let Some(table) = &inputs.trade_table {
        let source = CsvTradeSource::open(table)?;
        if inputs.years.is_empty() {
            return Ok(source.into_records());
        }
        return load_years(&source, &inputs.years).await;
    }

    if let Some(pattern) = &inputs.comtrade_pattern {
        if inputs.years.is_empty() {
            return Err(LoaderError::Config(
                "inputs.years must list the years to read from comtrade_pattern".to_string(),
            ));
        }
        let source =
            ComtradeFileSource::new(pattern, identity.clone(), config.acquisition.clone());
        return load_years(&source, &inputs.years).await;
    }

    Err(LoaderError::Config(
        "no trade input: set inputs.comtrade_files, inputs.trade_table or inputs.comtrade_pattern"
            .to_string(),
    ))
}
