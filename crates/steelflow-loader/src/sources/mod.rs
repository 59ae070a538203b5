pub mod comtrade;
pub mod table;

use async_trait::async_trait;
use steelflow_models::TradeRecord;

use crate::error::LoaderError;

/// Supplies validated trade records one year at a time.
#[async_trait]
pub trait TradeSource: Send + Sync {
    fn name(&self) -> &str;

    /// All records for `year`, or an error if the batch is incomplete or
    /// does not belong to the configured reporter/partner/year.
    async fn fetch_year(&self, year: i32) -> Result<Vec<TradeRecord>, LoaderError>;
}

/// Fetch each year in turn and concatenate the batches.
pub async fn load_years(
    source: &dyn TradeSource,
    years: &[i32],
) -> Result<Vec<TradeRecord>, LoaderError> {
    let mut records = Vec::new();
    for &year in years {
        let batch = source.fetch_year(year).await?;
        tracing::info!(source = source.name(), year, count = batch.len(), "Loaded trade data");
        records.extend(batch);
    }
    Ok(records)
}
