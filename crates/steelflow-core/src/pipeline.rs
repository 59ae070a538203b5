use steelflow_models::{
    AggregatedFlow, AllocatedFlow, AllocationRule, PipelineConfig, SectorCategory, TradeRecord,
};

use crate::aggregate::aggregate;
use crate::categories::SectorCategories;
use crate::correction::apply_corrections;
use crate::error::PipelineError;
use crate::format::{format_rows, shape_tables, OutputTable};
use crate::join::{expand, AllocationTable, JoinReport};
use crate::validate;

/// Everything one run produces.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// One row per allocated flow, before aggregation.
    pub checking: Vec<AllocatedFlow>,
    pub aggregated: Vec<AggregatedFlow>,
    pub tables: Vec<OutputTable>,
    pub join: JoinReport,
    pub corrected_rows: usize,
}

/// Runs correction, validation, join, aggregation and formatting, in that
/// order. Any failure stops the run.
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn run(
        &self,
        mut records: Vec<TradeRecord>,
        rules: Vec<AllocationRule>,
        categories: Vec<SectorCategory>,
    ) -> Result<PipelineOutput, PipelineError> {
        tracing::info!(
            records = records.len(),
            rules = rules.len(),
            categories = categories.len(),
            "Pipeline starting"
        );

        // Corrections must see the raw data, before anything is checked.
        let corrected_rows = apply_corrections(&mut records, &self.config.corrections)?;

        validate::check_identity(&records, &self.config.identity)?;
        validate::check_net_weights(&records)?;
        validate::check_rules(&rules)?;
        let splits = validate::check_multiplier_sums(&rules)?.len();
        let categories = SectorCategories::new(categories)?;
        tracing::info!(corrected_rows, split_rules = splits, "Inputs validated");

        let table = AllocationTable::new(rules);
        tracing::debug!(codes = table.code_count(), "Indexed allocation rules");
        let (checking, join) = expand(&records, &table, &categories)?;
        if join.records_unmatched > 0 {
            tracing::info!(
                records = join.records_unmatched,
                codes = join.unmatched_codes.len(),
                "Records without allocation excluded"
            );
        }

        let aggregated = aggregate(&checking);
        let rows = format_rows(&aggregated)?;
        let tables = shape_tables(rows, self.config.output_shape);

        tracing::info!(
            flows = checking.len(),
            groups = aggregated.len(),
            tables = tables.len(),
            "Pipeline complete"
        );

        Ok(PipelineOutput {
            checking,
            aggregated,
            tables,
            join,
            corrected_rows,
        })
    }
}
