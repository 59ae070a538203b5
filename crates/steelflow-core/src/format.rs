use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use steelflow_models::output_schema::precision::{IRON_CONTENT_DP, MASS_DP};
use steelflow_models::{AggregatedFlow, Direction, OutputRow, OutputShape};

use crate::error::DataIntegrityError;

/// Which published table a set of rows belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableName {
    All,
    Imports,
    Exports,
}

impl TableName {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableName::All => "all",
            TableName::Imports => "imports",
            TableName::Exports => "exports",
        }
    }

    fn for_direction(direction: Direction) -> Self {
        match direction {
            Direction::Import => TableName::Imports,
            Direction::Export => TableName::Exports,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputTable {
    pub name: TableName,
    pub rows: Vec<OutputRow>,
}

/// Round half-to-even at `dp` places and pad to exactly `dp` places.
///
/// The float is read at its shortest decimal form, so `0.35` rounds as the
/// tie it prints as rather than as its binary expansion `0.3499...`.
fn round_to(
    value: f64,
    dp: u32,
    field: &'static str,
    flow: &AggregatedFlow,
) -> Result<Decimal, DataIntegrityError> {
    let mut d = Decimal::from_f64(value)
        .ok_or_else(|| DataIntegrityError::NonFiniteValue {
            field,
            sector_code: flow.key.sector_code.clone(),
            year: flow.key.year,
        })?
        .round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven);
    d.rescale(dp);
    Ok(d)
}

/// Round and relabel aggregated flows for publication. Row order is kept.
pub fn format_rows(aggregated: &[AggregatedFlow]) -> Result<Vec<OutputRow>, DataIntegrityError> {
    aggregated
        .iter()
        .map(|flow| {
            Ok(OutputRow {
                sector_code: flow.key.sector_code.clone(),
                sector_group: flow.sector_group.clone(),
                sector_name: flow.sector_name.clone(),
                direction: flow.key.direction.output_label().to_string(),
                stage: flow.key.stage.clone(),
                year: flow.key.year,
                iron_content: round_to(flow.iron_content, IRON_CONTENT_DP, "iron_content", flow)?,
                mass: round_to(flow.mass_kt, MASS_DP, "mass", flow)?,
                mass_iron: round_to(flow.mass_iron_kt, MASS_DP, "mass_iron", flow)?,
            })
        })
        .collect()
}

/// Arrange rows into the configured table layout.
///
/// A split layout always yields both tables, even when one is empty.
pub fn shape_tables(rows: Vec<OutputRow>, shape: OutputShape) -> Vec<OutputTable> {
    match shape {
        OutputShape::Combined => vec![OutputTable {
            name: TableName::All,
            rows,
        }],
        OutputShape::SplitByDirection => {
            let mut imports = Vec::new();
            let mut exports = Vec::new();
            for row in rows {
                let table = if row.direction == Direction::Import.output_label() {
                    &mut imports
                } else {
                    &mut exports
                };
                table.push(row);
            }
            vec![
                OutputTable {
                    name: TableName::for_direction(Direction::Import),
                    rows: imports,
                },
                OutputTable {
                    name: TableName::for_direction(Direction::Export),
                    rows: exports,
                },
            ]
        }
    }
}
