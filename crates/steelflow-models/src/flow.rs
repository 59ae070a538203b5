use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::trade::Direction;

/// One trade record joined with one allocation rule and its sector.
///
/// Field order is the column order of the checking table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AllocatedFlow {
    pub reporter: String,
    pub partner: String,
    pub commodity_code: String,
    pub direction: Direction,
    pub year: i32,
    pub net_weight_kg: f64,
    pub sector_code: String,
    pub stage: String,
    pub multiplier: f64,
    pub sector_group: String,
    pub sector_name: String,
    pub iron_content: f64,
    /// Allocated mass in kilotonnes, unrounded.
    #[serde(rename = "mass")]
    pub mass_kt: f64,
    /// Embodied iron in kilotonnes, unrounded.
    #[serde(rename = "mass_iron")]
    pub mass_iron_kt: f64,
}

impl AllocatedFlow {
    pub fn key(&self) -> FlowKey {
        FlowKey {
            direction: self.direction,
            sector_code: self.sector_code.clone(),
            stage: self.stage.clone(),
            year: self.year,
        }
    }
}

/// The reporting grain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlowKey {
    pub direction: Direction,
    pub sector_code: String,
    pub stage: String,
    pub year: i32,
}

/// Sum of allocated flows at the reporting grain.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedFlow {
    pub key: FlowKey,
    pub sector_group: String,
    pub sector_name: String,
    pub iron_content: f64,
    pub mass_kt: f64,
    pub mass_iron_kt: f64,
    /// Number of allocated flows summed into this row.
    pub contributors: usize,
}

/// A published row, rounded and with the direction label normalized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputRow {
    pub sector_code: String,
    pub sector_group: String,
    pub sector_name: String,
    pub direction: String,
    pub stage: String,
    pub year: i32,
    pub iron_content: Decimal,
    pub mass: Decimal,
    pub mass_iron: Decimal,
}
