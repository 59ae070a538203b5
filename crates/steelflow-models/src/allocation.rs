use serde::{Deserialize, Serialize};

/// Maps a commodity code to a sector/stage with a share of its volume.
///
/// A rule without a sector code marks the commodity as deliberately
/// unallocated. Such rules carry multiplier 0 and never produce flows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AllocationRule {
    pub commodity_code: String,
    pub sector_code: Option<String>,
    pub stage: Option<String>,
    pub multiplier: f64,
}

impl AllocationRule {
    pub fn new(commodity_code: &str, sector_code: &str, stage: &str, multiplier: f64) -> Self {
        Self {
            commodity_code: commodity_code.to_string(),
            sector_code: Some(sector_code.to_string()),
            stage: Some(stage.to_string()),
            multiplier,
        }
    }

    /// A rule that excludes the commodity from steel accounting.
    pub fn excluded(commodity_code: &str) -> Self {
        Self {
            commodity_code: commodity_code.to_string(),
            sector_code: None,
            stage: None,
            multiplier: 0.0,
        }
    }

    /// True when the rule attributes a strict fraction of the code's volume.
    pub fn is_split(&self) -> bool {
        self.multiplier > 0.0 && self.multiplier < 1.0
    }
}

/// Sector metadata, one per sector code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SectorCategory {
    pub sector_code: String,
    pub sector_group: String,
    pub sector_name: String,
    /// Fraction of the sector's traded mass that is iron.
    pub iron_content: f64,
}
