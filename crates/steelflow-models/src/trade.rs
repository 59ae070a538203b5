use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Direction of a reported trade flow.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Direction {
    Import,
    Export,
}

impl Direction {
    /// Label as reported by the source data (`Import` / `Export`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Import => "Import",
            Direction::Export => "Export",
        }
    }

    /// Lower-case label used in the published output tables.
    pub fn output_label(&self) -> &'static str {
        match self {
            Direction::Import => "import",
            Direction::Export => "export",
        }
    }
}

// Ordered by source label so grouped output sorts the way the reference
// tables do (`Export` before `Import`).
impl Ord for Direction {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for Direction {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDirectionError(pub String);

impl fmt::Display for ParseDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown trade direction: {:?}", self.0)
    }
}

impl std::error::Error for ParseDirectionError {}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "import" => Ok(Direction::Import),
            "export" => Ok(Direction::Export),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

/// One reported flow for the configured reporter/partner pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradeRecord {
    pub reporter: String,
    pub partner: String,
    /// Code in the source classification scheme (SITC rev. 2 for Comtrade `px=S2`).
    pub commodity_code: String,
    pub direction: Direction,
    pub year: i32,
    pub net_weight_kg: f64,
}
