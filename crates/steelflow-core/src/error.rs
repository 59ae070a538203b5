use steelflow_models::Direction;
use thiserror::Error;

/// Any hard stop raised by the engine.
#[derive(Error, Debug, PartialEq)]
pub enum PipelineError {
    #[error("Data integrity error: {0}")]
    DataIntegrity(#[from] DataIntegrityError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// An expected structural fact about the inputs does not hold.
#[derive(Error, Debug, PartialEq)]
pub enum DataIntegrityError {
    #[error("correction {commodity_code} {direction}: no record for reference year {year}")]
    CorrectionNoMatch {
        commodity_code: String,
        direction: Direction,
        year: i32,
    },

    #[error("correction {commodity_code} {direction} lists no years")]
    EmptyCorrectionYears {
        commodity_code: String,
        direction: Direction,
    },

    #[error("sector {sector_code} (commodity {commodity_code}) has no category")]
    MissingCategory {
        sector_code: String,
        commodity_code: String,
    },

    #[error("sector {0} is listed more than once in the category table")]
    DuplicateCategory(String),

    #[error("{field} for {sector_code} {year} is not a finite number")]
    NonFiniteValue {
        field: &'static str,
        sector_code: String,
        year: i32,
    },
}

/// An input invariant is violated.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("row {row}: expected {field} {expected:?}, found {actual:?}")]
    IdentityMismatch {
        row: usize,
        field: &'static str,
        expected: String,
        actual: String,
    },

    #[error("multipliers must sum to 0 or 1: {}", format_sums(.0))]
    MultiplierSum(Vec<(String, f64)>),

    #[error("commodity {commodity_code}: multiplier {multiplier} outside [0, 1]")]
    MultiplierRange {
        commodity_code: String,
        multiplier: f64,
    },

    #[error("commodity {commodity_code}: sector {sector_code} has no stage")]
    MissingStage {
        commodity_code: String,
        sector_code: String,
    },

    #[error("row {row} ({commodity_code} {direction} {year}): invalid net weight {net_weight_kg}")]
    InvalidWeight {
        row: usize,
        commodity_code: String,
        direction: Direction,
        year: i32,
        net_weight_kg: f64,
    },
}

fn format_sums(sums: &[(String, f64)]) -> String {
    sums.iter()
        .map(|(code, sum)| format!("{code}={sum}"))
        .collect::<Vec<_>>()
        .join(", ")
}
