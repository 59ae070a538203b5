use steelflow_models::{Correction, TradeRecord};

use crate::error::DataIntegrityError;

/// Overwrite the net weight of every record matching the correction's code,
/// direction and years with the value reported for its reference year.
///
/// The reference value is taken from the first matching record in input
/// order. Returns the number of records rewritten.
pub fn apply_correction(
    records: &mut [TradeRecord],
    correction: &Correction,
) -> Result<usize, DataIntegrityError> {
    let year = correction
        .reference_year()
        .ok_or_else(|| DataIntegrityError::EmptyCorrectionYears {
            commodity_code: correction.commodity_code.clone(),
            direction: correction.direction,
        })?;

    let selected = |r: &TradeRecord| {
        r.commodity_code == correction.commodity_code && r.direction == correction.direction
    };

    let new_value = records
        .iter()
        .find(|r| selected(r) && r.year == year)
        .map(|r| r.net_weight_kg)
        .ok_or_else(|| DataIntegrityError::CorrectionNoMatch {
            commodity_code: correction.commodity_code.clone(),
            direction: correction.direction,
            year,
        })?;

    let mut rewritten = 0;
    for record in records
        .iter_mut()
        .filter(|r| selected(r) && correction.years.contains(&r.year))
    {
        record.net_weight_kg = new_value;
        rewritten += 1;
    }

    tracing::debug!(
        commodity_code = %correction.commodity_code,
        direction = %correction.direction,
        years = ?correction.years,
        new_value,
        rewritten,
        "Applied correction"
    );
    Ok(rewritten)
}

/// Apply corrections in list order. Returns the total rows rewritten.
pub fn apply_corrections(
    records: &mut [TradeRecord],
    corrections: &[Correction],
) -> Result<usize, DataIntegrityError> {
    let mut total = 0;
    for correction in corrections {
        total += apply_correction(records, correction)?;
    }
    Ok(total)
}
