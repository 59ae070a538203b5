use std::collections::BTreeMap;

use steelflow_models::{AllocationRule, IdentityConfig, TradeRecord};

use crate::error::ValidationError;

/// Tolerance when checking that a code's multipliers sum to 0 or 1.
pub const MULTIPLIER_TOLERANCE: f64 = 1e-9;

/// Every record must carry the configured reporter and partner.
pub fn check_identity(
    records: &[TradeRecord],
    identity: &IdentityConfig,
) -> Result<(), ValidationError> {
    for (row, record) in records.iter().enumerate() {
        if record.reporter != identity.reporter {
            return Err(ValidationError::IdentityMismatch {
                row,
                field: "reporter",
                expected: identity.reporter.clone(),
                actual: record.reporter.clone(),
            });
        }
        if record.partner != identity.partner {
            return Err(ValidationError::IdentityMismatch {
                row,
                field: "partner",
                expected: identity.partner.clone(),
                actual: record.partner.clone(),
            });
        }
    }
    Ok(())
}

/// Net weights must be finite and non-negative.
pub fn check_net_weights(records: &[TradeRecord]) -> Result<(), ValidationError> {
    match records
        .iter()
        .enumerate()
        .find(|(_, r)| !r.net_weight_kg.is_finite() || r.net_weight_kg < 0.0)
    {
        Some((row, r)) => Err(ValidationError::InvalidWeight {
            row,
            commodity_code: r.commodity_code.clone(),
            direction: r.direction,
            year: r.year,
            net_weight_kg: r.net_weight_kg,
        }),
        None => Ok(()),
    }
}

/// Each multiplier lies in [0, 1] and every allocated rule names a stage.
pub fn check_rules(rules: &[AllocationRule]) -> Result<(), ValidationError> {
    for rule in rules {
        if !rule.multiplier.is_finite() || !(0.0..=1.0).contains(&rule.multiplier) {
            return Err(ValidationError::MultiplierRange {
                commodity_code: rule.commodity_code.clone(),
                multiplier: rule.multiplier,
            });
        }
        if let (Some(sector_code), None) = (&rule.sector_code, &rule.stage) {
            return Err(ValidationError::MissingStage {
                commodity_code: rule.commodity_code.clone(),
                sector_code: sector_code.clone(),
            });
        }
    }
    Ok(())
}

/// Per commodity code, multipliers sum to 0 (excluded) or 1 (fully allocated).
///
/// On success returns the split rules (0 < multiplier < 1) for audit.
pub fn check_multiplier_sums(
    rules: &[AllocationRule],
) -> Result<Vec<&AllocationRule>, ValidationError> {
    let mut sums: BTreeMap<&str, f64> = BTreeMap::new();
    for rule in rules {
        *sums.entry(rule.commodity_code.as_str()).or_insert(0.0) += rule.multiplier;
    }

    let bad: Vec<(String, f64)> = sums
        .into_iter()
        .filter(|(_, sum)| {
            sum.abs() > MULTIPLIER_TOLERANCE && (sum - 1.0).abs() > MULTIPLIER_TOLERANCE
        })
        .map(|(code, sum)| (code.to_string(), sum))
        .collect();
    if !bad.is_empty() {
        return Err(ValidationError::MultiplierSum(bad));
    }

    let splits: Vec<&AllocationRule> = rules.iter().filter(|r| r.is_split()).collect();
    for rule in &splits {
        tracing::debug!(
            commodity_code = %rule.commodity_code,
            sector_code = rule.sector_code.as_deref().unwrap_or(""),
            stage = rule.stage.as_deref().unwrap_or(""),
            multiplier = rule.multiplier,
            "Split allocation"
        );
    }
    Ok(splits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use steelflow_models::Direction;

    fn record(reporter: &str, partner: &str, kg: f64) -> TradeRecord {
        TradeRecord {
            reporter: reporter.to_string(),
            partner: partner.to_string(),
            commodity_code: "X1".to_string(),
            direction: Direction::Import,
            year: 2010,
            net_weight_kg: kg,
        }
    }

    #[test]
    fn identity_ok() {
        let records = vec![record("GBR", "WLD", 1.0), record("GBR", "WLD", 2.0)];
        assert!(check_identity(&records, &IdentityConfig::default()).is_ok());
    }

    #[test]
    fn identity_reports_first_bad_row() {
        let records = vec![
            record("GBR", "WLD", 1.0),
            record("GBR", "FRA", 2.0),
            record("DEU", "WLD", 3.0),
        ];
        let err = check_identity(&records, &IdentityConfig::default()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::IdentityMismatch {
                row: 1,
                field: "partner",
                expected: "WLD".to_string(),
                actual: "FRA".to_string(),
            }
        );
    }

    #[test]
    fn negative_and_nan_weights_rejected() {
        assert!(check_net_weights(&[record("GBR", "WLD", 0.0)]).is_ok());
        assert!(matches!(
            check_net_weights(&[record("GBR", "WLD", 1.0), record("GBR", "WLD", -1.0)]),
            Err(ValidationError::InvalidWeight { row: 1, .. })
        ));
        assert!(check_net_weights(&[record("GBR", "WLD", f64::NAN)]).is_err());
    }

    #[test]
    fn sums_of_zero_and_one_accepted() {
        let rules = vec![
            AllocationRule::new("X1", "S1", "Primary", 1.0),
            AllocationRule::new("X2", "S1", "Primary", 0.4),
            AllocationRule::new("X2", "S2", "Primary", 0.6),
            AllocationRule::excluded("X3"),
        ];
        let splits = check_multiplier_sums(&rules).unwrap();
        assert_eq!(splits.len(), 2);
        assert!(splits.iter().all(|r| r.commodity_code == "X2"));
    }

    #[test]
    fn thirds_within_tolerance() {
        let third = 1.0 / 3.0;
        let rules = vec![
            AllocationRule::new("X1", "S1", "Primary", third),
            AllocationRule::new("X1", "S2", "Primary", third),
            AllocationRule::new("X1", "S3", "Primary", third),
        ];
        assert!(check_multiplier_sums(&rules).is_ok());
    }

    #[test]
    fn half_sum_rejected() {
        let rules = vec![
            AllocationRule::new("X1", "S1", "Primary", 1.0),
            AllocationRule::new("X2", "S1", "Primary", 0.5),
        ];
        let err = check_multiplier_sums(&rules).unwrap_err();
        assert_eq!(err, ValidationError::MultiplierSum(vec![("X2".to_string(), 0.5)]));
    }

    #[test]
    fn every_bad_code_named_in_order() {
        let rules = vec![
            AllocationRule::new("B", "S1", "Primary", 0.7),
            AllocationRule::new("A", "S1", "Primary", 0.7),
            AllocationRule::new("A", "S2", "Primary", 0.7),
        ];
        match check_multiplier_sums(&rules).unwrap_err() {
            ValidationError::MultiplierSum(bad) => {
                let codes: Vec<&str> = bad.iter().map(|(c, _)| c.as_str()).collect();
                assert_eq!(codes, vec!["A", "B"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn out_of_range_multiplier_rejected() {
        let rules = vec![AllocationRule::new("X1", "S1", "Primary", 1.5)];
        assert!(matches!(
            check_rules(&rules),
            Err(ValidationError::MultiplierRange { .. })
        ));
    }

    #[test]
    fn allocated_rule_without_stage_rejected() {
        let mut rule = AllocationRule::new("X1", "S1", "Primary", 1.0);
        rule.stage = None;
        assert!(matches!(
            check_rules(&[rule]),
            Err(ValidationError::MissingStage { .. })
        ));
        assert!(check_rules(&[AllocationRule::excluded("X3")]).is_ok());
    }
}
