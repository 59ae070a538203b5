use std::collections::{BTreeSet, HashMap};

use steelflow_models::{AllocatedFlow, AllocationRule, TradeRecord};

use crate::categories::SectorCategories;
use crate::error::DataIntegrityError;
use crate::mass;

/// Allocation rules indexed by commodity code, in file order per code.
#[derive(Debug, Clone, Default)]
pub struct AllocationTable {
    rules: Vec<AllocationRule>,
    by_code: HashMap<String, Vec<usize>>,
}

impl AllocationTable {
    pub fn new(rules: Vec<AllocationRule>) -> Self {
        let mut by_code: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, rule) in rules.iter().enumerate() {
            by_code.entry(rule.commodity_code.clone()).or_default().push(i);
        }
        Self { rules, by_code }
    }

    /// All rules for a code, including exclusion markers.
    pub fn rules_for<'a>(
        &'a self,
        commodity_code: &str,
    ) -> impl Iterator<Item = &'a AllocationRule> + 'a {
        self.by_code
            .get(commodity_code)
            .into_iter()
            .flatten()
            .map(move |&i| &self.rules[i])
    }

    /// Number of distinct commodity codes.
    pub fn code_count(&self) -> usize {
        self.by_code.len()
    }
}

/// Counts from one fan-out join.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JoinReport {
    pub records_in: usize,
    pub records_matched: usize,
    /// Records with no allocated rule. Excluded, not an error.
    pub records_unmatched: usize,
    pub flows_out: usize,
    pub unmatched_codes: BTreeSet<String>,
}

/// Expand each record into one flow per allocated rule for its code.
///
/// Output order is input record order, then rule file order. Records are
/// not modified; the multiplier is applied only to the emitted flow.
pub fn expand(
    records: &[TradeRecord],
    table: &AllocationTable,
    categories: &SectorCategories,
) -> Result<(Vec<AllocatedFlow>, JoinReport), DataIntegrityError> {
    let mut flows = Vec::new();
    let mut report = JoinReport {
        records_in: records.len(),
        ..JoinReport::default()
    };

    for record in records {
        let before = flows.len();
        for rule in table.rules_for(&record.commodity_code) {
            let (Some(sector_code), Some(stage)) = (&rule.sector_code, &rule.stage) else {
                continue;
            };
            let category =
                categories
                    .get(sector_code)
                    .ok_or_else(|| DataIntegrityError::MissingCategory {
                        sector_code: sector_code.clone(),
                        commodity_code: rule.commodity_code.clone(),
                    })?;

            let mass_kt = mass::mass_kt(record.net_weight_kg, rule.multiplier);
            flows.push(AllocatedFlow {
                reporter: record.reporter.clone(),
                partner: record.partner.clone(),
                commodity_code: record.commodity_code.clone(),
                direction: record.direction,
                year: record.year,
                net_weight_kg: record.net_weight_kg,
                sector_code: sector_code.clone(),
                stage: stage.clone(),
                multiplier: rule.multiplier,
                sector_group: category.sector_group.clone(),
                sector_name: category.sector_name.clone(),
                iron_content: category.iron_content,
                mass_kt,
                mass_iron_kt: mass::mass_iron_kt(mass_kt, category.iron_content),
            });
        }

        if flows.len() > before {
            report.records_matched += 1;
        } else {
            report.records_unmatched += 1;
            report.unmatched_codes.insert(record.commodity_code.clone());
        }
    }

    report.flows_out = flows.len();
    tracing::debug!(
        records_in = report.records_in,
        records_matched = report.records_matched,
        records_unmatched = report.records_unmatched,
        flows_out = report.flows_out,
        "Joined trade records to allocations"
    );
    Ok((flows, report))
}
