use std::collections::BTreeMap;

use steelflow_models::{AggregatedFlow, AllocatedFlow, FlowKey};

/// Collapse allocated flows to the reporting grain.
///
/// Masses are summed. Sector metadata is copied from the first member in
/// input order; `SectorCategories` guarantees it is the same for every
/// member. Output is sorted by key, so it does not depend on input order.
pub fn aggregate(flows: &[AllocatedFlow]) -> Vec<AggregatedFlow> {
    let mut groups: BTreeMap<FlowKey, AggregatedFlow> = BTreeMap::new();

    for flow in flows {
        groups
            .entry(flow.key())
            .and_modify(|agg| {
                agg.mass_kt += flow.mass_kt;
                agg.mass_iron_kt += flow.mass_iron_kt;
                agg.contributors += 1;
            })
            .or_insert_with(|| AggregatedFlow {
                key: flow.key(),
                sector_group: flow.sector_group.clone(),
                sector_name: flow.sector_name.clone(),
                iron_content: flow.iron_content,
                mass_kt: flow.mass_kt,
                mass_iron_kt: flow.mass_iron_kt,
                contributors: 1,
            });
    }

    groups.into_values().collect()
}
