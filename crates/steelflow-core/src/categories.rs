use std::collections::HashMap;

use steelflow_models::SectorCategory;

use crate::error::DataIntegrityError;

/// Sector metadata keyed uniquely by sector code.
///
/// Building this map is where "one category per sector" is enforced, so the
/// aggregator can copy metadata from any member of a group.
#[derive(Debug, Clone, Default)]
pub struct SectorCategories {
    by_code: HashMap<String, SectorCategory>,
}

impl SectorCategories {
    pub fn new(categories: Vec<SectorCategory>) -> Result<Self, DataIntegrityError> {
        let mut by_code = HashMap::with_capacity(categories.len());
        for category in categories {
            let code = category.sector_code.clone();
            if by_code.insert(code.clone(), category).is_some() {
                return Err(DataIntegrityError::DuplicateCategory(code));
            }
        }
        Ok(Self { by_code })
    }

    pub fn get(&self, sector_code: &str) -> Option<&SectorCategory> {
        self.by_code.get(sector_code)
    }
}
