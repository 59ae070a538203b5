/// Column order of the published trade tables.
pub const OUTPUT_COLUMNS: [&str; 9] = [
    "sector_code",
    "sector_group",
    "sector_name",
    "direction",
    "stage",
    "year",
    "iron_content",
    "mass",
    "mass_iron",
];

/// Column order of the pre-aggregation checking table.
pub const CHECKING_COLUMNS: [&str; 14] = [
    "reporter",
    "partner",
    "commodity_code",
    "direction",
    "year",
    "net_weight_kg",
    "sector_code",
    "stage",
    "multiplier",
    "sector_group",
    "sector_name",
    "iron_content",
    "mass",
    "mass_iron",
];

/// Decimal places applied by the output formatter.
pub mod precision {
    pub const IRON_CONTENT_DP: u32 = 2;
    pub const MASS_DP: u32 = 1;
}

/// Default file locations, relative to the working directory.
pub mod default_paths {
    pub const CHECKING_TABLE: &str = "build/checking_table.csv";
    pub const COMBINED_TABLE: &str = "data/trade.csv";
    pub const IMPORTS_TABLE: &str = "data/trade_imports.csv";
    pub const EXPORTS_TABLE: &str = "data/trade_exports.csv";
}
