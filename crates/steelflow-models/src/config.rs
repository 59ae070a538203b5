use serde::{Deserialize, Serialize};

use crate::trade::Direction;

/// Engine configuration: expected identity, corrections and output shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineConfig {
    #[serde(default)]
    pub output_shape: OutputShape,
    #[serde(default)]
    pub identity: IdentityConfig,
    /// Hand-curated overrides applied before validation, in order.
    #[serde(default = "default_corrections")]
    pub corrections: Vec<Correction>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_shape: OutputShape::default(),
            identity: IdentityConfig::default(),
            corrections: default_corrections(),
        }
    }
}

/// Reporter/partner pair every trade record must carry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IdentityConfig {
    /// ISO3 code of the reporting country.
    pub reporter: String,
    /// ISO3 code of the partner area. `WLD` is the world aggregate.
    pub partner: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            reporter: "GBR".to_string(),
            partner: "WLD".to_string(),
        }
    }
}

/// Rewrite the net weight of `commodity_code`/`direction` in every listed
/// year to the value reported for the first listed year.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Correction {
    pub commodity_code: String,
    pub direction: Direction,
    pub years: Vec<i32>,
}

impl Correction {
    pub fn new(commodity_code: &str, direction: Direction, years: Vec<i32>) -> Self {
        Self {
            commodity_code: commodity_code.to_string(),
            direction,
            years,
        }
    }

    /// Year whose reported value replaces the others.
    pub fn reference_year(&self) -> Option<i32> {
        self.years.first().copied()
    }
}

/// Whether directions share one output table or get one each.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputShape {
    #[default]
    Combined,
    SplitByDirection,
}

/// Known-bad series in the UK SITC rev. 2 data.
///
/// - `69402` imports for 2001-2007 are held at the 2000 value.
/// - `874` imports for 2000 are held at the 1999 value.
pub fn default_corrections() -> Vec<Correction> {
    vec![
        Correction::new("69402", Direction::Import, (2000..=2007).collect()),
        Correction::new("874", Direction::Import, vec![1999, 2000]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.identity.reporter, "GBR");
        assert_eq!(config.identity.partner, "WLD");
        assert_eq!(config.corrections.len(), 2);
        assert_eq!(config.corrections[0].reference_year(), Some(2000));
        assert_eq!(config.corrections[0].years.len(), 8);
        assert_eq!(config.output_shape, OutputShape::Combined);
    }

    #[test]
    fn config_from_toml() {
        let toml_str = r#"
output_shape = "split_by_direction"

[identity]
reporter = "DEU"
partner = "WLD"

[[corrections]]
commodity_code = "874"
direction = "Import"
years = [1999, 2000]
"#;
        let config: PipelineConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.identity.reporter, "DEU");
        assert_eq!(config.corrections.len(), 1);
        assert_eq!(config.corrections[0].direction, Direction::Import);
        assert_eq!(config.output_shape, OutputShape::SplitByDirection);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config: PipelineConfig = toml::from_str("").unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn empty_correction_list_is_kept() {
        let config: PipelineConfig = toml::from_str("corrections = []").unwrap();
        assert!(config.corrections.is_empty());
    }

    #[test]
    fn reference_year_of_empty_correction() {
        let c = Correction::new("874", Direction::Import, vec![]);
        assert_eq!(c.reference_year(), None);
    }
}
