/// Kilograms per kilotonne.
pub const KG_PER_KT: f64 = 1_000_000.0;

/// Allocated share of a record's net weight, in kilotonnes. Unrounded.
pub fn mass_kt(net_weight_kg: f64, multiplier: f64) -> f64 {
    net_weight_kg * multiplier / KG_PER_KT
}

/// Embodied iron of an allocated mass, in kilotonnes. Unrounded.
pub fn mass_iron_kt(mass_kt: f64, iron_content: f64) -> f64 {
    mass_kt * iron_content
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn converts_kg_to_kt() {
        assert_relative_eq!(mass_kt(3_000_000.0, 1.0), 3.0, epsilon = 1e-12);
        assert_relative_eq!(mass_kt(1_000_000.0, 0.4), 0.4, epsilon = 1e-12);
        assert_eq!(mass_kt(1_000_000.0, 0.0), 0.0);
    }

    #[test]
    fn iron_scales_mass() {
        assert_relative_eq!(mass_iron_kt(3.0, 0.9), 2.7, epsilon = 1e-12);
    }

    #[test]
    fn small_weights_are_not_rounded_away() {
        assert_relative_eq!(mass_kt(1.0, 1.0), 1e-6, epsilon = 1e-12);
    }
}
