//! Conversion factors offered in the dimensional analysis game.
//!
//! Unit tokens follow the game's Icelandic abbreviations (`klst` hour,
//! `mín` minute).

use once_cell::sync::Lazy;

use crate::calculations::dimensional::ConversionFactor;
use crate::errors::{ChemError, ChemResult};

pub static CONVERSION_FACTORS: Lazy<Vec<ConversionFactor>> = Lazy::new(|| {
    [
        ("1000 m", "1 km"),
        ("100 cm", "1 m"),
        ("1000 mm", "1 m"),
        ("1000 g", "1 kg"),
        ("1000 mg", "1 g"),
        ("1000 mL", "1 L"),
        ("1000 mmol", "1 mol"),
        ("60 s", "1 mín"),
        ("60 mín", "1 klst"),
        ("24 klst", "1 dagur"),
        ("101.325 kPa", "1 atm"),
        ("760 mmHg", "1 atm"),
    ]
    .into_iter()
    .map(|(num, den)| ConversionFactor::new(num, den))
    .collect()
});

/// Factor converting `from` into `to`, inverting a table entry if needed
pub fn find_factor(from: &str, to: &str) -> ChemResult<ConversionFactor> {
    CONVERSION_FACTORS
        .iter()
        .find_map(|f| {
            if f.denominator_unit() == from && f.numerator_unit() == to {
                Some(f.clone())
            } else if f.numerator_unit() == from && f.denominator_unit() == to {
                Some(f.inverted())
            } else {
                None
            }
        })
        .ok_or_else(|| ChemError::not_found("Conversion factor", format!("{} → {}", from, to)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::dimensional::predict_resulting_unit;

    #[test]
    fn test_find_factor_direct_and_inverted() {
        let km_to_m = find_factor("km", "m").unwrap();
        assert_eq!(km_to_m.num, "1000 m");
        let m_to_km = find_factor("m", "km").unwrap();
        assert_eq!(m_to_km.num, "1 km");
        assert!((m_to_km.apply(500.0) - 0.5).abs() < 1e-12);
        assert_eq!(predict_resulting_unit("m", &m_to_km), "km");
        assert!(find_factor("km", "L").is_err());
    }

    #[test]
    fn test_units_match_parts() {
        for factor in CONVERSION_FACTORS.iter() {
            assert_eq!(factor.units, vec![factor.numerator_unit(), factor.denominator_unit()]);
        }
    }
}
