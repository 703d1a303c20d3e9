//! # Dimensional Analysis
//!
//! Unit strings are opaque tokens joined by `/` (one level of division) and
//! `·` (multiplication). A conversion factor is a fraction whose parts look
//! like `"1000 m"` over `"1 km"`; only the unit token takes part in
//! cancellation.
//!
//! Cancellation is deliberately shallow. The checks run in a fixed order and
//! multi-term products are not simplified, so chains can produce results
//! like `m/klst·mín`. Malformed factor strings give degraded output (empty
//! unit tokens, NaN magnitudes) rather than errors.

use log::warn;
use serde::{Deserialize, Serialize};

/// A unit split on its first `/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedUnit {
    pub numerator: String,
    pub denominator: Option<String>,
}

pub fn parse_unit(unit: &str) -> ParsedUnit {
    match unit.split_once('/') {
        Some((numerator, denominator)) => ParsedUnit {
            numerator: numerator.trim().to_string(),
            denominator: Some(denominator.trim().to_string()),
        },
        None => ParsedUnit {
            numerator: unit.to_string(),
            denominator: None,
        },
    }
}

/// A conversion fraction.
///
/// ## JSON Example
///
/// ```json
/// { "num": "1000 m", "den": "1 km", "units": ["m", "km"] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionFactor {
    pub num: String,
    pub den: String,
    pub units: Vec<String>,
}

/// Split `"<magnitude> <unit>"`. A missing unit gives an empty token and an
/// unparseable magnitude gives NaN.
fn split_part(part: &str) -> (f64, &str) {
    let part = part.trim();
    let (magnitude, unit) = match part.split_once(char::is_whitespace) {
        Some((magnitude, unit)) => (magnitude, unit.trim()),
        None => (part, ""),
    };
    let magnitude = magnitude.parse::<f64>().unwrap_or_else(|_| {
        warn!("Malformed conversion factor part '{}'", part);
        f64::NAN
    });
    (magnitude, unit)
}

impl ConversionFactor {
    pub fn new(num: impl Into<String>, den: impl Into<String>) -> Self {
        let mut factor = ConversionFactor {
            num: num.into(),
            den: den.into(),
            units: Vec::new(),
        };
        factor.units = vec![factor.numerator_unit().to_string(), factor.denominator_unit().to_string()];
        factor
    }

    pub fn numerator_parts(&self) -> (f64, &str) {
        split_part(&self.num)
    }

    pub fn denominator_parts(&self) -> (f64, &str) {
        split_part(&self.den)
    }

    pub fn numerator_unit(&self) -> &str {
        self.numerator_parts().1
    }

    pub fn denominator_unit(&self) -> &str {
        self.denominator_parts().1
    }

    /// The same relationship written the other way up
    pub fn inverted(&self) -> ConversionFactor {
        ConversionFactor {
            num: self.den.clone(),
            den: self.num.clone(),
            units: self.units.iter().rev().cloned().collect(),
        }
    }

    /// Multiply `value` by the factor's magnitude ratio
    pub fn apply(&self, value: f64) -> f64 {
        let (num, _) = self.numerator_parts();
        let (den, _) = self.denominator_parts();
        value * num / den
    }
}

/// Predict the unit left after multiplying a quantity in `current_unit` by
/// `factor`.
///
/// ```rust
/// use chem_core::calculations::dimensional::{predict_resulting_unit, ConversionFactor};
///
/// let factor = ConversionFactor::new("1000 m", "1 km");
/// assert_eq!(predict_resulting_unit("km", &factor), "m");
/// assert_eq!(predict_resulting_unit("km/klst", &factor), "m/klst·km");
/// ```
pub fn predict_resulting_unit(current_unit: &str, factor: &ConversionFactor) -> String {
    let current = parse_unit(current_unit);
    let factor_num = factor.numerator_unit();
    let factor_den = factor.denominator_unit();

    let Some(current_den) = current.denominator else {
        if current.numerator == factor_den {
            return factor_num.to_string();
        }
        return format!("{}·{}/{}", current.numerator, factor_num, factor_den);
    };

    // Numerator first: it cancels against the factor's denominator
    let numerator = if current.numerator == factor_den {
        factor_num.to_string()
    } else {
        format!("{}·{}", current.numerator, factor_num)
    };

    // Then the denominator, against the factor's numerator or denominator
    let (numerator, denominator) = if current_den == factor_num {
        if factor_den.is_empty() || factor_den == "1" {
            (numerator, None)
        } else {
            (numerator, Some(factor_den.to_string()))
        }
    } else if current_den == factor_den {
        (numerator, None)
    } else {
        (numerator, Some(format!("{}·{}", current_den, factor_den)))
    };

    match denominator {
        Some(den) if numerator == "1" => format!("1/{}", den),
        Some(den) => format!("{}/{}", numerator, den),
        None => numerator,
    }
}

/// One step of a conversion chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionStep {
    pub value: f64,
    pub unit: String,
}

/// Apply factors in order, recording value and predicted unit after each.
pub fn convert_chain(value: f64, unit: &str, factors: &[ConversionFactor]) -> Vec<ConversionStep> {
    let mut steps = Vec::with_capacity(factors.len());
    let mut value = value;
    let mut unit = unit.to_string();
    for factor in factors {
        value = factor.apply(value);
        unit = predict_resulting_unit(&unit, factor);
        steps.push(ConversionStep {
            value,
            unit: unit.clone(),
        });
    }
    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn km_to_m() -> ConversionFactor {
        ConversionFactor {
            num: "1000 m".to_string(),
            den: "1 km".to_string(),
            units: vec!["m".to_string(), "km".to_string()],
        }
    }

    #[test]
    fn test_parse_unit() {
        assert_eq!(
            parse_unit("km / klst"),
            ParsedUnit {
                numerator: "km".to_string(),
                denominator: Some("klst".to_string())
            }
        );
        assert_eq!(parse_unit("g").denominator, None);
    }

    #[test]
    fn test_simple_unit_cancels() {
        assert_eq!(predict_resulting_unit("km", &km_to_m()), "m");
    }

    #[test]
    fn test_simple_unit_combines() {
        assert_eq!(predict_resulting_unit("g", &km_to_m()), "g·m/km");
    }

    #[test]
    fn test_compound_numerator_cancels() {
        assert_eq!(predict_resulting_unit("km/klst", &km_to_m()), "m/klst·km");
    }

    #[test]
    fn test_compound_denominator_matches_factor_denominator() {
        assert_eq!(predict_resulting_unit("m/km", &km_to_m()), "m·m");
    }

    #[test]
    fn test_compound_denominator_cancels_numerator() {
        let per_hour = ConversionFactor::new("60 mín", "1 klst");
        assert_eq!(predict_resulting_unit("km/mín", &per_hour), "km·mín/klst");
        let bare = ConversionFactor::new("60 mín", "1");
        assert_eq!(predict_resulting_unit("km/mín", &bare), "km·mín");
    }

    #[test]
    fn test_unit_one_numerator() {
        let factor = ConversionFactor::new("1000 m", "1 1");
        assert_eq!(predict_resulting_unit("1/s", &factor), "m/s·1");
        let factor = ConversionFactor::new("1 1", "1 s");
        assert_eq!(predict_resulting_unit("s/g", &factor), "1/g·s");
    }

    #[test]
    fn test_factor_parts_and_apply() {
        let factor = km_to_m();
        assert_eq!(factor.numerator_parts(), (1000.0, "m"));
        assert_eq!(factor.denominator_parts(), (1.0, "km"));
        assert!((factor.apply(2.5) - 2500.0).abs() < 1e-9);
        let inverse = factor.inverted();
        assert_eq!(inverse.num, "1 km");
        assert!((inverse.apply(2500.0) - 2.5).abs() < 1e-9);
        assert_eq!(ConversionFactor::new("1000 m", "1 km"), factor);
    }

    #[test]
    fn test_malformed_factor_degrades() {
        let factor = ConversionFactor::new("m", "1 km");
        assert_eq!(factor.numerator_unit(), "");
        assert!(factor.apply(1.0).is_nan());
        assert_eq!(predict_resulting_unit("km", &factor), "");
    }

    #[test]
    fn test_convert_chain() {
        let steps = convert_chain(
            36.0,
            "km/klst",
            &[km_to_m(), ConversionFactor::new("1 klst", "3600 s")],
        );
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].unit, "m/klst·km");
        assert!((steps[1].value - 10.0).abs() < 1e-9);
    }
}
