//! Gibbs free energy and spontaneity.
//!
//! ΔH in kJ/mol, ΔS in J/(mol·K), T in K. ΔG = ΔH − T·ΔS/1000.

use serde::{Deserialize, Serialize};

use crate::errors::{ChemError, ChemResult};

/// |ΔG| below this (kJ/mol) counts as equilibrium
pub const EQUILIBRIUM_BAND_KJ: f64 = 1.0;

pub fn calculate_delta_g(delta_h_kj: f64, delta_s_j_per_k: f64, temperature_k: f64) -> f64 {
    delta_h_kj - temperature_k * (delta_s_j_per_k / 1000.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Spontaneity {
    Spontaneous,
    NonSpontaneous,
    Equilibrium,
}

pub fn get_spontaneity(delta_g: f64) -> Spontaneity {
    if delta_g.abs() < EQUILIBRIUM_BAND_KJ {
        Spontaneity::Equilibrium
    } else if delta_g < 0.0 {
        Spontaneity::Spontaneous
    } else {
        Spontaneity::NonSpontaneous
    }
}

/// Temperature (K) where ΔG changes sign, `1000·ΔH/ΔS`.
pub fn crossover_temperature(delta_h_kj: f64, delta_s_j_per_k: f64) -> ChemResult<f64> {
    if delta_s_j_per_k == 0.0 {
        return Err(ChemError::calculation_failed(
            "crossover_temperature",
            "ΔS is zero, ΔG does not depend on temperature",
        ));
    }
    let t = 1000.0 * delta_h_kj / delta_s_j_per_k;
    if t <= 0.0 {
        return Err(ChemError::calculation_failed(
            "crossover_temperature",
            "ΔH and ΔS have opposite signs, no crossover above 0 K",
        ));
    }
    Ok(t)
}

/// How spontaneity depends on temperature, from the signs of ΔH and ΔS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpontaneityRegime {
    /// ΔH < 0, ΔS > 0
    Always,
    /// ΔH > 0, ΔS < 0
    Never,
    /// ΔH < 0, ΔS < 0
    LowTemperature,
    /// ΔH > 0, ΔS > 0
    HighTemperature,
}

pub fn spontaneity_regime(delta_h_kj: f64, delta_s_j_per_k: f64) -> SpontaneityRegime {
    match (delta_h_kj <= 0.0, delta_s_j_per_k >= 0.0) {
        (true, true) => SpontaneityRegime::Always,
        (false, false) => SpontaneityRegime::Never,
        (true, false) => SpontaneityRegime::LowTemperature,
        (false, true) => SpontaneityRegime::HighTemperature,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_delta_g() {
        assert!(calculate_delta_g(100.0, 200.0, 500.0).abs() < 1e-9);
        assert_relative_eq!(calculate_delta_g(-92.0, -199.0, 298.0), -32.698, epsilon = 1e-9);
    }

    #[test]
    fn test_spontaneity_band() {
        assert_eq!(get_spontaneity(0.0), Spontaneity::Equilibrium);
        assert_eq!(get_spontaneity(0.99), Spontaneity::Equilibrium);
        assert_eq!(get_spontaneity(-0.99), Spontaneity::Equilibrium);
        assert_eq!(get_spontaneity(-1.01), Spontaneity::Spontaneous);
        assert_eq!(get_spontaneity(1.01), Spontaneity::NonSpontaneous);
        assert_eq!(get_spontaneity(1.0), Spontaneity::NonSpontaneous);
    }

    #[test]
    fn test_crossover() {
        assert_relative_eq!(crossover_temperature(100.0, 200.0).unwrap(), 500.0);
        assert_relative_eq!(crossover_temperature(-92.0, -199.0).unwrap(), 462.311557788944, epsilon = 1e-6);
        assert!(crossover_temperature(-50.0, 100.0).is_err());
        assert!(crossover_temperature(10.0, 0.0).is_err());
    }

    #[test]
    fn test_regime() {
        assert_eq!(spontaneity_regime(-50.0, 100.0), SpontaneityRegime::Always);
        assert_eq!(spontaneity_regime(50.0, -100.0), SpontaneityRegime::Never);
        assert_eq!(spontaneity_regime(-92.0, -199.0), SpontaneityRegime::LowTemperature);
        assert_eq!(spontaneity_regime(178.0, 161.0), SpontaneityRegime::HighTemperature);
    }

    #[test]
    fn test_spontaneity_json() {
        assert_eq!(serde_json::to_string(&Spontaneity::NonSpontaneous).unwrap(), "\"non-spontaneous\"");
    }
}
