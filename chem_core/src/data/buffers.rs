//! Conjugate acid/base pairs used by the buffer recipe game.
//!
//! pKa values at 25 °C; molar masses in g/mol for the salt or compound the
//! student actually weighs out.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{ChemError, ChemResult};

/// A weak acid and its conjugate base as laboratory compounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BufferSystem {
    pub id: String,
    pub acid_name: String,
    pub acid_formula: String,
    pub base_name: String,
    pub base_formula: String,
    pub pka: f64,
    pub acid_molar_mass: f64,
    pub base_molar_mass: f64,
}

impl BufferSystem {
    fn new(
        id: &str,
        (acid_name, acid_formula, acid_molar_mass): (&str, &str, f64),
        (base_name, base_formula, base_molar_mass): (&str, &str, f64),
        pka: f64,
    ) -> Self {
        BufferSystem {
            id: id.to_string(),
            acid_name: acid_name.to_string(),
            acid_formula: acid_formula.to_string(),
            base_name: base_name.to_string(),
            base_formula: base_formula.to_string(),
            pka,
            acid_molar_mass,
            base_molar_mass,
        }
    }

    /// Useful buffering range, pKa ± 1
    pub fn effective_range(&self) -> (f64, f64) {
        (self.pka - 1.0, self.pka + 1.0)
    }
}

pub static BUFFER_SYSTEMS: Lazy<Vec<BufferSystem>> = Lazy::new(|| {
    vec![
        BufferSystem::new(
            "acetate",
            ("Acetic acid", "CH3COOH", 60.05),
            ("Sodium acetate", "CH3COONa", 82.03),
            4.76,
        ),
        BufferSystem::new(
            "formate",
            ("Formic acid", "HCOOH", 46.03),
            ("Sodium formate", "HCOONa", 68.01),
            3.75,
        ),
        BufferSystem::new(
            "phosphate",
            ("Sodium dihydrogen phosphate", "NaH2PO4", 119.98),
            ("Disodium hydrogen phosphate", "Na2HPO4", 141.96),
            7.21,
        ),
        BufferSystem::new(
            "tris",
            ("Tris hydrochloride", "Tris-HCl", 157.60),
            ("Tris base", "Tris", 121.14),
            8.07,
        ),
        BufferSystem::new(
            "ammonia",
            ("Ammonium chloride", "NH4Cl", 53.49),
            ("Ammonia", "NH3", 17.03),
            9.25,
        ),
        BufferSystem::new(
            "carbonate",
            ("Sodium bicarbonate", "NaHCO3", 84.01),
            ("Sodium carbonate", "Na2CO3", 105.99),
            10.33,
        ),
    ]
});

/// Look up a buffer system by id
pub fn buffer_system(id: &str) -> ChemResult<&'static BufferSystem> {
    BUFFER_SYSTEMS
        .iter()
        .find(|b| b.id == id)
        .ok_or_else(|| ChemError::not_found("Buffer system", id))
}

/// Buffer systems able to hold a target pH (pKa within ±1)
pub fn systems_for_ph(target_ph: f64) -> Vec<&'static BufferSystem> {
    BUFFER_SYSTEMS
        .iter()
        .filter(|b| {
            let (low, high) = b.effective_range();
            target_ph >= low && target_ph <= high
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let acetate = buffer_system("acetate").unwrap();
        assert_eq!(acetate.pka, 4.76);
        assert!(buffer_system("citrate").is_err());
    }

    #[test]
    fn test_systems_for_ph() {
        let ids: Vec<&str> = systems_for_ph(7.4).iter().map(|b| b.id.as_str()).collect();
        assert!(ids.contains(&"phosphate"));
        assert!(ids.contains(&"tris"));
        assert!(!ids.contains(&"acetate"));
    }
}
