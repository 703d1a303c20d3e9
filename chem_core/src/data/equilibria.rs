//! Reversible reactions for the Le Chatelier game.

use once_cell::sync::Lazy;

use crate::calculations::equilibrium::{Equilibrium, EquilibriumSpecies, Phase};
use crate::errors::{ChemError, ChemResult};

fn sp(formula: &str, coefficient: u32, phase: Phase) -> EquilibriumSpecies {
    EquilibriumSpecies::new(formula, coefficient, phase)
}

pub static EQUILIBRIA: Lazy<Vec<Equilibrium>> = Lazy::new(|| {
    use Phase::*;
    vec![
        Equilibrium::new(
            "haber",
            "Haber process",
            vec![sp("N2", 1, Gas), sp("H2", 3, Gas)],
            vec![sp("NH3", 2, Gas)],
            -92.0,
        ),
        Equilibrium::new(
            "dinitrogen_tetroxide",
            "Dinitrogen tetroxide dissociation",
            vec![sp("N2O4", 1, Gas)],
            vec![sp("NO2", 2, Gas)],
            57.2,
        ),
        Equilibrium::new(
            "hydrogen_iodide",
            "Hydrogen iodide formation",
            vec![sp("H2", 1, Gas), sp("I2", 1, Gas)],
            vec![sp("HI", 2, Gas)],
            -9.4,
        ),
        Equilibrium::new(
            "contact",
            "Contact process",
            vec![sp("SO2", 2, Gas), sp("O2", 1, Gas)],
            vec![sp("SO3", 2, Gas)],
            -198.0,
        ),
        Equilibrium::new(
            "limestone",
            "Limestone decomposition",
            vec![sp("CaCO3", 1, Solid)],
            vec![sp("CaO", 1, Solid), sp("CO2", 1, Gas)],
            178.0,
        ),
        Equilibrium::new(
            "cobalt_chloride",
            "Cobalt chloride complex",
            vec![sp("[Co(H2O)6]²⁺", 1, Aqueous), sp("Cl⁻", 4, Aqueous)],
            vec![sp("[CoCl4]²⁻", 1, Aqueous), sp("H2O", 6, Liquid)],
            50.0,
        ),
        Equilibrium::new(
            "iron_thiocyanate",
            "Iron(III) thiocyanate",
            vec![sp("Fe³⁺", 1, Aqueous), sp("SCN⁻", 1, Aqueous)],
            vec![sp("FeSCN²⁺", 1, Aqueous)],
            -5.0,
        ),
    ]
});

pub fn equilibrium_by_id(id: &str) -> ChemResult<&'static Equilibrium> {
    EQUILIBRIA
        .iter()
        .find(|e| e.id == id)
        .ok_or_else(|| ChemError::not_found("Equilibrium", id))
}
