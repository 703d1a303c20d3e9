//! Redox reactions with their half-reactions and canonical identification.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::calculations::redox::{HalfReaction, RedoxIdentification};
use crate::errors::{ChemError, ChemResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedoxReaction {
    pub id: String,
    pub equation: String,
    pub identification: RedoxIdentification,
    pub oxidation: HalfReaction,
    pub reduction: HalfReaction,
}

fn redox(id: &str, equation: &str, (oxidized, ox_half, ox_e): (&str, &str, u32), (reduced, red_half, red_e): (&str, &str, u32)) -> RedoxReaction {
    RedoxReaction {
        id: id.to_string(),
        equation: equation.to_string(),
        identification: RedoxIdentification {
            oxidized: oxidized.to_string(),
            reduced: reduced.to_string(),
        },
        oxidation: HalfReaction {
            equation: ox_half.to_string(),
            electrons: ox_e,
        },
        reduction: HalfReaction {
            equation: red_half.to_string(),
            electrons: red_e,
        },
    }
}

pub static REDOX_REACTIONS: Lazy<Vec<RedoxReaction>> = Lazy::new(|| {
    vec![
        redox(
            "zinc_copper",
            "Zn + Cu²⁺ → Zn²⁺ + Cu",
            ("Zn", "Zn → Zn²⁺ + 2e⁻", 2),
            ("Cu²⁺", "Cu²⁺ + 2e⁻ → Cu", 2),
        ),
        redox(
            "copper_silver",
            "Cu + 2Ag⁺ → Cu²⁺ + 2Ag",
            ("Cu", "Cu → Cu²⁺ + 2e⁻", 2),
            ("Ag⁺", "Ag⁺ + e⁻ → Ag", 1),
        ),
        redox(
            "aluminium_copper",
            "2Al + 3Cu²⁺ → 2Al³⁺ + 3Cu",
            ("Al", "Al → Al³⁺ + 3e⁻", 3),
            ("Cu²⁺", "Cu²⁺ + 2e⁻ → Cu", 2),
        ),
        redox(
            "permanganate_iron",
            "MnO₄⁻ + 5Fe²⁺ + 8H⁺ → Mn²⁺ + 5Fe³⁺ + 4H₂O",
            ("Fe²⁺", "Fe²⁺ → Fe³⁺ + e⁻", 1),
            ("MnO₄⁻", "MnO₄⁻ + 8H⁺ + 5e⁻ → Mn²⁺ + 4H₂O", 5),
        ),
        redox(
            "magnesium_hydrogen",
            "Mg + 2H⁺ → Mg²⁺ + H₂",
            ("Mg", "Mg → Mg²⁺ + 2e⁻", 2),
            ("H⁺", "2H⁺ + 2e⁻ → H₂", 2),
        ),
    ]
});

pub fn redox_reaction(id: &str) -> ChemResult<&'static RedoxReaction> {
    REDOX_REACTIONS
        .iter()
        .find(|r| r.id == id)
        .ok_or_else(|| ChemError::not_found("Redox reaction", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::redox::balance_half_reactions;

    #[test]
    fn test_aluminium_copper_balances() {
        let reaction = redox_reaction("aluminium_copper").unwrap();
        let balanced = balance_half_reactions(&reaction.oxidation, &reaction.reduction).unwrap();
        assert_eq!((balanced.oxidation_multiplier, balanced.reduction_multiplier), (2, 3));
        assert_eq!(balanced.electrons_transferred, 6);
    }

    #[test]
    fn test_every_reaction_balances() {
        for reaction in REDOX_REACTIONS.iter() {
            let balanced = balance_half_reactions(&reaction.oxidation, &reaction.reduction).unwrap();
            assert_eq!(
                reaction.oxidation.electrons * balanced.oxidation_multiplier,
                reaction.reduction.electrons * balanced.reduction_multiplier
            );
        }
    }
}
