//! Balanced two-reactant reactions for the limiting reactant game.

use once_cell::sync::Lazy;

use crate::calculations::stoichiometry::{Reaction, ReactionSpecies};
use crate::errors::{ChemError, ChemResult};

fn reaction(id: &str, reactant1: ReactionSpecies, reactant2: ReactionSpecies, products: Vec<ReactionSpecies>) -> Reaction {
    Reaction {
        id: id.to_string(),
        reactant1,
        reactant2,
        products,
    }
}

pub static REACTIONS: Lazy<Vec<Reaction>> = Lazy::new(|| {
    vec![
        reaction(
            "water",
            ReactionSpecies::new("H2", 2, "#FFFFFF"),
            ReactionSpecies::new("O2", 1, "#FF4444"),
            vec![ReactionSpecies::new("H2O", 2, "#3399FF")],
        ),
        reaction(
            "ammonia",
            ReactionSpecies::new("N2", 1, "#3355FF"),
            ReactionSpecies::new("H2", 3, "#FFFFFF"),
            vec![ReactionSpecies::new("NH3", 2, "#88CCFF")],
        ),
        reaction(
            "hydrogen_chloride",
            ReactionSpecies::new("H2", 1, "#FFFFFF"),
            ReactionSpecies::new("Cl2", 1, "#66DD66"),
            vec![ReactionSpecies::new("HCl", 2, "#AAEEAA")],
        ),
        reaction(
            "methane_combustion",
            ReactionSpecies::new("CH4", 1, "#555555"),
            ReactionSpecies::new("O2", 2, "#FF4444"),
            vec![
                ReactionSpecies::new("CO2", 1, "#999999"),
                ReactionSpecies::new("H2O", 2, "#3399FF"),
            ],
        ),
        reaction(
            "iron_oxide",
            ReactionSpecies::new("Fe", 4, "#B7410E"),
            ReactionSpecies::new("O2", 3, "#FF4444"),
            vec![ReactionSpecies::new("Fe2O3", 2, "#8B4513")],
        ),
        reaction(
            "carbon_monoxide",
            ReactionSpecies::new("C", 2, "#222222"),
            ReactionSpecies::new("O2", 1, "#FF4444"),
            vec![ReactionSpecies::new("CO", 2, "#777777")],
        ),
    ]
});

pub fn reaction_by_id(id: &str) -> ChemResult<&'static Reaction> {
    REACTIONS
        .iter()
        .find(|r| r.id == id)
        .ok_or_else(|| ChemError::not_found("Reaction", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::stoichiometry::calculate_correct_answer;

    #[test]
    fn test_lookup() {
        let water = reaction_by_id("water").unwrap();
        assert_eq!(water.equation(), "2H2 + O2 → 2H2O");
        assert!(reaction_by_id("fusion").is_err());
    }

    #[test]
    fn test_ids_unique_and_coefficients_positive() {
        let mut ids: Vec<&str> = REACTIONS.iter().map(|r| r.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), REACTIONS.len());
        for r in REACTIONS.iter() {
            assert!(r.reactant1.coefficient > 0 && r.reactant2.coefficient > 0);
            assert!(r.products.iter().all(|p| p.coefficient > 0));
        }
    }

    #[test]
    fn test_methane_products() {
        let answer = calculate_correct_answer(reaction_by_id("methane_combustion").unwrap(), 3, 4);
        assert_eq!(answer.limiting_reactant, "O2");
        assert_eq!(answer.product_amount("CO2"), Some(2.0));
        assert_eq!(answer.product_amount("H2O"), Some(4.0));
        assert_eq!(answer.excess_remaining, 1.0);
    }
}
