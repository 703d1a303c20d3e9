//! # Limiting Reactant Calculation
//!
//! Given how many particles of each reactant the student placed, work out
//! which reactant runs out first, how many times the reaction runs, what is
//! formed and what is left over.
//!
//! ## Tie-break
//!
//! When both reactants would allow exactly the same number of reaction runs,
//! reactant 1 is reported as limiting and reactant 2 as excess. Existing
//! answer keys depend on this ordering.
//!
//! ## Example
//!
//! ```rust
//! use chem_core::calculations::stoichiometry::{calculate_correct_answer, Reaction, ReactionSpecies};
//!
//! let reaction = Reaction {
//!     id: "water".to_string(),
//!     reactant1: ReactionSpecies::new("H2", 2, "#FFFFFF"),
//!     reactant2: ReactionSpecies::new("O2", 1, "#FF0000"),
//!     products: vec![ReactionSpecies::new("H2O", 2, "#3399FF")],
//! };
//! let answer = calculate_correct_answer(&reaction, 4, 5);
//! assert_eq!(answer.limiting_reactant, "H2");
//! assert_eq!(answer.excess_remaining, 3.0);
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

/// Numeric answers are compared with this absolute tolerance
const ANSWER_EPSILON: f64 = 1e-9;

/// One species of a balanced reaction as shown in the particle game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionSpecies {
    /// Opaque formula identifier (not chemically validated)
    pub formula: String,
    /// Stoichiometric coefficient (positive integer)
    pub coefficient: u32,
    /// Display color for the particle
    pub color: String,
}

impl ReactionSpecies {
    pub fn new(formula: impl Into<String>, coefficient: u32, color: impl Into<String>) -> Self {
        ReactionSpecies {
            formula: formula.into(),
            coefficient,
            color: color.into(),
        }
    }
}

/// A balanced two-reactant reaction.
///
/// ## JSON Example
///
/// ```json
/// {
///   "id": "water",
///   "reactant1": { "formula": "H2", "coefficient": 2, "color": "#FFFFFF" },
///   "reactant2": { "formula": "O2", "coefficient": 1, "color": "#FF0000" },
///   "products": [{ "formula": "H2O", "coefficient": 2, "color": "#3399FF" }]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    pub id: String,
    pub reactant1: ReactionSpecies,
    pub reactant2: ReactionSpecies,
    pub products: Vec<ReactionSpecies>,
}

impl Reaction {
    /// Equation text, e.g. `2H2 + O2 → 2H2O`
    pub fn equation(&self) -> String {
        let side = |species: &[&ReactionSpecies]| {
            species
                .iter()
                .map(|s| {
                    if s.coefficient == 1 {
                        s.formula.clone()
                    } else {
                        format!("{}{}", s.coefficient, s.formula)
                    }
                })
                .collect::<Vec<_>>()
                .join(" + ")
        };
        let products: Vec<&ReactionSpecies> = self.products.iter().collect();
        format!("{} → {}", side(&[&self.reactant1, &self.reactant2][..]), side(&products[..]))
    }
}

/// Amount of one product formed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductAmount {
    pub formula: String,
    pub amount: f64,
}

/// Canonical limiting-reactant answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoichiometryAnswer {
    pub limiting_reactant: String,
    pub excess_reactant: String,
    pub times_reaction_runs: f64,
    /// One entry per product, in reaction order
    pub products_formed: Vec<ProductAmount>,
    pub excess_remaining: f64,
    pub r1_used: f64,
    pub r2_used: f64,
}

impl StoichiometryAnswer {
    /// Amount formed of a product, by formula
    pub fn product_amount(&self, formula: &str) -> Option<f64> {
        self.products_formed.iter().find(|p| p.formula == formula).map(|p| p.amount)
    }
}

/// Compute the canonical answer for a particle count of each reactant.
pub fn calculate_correct_answer(reaction: &Reaction, r1_count: u32, r2_count: u32) -> StoichiometryAnswer {
    let r1 = &reaction.reactant1;
    let r2 = &reaction.reactant2;

    let times_from_r1 = r1_count as f64 / r1.coefficient as f64;
    let times_from_r2 = r2_count as f64 / r2.coefficient as f64;

    // Equal runs resolve to reactant 1 limiting
    let r1_limits = times_from_r1 <= times_from_r2;
    let times_reaction_runs = times_from_r1.min(times_from_r2);

    let products_formed = reaction
        .products
        .iter()
        .map(|p| ProductAmount {
            formula: p.formula.clone(),
            amount: times_reaction_runs * p.coefficient as f64,
        })
        .collect();

    let r1_used = times_reaction_runs * r1.coefficient as f64;
    let r2_used = times_reaction_runs * r2.coefficient as f64;

    let (limiting, excess, excess_remaining) = if r1_limits {
        (r1, r2, r2_count as f64 - r2_used)
    } else {
        (r2, r1, r1_count as f64 - r1_used)
    };

    debug!(
        "{}: limiting {} after {} runs, {} {} left",
        reaction.id, limiting.formula, times_reaction_runs, excess_remaining, excess.formula
    );

    StoichiometryAnswer {
        limiting_reactant: limiting.formula.clone(),
        excess_reactant: excess.formula.clone(),
        times_reaction_runs,
        products_formed,
        excess_remaining,
        r1_used,
        r2_used,
    }
}

/// A student's answer as typed into the form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoichiometryUserAnswer {
    pub limiting_reactant: String,
    /// Product amounts, in reaction product order
    pub products: Vec<String>,
    pub excess_remaining: String,
}

/// Per-field grading of a [`StoichiometryUserAnswer`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerValidation {
    pub limiting_correct: bool,
    pub products_correct: Vec<bool>,
    pub excess_correct: bool,
    pub all_correct: bool,
}

/// Grade a typed answer field by field against the canonical answer.
pub fn validate_answer(
    user: &StoichiometryUserAnswer,
    correct: &StoichiometryAnswer,
    products: &[ReactionSpecies],
) -> AnswerValidation {
    let limiting_correct = user.limiting_reactant.trim() == correct.limiting_reactant;

    let products_correct: Vec<bool> = products
        .iter()
        .enumerate()
        .map(|(i, product)| {
            let expected = correct.product_amount(&product.formula);
            match (user.products.get(i), expected) {
                (Some(typed), Some(expected)) => numeric_field_matches(typed, expected),
                _ => false,
            }
        })
        .collect();

    let excess_correct = numeric_field_matches(&user.excess_remaining, correct.excess_remaining);

    let all_correct = limiting_correct && excess_correct && products_correct.iter().all(|&ok| ok);

    AnswerValidation {
        limiting_correct,
        products_correct,
        excess_correct,
        all_correct,
    }
}

fn numeric_field_matches(typed: &str, expected: f64) -> bool {
    typed
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .map(|value| (value - expected).abs() < ANSWER_EPSILON)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn water() -> Reaction {
        Reaction {
            id: "water".to_string(),
            reactant1: ReactionSpecies::new("H2", 2, "#FFFFFF"),
            reactant2: ReactionSpecies::new("O2", 1, "#FF0000"),
            products: vec![ReactionSpecies::new("H2O", 2, "#3399FF")],
        }
    }

    #[test]
    fn test_water_formation() {
        let answer = calculate_correct_answer(&water(), 4, 5);
        assert_eq!(answer.limiting_reactant, "H2");
        assert_eq!(answer.excess_reactant, "O2");
        assert_eq!(answer.times_reaction_runs, 2.0);
        assert_eq!(answer.product_amount("H2O"), Some(4.0));
        assert_eq!(answer.excess_remaining, 3.0);
        assert_eq!(answer.r1_used, 4.0);
        assert_eq!(answer.r2_used, 2.0);
    }

    #[test]
    fn test_second_reactant_limiting() {
        let answer = calculate_correct_answer(&water(), 10, 2);
        assert_eq!(answer.limiting_reactant, "O2");
        assert_eq!(answer.excess_reactant, "H2");
        assert_eq!(answer.excess_remaining, 6.0);
        assert_eq!(answer.product_amount("H2O"), Some(4.0));
    }

    #[test]
    fn test_tie_reports_reactant1_limiting() {
        let answer = calculate_correct_answer(&water(), 4, 2);
        assert_eq!(answer.limiting_reactant, "H2");
        assert_eq!(answer.excess_reactant, "O2");
        assert_eq!(answer.excess_remaining, 0.0);
    }

    #[test]
    fn test_validate_answer() {
        let reaction = water();
        let correct = calculate_correct_answer(&reaction, 4, 5);

        let user = StoichiometryUserAnswer {
            limiting_reactant: "H2".to_string(),
            products: vec!["4".to_string()],
            excess_remaining: " 3 ".to_string(),
        };
        let result = validate_answer(&user, &correct, &reaction.products);
        assert!(result.all_correct);

        let wrong = StoichiometryUserAnswer {
            excess_remaining: "2".to_string(),
            ..user
        };
        let result = validate_answer(&wrong, &correct, &reaction.products);
        assert!(result.limiting_correct);
        assert_eq!(result.products_correct, vec![true]);
        assert!(!result.excess_correct);
        assert!(!result.all_correct);
    }

    #[test]
    fn test_validate_rejects_unparseable_and_missing() {
        let reaction = water();
        let correct = calculate_correct_answer(&reaction, 4, 5);
        let user = StoichiometryUserAnswer {
            limiting_reactant: "O2".to_string(),
            products: vec![],
            excess_remaining: "three".to_string(),
        };
        let result = validate_answer(&user, &correct, &reaction.products);
        assert!(!result.limiting_correct);
        assert_eq!(result.products_correct, vec![false]);
        assert!(!result.excess_correct);
    }

    #[test]
    fn test_equation_text() {
        assert_eq!(water().equation(), "2H2 + O2 → 2H2O");
    }
}
