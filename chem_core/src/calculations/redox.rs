//! Redox helpers: electron balancing multipliers and tolerant species comparison.

use serde::{Deserialize, Serialize};

use crate::errors::{ChemError, ChemResult};
use crate::numeric::lcm;

/// Superscript and subscript characters used in charge and count annotations
const ANNOTATION_CHARS: &[char] = &[
    '⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹', '⁺', '⁻', '₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉',
];

/// Smallest integer multipliers `(ox, red)` that equalize electrons transferred.
///
/// ```rust
/// use chem_core::calculations::redox::calculate_multipliers;
///
/// assert_eq!(calculate_multipliers(2, 1), (1, 2));
/// assert_eq!(calculate_multipliers(3, 2), (2, 3));
/// ```
pub fn calculate_multipliers(electrons_ox: u32, electrons_red: u32) -> (u32, u32) {
    let l = lcm(electrons_ox as u64, electrons_red as u64);
    if l == 0 {
        return (0, 0);
    }
    ((l / electrons_ox as u64) as u32, (l / electrons_red as u64) as u32)
}

/// Remove superscript/subscript annotations, trim and lower-case
pub fn strip_charges(species: &str) -> String {
    species
        .chars()
        .filter(|c| !ANNOTATION_CHARS.contains(c))
        .collect::<String>()
        .trim()
        .to_lowercase()
}

/// Which species the student says is oxidized and which is reduced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedoxIdentification {
    pub oxidized: String,
    pub reduced: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentificationResult {
    pub oxidized_correct: bool,
    pub reduced_correct: bool,
    pub all_correct: bool,
}

/// Compare a student's identification against the canonical one, ignoring
/// case and charge annotations.
pub fn check_identification(user_oxidized: &str, user_reduced: &str, correct: &RedoxIdentification) -> IdentificationResult {
    let oxidized_correct = strip_charges(user_oxidized) == strip_charges(&correct.oxidized);
    let reduced_correct = strip_charges(user_reduced) == strip_charges(&correct.reduced);
    IdentificationResult {
        oxidized_correct,
        reduced_correct,
        all_correct: oxidized_correct && reduced_correct,
    }
}

/// One half-reaction and the electrons it moves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HalfReaction {
    pub equation: String,
    pub electrons: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalancedRedox {
    pub oxidation_multiplier: u32,
    pub reduction_multiplier: u32,
    pub electrons_transferred: u32,
}

/// Scale two half-reactions so electrons lost equal electrons gained.
pub fn balance_half_reactions(oxidation: &HalfReaction, reduction: &HalfReaction) -> ChemResult<BalancedRedox> {
    for (field, half) in [("oxidation", oxidation), ("reduction", reduction)] {
        if half.electrons == 0 {
            return Err(ChemError::invalid_input(
                field,
                &half.equation,
                "Half-reaction must transfer at least one electron",
            ));
        }
    }
    let (oxidation_multiplier, reduction_multiplier) = calculate_multipliers(oxidation.electrons, reduction.electrons);
    Ok(BalancedRedox {
        oxidation_multiplier,
        reduction_multiplier,
        electrons_transferred: oxidation.electrons * oxidation_multiplier,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multipliers() {
        assert_eq!(calculate_multipliers(2, 1), (1, 2));
        assert_eq!(calculate_multipliers(3, 2), (2, 3));
        assert_eq!(calculate_multipliers(5, 1), (1, 5));
        assert_eq!(calculate_multipliers(2, 2), (1, 1));
        assert_eq!(calculate_multipliers(4, 6), (3, 2));
    }

    #[test]
    fn test_strip_charges() {
        assert_eq!(strip_charges("Fe²⁺"), "fe");
        assert_eq!(strip_charges(" MnO₄⁻ "), "mno");
        assert_eq!(strip_charges("Cu"), "cu");
        assert_eq!(strip_charges("Cr₂O₇²⁻"), "cro");
    }

    #[test]
    fn test_check_identification() {
        let correct = RedoxIdentification {
            oxidized: "Zn".to_string(),
            reduced: "Cu²⁺".to_string(),
        };
        let result = check_identification("zn", "CU", &correct);
        assert!(result.all_correct);

        let swapped = check_identification("Cu²⁺", "Zn", &correct);
        assert!(!swapped.oxidized_correct);
        assert!(!swapped.reduced_correct);
        assert!(!swapped.all_correct);
    }

    #[test]
    fn test_balance_half_reactions() {
        let ox = HalfReaction {
            equation: "Fe²⁺ → Fe³⁺ + e⁻".to_string(),
            electrons: 1,
        };
        let red = HalfReaction {
            equation: "MnO₄⁻ + 8H⁺ + 5e⁻ → Mn²⁺ + 4H₂O".to_string(),
            electrons: 5,
        };
        let balanced = balance_half_reactions(&ox, &red).unwrap();
        assert_eq!(balanced.oxidation_multiplier, 5);
        assert_eq!(balanced.reduction_multiplier, 1);
        assert_eq!(balanced.electrons_transferred, 5);

        let broken = HalfReaction {
            equation: "X → X".to_string(),
            electrons: 0,
        };
        assert!(balance_half_reactions(&broken, &red).is_err());
    }
}
