//! Weighted composite score.

use serde::{Deserialize, Serialize};

use crate::errors::{ChemError, ChemResult};

/// Component weights; the defaults sum to 1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub answer: f64,
    pub method: f64,
    pub explanation: f64,
    pub efficiency: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        ScoreWeights {
            answer: 0.4,
            method: 0.3,
            explanation: 0.2,
            efficiency: 0.1,
        }
    }
}

impl ScoreWeights {
    pub fn validate(&self) -> ChemResult<()> {
        let weights = [
            ("answer", self.answer),
            ("method", self.method),
            ("explanation", self.explanation),
            ("efficiency", self.efficiency),
        ];
        for (name, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ChemError::invalid_input(
                    format!("score_weights.{}", name),
                    weight.to_string(),
                    "Weight must be a non-negative number",
                ));
            }
        }
        Ok(())
    }
}

/// Weighted sum of the four component scores, clamped to [0, 1].
///
/// ```rust
/// use chem_core::scoring::{calculate_composite_score, ScoreWeights};
///
/// let score = calculate_composite_score(1.0, 1.0, 1.0, 0.0, &ScoreWeights::default());
/// assert!((score - 0.9).abs() < 1e-12);
/// ```
pub fn calculate_composite_score(answer: f64, method: f64, explanation: f64, efficiency: f64, weights: &ScoreWeights) -> f64 {
    let score = answer * weights.answer
        + method * weights.method
        + explanation * weights.explanation
        + efficiency * weights.efficiency;
    score.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_weights() {
        let w = ScoreWeights::default();
        assert_relative_eq!(calculate_composite_score(1.0, 1.0, 1.0, 0.0, &w), 0.9, epsilon = 1e-12);
        assert_relative_eq!(calculate_composite_score(0.5, 0.8, 0.6, 0.3, &w), 0.59, epsilon = 1e-12);
    }

    #[test]
    fn test_clamped() {
        let heavy = ScoreWeights {
            answer: 1.0,
            method: 1.0,
            explanation: 1.0,
            efficiency: 1.0,
        };
        assert_eq!(calculate_composite_score(1.0, 1.0, 1.0, 1.0, &heavy), 1.0);
        assert_eq!(calculate_composite_score(-1.0, 0.0, 0.0, 0.0, &ScoreWeights::default()), 0.0);
    }

    #[test]
    fn test_validate() {
        assert!(ScoreWeights::default().validate().is_ok());
        let bad = ScoreWeights {
            method: -0.1,
            ..ScoreWeights::default()
        };
        assert!(bad.validate().is_err());
    }
}
