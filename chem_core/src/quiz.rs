//! # Dimensional Analysis Quiz
//!
//! Question bank entries are a tagged union, one variant per question kind,
//! each with its own typed response. Checking a response against the wrong
//! question kind is an input error.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "kind": "cancellation_prediction",
//!   "id": "q7",
//!   "prompt": "What unit remains?",
//!   "current_unit": "km/klst",
//!   "factor": { "num": "1000 m", "den": "1 km", "units": ["m", "km"] }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::dimensional::{predict_resulting_unit, ConversionFactor};
use crate::errors::{ChemError, ChemResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuizQuestion {
    /// Pick which written equivalence is true, e.g. "1 km = 1000 m"
    Equivalence {
        id: String,
        prompt: String,
        options: Vec<String>,
        correct_index: usize,
    },
    /// Predict the unit left after applying a factor
    CancellationPrediction {
        id: String,
        prompt: String,
        current_unit: String,
        factor: ConversionFactor,
    },
    /// Choose the factor that takes `from_unit` to `to_unit`
    FactorSelection {
        id: String,
        prompt: String,
        from_unit: String,
        to_unit: String,
        options: Vec<ConversionFactor>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuizResponse {
    Equivalence { choice: usize },
    CancellationPrediction { unit: String },
    FactorSelection { choice: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizOutcome {
    pub correct: bool,
    /// Canonical answer in display form
    pub expected: String,
}

/// Whitespace-insensitive unit comparison; `*` and `.` count as `·`
fn normalize_unit(unit: &str) -> String {
    unit.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == '*' || c == '.' { '·' } else { c })
        .collect()
}

fn display_factor(factor: &ConversionFactor) -> String {
    format!("{} / {}", factor.num, factor.den)
}

impl QuizQuestion {
    pub fn id(&self) -> &str {
        match self {
            QuizQuestion::Equivalence { id, .. }
            | QuizQuestion::CancellationPrediction { id, .. }
            | QuizQuestion::FactorSelection { id, .. } => id,
        }
    }

    pub fn prompt(&self) -> &str {
        match self {
            QuizQuestion::Equivalence { prompt, .. }
            | QuizQuestion::CancellationPrediction { prompt, .. }
            | QuizQuestion::FactorSelection { prompt, .. } => prompt,
        }
    }

    /// Index of the factor that cancels `from_unit` and leaves `to_unit`
    fn correct_factor_index(from_unit: &str, to_unit: &str, options: &[ConversionFactor]) -> Option<usize> {
        options
            .iter()
            .position(|f| normalize_unit(&predict_resulting_unit(from_unit, f)) == normalize_unit(to_unit))
    }

    pub fn check(&self, response: &QuizResponse) -> ChemResult<QuizOutcome> {
        match (self, response) {
            (
                QuizQuestion::Equivalence {
                    options, correct_index, ..
                },
                QuizResponse::Equivalence { choice },
            ) => {
                let expected = options.get(*correct_index).cloned().ok_or_else(|| {
                    ChemError::invalid_input("correct_index", correct_index.to_string(), "Index outside the options")
                })?;
                Ok(QuizOutcome {
                    correct: choice == correct_index,
                    expected,
                })
            }
            (
                QuizQuestion::CancellationPrediction {
                    current_unit, factor, ..
                },
                QuizResponse::CancellationPrediction { unit },
            ) => {
                let expected = predict_resulting_unit(current_unit, factor);
                Ok(QuizOutcome {
                    correct: normalize_unit(unit) == normalize_unit(&expected),
                    expected,
                })
            }
            (
                QuizQuestion::FactorSelection {
                    from_unit,
                    to_unit,
                    options,
                    ..
                },
                QuizResponse::FactorSelection { choice },
            ) => {
                let index = Self::correct_factor_index(from_unit, to_unit, options).ok_or_else(|| {
                    ChemError::invalid_input("options", self.id(), "No option converts between the given units")
                })?;
                Ok(QuizOutcome {
                    correct: *choice == index,
                    expected: display_factor(&options[index]),
                })
            }
            _ => Err(ChemError::invalid_input(
                "response",
                self.id(),
                "Response kind does not match the question kind",
            )),
        }
    }
}
