//! # Chemistry Calculations
//!
//! One module per game. Each calculator is a pure function over
//! JSON-serializable inputs:
//!
//! - [`gas_law`] - Ideal and combined gas law solver
//! - [`stoichiometry`] - Limiting reactant
//! - [`buffer`] - Henderson–Hasselbalch buffer recipes
//! - [`titration`] - Titration pH, curves and indicators
//! - [`equilibrium`] - Le Chatelier shift prediction
//! - [`redox`] - Electron balancing and species comparison
//! - [`thermodynamics`] - Gibbs free energy
//! - [`dimensional`] - Unit cancellation
//!
//! [`CalculationRequest`] wraps every calculator in one tagged enum so a
//! caller can drive the engine from JSON and get a [`CalculationOutput`]
//! back. [`evaluate_with`] fills omitted tolerances and weights from
//! [`Settings`].
//!
//! ## JSON Example
//!
//! ```rust
//! use chem_core::calculations::{evaluate, CalculationOutput, CalculationRequest};
//!
//! let request: CalculationRequest = serde_json::from_str(
//!     r#"{ "type": "gas_law", "known": { "n": 1.0, "T": 273.15, "V": 22.414 }, "solve_for": "P" }"#,
//! ).unwrap();
//! match evaluate(&request).unwrap() {
//!     CalculationOutput::Value { value, unit } => {
//!         assert!((value - 1.0).abs() < 0.001);
//!         assert_eq!(unit, "atm");
//!     }
//!     other => panic!("unexpected output {:?}", other),
//! }
//! ```

pub mod buffer;
pub mod dimensional;
pub mod equilibrium;
pub mod gas_law;
pub mod redox;
pub mod stoichiometry;
pub mod thermodynamics;
pub mod titration;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::data::{equilibria, reactions};
use crate::errors::ChemResult;
use crate::numeric::{calculate_error, check_answer, count_significant_figures};
use crate::scoring::{calculate_composite_score, score_explanation, ScoreWeights};
use crate::settings::Settings;

pub use buffer::{BufferRecipe, BufferRecipeInput, StockDilution, StockDilutionInput};
pub use dimensional::ConversionFactor;
pub use equilibrium::{ShiftResult, Stress};
pub use gas_law::{CombinedTarget, GasKnowns, GasState, GasVariable};
pub use stoichiometry::StoichiometryAnswer;
pub use thermodynamics::Spontaneity;
pub use titration::{CurvePoint, TitrationSetup};

/// Every calculator input, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CalculationRequest {
    GasLaw {
        known: GasKnowns,
        solve_for: GasVariable,
    },
    CombinedGasLaw {
        initial: GasState,
        #[serde(rename = "final")]
        final_state: GasState,
        solve_for: CombinedTarget,
    },
    /// Limiting reactant for a reaction from the reaction table
    Stoichiometry {
        reaction_id: String,
        r1_count: u32,
        r2_count: u32,
    },
    BufferRecipe(BufferRecipeInput),
    StockDilution(StockDilutionInput),
    TitrationPh {
        setup: TitrationSetup,
        titrant_volume_ml: f64,
    },
    TitrationCurve {
        setup: TitrationSetup,
        max_volume_ml: f64,
        step_ml: f64,
    },
    /// Shift of an equilibrium from the equilibrium table
    EquilibriumShift {
        equilibrium_id: String,
        stress: Stress,
    },
    RedoxMultipliers {
        electrons_ox: u32,
        electrons_red: u32,
    },
    DeltaG {
        delta_h_kj: f64,
        delta_s_j_per_k: f64,
        temperature_k: f64,
    },
    PredictUnit {
        current_unit: String,
        factor: ConversionFactor,
    },
    SignificantFigures {
        value: String,
    },
    CompositeScore {
        answer: f64,
        method: f64,
        explanation: f64,
        #[serde(default)]
        efficiency: f64,
        /// Falls back to the configured weights
        #[serde(default, skip_serializing_if = "Option::is_none")]
        weights: Option<ScoreWeights>,
    },
    /// Compare a numeric answer against the correct value
    CheckAnswer {
        user_answer: f64,
        correct_answer: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tolerance_percent: Option<f64>,
    },
    ScoreExplanation {
        text: String,
        #[serde(default)]
        quality_keywords: Vec<String>,
        #[serde(default)]
        type_keywords: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_length: Option<usize>,
    },
}

impl CalculationRequest {
    /// Request type name as it appears in JSON
    pub fn request_type(&self) -> &'static str {
        match self {
            CalculationRequest::GasLaw { .. } => "gas_law",
            CalculationRequest::CombinedGasLaw { .. } => "combined_gas_law",
            CalculationRequest::Stoichiometry { .. } => "stoichiometry",
            CalculationRequest::BufferRecipe(_) => "buffer_recipe",
            CalculationRequest::StockDilution(_) => "stock_dilution",
            CalculationRequest::TitrationPh { .. } => "titration_ph",
            CalculationRequest::TitrationCurve { .. } => "titration_curve",
            CalculationRequest::EquilibriumShift { .. } => "equilibrium_shift",
            CalculationRequest::RedoxMultipliers { .. } => "redox_multipliers",
            CalculationRequest::DeltaG { .. } => "delta_g",
            CalculationRequest::PredictUnit { .. } => "predict_unit",
            CalculationRequest::SignificantFigures { .. } => "significant_figures",
            CalculationRequest::CompositeScore { .. } => "composite_score",
            CalculationRequest::CheckAnswer { .. } => "check_answer",
            CalculationRequest::ScoreExplanation { .. } => "score_explanation",
        }
    }
}

/// Result of [`evaluate`], tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CalculationOutput {
    /// A single number with its unit
    Value { value: f64, unit: String },
    Stoichiometry(StoichiometryAnswer),
    BufferRecipe(BufferRecipe),
    StockDilution(StockDilution),
    TitrationCurve { points: Vec<CurvePoint> },
    Shift(ShiftResult),
    Multipliers { oxidation: u32, reduction: u32 },
    DeltaG { delta_g: f64, spontaneity: Spontaneity },
    Unit { unit: String },
    SignificantFigures { count: usize },
    Score { score: f64 },
    AnswerCheck { correct: bool, error_percent: f64 },
}

fn value(value: f64, unit: &str) -> CalculationOutput {
    CalculationOutput::Value {
        value,
        unit: unit.to_string(),
    }
}

/// Run one request with default [`Settings`].
pub fn evaluate(request: &CalculationRequest) -> ChemResult<CalculationOutput> {
    evaluate_with(request, &Settings::default())
}

/// Run one request. Optional tolerances, weights and lengths left out of
/// the request come from `settings`.
pub fn evaluate_with(request: &CalculationRequest, settings: &Settings) -> ChemResult<CalculationOutput> {
    debug!("Evaluating {} request", request.request_type());
    let output = match request {
        CalculationRequest::GasLaw { known, solve_for } => {
            value(gas_law::solve_gas_law(known, *solve_for)?, solve_for.unit())
        }
        CalculationRequest::CombinedGasLaw {
            initial,
            final_state,
            solve_for,
        } => {
            let unit = match solve_for {
                CombinedTarget::P2 => "atm",
                CombinedTarget::V2 => "L",
                CombinedTarget::T2 => "K",
            };
            value(gas_law::solve_combined_gas_law(initial, final_state, *solve_for)?, unit)
        }
        CalculationRequest::Stoichiometry {
            reaction_id,
            r1_count,
            r2_count,
        } => {
            let reaction = reactions::reaction_by_id(reaction_id)?;
            CalculationOutput::Stoichiometry(stoichiometry::calculate_correct_answer(reaction, *r1_count, *r2_count))
        }
        CalculationRequest::BufferRecipe(input) => CalculationOutput::BufferRecipe(buffer::calculate_buffer_recipe(input)?),
        CalculationRequest::StockDilution(input) => {
            CalculationOutput::StockDilution(buffer::calculate_stock_dilution(input)?)
        }
        CalculationRequest::TitrationPh {
            setup,
            titrant_volume_ml,
        } => value(titration::calculate_ph(setup, *titrant_volume_ml)?, "pH"),
        CalculationRequest::TitrationCurve {
            setup,
            max_volume_ml,
            step_ml,
        } => CalculationOutput::TitrationCurve {
            points: titration::titration_curve(setup, *max_volume_ml, *step_ml)?,
        },
        CalculationRequest::EquilibriumShift { equilibrium_id, stress } => {
            let reaction = equilibria::equilibrium_by_id(equilibrium_id)?;
            CalculationOutput::Shift(equilibrium::calculate_shift(reaction, stress))
        }
        CalculationRequest::RedoxMultipliers {
            electrons_ox,
            electrons_red,
        } => {
            let (oxidation, reduction) = redox::calculate_multipliers(*electrons_ox, *electrons_red);
            CalculationOutput::Multipliers { oxidation, reduction }
        }
        CalculationRequest::DeltaG {
            delta_h_kj,
            delta_s_j_per_k,
            temperature_k,
        } => {
            let delta_g = thermodynamics::calculate_delta_g(*delta_h_kj, *delta_s_j_per_k, *temperature_k);
            CalculationOutput::DeltaG {
                delta_g,
                spontaneity: thermodynamics::get_spontaneity(delta_g),
            }
        }
        CalculationRequest::PredictUnit { current_unit, factor } => CalculationOutput::Unit {
            unit: dimensional::predict_resulting_unit(current_unit, factor),
        },
        CalculationRequest::SignificantFigures { value } => CalculationOutput::SignificantFigures {
            count: count_significant_figures(value),
        },
        CalculationRequest::CompositeScore {
            answer,
            method,
            explanation,
            efficiency,
            weights,
        } => {
            let weights = weights.as_ref().unwrap_or(&settings.score_weights);
            weights.validate()?;
            CalculationOutput::Score {
                score: calculate_composite_score(*answer, *method, *explanation, *efficiency, weights),
            }
        }
        CalculationRequest::CheckAnswer {
            user_answer,
            correct_answer,
            tolerance_percent,
        } => {
            let tolerance = tolerance_percent.unwrap_or(settings.answer_tolerance_percent);
            CalculationOutput::AnswerCheck {
                correct: check_answer(*user_answer, *correct_answer, tolerance),
                error_percent: calculate_error(*user_answer, *correct_answer),
            }
        }
        CalculationRequest::ScoreExplanation {
            text,
            quality_keywords,
            type_keywords,
            min_length,
        } => {
            let quality: Vec<&str> = quality_keywords.iter().map(String::as_str).collect();
            let specific: Vec<&str> = type_keywords.iter().map(String::as_str).collect();
            let min_length = min_length.unwrap_or(settings.explanation_min_length);
            CalculationOutput::Score {
                score: score_explanation(text, &quality, &specific, min_length),
            }
        }
    };
    Ok(output)
}
