//! # Buffer Recipe Calculation (Henderson–Hasselbalch)
//!
//! Designs a buffer of a target pH from a weak acid and its conjugate base.
//! The game scaffolds the problem in three levels:
//!
//! 1. **Ratio** - `[A⁻]/[HA] = 10^(pH − pKa)`
//! 2. **Mass** - split the total moles by that ratio and weigh out each compound
//! 3. **Stock dilution** - measure volumes from stock solutions and top up with water
//!
//! ## Canonical answers
//!
//! Generated problems round the ratio to two decimals and masses to three. Graders
//! accept ~10 % relative error on the ratio and ~5 % on masses and volumes,
//! so implementations must match within those windows, not exactly.
//!
//! ## Example
//!
//! ```rust
//! use chem_core::calculations::buffer::{calculate_buffer_recipe, BufferRecipeInput};
//!
//! let recipe = calculate_buffer_recipe(&BufferRecipeInput {
//!     pka: 4.76,
//!     target_ph: 4.76,
//!     volume_l: 1.0,
//!     total_concentration: 0.2,
//!     acid_molar_mass: 60.05,
//!     base_molar_mass: 82.03,
//! }).unwrap();
//! assert!((recipe.ratio - 1.0).abs() < 1e-12);
//! assert!((recipe.acid_moles - 0.1).abs() < 1e-12);
//! ```

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::titration::{weak_acid_h_concentration, KW};
use crate::data::buffers::{BufferSystem, BUFFER_SYSTEMS};
use crate::errors::{ChemError, ChemResult};
use crate::numeric::round_to;
use crate::problems::{problem_id, Difficulty};

/// Base-to-acid ratio `[A⁻]/[HA]` needed to reach `target_ph`
pub fn buffer_ratio(pka: f64, target_ph: f64) -> f64 {
    10f64.powf(target_ph - pka)
}

/// pH of a buffer from its component concentrations (forward HH)
pub fn buffer_ph(pka: f64, acid_concentration: f64, base_concentration: f64) -> f64 {
    pka + (base_concentration / acid_concentration).log10()
}

/// Inputs for the mass-level recipe.
///
/// ## JSON Example
///
/// ```json
/// {
///   "pka": 4.76,
///   "target_ph": 5.0,
///   "volume_l": 0.5,
///   "total_concentration": 0.1,
///   "acid_molar_mass": 60.05,
///   "base_molar_mass": 82.03
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BufferRecipeInput {
    pub pka: f64,
    pub target_ph: f64,
    /// Final buffer volume (L)
    pub volume_l: f64,
    /// Combined [HA] + [A⁻] (mol/L)
    pub total_concentration: f64,
    /// Molar mass of the acid compound (g/mol)
    pub acid_molar_mass: f64,
    /// Molar mass of the conjugate-base compound (g/mol)
    pub base_molar_mass: f64,
}

impl BufferRecipeInput {
    pub fn validate(&self) -> ChemResult<()> {
        positive("volume_l", self.volume_l)?;
        positive("total_concentration", self.total_concentration)?;
        positive("acid_molar_mass", self.acid_molar_mass)?;
        positive("base_molar_mass", self.base_molar_mass)?;
        Ok(())
    }
}

fn positive(field: &str, value: f64) -> ChemResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ChemError::invalid_input(field, value.to_string(), "Must be a positive number"))
    }
}

/// Mass-level buffer recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BufferRecipe {
    pub ratio: f64,
    pub total_moles: f64,
    pub acid_moles: f64,
    pub base_moles: f64,
    pub acid_mass_g: f64,
    pub base_mass_g: f64,
}

/// Split the total moles by the HH ratio and convert to masses.
///
/// - `acid = total / (1 + ratio)`
/// - `base = total − acid`
pub fn calculate_buffer_recipe(input: &BufferRecipeInput) -> ChemResult<BufferRecipe> {
    input.validate()?;

    let ratio = buffer_ratio(input.pka, input.target_ph);
    let total_moles = input.total_concentration * input.volume_l;
    let acid_moles = total_moles / (1.0 + ratio);
    let base_moles = total_moles - acid_moles;

    debug!("buffer recipe: ratio {:.4}, {:.5} mol acid, {:.5} mol base", ratio, acid_moles, base_moles);

    Ok(BufferRecipe {
        ratio,
        total_moles,
        acid_moles,
        base_moles,
        acid_mass_g: acid_moles * input.acid_molar_mass,
        base_mass_g: base_moles * input.base_molar_mass,
    })
}

/// Inputs for the stock-dilution level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockDilutionInput {
    pub pka: f64,
    pub target_ph: f64,
    /// Final buffer volume (L)
    pub target_volume_l: f64,
    pub total_concentration: f64,
    /// Acid stock concentration (mol/L)
    pub acid_stock_m: f64,
    /// Conjugate base stock concentration (mol/L)
    pub base_stock_m: f64,
}

/// Volumes to pipette for the stock-dilution level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockDilution {
    pub ratio: f64,
    pub acid_moles: f64,
    pub base_moles: f64,
    pub acid_volume_l: f64,
    pub base_volume_l: f64,
    pub water_volume_l: f64,
}

/// Volumes of each stock and of water for the target buffer.
///
/// # Errors
/// `CalculationFailed` when the stocks are too dilute to fit in the target
/// volume (negative water volume).
pub fn calculate_stock_dilution(input: &StockDilutionInput) -> ChemResult<StockDilution> {
    positive("target_volume_l", input.target_volume_l)?;
    positive("total_concentration", input.total_concentration)?;
    positive("acid_stock_m", input.acid_stock_m)?;
    positive("base_stock_m", input.base_stock_m)?;

    let ratio = buffer_ratio(input.pka, input.target_ph);
    let total_moles = input.total_concentration * input.target_volume_l;
    let acid_moles = total_moles / (1.0 + ratio);
    let base_moles = total_moles - acid_moles;

    let acid_volume_l = acid_moles / input.acid_stock_m;
    let base_volume_l = base_moles / input.base_stock_m;
    let water_volume_l = input.target_volume_l - acid_volume_l - base_volume_l;

    if water_volume_l < 0.0 {
        return Err(ChemError::calculation_failed(
            "buffer stock dilution",
            format!(
                "stock volumes ({:.3} L) exceed the target volume ({:.3} L)",
                acid_volume_l + base_volume_l,
                input.target_volume_l
            ),
        ));
    }

    Ok(StockDilution {
        ratio,
        acid_moles,
        base_moles,
        acid_volume_l,
        base_volume_l,
        water_volume_l,
    })
}

/// pH of a buffer after adding strong acid and/or strong base.
///
/// Added strong acid converts base to acid (and vice versa). Once one
/// component is exhausted the excess strong species sets the pH; exactly at
/// exhaustion the remaining weak acid (or base) equilibrium does.
pub fn ph_after_addition(
    pka: f64,
    acid_moles: f64,
    base_moles: f64,
    strong_acid_moles: f64,
    strong_base_moles: f64,
    volume_l: f64,
) -> f64 {
    let net_acid = strong_acid_moles - strong_base_moles;
    let acid = acid_moles + net_acid;
    let base = base_moles - net_acid;

    if acid > 0.0 && base > 0.0 {
        return buffer_ph(pka, acid / volume_l, base / volume_l);
    }

    let ka = 10f64.powf(-pka);
    if base < 0.0 {
        // Buffer overwhelmed by strong acid
        let excess_h = -base / volume_l;
        -excess_h.log10()
    } else if acid < 0.0 {
        let excess_oh = -acid / volume_l;
        14.0 + excess_oh.log10()
    } else if base == 0.0 {
        -weak_acid_h_concentration(ka, acid / volume_l).log10()
    } else {
        let kb = KW / ka;
        14.0 + weak_acid_h_concentration(kb, base / volume_l).log10()
    }
}

// ============================================================================
// Problems
// ============================================================================

/// Scaffolding level of the buffer game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BufferLevel {
    Ratio,
    Mass,
    StockDilution,
}

/// A generated buffer problem with its canonical (rounded) answers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BufferProblem {
    pub id: Uuid,
    pub difficulty: Difficulty,
    pub system_id: String,
    pub acid_name: String,
    pub base_name: String,
    pub pka: f64,
    pub target_ph: f64,
    pub volume_l: f64,
    pub total_concentration: f64,
    pub acid_molar_mass: f64,
    pub base_molar_mass: f64,
    /// `[A⁻]/[HA]`, rounded to 2 decimals
    pub ratio: f64,
    pub correct_acid_mass: f64,
    pub correct_base_mass: f64,
    /// Stock concentrations, present for advanced problems
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acid_stock_m: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_stock_m: Option<f64>,
}

/// Canonical answer at one scaffolding level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "level", rename_all = "snake_case")]
pub enum BufferLevelAnswer {
    Ratio { ratio: f64 },
    Mass { acid_mass_g: f64, base_mass_g: f64 },
    StockDilution { acid_volume_ml: f64, base_volume_ml: f64, water_volume_ml: f64 },
}

/// Solve a generated problem at the requested level.
///
/// # Errors
/// `InvalidInput` when asking for the stock-dilution level of a problem
/// generated without stock concentrations.
pub fn solve_buffer_level(problem: &BufferProblem, level: BufferLevel) -> ChemResult<BufferLevelAnswer> {
    match level {
        BufferLevel::Ratio => Ok(BufferLevelAnswer::Ratio { ratio: problem.ratio }),
        BufferLevel::Mass => Ok(BufferLevelAnswer::Mass {
            acid_mass_g: problem.correct_acid_mass,
            base_mass_g: problem.correct_base_mass,
        }),
        BufferLevel::StockDilution => {
            let (acid_stock_m, base_stock_m) = match (problem.acid_stock_m, problem.base_stock_m) {
                (Some(a), Some(b)) => (a, b),
                _ => {
                    return Err(ChemError::invalid_input(
                        "level",
                        "stock_dilution",
                        "Problem has no stock solutions",
                    ))
                }
            };
            let dilution = calculate_stock_dilution(&StockDilutionInput {
                pka: problem.pka,
                target_ph: problem.target_ph,
                target_volume_l: problem.volume_l,
                total_concentration: problem.total_concentration,
                acid_stock_m,
                base_stock_m,
            })?;
            Ok(BufferLevelAnswer::StockDilution {
                acid_volume_ml: round_to(dilution.acid_volume_l * 1000.0, 1),
                base_volume_ml: round_to(dilution.base_volume_l * 1000.0, 1),
                water_volume_ml: round_to(dilution.water_volume_l * 1000.0, 1),
            })
        }
    }
}

const VOLUMES_L: [f64; 3] = [0.5, 1.0, 2.0];
const CONCENTRATIONS_M: [f64; 3] = [0.1, 0.2, 0.5];
const INTERMEDIATE_OFFSETS: [f64; 6] = [-0.5, -0.3, -0.2, 0.2, 0.3, 0.5];

/// Generate a buffer problem.
///
/// - Beginner: target pH equals pKa, ratio exactly 1.00
/// - Intermediate: pH offset from a small fixed set
/// - Advanced: any offset within ±1 pH unit, with stock solutions
pub fn generate_buffer_problem(difficulty: Difficulty, rng: &mut impl Rng) -> BufferProblem {
    let system = &BUFFER_SYSTEMS[rng.gen_range(0..BUFFER_SYSTEMS.len())];
    let volume_l = VOLUMES_L[rng.gen_range(0..VOLUMES_L.len())];
    let total_concentration = CONCENTRATIONS_M[rng.gen_range(0..CONCENTRATIONS_M.len())];

    let offset = match difficulty {
        Difficulty::Beginner => 0.0,
        Difficulty::Intermediate => INTERMEDIATE_OFFSETS[rng.gen_range(0..INTERMEDIATE_OFFSETS.len())],
        Difficulty::Advanced => {
            let magnitude = round_to(rng.gen_range(0.1..=1.0), 2);
            if rng.gen_bool(0.5) {
                magnitude
            } else {
                -magnitude
            }
        }
    };

    let (acid_stock_m, base_stock_m) = match difficulty {
        Difficulty::Advanced => (Some(1.0), Some(1.0)),
        _ => (None, None),
    };

    let id = problem_id(rng);
    build_problem(id, system, difficulty, offset, volume_l, total_concentration, acid_stock_m, base_stock_m)
}

#[allow(clippy::too_many_arguments)]
fn build_problem(
    id: Uuid,
    system: &BufferSystem,
    difficulty: Difficulty,
    offset: f64,
    volume_l: f64,
    total_concentration: f64,
    acid_stock_m: Option<f64>,
    base_stock_m: Option<f64>,
) -> BufferProblem {
    let target_ph = round_to(system.pka + offset, 2);
    let exact_ratio = buffer_ratio(system.pka, target_ph);
    let total_moles = total_concentration * volume_l;
    let acid_moles = total_moles / (1.0 + exact_ratio);
    let base_moles = total_moles - acid_moles;

    BufferProblem {
        id,
        difficulty,
        system_id: system.id.clone(),
        acid_name: system.acid_name.clone(),
        base_name: system.base_name.clone(),
        pka: system.pka,
        target_ph,
        volume_l,
        total_concentration,
        acid_molar_mass: system.acid_molar_mass,
        base_molar_mass: system.base_molar_mass,
        ratio: round_to(exact_ratio, 2),
        correct_acid_mass: round_to(acid_moles * system.acid_molar_mass, 3),
        correct_base_mass: round_to(base_moles * system.base_molar_mass, 3),
        acid_stock_m,
        base_stock_m,
    }
}
