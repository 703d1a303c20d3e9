//! # chem_core - Chemistry Games Calculation Engine
//!
//! `chem_core` holds the calculations behind a set of chemistry teaching
//! games: gas laws, limiting reactants, buffers, titrations, Le Chatelier
//! shifts, redox balancing, Gibbs free energy and unit cancellation, plus
//! the scoring and mastery rules the games share.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: pure functions from input to result, safe from any thread
//! - **JSON-First**: all inputs and outputs implement Serialize/Deserialize
//! - **Rich Errors**: structured [`ChemError`] values, not strings
//! - **Injected randomness**: problem generators take the RNG as a parameter
//!
//! ## Quick Start
//!
//! ```rust
//! use chem_core::calculations::gas_law::{solve_gas_law, GasKnowns, GasVariable};
//!
//! let known = GasKnowns { n: Some(1.0), t: Some(273.15), v: Some(22.414), p: None };
//! let p = solve_gas_law(&known, GasVariable::P).unwrap();
//! assert!((p - 1.0).abs() < 0.001);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Calculators and the JSON request API
//! - [`data`] - Static reference tables (buffers, reactions, equilibria, ...)
//! - [`numeric`] - GCD/LCM, significant figures, tolerance checks
//! - [`units`] - Type-safe unit wrappers and gas unit conversion
//! - [`quiz`] - Dimensional analysis quiz questions
//! - [`problems`] - Random practice problem generators
//! - [`scoring`] - Composite scores, explanation scoring, mastery, achievements
//! - [`settings`] - Tunable thresholds and the teacher allow-list
//! - [`progress`] - Per-player progress snapshots
//! - [`file_io`] - Atomic snapshot save/load with version checks
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod data;
pub mod errors;
pub mod file_io;
pub mod numeric;
pub mod problems;
pub mod progress;
pub mod quiz;
pub mod scoring;
pub mod settings;
pub mod units;

pub use calculations::{evaluate, evaluate_with, CalculationOutput, CalculationRequest};
pub use errors::{ChemError, ChemResult};
pub use file_io::{load_progress, save_progress};
pub use progress::ProgressSnapshot;
pub use settings::{RoleAllowList, Settings};
