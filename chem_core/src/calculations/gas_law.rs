//! # Ideal Gas Law Solver
//!
//! Solves `PV = nRT` for any one of the four variables given the other three.
//!
//! ## Assumptions
//!
//! - Units are atm, L, mol and K. No conversion happens here; use
//!   [`GasValue::to_standard`](crate::units::GasValue::to_standard) first.
//! - `R = 0.08206 L·atm/(mol·K)`
//!
//! ## Example
//!
//! ```rust
//! use chem_core::calculations::gas_law::{solve_gas_law, GasKnowns, GasVariable};
//!
//! let known = GasKnowns { n: Some(1.0), t: Some(273.15), v: Some(22.414), ..Default::default() };
//! let p = solve_gas_law(&known, GasVariable::P).unwrap();
//! assert!((p - 1.0).abs() < 0.01);
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::{ChemError, ChemResult};
use crate::units::{GasQuantity, GasValue};

/// Ideal gas constant in L·atm/(mol·K)
pub const R: f64 = 0.08206;

/// The four ideal-gas variables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GasVariable {
    P,
    V,
    #[serde(rename = "n")]
    N,
    T,
}

impl GasVariable {
    /// Conventional symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            GasVariable::P => "P",
            GasVariable::V => "V",
            GasVariable::N => "n",
            GasVariable::T => "T",
        }
    }

    /// Standard unit the solver returns
    pub fn unit(&self) -> &'static str {
        match self {
            GasVariable::P => "atm",
            GasVariable::V => "L",
            GasVariable::N => "mol",
            GasVariable::T => "K",
        }
    }

    pub fn quantity(&self) -> GasQuantity {
        match self {
            GasVariable::P => GasQuantity::Pressure,
            GasVariable::V => GasQuantity::Volume,
            GasVariable::N => GasQuantity::Amount,
            GasVariable::T => GasQuantity::Temperature,
        }
    }
}

/// Partially known gas state (atm, L, mol, K).
///
/// ## JSON Example
///
/// ```json
/// { "n": 1.0, "T": 273.15, "V": 22.414 }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GasKnowns {
    #[serde(rename = "P", default, skip_serializing_if = "Option::is_none")]
    pub p: Option<f64>,
    #[serde(rename = "V", default, skip_serializing_if = "Option::is_none")]
    pub v: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<f64>,
    #[serde(rename = "T", default, skip_serializing_if = "Option::is_none")]
    pub t: Option<f64>,
}

impl GasKnowns {
    /// Build a state from unit-tagged values, converting each to standard units
    pub fn from_values(
        p: Option<&GasValue>,
        v: Option<&GasValue>,
        n: Option<&GasValue>,
        t: Option<&GasValue>,
    ) -> ChemResult<Self> {
        let convert = |value: Option<&GasValue>, quantity| value.map(|gv| gv.to_standard(quantity)).transpose();
        Ok(GasKnowns {
            p: convert(p, GasQuantity::Pressure)?,
            v: convert(v, GasQuantity::Volume)?,
            n: convert(n, GasQuantity::Amount)?,
            t: convert(t, GasQuantity::Temperature)?,
        })
    }

    pub fn get(&self, variable: GasVariable) -> Option<f64> {
        match variable {
            GasVariable::P => self.p,
            GasVariable::V => self.v,
            GasVariable::N => self.n,
            GasVariable::T => self.t,
        }
    }
}

/// Solve `PV = nRT` for one variable.
///
/// # Formulas
/// - P = nRT / V
/// - V = nRT / P
/// - T = PV / (nR)
/// - n = PV / (RT)
///
/// Any value given for `solve_for` itself is ignored.
///
/// # Errors
/// `ChemError::CannotSolve` when one of the other three variables is absent.
pub fn solve_gas_law(known: &GasKnowns, solve_for: GasVariable) -> ChemResult<f64> {
    let missing = || ChemError::cannot_solve(solve_for.symbol());

    let result = match solve_for {
        GasVariable::P => {
            let (n, t, v) = (known.n.ok_or_else(missing)?, known.t.ok_or_else(missing)?, known.v.ok_or_else(missing)?);
            n * R * t / v
        }
        GasVariable::V => {
            let (n, t, p) = (known.n.ok_or_else(missing)?, known.t.ok_or_else(missing)?, known.p.ok_or_else(missing)?);
            n * R * t / p
        }
        GasVariable::T => {
            let (p, v, n) = (known.p.ok_or_else(missing)?, known.v.ok_or_else(missing)?, known.n.ok_or_else(missing)?);
            p * v / (n * R)
        }
        GasVariable::N => {
            let (p, v, t) = (known.p.ok_or_else(missing)?, known.v.ok_or_else(missing)?, known.t.ok_or_else(missing)?);
            p * v / (R * t)
        }
    };

    debug!("ideal gas: solved {} = {} {}", solve_for.symbol(), result, solve_for.unit());
    Ok(result)
}

/// One state of a fixed amount of gas (atm, L, K)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GasState {
    #[serde(rename = "P", default, skip_serializing_if = "Option::is_none")]
    pub p: Option<f64>,
    #[serde(rename = "V", default, skip_serializing_if = "Option::is_none")]
    pub v: Option<f64>,
    #[serde(rename = "T", default, skip_serializing_if = "Option::is_none")]
    pub t: Option<f64>,
}

/// Which value of the final state the combined gas law should produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombinedTarget {
    P2,
    V2,
    T2,
}

/// Solve the combined gas law `P1·V1/T1 = P2·V2/T2` for one final-state value.
///
/// The initial state must be fully known; the final state must carry the two
/// values that are not being solved for.
pub fn solve_combined_gas_law(initial: &GasState, final_state: &GasState, solve_for: CombinedTarget) -> ChemResult<f64> {
    let name = match solve_for {
        CombinedTarget::P2 => "P2",
        CombinedTarget::V2 => "V2",
        CombinedTarget::T2 => "T2",
    };
    let missing = || ChemError::cannot_solve(name);

    let p1 = initial.p.ok_or_else(missing)?;
    let v1 = initial.v.ok_or_else(missing)?;
    let t1 = initial.t.ok_or_else(missing)?;
    let constant = p1 * v1 / t1;

    let result = match solve_for {
        CombinedTarget::P2 => constant * final_state.t.ok_or_else(missing)? / final_state.v.ok_or_else(missing)?,
        CombinedTarget::V2 => constant * final_state.t.ok_or_else(missing)? / final_state.p.ok_or_else(missing)?,
        CombinedTarget::T2 => final_state.p.ok_or_else(missing)? * final_state.v.ok_or_else(missing)? / constant,
    };

    debug!("combined gas law: {} = {}", name, result);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stp() -> GasKnowns {
        GasKnowns {
            p: Some(1.0),
            v: Some(22.414),
            n: Some(1.0),
            t: Some(273.15),
        }
    }

    #[test]
    fn test_pressure_at_stp() {
        let known = GasKnowns { p: None, ..stp() };
        let p = solve_gas_law(&known, GasVariable::P).unwrap();
        assert!((p - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_each_variable_round_trips() {
        let state = stp();
        for variable in [GasVariable::P, GasVariable::V, GasVariable::N, GasVariable::T] {
            let solved = solve_gas_law(&state, variable).unwrap();
            let expected = state.get(variable).unwrap();
            assert!((solved - expected).abs() / expected < 0.001, "{:?}", variable);
        }
    }

    #[test]
    fn test_solved_variable_value_is_ignored() {
        let known = GasKnowns { p: Some(999.0), ..stp() };
        let p = solve_gas_law(&known, GasVariable::P).unwrap();
        assert!((p - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_missing_input_errors() {
        let known = GasKnowns {
            n: Some(1.0),
            t: Some(300.0),
            ..Default::default()
        };
        let err = solve_gas_law(&known, GasVariable::P).unwrap_err();
        assert_eq!(err.to_string(), "Cannot solve for P with given values");
        assert!(solve_gas_law(&known, GasVariable::N).is_err());
    }

    #[test]
    fn test_from_values_converts_units() {
        let known = GasKnowns::from_values(
            Some(&GasValue::new(101.325, "kPa")),
            Some(&GasValue::new(22414.0, "mL")),
            None,
            Some(&GasValue::new(0.0, "°C")),
        )
        .unwrap();
        let n = solve_gas_law(&known, GasVariable::N).unwrap();
        assert!((n - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_combined_gas_law() {
        let initial = GasState { p: Some(1.0), v: Some(2.0), t: Some(300.0) };
        let final_state = GasState { p: None, v: Some(1.0), t: Some(300.0) };
        let p2 = solve_combined_gas_law(&initial, &final_state, CombinedTarget::P2).unwrap();
        assert!((p2 - 2.0).abs() < 1e-9);

        let final_state = GasState { p: Some(1.0), v: Some(4.0), t: None };
        let t2 = solve_combined_gas_law(&initial, &final_state, CombinedTarget::T2).unwrap();
        assert!((t2 - 600.0).abs() < 1e-9);

        let incomplete = GasState { p: Some(1.0), v: None, t: None };
        assert!(solve_combined_gas_law(&initial, &incomplete, CombinedTarget::V2).is_err());
    }

    #[test]
    fn test_knowns_json_uses_symbols() {
        let known: GasKnowns = serde_json::from_str(r#"{"n": 1.0, "T": 273.15, "V": 22.414}"#).unwrap();
        assert_eq!(known.n, Some(1.0));
        assert_eq!(known.p, None);
    }
}
