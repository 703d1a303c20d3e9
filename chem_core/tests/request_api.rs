//! End-to-end checks of the JSON request API.

use chem_core::calculations::equilibrium::ShiftDirection;
use chem_core::calculations::thermodynamics::Spontaneity;
use chem_core::{evaluate, evaluate_with, CalculationOutput, CalculationRequest, Settings};

fn run(json: &str) -> CalculationOutput {
    let request: CalculationRequest = serde_json::from_str(json).unwrap();
    evaluate(&request).unwrap()
}

#[test]
fn test_gas_law_request() {
    match run(r#"{"type": "gas_law", "known": {"n": 1.0, "T": 273.15, "V": 22.414}, "solve_for": "P"}"#) {
        CalculationOutput::Value { value, unit } => {
            assert!((value - 1.0).abs() < 0.001);
            assert_eq!(unit, "atm");
        }
        other => panic!("unexpected output {:?}", other),
    }
}

#[test]
fn test_gas_law_missing_variable() {
    let request: CalculationRequest =
        serde_json::from_str(r#"{"type": "gas_law", "known": {"n": 1.0, "T": 273.15}, "solve_for": "P"}"#).unwrap();
    let err = evaluate(&request).unwrap_err();
    assert_eq!(err.to_string(), "Cannot solve for P with given values");

    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["type"], "CannotSolve");
    assert_eq!(json["details"]["variable"], "P");
}

#[test]
fn test_stoichiometry_request() {
    match run(r#"{"type": "stoichiometry", "reaction_id": "water", "r1_count": 4, "r2_count": 5}"#) {
        CalculationOutput::Stoichiometry(answer) => {
            assert_eq!(answer.limiting_reactant, "H2");
            assert_eq!(answer.excess_reactant, "O2");
            assert_eq!(answer.times_reaction_runs, 2.0);
            assert_eq!(answer.product_amount("H2O"), Some(4.0));
            assert_eq!(answer.excess_remaining, 3.0);
        }
        other => panic!("unexpected output {:?}", other),
    }
}

#[test]
fn test_buffer_recipe_request() {
    let json = r#"{
        "type": "buffer_recipe",
        "pka": 4.76, "target_ph": 4.76, "volume_l": 1.0, "total_concentration": 0.2,
        "acid_molar_mass": 60.05, "base_molar_mass": 82.03
    }"#;
    match run(json) {
        CalculationOutput::BufferRecipe(recipe) => {
            assert!((recipe.ratio - 1.0).abs() < 1e-12);
            assert!((recipe.acid_mass_g - 6.005).abs() < 1e-9);
            assert!((recipe.base_mass_g - 8.203).abs() < 1e-9);
        }
        other => panic!("unexpected output {:?}", other),
    }
}

#[test]
fn test_titration_requests() {
    let setup = r#"{"kind": {"type": "strong_acid_strong_base"}, "analyte_volume_ml": 25.0, "analyte_molarity": 0.1, "titrant_molarity": 0.1}"#;
    match run(&format!(r#"{{"type": "titration_ph", "setup": {}, "titrant_volume_ml": 25.0}}"#, setup)) {
        CalculationOutput::Value { value, unit } => {
            assert_eq!(value, 7.0);
            assert_eq!(unit, "pH");
        }
        other => panic!("unexpected output {:?}", other),
    }
    match run(&format!(
        r#"{{"type": "titration_curve", "setup": {}, "max_volume_ml": 50.0, "step_ml": 5.0}}"#,
        setup
    )) {
        CalculationOutput::TitrationCurve { points } => {
            assert_eq!(points.len(), 11);
            assert!(points.windows(2).all(|w| w[1].ph >= w[0].ph));
        }
        other => panic!("unexpected output {:?}", other),
    }
}

#[test]
fn test_equilibrium_shift_request() {
    match run(r#"{"type": "equilibrium_shift", "equilibrium_id": "haber", "stress": {"type": "increase-pressure"}}"#) {
        CalculationOutput::Shift(result) => {
            assert_eq!(result.direction, ShiftDirection::Right);
            assert!(!result.reasoning.is_empty());
        }
        other => panic!("unexpected output {:?}", other),
    }
}

#[test]
fn test_delta_g_request() {
    match run(r#"{"type": "delta_g", "delta_h_kj": 100.0, "delta_s_j_per_k": 200.0, "temperature_k": 500.0}"#) {
        CalculationOutput::DeltaG { delta_g, spontaneity } => {
            assert!(delta_g.abs() < 1e-9);
            assert_eq!(spontaneity, Spontaneity::Equilibrium);
        }
        other => panic!("unexpected output {:?}", other),
    }
}

#[test]
fn test_predict_unit_requests() {
    let factor = r#"{"num": "1000 m", "den": "1 km", "units": ["m", "km"]}"#;
    for (current, expected) in [("km", "m"), ("km/klst", "m/klst·km"), ("m/km", "m·m")] {
        let json = format!(r#"{{"type": "predict_unit", "current_unit": "{}", "factor": {}}}"#, current, factor);
        assert_eq!(
            run(&json),
            CalculationOutput::Unit {
                unit: expected.to_string()
            }
        );
    }
}

#[test]
fn test_sig_figs_and_score_requests() {
    assert_eq!(
        run(r#"{"type": "significant_figures", "value": "1.08e12"}"#),
        CalculationOutput::SignificantFigures { count: 3 }
    );
    match run(r#"{"type": "composite_score", "answer": 0.5, "method": 0.8, "explanation": 0.6, "efficiency": 0.3}"#) {
        CalculationOutput::Score { score } => assert!((score - 0.59).abs() < 1e-12),
        other => panic!("unexpected output {:?}", other),
    }
}

#[test]
fn test_output_serializes_with_type_tag() {
    let output = run(r#"{"type": "redox_multipliers", "electrons_ox": 2, "electrons_red": 1}"#);
    let json = serde_json::to_value(&output).unwrap();
    assert_eq!(json["type"], "multipliers");
    assert_eq!(json["oxidation"], 1);
    assert_eq!(json["reduction"], 2);
}

#[test]
fn test_settings_fill_omitted_tolerance() {
    let request: CalculationRequest =
        serde_json::from_str(r#"{"type": "check_answer", "user_answer": 10.3, "correct_answer": 10.0}"#).unwrap();
    let settings: Settings = serde_json::from_str(r#"{"answer_tolerance_percent": 5.0}"#).unwrap();

    let strict = serde_json::to_value(evaluate(&request).unwrap()).unwrap();
    assert_eq!(strict["type"], "answer_check");
    assert_eq!(strict["correct"], false);

    let lenient = serde_json::to_value(evaluate_with(&request, &settings).unwrap()).unwrap();
    assert_eq!(lenient["correct"], true);
}

#[test]
fn test_titration_curve_request_rejects_huge_range() {
    let request: CalculationRequest = serde_json::from_str(
        r#"{"type": "titration_curve",
            "setup": {"kind": {"type": "strong_acid_strong_base"}, "analyte_volume_ml": 25.0,
                      "analyte_molarity": 0.1, "titrant_molarity": 0.1},
            "max_volume_ml": 1e300, "step_ml": 1.0}"#,
    )
    .unwrap();
    assert_eq!(evaluate(&request).unwrap_err().error_code(), "INVALID_INPUT");
}
