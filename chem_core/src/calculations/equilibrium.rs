//! # Le Chatelier Shift Prediction
//!
//! Predicts which way an equilibrium shifts when a stress is applied. This is
//! a single-step decision table over the stress type and the reaction's
//! metadata (ΔH sign and gas-mole counts); nothing is stored between calls.
//!
//! | Stress | Shift |
//! |--------|-------|
//! | add reactant / remove product | right |
//! | add product / remove reactant | left |
//! | increase temperature | toward the endothermic direction |
//! | decrease temperature | toward the exothermic direction |
//! | increase pressure | toward fewer gas moles (none if equal or no gas) |
//! | decrease pressure | toward more gas moles (none if equal or no gas) |
//! | add catalyst | none |
//!
//! Every result carries an English and an Icelandic explanation, ordered
//! reasoning steps, and a short description of the molecular picture.

use std::collections::BTreeMap;
use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::{ChemError, ChemResult};

/// Physical state of a species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[serde(rename = "s")]
    Solid,
    #[serde(rename = "l")]
    Liquid,
    #[serde(rename = "g")]
    Gas,
    #[serde(rename = "aq")]
    Aqueous,
}

impl Phase {
    pub fn symbol(&self) -> &'static str {
        match self {
            Phase::Solid => "s",
            Phase::Liquid => "l",
            Phase::Gas => "g",
            Phase::Aqueous => "aq",
        }
    }

    /// Whether the species appears in an equilibrium expression
    pub fn in_expression(&self) -> bool {
        matches!(self, Phase::Gas | Phase::Aqueous)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquilibriumSpecies {
    pub formula: String,
    pub coefficient: u32,
    pub phase: Phase,
}

impl EquilibriumSpecies {
    pub fn new(formula: impl Into<String>, coefficient: u32, phase: Phase) -> Self {
        EquilibriumSpecies {
            formula: formula.into(),
            coefficient,
            phase,
        }
    }
}

/// Sign of the forward reaction enthalpy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeatKind {
    Endothermic,
    Exothermic,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thermodynamics {
    /// ΔH of the forward reaction (kJ/mol)
    #[serde(rename = "deltaH")]
    pub delta_h: f64,
    #[serde(rename = "type")]
    pub kind: HeatKind,
}

/// Moles of gas on each side; only phase `g` counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GasMoles {
    pub reactants: u32,
    pub products: u32,
}

/// A reversible reaction at equilibrium.
///
/// ## JSON Example
///
/// ```json
/// {
///   "id": "haber",
///   "name": "Haber process",
///   "reactants": [
///     { "formula": "N2", "coefficient": 1, "phase": "g" },
///     { "formula": "H2", "coefficient": 3, "phase": "g" }
///   ],
///   "products": [{ "formula": "NH3", "coefficient": 2, "phase": "g" }],
///   "thermodynamics": { "deltaH": -92.0, "type": "exothermic" },
///   "gas_moles": { "reactants": 4, "products": 2 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equilibrium {
    pub id: String,
    pub name: String,
    pub reactants: Vec<EquilibriumSpecies>,
    pub products: Vec<EquilibriumSpecies>,
    pub thermodynamics: Thermodynamics,
    pub gas_moles: GasMoles,
}

impl Equilibrium {
    /// Build an equilibrium, deriving the heat kind from the sign of ΔH and
    /// the gas-mole counts from the species phases.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        reactants: Vec<EquilibriumSpecies>,
        products: Vec<EquilibriumSpecies>,
        delta_h: f64,
    ) -> Self {
        let kind = if delta_h > 0.0 {
            HeatKind::Endothermic
        } else {
            HeatKind::Exothermic
        };
        let mut equilibrium = Equilibrium {
            id: id.into(),
            name: name.into(),
            reactants,
            products,
            thermodynamics: Thermodynamics { delta_h, kind },
            gas_moles: GasMoles::default(),
        };
        equilibrium.gas_moles = equilibrium.count_gas_moles();
        equilibrium
    }

    /// Count gas-phase moles on each side from the species lists
    pub fn count_gas_moles(&self) -> GasMoles {
        let gas = |side: &[EquilibriumSpecies]| {
            side.iter()
                .filter(|s| s.phase == Phase::Gas)
                .map(|s| s.coefficient)
                .sum()
        };
        GasMoles {
            reactants: gas(&self.reactants),
            products: gas(&self.products),
        }
    }

    /// Equation text, e.g. `N2(g) + 3H2(g) ⇌ 2NH3(g)`
    pub fn equation(&self) -> String {
        format!("{} ⇌ {}", side_text(&self.reactants), side_text(&self.products))
    }
}

fn side_text(species: &[EquilibriumSpecies]) -> String {
    species
        .iter()
        .map(|s| {
            let coefficient = if s.coefficient == 1 {
                String::new()
            } else {
                s.coefficient.to_string()
            };
            format!("{}{}({})", coefficient, s.formula, s.phase.symbol())
        })
        .collect::<Vec<_>>()
        .join(" + ")
}

fn formulas(species: &[EquilibriumSpecies]) -> String {
    species.iter().map(|s| s.formula.as_str()).collect::<Vec<_>>().join(", ")
}

/// Whether `formula` is one of the reactants
pub fn is_reactant(equilibrium: &Equilibrium, formula: &str) -> bool {
    equilibrium.reactants.iter().any(|s| s.formula == formula)
}

/// Whether `formula` is one of the products
pub fn is_product(equilibrium: &Equilibrium, formula: &str) -> bool {
    equilibrium.products.iter().any(|s| s.formula == formula)
}

/// Kind of stress applied to the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StressKind {
    AddReactant,
    AddProduct,
    RemoveReactant,
    RemoveProduct,
    IncreaseTemp,
    DecreaseTemp,
    IncreasePressure,
    DecreasePressure,
    AddCatalyst,
}

impl StressKind {
    pub const ALL: [StressKind; 9] = [
        StressKind::AddReactant,
        StressKind::AddProduct,
        StressKind::RemoveReactant,
        StressKind::RemoveProduct,
        StressKind::IncreaseTemp,
        StressKind::DecreaseTemp,
        StressKind::IncreasePressure,
        StressKind::DecreasePressure,
        StressKind::AddCatalyst,
    ];

    /// Whether this stress needs a target species
    pub fn needs_target(&self) -> bool {
        matches!(
            self,
            StressKind::AddReactant | StressKind::AddProduct | StressKind::RemoveReactant | StressKind::RemoveProduct
        )
    }
}

/// A stress event, optionally naming the species it acts on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stress {
    #[serde(rename = "type")]
    pub kind: StressKind,
    #[serde(default)]
    pub target: Option<String>,
}

impl Stress {
    pub fn new(kind: StressKind) -> Self {
        Stress { kind, target: None }
    }

    pub fn on(kind: StressKind, target: impl Into<String>) -> Self {
        Stress {
            kind,
            target: Some(target.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftDirection {
    Left,
    Right,
    None,
}

impl ShiftDirection {
    fn english(&self) -> &'static str {
        match self {
            ShiftDirection::Left => "left, toward the reactants",
            ShiftDirection::Right => "right, toward the products",
            ShiftDirection::None => "nowhere",
        }
    }

    fn icelandic(&self) -> &'static str {
        match self {
            ShiftDirection::Left => "til vinstri, í átt að hvarfefnum",
            ShiftDirection::Right => "til hægri, í átt að myndefnum",
            ShiftDirection::None => "ekki",
        }
    }
}

impl fmt::Display for ShiftDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ShiftDirection::Left => "left",
            ShiftDirection::Right => "right",
            ShiftDirection::None => "none",
        };
        f.write_str(s)
    }
}

/// Outcome of applying a stress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftResult {
    pub direction: ShiftDirection,
    pub explanation: String,
    #[serde(rename = "explanationIs")]
    pub explanation_is: String,
    /// Ordered justification steps, never empty
    pub reasoning: Vec<String>,
    #[serde(rename = "molecularView")]
    pub molecular_view: String,
}

/// Predict the shift caused by `stress`.
pub fn calculate_shift(equilibrium: &Equilibrium, stress: &Stress) -> ShiftResult {
    let result = match stress.kind {
        StressKind::AddReactant | StressKind::RemoveProduct | StressKind::AddProduct | StressKind::RemoveReactant => {
            concentration_shift(equilibrium, stress)
        }
        StressKind::IncreaseTemp | StressKind::DecreaseTemp => temperature_shift(equilibrium, stress.kind),
        StressKind::IncreasePressure | StressKind::DecreasePressure => pressure_shift(equilibrium, stress.kind),
        StressKind::AddCatalyst => catalyst_result(),
    };
    debug!("{}: {:?} shifts {}", equilibrium.id, stress.kind, result.direction);
    result
}

fn molecular_view(equilibrium: &Equilibrium, direction: ShiftDirection) -> String {
    let reactants = formulas(&equilibrium.reactants);
    let products = formulas(&equilibrium.products);
    match direction {
        ShiftDirection::Right => format!(
            "{} molecules react faster than they re-form, so more {} molecules appear until a new balance is reached.",
            reactants, products
        ),
        ShiftDirection::Left => format!(
            "{} molecules break apart faster than they form, so more {} molecules appear until a new balance is reached.",
            products, reactants
        ),
        ShiftDirection::None => format!(
            "Forward and reverse reactions stay balanced; the numbers of {} and {} molecules do not change.",
            reactants, products
        ),
    }
}

fn concentration_shift(equilibrium: &Equilibrium, stress: &Stress) -> ShiftResult {
    let (direction, fallback) = match stress.kind {
        StressKind::AddReactant => (ShiftDirection::Right, "a reactant"),
        StressKind::RemoveProduct => (ShiftDirection::Right, "a product"),
        StressKind::AddProduct => (ShiftDirection::Left, "a product"),
        _ => (ShiftDirection::Left, "a reactant"),
    };
    let target = stress.target.as_deref().unwrap_or(fallback);
    let adding = matches!(stress.kind, StressKind::AddReactant | StressKind::AddProduct);

    let (explanation, explanation_is, stress_step, response_step) = if adding {
        (
            format!(
                "Adding {target} raises its concentration, so the equilibrium shifts {} to use up the extra {target}.",
                direction.english()
            ),
            format!(
                "Þegar {target} er bætt við eykst styrkur þess, svo jafnvægið hliðrast {} til að nota umframmagnið af {target}.",
                direction.icelandic()
            ),
            format!("Stress: the concentration of {target} increases."),
            format!("The system responds by consuming {target}."),
        )
    } else {
        (
            format!(
                "Removing {target} lowers its concentration, so the equilibrium shifts {} to replace the lost {target}.",
                direction.english()
            ),
            format!(
                "Þegar {target} er fjarlægt minnkar styrkur þess, svo jafnvægið hliðrast {} til að mynda meira af {target}.",
                direction.icelandic()
            ),
            format!("Stress: the concentration of {target} decreases."),
            format!("The system responds by producing more {target}."),
        )
    };

    ShiftResult {
        direction,
        explanation,
        explanation_is,
        reasoning: vec![
            stress_step,
            "Le Chatelier's principle: the equilibrium shifts to counteract the change.".to_string(),
            response_step,
            format!("Result: the equilibrium shifts {}.", direction),
        ],
        molecular_view: molecular_view(equilibrium, direction),
    }
}

fn temperature_shift(equilibrium: &Equilibrium, kind: StressKind) -> ShiftResult {
    let heating = kind == StressKind::IncreaseTemp;
    let endothermic = equilibrium.thermodynamics.kind == HeatKind::Endothermic;
    let delta_h = equilibrium.thermodynamics.delta_h;

    // Heating favors the endothermic direction
    let direction = match (heating, endothermic) {
        (true, true) | (false, false) => ShiftDirection::Right,
        (true, false) | (false, true) => ShiftDirection::Left,
    };

    let (heat_en, heat_is) = if endothermic {
        ("endothermic", "innvermið")
    } else {
        ("exothermic", "útvermið")
    };
    let (change_en, change_is, goal_en) = if heating {
        ("Raising the temperature adds heat", "Hækkun hitastigs bætir varma við kerfið", "absorb")
    } else {
        ("Lowering the temperature removes heat", "Lækkun hitastigs fjarlægir varma úr kerfinu", "release")
    };

    ShiftResult {
        direction,
        explanation: format!(
            "{}. The forward reaction is {} (ΔH = {} kJ/mol), so the equilibrium shifts {} to {} heat.",
            change_en,
            heat_en,
            delta_h,
            direction.english(),
            goal_en
        ),
        explanation_is: format!(
            "{}. Framhvarfið er {} (ΔH = {} kJ/mól), svo jafnvægið hliðrast {}.",
            change_is,
            heat_is,
            delta_h,
            direction.icelandic()
        ),
        reasoning: vec![
            format!("Stress: {}.", change_en.to_lowercase()),
            format!("The forward reaction is {} (ΔH = {} kJ/mol).", heat_en, delta_h),
            if endothermic {
                "Heat behaves like a reactant.".to_string()
            } else {
                "Heat behaves like a product.".to_string()
            },
            format!("Result: the equilibrium shifts {} to {} heat.", direction, goal_en),
        ],
        molecular_view: molecular_view(equilibrium, direction),
    }
}

fn pressure_shift(equilibrium: &Equilibrium, kind: StressKind) -> ShiftResult {
    let increasing = kind == StressKind::IncreasePressure;
    let GasMoles { reactants, products } = equilibrium.gas_moles;
    let stress_step = if increasing {
        "Stress: the pressure increases (volume decreases).".to_string()
    } else {
        "Stress: the pressure decreases (volume increases).".to_string()
    };
    let moles_step = format!("Gas moles: {} on the reactant side, {} on the product side.", reactants, products);

    if reactants == 0 && products == 0 {
        return ShiftResult {
            direction: ShiftDirection::None,
            explanation: "Changing the pressure has no effect on an equilibrium without gas molecules.".to_string(),
            explanation_is: "Þrýstingsbreyting hefur engin áhrif á jafnvægi án gassameinda.".to_string(),
            reasoning: vec![
                stress_step,
                moles_step,
                "No species is a gas, so pressure does not change any concentration in the expression.".to_string(),
                "Result: no shift.".to_string(),
            ],
            molecular_view: molecular_view(equilibrium, ShiftDirection::None),
        };
    }

    if reactants == products {
        return ShiftResult {
            direction: ShiftDirection::None,
            explanation: format!(
                "Equal moles of gas on both sides ({}), so changing the pressure does not shift the equilibrium.",
                reactants
            ),
            explanation_is: format!(
                "Jafnmörg mól af gasi eru hvorum megin ({}), svo þrýstingsbreyting hliðrar ekki jafnvæginu.",
                reactants
            ),
            reasoning: vec![
                stress_step,
                moles_step,
                "Neither direction changes the total number of gas molecules.".to_string(),
                "Result: no shift.".to_string(),
            ],
            molecular_view: molecular_view(equilibrium, ShiftDirection::None),
        };
    }

    let fewer_on_right = products < reactants;
    // Higher pressure favors fewer gas moles, lower pressure favors more
    let direction = if increasing == fewer_on_right {
        ShiftDirection::Right
    } else {
        ShiftDirection::Left
    };
    let (side_en, side_is) = if increasing {
        ("fewer", "færri")
    } else {
        ("more", "fleiri")
    };

    ShiftResult {
        direction,
        explanation: format!(
            "{} pressure favors the side with {} gas moles ({} vs {}), so the equilibrium shifts {}.",
            if increasing { "Higher" } else { "Lower" },
            side_en,
            reactants,
            products,
            direction.english()
        ),
        explanation_is: format!(
            "{} þrýstingur hyllir þá hlið sem hefur {} mól af gasi ({} á móti {}), svo jafnvægið hliðrast {}.",
            if increasing { "Hærri" } else { "Lægri" },
            side_is,
            reactants,
            products,
            direction.icelandic()
        ),
        reasoning: vec![
            stress_step,
            moles_step,
            format!("The system shifts toward the side with {} gas molecules.", side_en),
            format!("Result: the equilibrium shifts {}.", direction),
        ],
        molecular_view: molecular_view(equilibrium, direction),
    }
}

fn catalyst_result() -> ShiftResult {
    ShiftResult {
        direction: ShiftDirection::None,
        explanation: "A catalyst speeds up the forward and reverse reactions equally. It changes the rate, not the equilibrium position."
            .to_string(),
        explanation_is: "Hvati hraðar fram- og bakhvarfi jafnt. Hann breytir hraða hvarfsins en ekki stöðu jafnvægisins."
            .to_string(),
        reasoning: vec![
            "Stress: a catalyst is added.".to_string(),
            "A catalyst lowers the activation energy of both directions by the same amount.".to_string(),
            "Equilibrium is reached faster, but the equilibrium constant is unchanged.".to_string(),
            "Result: no shift.".to_string(),
        ],
        molecular_view: "Molecules react more often in both directions; the proportions of reactants and products stay the same."
            .to_string(),
    }
}

/// Reaction quotient `Q` from current concentrations (mol/L or atm).
///
/// Solids and liquids are left out of the expression.
pub fn reaction_quotient(equilibrium: &Equilibrium, concentrations: &BTreeMap<String, f64>) -> ChemResult<f64> {
    let side = |species: &[EquilibriumSpecies]| -> ChemResult<f64> {
        species
            .iter()
            .filter(|s| s.phase.in_expression())
            .try_fold(1.0, |acc, s| {
                let c = concentrations
                    .get(&s.formula)
                    .ok_or_else(|| ChemError::invalid_input("concentrations", &s.formula, "Missing concentration"))?;
                Ok(acc * c.powi(s.coefficient as i32))
            })
    };
    Ok(side(&equilibrium.products)? / side(&equilibrium.reactants)?)
}

/// Direction the reaction proceeds to reach equilibrium from quotient `q`
pub fn direction_from_quotient(q: f64, k: f64) -> ShiftDirection {
    if (q - k).abs() <= 1e-9 * k.abs() {
        ShiftDirection::None
    } else if q < k {
        ShiftDirection::Right
    } else {
        ShiftDirection::Left
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn haber() -> Equilibrium {
        Equilibrium::new(
            "haber",
            "Haber process",
            vec![
                EquilibriumSpecies::new("N2", 1, Phase::Gas),
                EquilibriumSpecies::new("H2", 3, Phase::Gas),
            ],
            vec![EquilibriumSpecies::new("NH3", 2, Phase::Gas)],
            -92.0,
        )
    }

    fn dinitrogen_tetroxide() -> Equilibrium {
        Equilibrium::new(
            "n2o4",
            "Dinitrogen tetroxide",
            vec![EquilibriumSpecies::new("N2O4", 1, Phase::Gas)],
            vec![EquilibriumSpecies::new("NO2", 2, Phase::Gas)],
            57.2,
        )
    }

    fn hydrogen_iodide() -> Equilibrium {
        Equilibrium::new(
            "hi",
            "Hydrogen iodide",
            vec![
                EquilibriumSpecies::new("H2", 1, Phase::Gas),
                EquilibriumSpecies::new("I2", 1, Phase::Gas),
            ],
            vec![EquilibriumSpecies::new("HI", 2, Phase::Gas)],
            -9.4,
        )
    }

    fn thiocyanate() -> Equilibrium {
        Equilibrium::new(
            "fescn",
            "Iron thiocyanate",
            vec![
                EquilibriumSpecies::new("Fe³⁺", 1, Phase::Aqueous),
                EquilibriumSpecies::new("SCN⁻", 1, Phase::Aqueous),
            ],
            vec![EquilibriumSpecies::new("FeSCN²⁺", 1, Phase::Aqueous)],
            -5.0,
        )
    }

    #[test]
    fn test_gas_moles_derived() {
        assert_eq!(haber().gas_moles, GasMoles { reactants: 4, products: 2 });
        let limestone = Equilibrium::new(
            "limestone",
            "Limestone",
            vec![EquilibriumSpecies::new("CaCO3", 1, Phase::Solid)],
            vec![
                EquilibriumSpecies::new("CaO", 1, Phase::Solid),
                EquilibriumSpecies::new("CO2", 1, Phase::Gas),
            ],
            178.0,
        );
        assert_eq!(limestone.gas_moles, GasMoles { reactants: 0, products: 1 });
        assert_eq!(limestone.thermodynamics.kind, HeatKind::Endothermic);
    }

    #[test]
    fn test_concentration_stresses() {
        let eq = haber();
        let cases = [
            (StressKind::AddReactant, "N2", ShiftDirection::Right),
            (StressKind::RemoveProduct, "NH3", ShiftDirection::Right),
            (StressKind::AddProduct, "NH3", ShiftDirection::Left),
            (StressKind::RemoveReactant, "H2", ShiftDirection::Left),
        ];
        for (kind, target, expected) in cases {
            let result = calculate_shift(&eq, &Stress::on(kind, target));
            assert_eq!(result.direction, expected, "{:?}", kind);
            assert!(result.explanation.contains(target));
            assert!(result.explanation_is.contains(target));
        }
    }

    #[test]
    fn test_temperature_stresses() {
        let exo = haber();
        let endo = dinitrogen_tetroxide();
        let heat = Stress::new(StressKind::IncreaseTemp);
        let cool = Stress::new(StressKind::DecreaseTemp);
        assert_eq!(calculate_shift(&endo, &heat).direction, ShiftDirection::Right);
        assert_eq!(calculate_shift(&exo, &heat).direction, ShiftDirection::Left);
        assert_eq!(calculate_shift(&endo, &cool).direction, ShiftDirection::Left);
        assert_eq!(calculate_shift(&exo, &cool).direction, ShiftDirection::Right);
    }

    #[test]
    fn test_pressure_stresses() {
        let up = Stress::new(StressKind::IncreasePressure);
        let down = Stress::new(StressKind::DecreasePressure);

        assert_eq!(calculate_shift(&haber(), &up).direction, ShiftDirection::Right);
        assert_eq!(calculate_shift(&haber(), &down).direction, ShiftDirection::Left);
        assert_eq!(calculate_shift(&dinitrogen_tetroxide(), &up).direction, ShiftDirection::Left);
        assert_eq!(calculate_shift(&dinitrogen_tetroxide(), &down).direction, ShiftDirection::Right);

        let equal = calculate_shift(&hydrogen_iodide(), &up);
        assert_eq!(equal.direction, ShiftDirection::None);
        assert!(equal.explanation.starts_with("Equal moles"));

        let no_gas = calculate_shift(&thiocyanate(), &down);
        assert_eq!(no_gas.direction, ShiftDirection::None);
        assert!(no_gas.explanation.contains("without gas molecules"));
    }

    #[test]
    fn test_catalyst_never_shifts() {
        for eq in [haber(), dinitrogen_tetroxide(), thiocyanate()] {
            let result = calculate_shift(&eq, &Stress::new(StressKind::AddCatalyst));
            assert_eq!(result.direction, ShiftDirection::None);
            assert!(result.explanation.contains("rate"));
            assert!(result.explanation.contains("not the equilibrium position"));
        }
    }

    #[test]
    fn test_every_result_is_complete() {
        let eq = haber();
        for kind in StressKind::ALL {
            let stress = if kind.needs_target() {
                Stress::on(kind, "N2")
            } else {
                Stress::new(kind)
            };
            let result = calculate_shift(&eq, &stress);
            assert!(!result.reasoning.is_empty());
            assert!(!result.explanation.is_empty());
            assert!(!result.explanation_is.is_empty());
            assert!(!result.molecular_view.is_empty());
            assert_eq!(result, calculate_shift(&eq, &stress));
        }
    }

    #[test]
    fn test_membership() {
        let eq = haber();
        assert!(is_reactant(&eq, "H2"));
        assert!(!is_reactant(&eq, "NH3"));
        assert!(is_product(&eq, "NH3"));
        assert!(!is_product(&eq, "N2"));
    }

    #[test]
    fn test_reaction_quotient() {
        let eq = haber();
        let concentrations: BTreeMap<String, f64> =
            [("N2".to_string(), 1.0), ("H2".to_string(), 2.0), ("NH3".to_string(), 4.0)]
                .into_iter()
                .collect();
        let q = reaction_quotient(&eq, &concentrations).unwrap();
        assert!((q - 16.0 / 8.0).abs() < 1e-12);
        assert_eq!(direction_from_quotient(q, 10.0), ShiftDirection::Right);
        assert_eq!(direction_from_quotient(q, 0.5), ShiftDirection::Left);
        assert_eq!(direction_from_quotient(q, 2.0), ShiftDirection::None);

        let missing: BTreeMap<String, f64> = BTreeMap::new();
        assert!(reaction_quotient(&eq, &missing).is_err());
    }

    #[test]
    fn test_stress_json_shape() {
        let stress: Stress = serde_json::from_str(r#"{"type": "add-reactant", "target": "N2"}"#).unwrap();
        assert_eq!(stress, Stress::on(StressKind::AddReactant, "N2"));
        let result = calculate_shift(&haber(), &stress);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["direction"], "right");
        assert!(json["explanationIs"].is_string());
    }
}
