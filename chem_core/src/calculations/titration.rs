//! # Titration pH Calculation
//!
//! Closed-form pH as a function of titrant volume for three titration classes.
//!
//! | Kind | Analyte | Titrant |
//! |------|---------|---------|
//! | `StrongAcidStrongBase` | strong acid | strong base |
//! | `WeakAcidStrongBase` | weak acid (pKa) | strong base |
//! | `StrongAcidWeakBase` | weak base (pKb) | strong acid |
//!
//! ## Regions
//!
//! - **Initial** (no titrant): weak species equilibrium, or `-log10(C)` for a strong acid
//! - **Buffer region**: Henderson–Hasselbalch with remaining weak species / formed conjugate
//! - **Equivalence**: 7 for strong–strong, otherwise hydrolysis of the conjugate
//! - **Past equivalence**: excess strong titrant dominates
//!
//! Volumes are in mL, concentrations in mol/L, 25 °C (`Kw = 1e-14`).
//!
//! ## Example
//!
//! ```rust
//! use chem_core::calculations::titration::{calculate_ph, TitrationKind, TitrationSetup};
//!
//! let setup = TitrationSetup {
//!     kind: TitrationKind::StrongAcidStrongBase,
//!     analyte_volume_ml: 25.0,
//!     analyte_molarity: 0.1,
//!     titrant_molarity: 0.1,
//! };
//! assert_eq!(calculate_ph(&setup, 25.0).unwrap(), 7.0);
//! ```

use log::debug;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{ChemError, ChemResult};

/// Ion product of water at 25 °C
pub const KW: f64 = 1e-14;

/// Relative mole difference treated as exact equivalence
const EQUIVALENCE_EPSILON: f64 = 1e-9;

/// Titration class; weak species carry their dissociation constant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TitrationKind {
    StrongAcidStrongBase,
    WeakAcidStrongBase { pka: f64 },
    StrongAcidWeakBase { pkb: f64 },
}

/// Analyte in the flask and titrant concentration in the burette.
///
/// ## JSON Example
///
/// ```json
/// {
///   "kind": { "type": "weak_acid_strong_base", "pka": 4.76 },
///   "analyte_volume_ml": 25.0,
///   "analyte_molarity": 0.1,
///   "titrant_molarity": 0.1
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitrationSetup {
    pub kind: TitrationKind,
    pub analyte_volume_ml: f64,
    pub analyte_molarity: f64,
    pub titrant_molarity: f64,
}

impl TitrationSetup {
    pub fn validate(&self) -> ChemResult<()> {
        for (field, value) in [
            ("analyte_volume_ml", self.analyte_volume_ml),
            ("analyte_molarity", self.analyte_molarity),
            ("titrant_molarity", self.titrant_molarity),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ChemError::invalid_input(field, value.to_string(), "Must be a positive number"));
            }
        }
        Ok(())
    }

    /// Moles of analyte in the flask
    pub fn analyte_moles(&self) -> f64 {
        self.analyte_volume_ml / 1000.0 * self.analyte_molarity
    }
}

/// `[H+]` of a weak acid solution (exact quadratic, `x² + Ka·x − Ka·C = 0`).
///
/// Also gives `[OH-]` of a weak base when called with `Kb`.
pub fn weak_acid_h_concentration(ka: f64, concentration: f64) -> f64 {
    (-ka + (ka * ka + 4.0 * ka * concentration).sqrt()) / 2.0
}

/// Titrant volume (mL) needed to reach equivalence
pub fn equivalence_volume_ml(setup: &TitrationSetup) -> f64 {
    setup.analyte_moles() / setup.titrant_molarity * 1000.0
}

/// Region of the titration curve a point falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitrationRegion {
    Initial,
    BeforeEquivalence,
    Equivalence,
    AfterEquivalence,
}

/// Classify a titrant volume against the equivalence point
pub fn region(setup: &TitrationSetup, titrant_volume_ml: f64) -> TitrationRegion {
    let analyte = setup.analyte_moles();
    let titrant = titrant_volume_ml / 1000.0 * setup.titrant_molarity;
    if titrant_volume_ml <= 0.0 {
        TitrationRegion::Initial
    } else if (analyte - titrant).abs() <= EQUIVALENCE_EPSILON * analyte {
        TitrationRegion::Equivalence
    } else if titrant < analyte {
        TitrationRegion::BeforeEquivalence
    } else {
        TitrationRegion::AfterEquivalence
    }
}

/// pH of the flask after adding `titrant_volume_ml` of titrant.
pub fn calculate_ph(setup: &TitrationSetup, titrant_volume_ml: f64) -> ChemResult<f64> {
    setup.validate()?;
    if titrant_volume_ml < 0.0 || !titrant_volume_ml.is_finite() {
        return Err(ChemError::invalid_input(
            "titrant_volume_ml",
            titrant_volume_ml.to_string(),
            "Titrant volume cannot be negative",
        ));
    }

    let analyte_moles = setup.analyte_moles();
    let titrant_moles = titrant_volume_ml / 1000.0 * setup.titrant_molarity;
    let total_volume_l = (setup.analyte_volume_ml + titrant_volume_ml) / 1000.0;
    let region = region(setup, titrant_volume_ml);

    let ph = match setup.kind {
        TitrationKind::StrongAcidStrongBase => strong_strong_ph(analyte_moles, titrant_moles, total_volume_l, region),
        TitrationKind::WeakAcidStrongBase { pka } => {
            weak_acid_strong_base_ph(pka, analyte_moles, titrant_moles, total_volume_l, region)
        }
        TitrationKind::StrongAcidWeakBase { pkb } => {
            strong_acid_weak_base_ph(pkb, analyte_moles, titrant_moles, total_volume_l, region)
        }
    };

    debug!("titration {:?} at {} mL: {:?}, pH {:.3}", setup.kind, titrant_volume_ml, region, ph);
    Ok(ph)
}

fn strong_strong_ph(acid_moles: f64, base_moles: f64, volume_l: f64, region: TitrationRegion) -> f64 {
    match region {
        TitrationRegion::Equivalence => 7.0,
        _ if acid_moles > base_moles => {
            let h = (acid_moles - base_moles) / volume_l;
            -h.log10()
        }
        _ => {
            let oh = (base_moles - acid_moles) / volume_l;
            14.0 + oh.log10()
        }
    }
}

fn weak_acid_strong_base_ph(
    pka: f64,
    acid_moles: f64,
    base_moles: f64,
    volume_l: f64,
    region: TitrationRegion,
) -> f64 {
    let ka = 10f64.powf(-pka);
    match region {
        TitrationRegion::Initial => -weak_acid_h_concentration(ka, acid_moles / volume_l).log10(),
        TitrationRegion::BeforeEquivalence => {
            let remaining_acid = acid_moles - base_moles;
            pka + (base_moles / remaining_acid).log10()
        }
        TitrationRegion::Equivalence => {
            // Conjugate base hydrolysis: A⁻ + H2O ⇌ HA + OH⁻
            let kb = KW / ka;
            let oh = weak_acid_h_concentration(kb, acid_moles / volume_l);
            14.0 + oh.log10()
        }
        TitrationRegion::AfterEquivalence => {
            let oh = (base_moles - acid_moles) / volume_l;
            14.0 + oh.log10()
        }
    }
}

fn strong_acid_weak_base_ph(
    pkb: f64,
    base_moles: f64,
    acid_moles: f64,
    volume_l: f64,
    region: TitrationRegion,
) -> f64 {
    let kb = 10f64.powf(-pkb);
    match region {
        TitrationRegion::Initial => 14.0 + weak_acid_h_concentration(kb, base_moles / volume_l).log10(),
        TitrationRegion::BeforeEquivalence => {
            let remaining_base = base_moles - acid_moles;
            let poh = pkb + (acid_moles / remaining_base).log10();
            14.0 - poh
        }
        TitrationRegion::Equivalence => {
            // Conjugate acid hydrolysis: BH⁺ ⇌ B + H⁺
            let ka = KW / kb;
            let h = weak_acid_h_concentration(ka, base_moles / volume_l);
            -h.log10()
        }
        TitrationRegion::AfterEquivalence => {
            let h = (acid_moles - base_moles) / volume_l;
            -h.log10()
        }
    }
}

/// pH at the equivalence point
pub fn equivalence_ph(setup: &TitrationSetup) -> ChemResult<f64> {
    calculate_ph(setup, equivalence_volume_ml(setup))
}

/// One point of a titration curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub volume_ml: f64,
    pub ph: f64,
}

/// Upper bound on sampled curve points
pub const MAX_CURVE_POINTS: usize = 10_000;

/// Sample the titration curve from 0 to `max_volume_ml` in `step_ml` increments.
///
/// The equivalence volume is always included so the curve shows the jump.
pub fn titration_curve(setup: &TitrationSetup, max_volume_ml: f64, step_ml: f64) -> ChemResult<Vec<CurvePoint>> {
    if !(step_ml > 0.0) {
        return Err(ChemError::invalid_input("step_ml", step_ml.to_string(), "Step must be positive"));
    }
    if !max_volume_ml.is_finite() || max_volume_ml < 0.0 {
        return Err(ChemError::invalid_input(
            "max_volume_ml",
            max_volume_ml.to_string(),
            "Maximum volume must be a finite non-negative number",
        ));
    }
    let steps = (max_volume_ml / step_ml).floor();
    if steps > MAX_CURVE_POINTS as f64 {
        return Err(ChemError::invalid_input(
            "step_ml",
            step_ml.to_string(),
            format!("Curve would have more than {} points", MAX_CURVE_POINTS),
        ));
    }
    let steps = steps as usize;
    let mut volumes: Vec<f64> = (0..=steps).map(|i| i as f64 * step_ml).collect();
    let equivalence = equivalence_volume_ml(setup);
    if equivalence <= max_volume_ml && !volumes.iter().any(|v| (v - equivalence).abs() < 1e-9) {
        volumes.push(equivalence);
        volumes.sort_by(|a, b| a.total_cmp(b));
    }

    volumes
        .into_iter()
        .map(|volume_ml| calculate_ph(setup, volume_ml).map(|ph| CurvePoint { volume_ml, ph }))
        .collect()
}

// ============================================================================
// Indicator colors
// ============================================================================

const ACID_COLOR: (f64, f64, f64) = (139.0, 0.0, 0.0); // #8B0000
const NEUTRAL_COLOR: (f64, f64, f64) = (0.0, 255.0, 0.0); // #00FF00
const BASE_COLOR: (f64, f64, f64) = (128.0, 0.0, 128.0); // #800080

/// Universal-indicator style color for a pH, as `#RRGGBB`.
///
/// pH is clamped to [0, 14] and interpolated linearly on [0, 7] from dark
/// red to green and on [7, 14] from green to purple.
pub fn get_ph_color(ph: f64) -> String {
    let ph = if ph.is_nan() { 7.0 } else { ph.clamp(0.0, 14.0) };
    let (from, to, t) = if ph <= 7.0 {
        (ACID_COLOR, NEUTRAL_COLOR, ph / 7.0)
    } else {
        (NEUTRAL_COLOR, BASE_COLOR, (ph - 7.0) / 7.0)
    };
    let channel = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    format!(
        "#{:02X}{:02X}{:02X}",
        channel(from.0, to.0),
        channel(from.1, to.1),
        channel(from.2, to.2)
    )
}

/// Acid-base indicator with its color-change range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    pub name: String,
    pub ph_low: f64,
    pub ph_high: f64,
    pub acid_color: String,
    pub base_color: String,
}

pub static INDICATORS: Lazy<Vec<Indicator>> = Lazy::new(|| {
    let indicator = |name: &str, ph_low, ph_high, acid_color: &str, base_color: &str| Indicator {
        name: name.to_string(),
        ph_low,
        ph_high,
        acid_color: acid_color.to_string(),
        base_color: base_color.to_string(),
    };
    vec![
        indicator("Methyl orange", 3.1, 4.4, "red", "yellow"),
        indicator("Methyl red", 4.4, 6.2, "red", "yellow"),
        indicator("Bromothymol blue", 6.0, 7.6, "yellow", "blue"),
        indicator("Phenol red", 6.8, 8.4, "yellow", "red"),
        indicator("Phenolphthalein", 8.2, 10.0, "colorless", "pink"),
        indicator("Thymolphthalein", 9.3, 10.5, "colorless", "blue"),
    ]
});

/// Indicators whose color change brackets the equivalence pH
pub fn suitable_indicators(equivalence_ph: f64) -> Vec<&'static Indicator> {
    INDICATORS
        .iter()
        .filter(|i| equivalence_ph >= i.ph_low - 1.0 && equivalence_ph <= i.ph_high + 1.0)
        .collect()
}
