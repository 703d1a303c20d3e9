//! # Unit Types
//!
//! Type-safe wrappers for the quantities the chemistry games work with.
//! They are plain `f64` newtypes that serialize as bare numbers.
//!
//! ## Standard Units
//!
//! The solvers work in the units the ideal-gas constant is quoted in:
//! - Pressure: atmospheres (atm)
//! - Volume: liters (L)
//! - Amount: moles (mol)
//! - Temperature: kelvin (K)
//!
//! Game inputs arrive as [`GasValue`] (a number plus a unit string) and are
//! normalized with [`GasValue::to_standard`].
//!
//! ## Example
//!
//! ```rust
//! use chem_core::units::{Celsius, Kelvin, Kilopascals, Atmospheres};
//!
//! let t: Kelvin = Celsius(25.0).into();
//! assert!((t.0 - 298.15).abs() < 1e-9);
//!
//! let p: Atmospheres = Kilopascals(101.325).into();
//! assert!((p.0 - 1.0).abs() < 1e-9);
//! ```

use log::warn;
use serde::{Deserialize, Serialize};

use crate::errors::{ChemError, ChemResult};

/// kPa per atm
pub const KPA_PER_ATM: f64 = 101.325;
/// mmHg (torr) per atm
pub const MMHG_PER_ATM: f64 = 760.0;
/// bar per atm
pub const BAR_PER_ATM: f64 = 1.01325;
/// Offset between the Celsius and Kelvin scales
pub const CELSIUS_OFFSET: f64 = 273.15;

// ============================================================================
// Pressure Units
// ============================================================================

/// Pressure in atmospheres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Atmospheres(pub f64);

/// Pressure in kilopascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilopascals(pub f64);

/// Pressure in millimeters of mercury (= torr)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MmHg(pub f64);

impl From<Kilopascals> for Atmospheres {
    fn from(kpa: Kilopascals) -> Self {
        Atmospheres(kpa.0 / KPA_PER_ATM)
    }
}

impl From<Atmospheres> for Kilopascals {
    fn from(atm: Atmospheres) -> Self {
        Kilopascals(atm.0 * KPA_PER_ATM)
    }
}

impl From<MmHg> for Atmospheres {
    fn from(mmhg: MmHg) -> Self {
        Atmospheres(mmhg.0 / MMHG_PER_ATM)
    }
}

impl From<Atmospheres> for MmHg {
    fn from(atm: Atmospheres) -> Self {
        MmHg(atm.0 * MMHG_PER_ATM)
    }
}

// ============================================================================
// Volume Units
// ============================================================================

/// Volume in liters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Liters(pub f64);

/// Volume in milliliters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Milliliters(pub f64);

impl From<Milliliters> for Liters {
    fn from(ml: Milliliters) -> Self {
        Liters(ml.0 / 1000.0)
    }
}

impl From<Liters> for Milliliters {
    fn from(l: Liters) -> Self {
        Milliliters(l.0 * 1000.0)
    }
}

// ============================================================================
// Temperature Units
// ============================================================================

/// Absolute temperature in kelvin
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kelvin(pub f64);

/// Temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Celsius(pub f64);

impl From<Celsius> for Kelvin {
    fn from(c: Celsius) -> Self {
        Kelvin(c.0 + CELSIUS_OFFSET)
    }
}

impl From<Kelvin> for Celsius {
    fn from(k: Kelvin) -> Self {
        Celsius(k.0 - CELSIUS_OFFSET)
    }
}

// ============================================================================
// Gas game input wrapper
// ============================================================================

/// Which ideal-gas quantity a [`GasValue`] measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GasQuantity {
    Pressure,
    Volume,
    Amount,
    Temperature,
}

/// One measured quantity as the student entered it.
///
/// ## JSON Example
///
/// ```json
/// { "value": 101.325, "unit": "kPa" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasValue {
    pub value: f64,
    pub unit: String,
}

impl GasValue {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        GasValue {
            value,
            unit: unit.into(),
        }
    }

    /// Convert to the solver's standard unit (atm, L, mol or K).
    pub fn to_standard(&self, quantity: GasQuantity) -> ChemResult<f64> {
        let unit = self.unit.trim();
        let converted = match (quantity, unit.to_lowercase().as_str()) {
            (GasQuantity::Pressure, "atm") => Some(self.value),
            (GasQuantity::Pressure, "kpa") => Some(Atmospheres::from(Kilopascals(self.value)).0),
            (GasQuantity::Pressure, "mmhg" | "torr") => Some(Atmospheres::from(MmHg(self.value)).0),
            (GasQuantity::Pressure, "bar") => Some(self.value / BAR_PER_ATM),
            (GasQuantity::Pressure, "pa") => Some(self.value / (KPA_PER_ATM * 1000.0)),
            (GasQuantity::Volume, "l") => Some(self.value),
            (GasQuantity::Volume, "ml") => Some(Liters::from(Milliliters(self.value)).0),
            (GasQuantity::Volume, "m3" | "m³") => Some(self.value * 1000.0),
            (GasQuantity::Amount, "mol") => Some(self.value),
            (GasQuantity::Amount, "mmol") => Some(self.value / 1000.0),
            (GasQuantity::Temperature, "k") => Some(self.value),
            (GasQuantity::Temperature, "c" | "°c") => Some(Kelvin::from(Celsius(self.value)).0),
            _ => None,
        };

        converted.ok_or_else(|| {
            warn!("unsupported unit '{}' for {:?}", unit, quantity);
            ChemError::invalid_input(
                format!("{:?}", quantity).to_lowercase(),
                format!("{} {}", self.value, unit),
                format!("Unsupported unit '{}'", unit),
            )
        })
    }
}
