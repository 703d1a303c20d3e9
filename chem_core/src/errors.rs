//! # Error Types
//!
//! Structured error types for chem_core. The calculators are pure functions,
//! so the taxonomy is narrow: missing inputs, invalid inputs, unknown table
//! entries, and the file/serialization errors raised by the progress helpers.
//!
//! Degenerate numeric cases (percentage error against zero, malformed unit
//! strings) are deliberately *not* errors; they produce NaN/Infinity or a
//! degraded string and callers validate upstream.
//!
//! ## Example
//!
//! ```rust
//! use chem_core::errors::{ChemError, ChemResult};
//!
//! fn validate_volume(volume_l: f64) -> ChemResult<()> {
//!     if volume_l <= 0.0 {
//!         return Err(ChemError::invalid_input(
//!             "volume_l",
//!             volume_l.to_string(),
//!             "Volume must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for chem_core operations
pub type ChemResult<T> = Result<T, ChemError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum ChemError {
    /// An input value is invalid (out of range, unknown unit, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A solver was asked for a variable without enough known values
    #[error("Cannot solve for {variable} with given values")]
    CannotSolve { variable: String },

    /// Static data table lookup failed
    #[error("{kind} not found: {key}")]
    NotFound { kind: String, key: String },

    /// Calculation produced a physically impossible result
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ChemError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        ChemError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a CannotSolve error
    pub fn cannot_solve(variable: impl Into<String>) -> Self {
        ChemError::CannotSolve {
            variable: variable.into(),
        }
    }

    /// Create a NotFound error
    pub fn not_found(kind: impl Into<String>, key: impl Into<String>) -> Self {
        ChemError::NotFound {
            kind: kind.into(),
            key: key.into(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(calculation_type: impl Into<String>, reason: impl Into<String>) -> Self {
        ChemError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        ChemError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether the user can fix this by supplying different input
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            ChemError::InvalidInput { .. } | ChemError::CannotSolve { .. } | ChemError::NotFound { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ChemError::InvalidInput { .. } => "INVALID_INPUT",
            ChemError::CannotSolve { .. } => "CANNOT_SOLVE",
            ChemError::NotFound { .. } => "NOT_FOUND",
            ChemError::CalculationFailed { .. } => "CALCULATION_FAILED",
            ChemError::FileError { .. } => "FILE_ERROR",
            ChemError::SerializationError { .. } => "SERIALIZATION_ERROR",
            ChemError::VersionMismatch { .. } => "VERSION_MISMATCH",
            ChemError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for ChemError {
    fn from(e: serde_json::Error) -> Self {
        ChemError::SerializationError { reason: e.to_string() }
    }
}
