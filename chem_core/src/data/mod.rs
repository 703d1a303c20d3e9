//! # Static Data Tables
//!
//! Read-only reference data loaded on first use. Every table has a lookup
//! that returns `ChemError::NotFound` for unknown ids.

pub mod buffers;
pub mod conversion_factors;
pub mod equilibria;
pub mod reactions;
pub mod redox;
