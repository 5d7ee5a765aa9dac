//! Core scalar and error types.
//!
//! This module provides:
//! - `error`: Structured error types for root-finding solvers
//! - `scalar`: Conversion helpers between `f64` literals and generic floats
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`SolverError`] from `error`
//! - [`constant`], [`lossy_f64`] from `scalar`

pub mod error;
pub mod scalar;

pub use error::SolverError;
pub use scalar::{constant, lossy_f64};
