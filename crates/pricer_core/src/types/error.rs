//! Error types for structured error handling.
//!
//! This module provides:
//! - `SolverError`: Errors from bracketing root-finders
//!
//! Market data errors live in [`crate::market_data::error`].

use thiserror::Error;

/// Root-finding solver errors.
///
/// Provides structured error handling for root-finding solver operations
/// with the last evaluated bracket and residual attached for diagnosis.
///
/// # Variants
/// - `MaxIterationsExceeded`: Solver failed to converge within iteration limit
/// - `NoBracket`: Function values at bracket endpoints have same sign
/// - `InvalidBracket`: Bracket endpoints are not finite or are degenerate
/// - `NumericalInstability`: Objective returned a non-finite value
///
/// # Examples
/// ```
/// use pricer_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded {
///     iterations: 100,
///     a: 0.01,
///     b: 0.02,
///     residual: 1e-6,
/// };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations: bracket [{a}, {b}], residual = {residual}")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
        /// Last bracket endpoint (best estimate)
        a: f64,
        /// Last bracket endpoint (contrapoint)
        b: f64,
        /// Objective value at the best estimate
        residual: f64,
    },

    /// No valid bracket (function values at endpoints have same sign).
    #[error("No bracket: f({a}) = {fa} and f({b}) = {fb} have same sign")]
    NoBracket {
        /// Left bracket endpoint
        a: f64,
        /// Right bracket endpoint
        b: f64,
        /// Objective value at `a`
        fa: f64,
        /// Objective value at `b`
        fb: f64,
    },

    /// Bracket endpoints are not usable.
    #[error("Invalid bracket [{a}, {b}]")]
    InvalidBracket {
        /// Left bracket endpoint
        a: f64,
        /// Right bracket endpoint
        b: f64,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

impl SolverError {
    /// Return the last known bracket `(a, b)`, if the error carries one.
    pub fn bracket(&self) -> Option<(f64, f64)> {
        match self {
            SolverError::MaxIterationsExceeded { a, b, .. }
            | SolverError::NoBracket { a, b, .. }
            | SolverError::InvalidBracket { a, b } => Some((*a, *b)),
            SolverError::NumericalInstability(_) => None,
        }
    }

    /// Return the last known residual, if the error carries one.
    ///
    /// For `NoBracket` this is the endpoint residual of smaller magnitude.
    pub fn residual(&self) -> Option<f64> {
        match self {
            SolverError::MaxIterationsExceeded { residual, .. } => Some(*residual),
            SolverError::NoBracket { fa, fb, .. } => {
                Some(if fa.abs() <= fb.abs() { *fa } else { *fb })
            }
            _ => None,
        }
    }
}
