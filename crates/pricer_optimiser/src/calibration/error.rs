//! Calibration error types.

use pricer_core::types::SolverError;
use pricer_models::instruments::InstrumentError;
use thiserror::Error;

/// Errors raised while solving for a par spread or an implied hazard rate.
///
/// # Variants
///
/// - `Validation`: Malformed calibration input; never retried
/// - `Convergence`: The root-finder exhausted its budget or the bracket held
///   no sign change
/// - `Pricing`: The leg valuator rejected the contract or curves
///
/// # Examples
///
/// ```
/// use pricer_core::types::SolverError;
/// use pricer_optimiser::calibration::CalibrationError;
///
/// let err = CalibrationError::Convergence {
///     tenor: 5.0,
///     lower: 0.0,
///     upper: 20.0,
///     residual: 0.004,
///     iterations: 0,
///     source: SolverError::NoBracket { a: 0.0, b: 20.0, fa: -0.004, fb: -0.001 },
/// };
/// assert!(err.is_convergence());
/// assert!(format!("{}", err).contains("tenor 5"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalibrationError {
    /// Malformed input; `field` names the offending parameter.
    #[error("Invalid {field} = {value}: {reason}")]
    Validation {
        /// Name of the offending field
        field: &'static str,
        /// The rejected value
        value: f64,
        /// What the value must satisfy
        reason: &'static str,
    },

    /// Root-finder failure with the last bracket and residual.
    #[error(
        "Calibration did not converge at tenor {tenor}: bracket [{lower}, {upper}], residual = {residual} after {iterations} iterations"
    )]
    Convergence {
        /// Tenor being calibrated
        tenor: f64,
        /// Last lower bracket endpoint
        lower: f64,
        /// Last upper bracket endpoint
        upper: f64,
        /// Last evaluated residual
        residual: f64,
        /// Iterations spent
        iterations: usize,
        /// Underlying solver failure
        #[source]
        source: SolverError,
    },

    /// Valuation failure inside the objective.
    #[error("Pricing error: {0}")]
    Pricing(#[from] InstrumentError),
}

impl CalibrationError {
    /// Shorthand for [`CalibrationError::Validation`].
    pub fn validation(field: &'static str, value: f64, reason: &'static str) -> Self {
        Self::Validation {
            field,
            value,
            reason,
        }
    }

    /// Wrap a solver failure for `tenor`, falling back to the search bracket
    /// when the solver reports none.
    pub fn convergence(tenor: f64, bracket: (f64, f64), source: SolverError) -> Self {
        let (lower, upper) = source.bracket().unwrap_or(bracket);
        let iterations = match source {
            SolverError::MaxIterationsExceeded { iterations, .. } => iterations,
            _ => 0,
        };
        Self::Convergence {
            tenor,
            lower,
            upper,
            residual: source.residual().unwrap_or(f64::NAN),
            iterations,
            source,
        }
    }

    /// Whether the input itself was malformed.
    pub fn is_validation(&self) -> bool {
        match self {
            Self::Validation { .. } => true,
            Self::Pricing(err) => err.is_validation(),
            Self::Convergence { .. } => false,
        }
    }

    /// Whether the root-finder failed.
    pub fn is_convergence(&self) -> bool {
        matches!(self, Self::Convergence { .. })
    }

    /// Name of the offending field, when known.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation { field, .. } => Some(*field),
            Self::Pricing(err) => err.field(),
            Self::Convergence { .. } => None,
        }
    }
}
