//! Curve-stripping error types.
//!
//! This module provides structured error handling for hazard-curve
//! bootstrapping with the failing quote identified by position and tenor.

use pricer_models::instruments::InstrumentError;
use thiserror::Error;

use crate::calibration::CalibrationError;

/// Errors that can occur while stripping a credit curve.
///
/// # Variants
///
/// - `Validation`: The quote set itself is malformed (empty, unsorted,
///   duplicate tenors, negative spreads) or the contract terms are invalid
/// - `CurveStripping`: Calibration failed at one bootstrap step; the whole
///   run is aborted and no partial curve is returned
///
/// # Examples
///
/// ```
/// use pricer_optimiser::bootstrapping::BootstrapError;
///
/// let err = BootstrapError::validation("tenor", 3.0, "quote tenors must be strictly increasing");
/// assert!(err.is_validation());
/// assert!(format!("{}", err).contains("strictly increasing"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BootstrapError {
    /// Malformed quotes or terms; `field` names the offending input.
    #[error("Invalid {field} = {value}: {reason}")]
    Validation {
        /// Name of the offending field
        field: &'static str,
        /// The rejected value
        value: f64,
        /// What the value must satisfy
        reason: &'static str,
    },

    /// Calibration failure at one bootstrap step.
    #[error("Curve stripping failed at quote {index} (tenor {tenor}): {source}")]
    CurveStripping {
        /// Position of the failing quote in the input
        index: usize,
        /// Tenor of the failing quote
        tenor: f64,
        /// Underlying calibration failure
        #[source]
        source: CalibrationError,
    },
}

impl BootstrapError {
    /// Shorthand for [`BootstrapError::Validation`].
    pub fn validation(field: &'static str, value: f64, reason: &'static str) -> Self {
        Self::Validation {
            field,
            value,
            reason,
        }
    }

    /// Whether the failure traces back to malformed input.
    pub fn is_validation(&self) -> bool {
        match self {
            Self::Validation { .. } => true,
            Self::CurveStripping { source, .. } => source.is_validation(),
        }
    }

    /// Whether a root-finder failed to converge.
    pub fn is_convergence(&self) -> bool {
        match self {
            Self::Validation { .. } => false,
            Self::CurveStripping { source, .. } => source.is_convergence(),
        }
    }

    /// Tenor of the failing quote, for stripping failures.
    pub fn tenor(&self) -> Option<f64> {
        match self {
            Self::CurveStripping { tenor, .. } => Some(*tenor),
            Self::Validation { .. } => None,
        }
    }
}

impl From<InstrumentError> for BootstrapError {
    fn from(err: InstrumentError) -> Self {
        match err {
            InstrumentError::Validation {
                field,
                value,
                reason,
            } => Self::Validation {
                field,
                value,
                reason,
            },
            other => Self::Validation {
                field: other.field().unwrap_or("quotes"),
                value: f64::NAN,
                reason: "rejected by contract validation",
            },
        }
    }
}
