//! Error types for closed-form credit formulas.

use thiserror::Error;

/// Analytical model errors.
///
/// # Variants
/// - `InvalidRecovery`: Recovery rate outside `[0, 1]`, or exactly 1 where a
///   loss given default is divided by
/// - `InvalidHazard`: Negative or non-finite hazard rate
/// - `InvalidTenor`: Non-positive or non-finite tenor
/// - `InvalidSpread`: Negative or non-finite spread
/// - `InvalidRate`: Non-finite risk-free rate
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidRecovery { recovery_rate: 1.0 };
/// assert!(format!("{}", err).contains("recovery"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Recovery rate unusable for the requested formula.
    #[error("Invalid recovery rate: R = {recovery_rate}")]
    InvalidRecovery {
        /// The rejected recovery rate
        recovery_rate: f64,
    },

    /// Hazard rate negative or not finite.
    #[error("Invalid hazard rate: λ = {hazard_rate}")]
    InvalidHazard {
        /// The rejected hazard rate
        hazard_rate: f64,
    },

    /// Tenor non-positive or not finite.
    #[error("Invalid tenor: T = {tenor}")]
    InvalidTenor {
        /// The rejected tenor
        tenor: f64,
    },

    /// Spread negative or not finite.
    #[error("Invalid spread: s = {spread}")]
    InvalidSpread {
        /// The rejected spread
        spread: f64,
    },

    /// Risk-free rate not finite.
    #[error("Invalid risk-free rate: r = {rate}")]
    InvalidRate {
        /// The rejected rate
        rate: f64,
    },
}

impl AnalyticalError {
    /// Name of the offending input.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidRecovery { .. } => "recovery_rate",
            Self::InvalidHazard { .. } => "hazard_rate",
            Self::InvalidTenor { .. } => "tenor",
            Self::InvalidSpread { .. } => "credit_spread",
            Self::InvalidRate { .. } => "rf_rate",
        }
    }
}
