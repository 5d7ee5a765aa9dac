//! Instrument error types.
//!
//! This module provides structured error handling for contract construction
//! and leg valuation.

use crate::schedules::ScheduleError;
use pricer_core::market_data::MarketDataError;
use pricer_core::math::quadrature::QuadratureError;
use thiserror::Error;

/// Instrument-related errors.
///
/// # Variants
/// - `Validation`: A contract term or market input is out of range
/// - `CurveHorizon`: The survival curve stops before the contract tenor
/// - `MarketData`: A curve lookup failed
/// - `Schedule`: The premium schedule could not be generated
/// - `Quadrature`: The protection-leg quadrature rule could not be built
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::validation("recovery_rate", 1.2, "must lie in [0, 1]");
/// assert_eq!(format!("{}", err), "Invalid recovery_rate = 1.2: must lie in [0, 1]");
/// assert!(err.is_validation());
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
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

    /// Survival curve does not cover the contract.
    #[error("Credit curve horizon {horizon} is shorter than contract tenor {tenor}")]
    CurveHorizon {
        /// Last time covered by the survival curve
        horizon: f64,
        /// Contract tenor
        tenor: f64,
    },

    /// Curve lookup failure.
    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),

    /// Schedule generation failure.
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    /// Quadrature rule construction failure.
    #[error("Quadrature error: {0}")]
    Quadrature(#[from] QuadratureError),
}

impl InstrumentError {
    /// Shorthand for [`InstrumentError::Validation`].
    pub fn validation(field: &'static str, value: f64, reason: &'static str) -> Self {
        Self::Validation {
            field,
            value,
            reason,
        }
    }

    /// Whether the error reports malformed or inconsistent inputs.
    pub fn is_validation(&self) -> bool {
        match self {
            Self::Validation { .. }
            | Self::CurveHorizon { .. }
            | Self::Schedule(_)
            | Self::Quadrature(_) => true,
            Self::MarketData(err) => err.is_validation(),
        }
    }

    /// Name of the offending field, when known.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation { field, .. } => Some(*field),
            Self::CurveHorizon { .. } => Some("tenor"),
            Self::Schedule(
                ScheduleError::InvalidTenor { .. } | ScheduleError::TooManyPeriods { .. },
            ) => Some("tenor"),
            Self::Schedule(_) => Some("payment_frequency"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let err = InstrumentError::validation("tenor", -1.0, "must be positive");
        assert_eq!(format!("{}", err), "Invalid tenor = -1: must be positive");
        assert_eq!(err.field(), Some("tenor"));
    }

    #[test]
    fn test_curve_horizon_display() {
        let err = InstrumentError::CurveHorizon {
            horizon: 3.0,
            tenor: 5.0,
        };
        assert_eq!(
            format!("{}", err),
            "Credit curve horizon 3 is shorter than contract tenor 5"
        );
        assert!(err.is_validation());
    }

    #[test]
    fn test_from_market_data() {
        let err: InstrumentError = MarketDataError::EmptyCurve.into();
        assert!(matches!(err, InstrumentError::MarketData(_)));
        assert!(err.is_validation());
        assert_eq!(err.field(), None);
    }

    #[test]
    fn test_from_schedule() {
        let err: InstrumentError = ScheduleError::InvalidFrequency {
            payments_per_year: 0,
        }
        .into();
        assert!(err.is_validation());
        assert_eq!(err.field(), Some("payment_frequency"));
    }

    #[test]
    fn test_out_of_bounds_is_not_validation() {
        let err: InstrumentError = MarketDataError::OutOfBounds {
            x: 6.0,
            min: 1.0,
            max: 5.0,
        }
        .into();
        assert!(!err.is_validation());
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = InstrumentError::validation("coupon", -0.01, "must be >= 0");
        let _: &dyn std::error::Error = &err;
    }
}
