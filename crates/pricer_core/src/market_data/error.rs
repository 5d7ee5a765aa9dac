//! Market data error types.
//!
//! This module provides structured error handling for discount curve and
//! survival curve construction and lookups.

use thiserror::Error;

/// Market data operation errors.
///
/// Provides structured error handling for curve operations with descriptive
/// context for each failure mode.
///
/// # Variants
///
/// - `InvalidMaturity`: Negative (or otherwise unusable) time
/// - `OutOfBounds`: Query outside valid domain
/// - `InsufficientData`: Not enough data points for construction
/// - `NonIncreasingSegment`: Segment end does not extend the curve
/// - `NegativeHazardRate`: Hazard rate below zero or not finite
/// - `EmptyCurve`: Survival query on a curve without segments
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketDataError;
///
/// let err = MarketDataError::InvalidMaturity { t: -1.0 };
/// assert!(format!("{}", err).contains("-1"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Invalid maturity (negative time).
    #[error("Invalid maturity: t = {t}")]
    InvalidMaturity {
        /// The invalid maturity value
        t: f64,
    },

    /// Query point outside valid domain.
    #[error("Out of bounds: {x} not in [{min}, {max}]")]
    OutOfBounds {
        /// The query point that was out of bounds
        x: f64,
        /// Minimum valid value
        min: f64,
        /// Maximum valid value
        max: f64,
    },

    /// Insufficient data for construction.
    #[error("Insufficient data: got {got}, need {need}")]
    InsufficientData {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },

    /// Segment end time does not lie strictly beyond the current curve end.
    #[error("Invalid segment end_time = {end_time}: must be strictly greater than {current_end}")]
    NonIncreasingSegment {
        /// Requested segment end time
        end_time: f64,
        /// Current final end time of the curve
        current_end: f64,
    },

    /// Hazard rate is negative or not finite.
    #[error("Invalid hazard_rate = {hazard_rate}: must be finite and >= 0")]
    NegativeHazardRate {
        /// The rejected hazard rate
        hazard_rate: f64,
    },

    /// Survival probability requested beyond time 0 on a curve with no segments.
    #[error("Credit curve has no hazard segments")]
    EmptyCurve,
}

impl MarketDataError {
    /// Check whether this error reports a malformed input.
    ///
    /// A negative hazard rate is both a validation and a domain error.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidMaturity { .. }
                | Self::InsufficientData { .. }
                | Self::NonIncreasingSegment { .. }
                | Self::NegativeHazardRate { .. }
                | Self::EmptyCurve
        )
    }

    /// Check whether this error reports a hazard rate outside its domain.
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::NegativeHazardRate { .. })
    }
}
