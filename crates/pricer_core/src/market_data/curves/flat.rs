//! Constant risk-free rate discounting.

use super::DiscountCurve;
use crate::market_data::error::MarketDataError;
use crate::types::lossy_f64;
use num_traits::Float;

/// Discount curve with a single continuously compounded rate, `D(t) = exp(-r t)`.
///
/// This is the `rf_rate` discounting used by the CDS pricer and the curve
/// stripper. Negative rates are accepted.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{DiscountCurve, FlatCurve};
///
/// let curve = FlatCurve::new(0.04_f64);
/// let df = curve.discount_factor(1.0).unwrap();
/// assert!((df - 0.960789).abs() < 1e-6);
/// assert_eq!(curve.zero_rate(3.0).unwrap(), 0.04);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlatCurve<T: Float> {
    rate: T,
}

impl<T: Float> FlatCurve<T> {
    /// Construct a flat curve with the given continuously compounded rate.
    #[inline]
    pub fn new(rate: T) -> Self {
        Self { rate }
    }

    /// The constant rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }
}

impl<T: Float> DiscountCurve<T> for FlatCurve<T> {
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        if t < T::zero() || t.is_nan() {
            return Err(MarketDataError::InvalidMaturity { t: lossy_f64(t) });
        }
        Ok((-self.rate * t).exp())
    }

    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        if t <= T::zero() {
            return Err(MarketDataError::InvalidMaturity { t: lossy_f64(t) });
        }
        Ok(self.rate)
    }

    fn forward_rate(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        if t1 < T::zero() || t2 <= t1 {
            return Err(MarketDataError::InvalidMaturity {
                t: lossy_f64(t2 - t1),
            });
        }
        Ok(self.rate)
    }
}
