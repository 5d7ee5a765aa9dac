//! Discount curve capability.

use crate::market_data::error::MarketDataError;
use crate::types::lossy_f64;
use num_traits::Float;

/// Anything that can produce a risk-free discount factor for a time in years.
///
/// Leg valuations only ever call [`discount_factor`](DiscountCurve::discount_factor),
/// so a flat rate and a pillar-based term structure are interchangeable.
///
/// # Invariants
///
/// - D(0) = 1
/// - D(t) in (0, 1] for non-negative rates
/// - Negative `t` is rejected with [`MarketDataError::InvalidMaturity`]
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{DiscountCurve, FlatCurve};
///
/// let curve = FlatCurve::new(0.04_f64);
/// let df = curve.discount_factor(5.0).unwrap();
/// assert!((df - (-0.2_f64).exp()).abs() < 1e-12);
/// assert!((curve.forward_rate(1.0, 3.0).unwrap() - 0.04).abs() < 1e-12);
/// ```
pub trait DiscountCurve<T: Float> {
    /// Discount factor D(t) for time `t` (years, `t >= 0`).
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError>;

    /// Continuously compounded zero rate `-ln D(t) / t`; requires `t > 0`.
    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        if t <= T::zero() {
            return Err(MarketDataError::InvalidMaturity { t: lossy_f64(t) });
        }
        let df = self.discount_factor(t)?;
        Ok(-df.ln() / t)
    }

    /// Continuously compounded forward rate over `(t1, t2]`; requires `t2 > t1`.
    fn forward_rate(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        let dt = t2 - t1;
        if dt <= T::zero() {
            return Err(MarketDataError::InvalidMaturity { t: lossy_f64(dt) });
        }
        let df1 = self.discount_factor(t1)?;
        let df2 = self.discount_factor(t2)?;
        Ok(-(df2 / df1).ln() / dt)
    }
}

impl<T: Float, C: DiscountCurve<T> + ?Sized> DiscountCurve<T> for &C {
    #[inline]
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        (**self).discount_factor(t)
    }
}
