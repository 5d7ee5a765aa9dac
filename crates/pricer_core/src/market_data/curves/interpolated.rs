//! Pillar-based discount curve.

use super::DiscountCurve;
use crate::market_data::error::MarketDataError;
use crate::types::lossy_f64;
use num_traits::Float;

/// Interpolation method between discount curve pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum CurveInterpolation {
    /// Linear in the zero rate; `D(t) = exp(-r(t) t)`.
    #[default]
    Linear,

    /// Linear in `ln D(t)`, i.e. constant forward rate between pillars.
    LogLinear,
}

/// Term-structure discount curve defined by `(tenor, zero rate)` pillars.
///
/// Between pillars the curve interpolates according to [`CurveInterpolation`].
/// Before the first pillar the first zero rate applies. Beyond the last
/// pillar the last zero rate applies when extrapolation is allowed, otherwise
/// the lookup fails with [`MarketDataError::OutOfBounds`].
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{CurveInterpolation, DiscountCurve, InterpolatedCurve};
///
/// let curve = InterpolatedCurve::new(
///     &[1.0_f64, 3.0, 5.0],
///     &[0.03, 0.035, 0.04],
///     CurveInterpolation::Linear,
///     true,
/// )
/// .unwrap();
///
/// let r2 = curve.zero_rate(2.0).unwrap();
/// assert!((r2 - 0.0325).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InterpolatedCurve<T: Float> {
    tenors: Vec<T>,
    rates: Vec<T>,
    method: CurveInterpolation,
    allow_extrapolation: bool,
}

impl<T: Float> InterpolatedCurve<T> {
    /// Build a curve from strictly increasing positive tenors and their zero rates.
    ///
    /// # Errors
    ///
    /// - [`MarketDataError::InsufficientData`] for fewer than two pillars or
    ///   mismatched slice lengths
    /// - [`MarketDataError::InvalidMaturity`] for a non-positive or
    ///   non-increasing tenor
    pub fn new(
        tenors: &[T],
        rates: &[T],
        method: CurveInterpolation,
        allow_extrapolation: bool,
    ) -> Result<Self, MarketDataError> {
        if tenors.len() < 2 {
            return Err(MarketDataError::InsufficientData {
                got: tenors.len(),
                need: 2,
            });
        }
        if rates.len() != tenors.len() {
            return Err(MarketDataError::InsufficientData {
                got: rates.len(),
                need: tenors.len(),
            });
        }

        let mut prev = T::zero();
        for &t in tenors {
            if !(t > prev) {
                return Err(MarketDataError::InvalidMaturity { t: lossy_f64(t) });
            }
            prev = t;
        }

        Ok(Self {
            tenors: tenors.to_vec(),
            rates: rates.to_vec(),
            method,
            allow_extrapolation,
        })
    }

    /// First and last pillar tenor.
    #[inline]
    pub fn domain(&self) -> (T, T) {
        (self.tenors[0], self.tenors[self.tenors.len() - 1])
    }

    /// Interpolation method.
    #[inline]
    pub fn method(&self) -> CurveInterpolation {
        self.method
    }

    /// Whether lookups beyond the last pillar are extrapolated flat.
    #[inline]
    pub fn allow_extrapolation(&self) -> bool {
        self.allow_extrapolation
    }

    /// Pillar tenors.
    #[inline]
    pub fn tenors(&self) -> &[T] {
        &self.tenors
    }

    /// Pillar zero rates.
    #[inline]
    pub fn rates(&self) -> &[T] {
        &self.rates
    }

    /// Index `i` such that `tenors[i] <= t <= tenors[i + 1]`.
    fn bracket(&self, t: T) -> usize {
        let upper = self.tenors.partition_point(|&x| x < t);
        upper.clamp(1, self.tenors.len() - 1) - 1
    }

    /// `ln D(t)` at time `t`.
    fn log_discount(&self, t: T) -> Result<T, MarketDataError> {
        let (t_min, t_max) = self.domain();
        let last = self.rates.len() - 1;

        if t <= t_min {
            return Ok(-self.rates[0] * t);
        }
        if t > t_max {
            if !self.allow_extrapolation {
                return Err(MarketDataError::OutOfBounds {
                    x: lossy_f64(t),
                    min: lossy_f64(t_min),
                    max: lossy_f64(t_max),
                });
            }
            return Ok(-self.rates[last] * t);
        }

        let i = self.bracket(t);
        let (t0, t1) = (self.tenors[i], self.tenors[i + 1]);
        let (r0, r1) = (self.rates[i], self.rates[i + 1]);
        let w = (t - t0) / (t1 - t0);

        Ok(match self.method {
            CurveInterpolation::Linear => -(r0 + w * (r1 - r0)) * t,
            CurveInterpolation::LogLinear => {
                let (l0, l1) = (-r0 * t0, -r1 * t1);
                l0 + w * (l1 - l0)
            }
        })
    }
}

impl<T: Float> DiscountCurve<T> for InterpolatedCurve<T> {
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        if t < T::zero() || t.is_nan() {
            return Err(MarketDataError::InvalidMaturity { t: lossy_f64(t) });
        }
        Ok(self.log_discount(t)?.exp())
    }
}
