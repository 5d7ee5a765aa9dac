//! Credit curve abstractions for default risk calculations.
//!
//! This module provides:
//! - [`CreditCurve`]: Generic trait for hazard rate and survival probability calculations
//! - [`HazardSegment`]: A constant-intensity interval `(start_time, end_time]`
//! - [`SurvivalCurve`]: Piecewise-constant hazard rate curve built segment by segment

use crate::market_data::error::MarketDataError;
use crate::types::lossy_f64;
use num_traits::Float;

/// Generic credit curve trait for hazard rate and survival probability calculations.
///
/// # Contract
///
/// - `hazard_rate(t)` returns the instantaneous default intensity λ(t)
/// - `survival_probability(t)` returns P(τ > t) = exp(-∫₀ᵗ λ(s)ds)
/// - `default_probability(t)` returns P(τ ≤ t) = 1 - P(τ > t)
///
/// # Invariants
///
/// - λ(t) ≥ 0 for all t ≥ 0
/// - P(τ > t) = 1 for t ≤ 0
/// - P(τ > t) is continuous, non-increasing and within [0, 1]
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{CreditCurve, SurvivalCurve};
///
/// let curve = SurvivalCurve::flat(0.02_f64, 5.0).unwrap();
/// let q = curve.survival_probability(2.0).unwrap();
/// assert!((q - (-0.04_f64).exp()).abs() < 1e-14);
/// assert!((curve.default_probability(2.0).unwrap() + q - 1.0).abs() < 1e-14);
/// ```
pub trait CreditCurve<T: Float> {
    /// Instantaneous hazard rate at time `t` (years, `t >= 0`).
    fn hazard_rate(&self, t: T) -> Result<T, MarketDataError>;

    /// Survival probability P(τ > t).
    fn survival_probability(&self, t: T) -> Result<T, MarketDataError>;

    /// Default probability P(τ ≤ t).
    fn default_probability(&self, t: T) -> Result<T, MarketDataError> {
        Ok(T::one() - self.survival_probability(t)?)
    }

    /// Conditional survival P(τ > t2 | τ > t1); requires `t2 > t1`.
    fn forward_survival_probability(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        if t2 <= t1 {
            return Err(MarketDataError::InvalidMaturity {
                t: lossy_f64(t2 - t1),
            });
        }
        let s1 = self.survival_probability(t1)?;
        let s2 = self.survival_probability(t2)?;
        if s1 <= T::zero() {
            return Ok(T::zero());
        }
        Ok(s2 / s1)
    }

    /// Last time covered by explicit curve data.
    ///
    /// `None` means the curve is defined for all times (e.g. an analytic
    /// model), so no horizon check applies.
    fn horizon(&self) -> Option<T> {
        None
    }

    /// Times at which the hazard rate may jump, in increasing order.
    ///
    /// Integrators split their grids at these points so that the hazard is
    /// constant on every sub-interval.
    fn knots(&self) -> Vec<T> {
        Vec::new()
    }
}

impl<T: Float, C: CreditCurve<T> + ?Sized> CreditCurve<T> for &C {
    #[inline]
    fn hazard_rate(&self, t: T) -> Result<T, MarketDataError> {
        (**self).hazard_rate(t)
    }

    #[inline]
    fn survival_probability(&self, t: T) -> Result<T, MarketDataError> {
        (**self).survival_probability(t)
    }

    #[inline]
    fn horizon(&self) -> Option<T> {
        (**self).horizon()
    }

    #[inline]
    fn knots(&self) -> Vec<T> {
        (**self).knots()
    }
}

/// Constant default intensity over `(start_time, end_time]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HazardSegment<T: Float> {
    /// Segment start (years); equals the previous segment's end, or 0.
    pub start_time: T,
    /// Segment end (years); strictly greater than `start_time`.
    pub end_time: T,
    /// Constant hazard rate on the segment; non-negative.
    pub hazard_rate: T,
}

impl<T: Float> HazardSegment<T> {
    /// Segment length in years.
    #[inline]
    pub fn duration(&self) -> T {
        self.end_time - self.start_time
    }

    /// Whether `t` lies in `(start_time, end_time]`.
    #[inline]
    pub fn contains(&self, t: T) -> bool {
        t > self.start_time && t <= self.end_time
    }

    /// Survival factor accumulated over the whole segment.
    #[inline]
    pub fn survival_factor(&self) -> T {
        (-self.hazard_rate * self.duration()).exp()
    }
}

/// Piecewise-constant hazard rate curve.
///
/// Segments are contiguous from time 0 with no gaps or overlaps. The curve is
/// extended one segment at a time with [`append_segment`](Self::append_segment),
/// which never touches previously accepted segments. Beyond the last segment
/// the final hazard rate is extrapolated flat.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{CreditCurve, SurvivalCurve};
///
/// let mut curve = SurvivalCurve::new();
/// curve.append_segment(3.0_f64, 0.012).unwrap();
/// curve.append_segment(5.0, 0.018).unwrap();
///
/// // exp(-(0.012 * 3 + 0.018 * 1))
/// let q4 = curve.survival_probability(4.0).unwrap();
/// assert!((q4 - (-0.054_f64).exp()).abs() < 1e-14);
/// assert_eq!(curve.hazard_rate(3.0).unwrap(), 0.012);
/// assert_eq!(curve.hazard_rate(3.5).unwrap(), 0.018);
///
/// // Appending a segment that does not extend the curve is rejected
/// assert!(curve.append_segment(4.0, 0.02).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        into = "Vec<HazardSegment<T>>",
        try_from = "Vec<HazardSegment<T>>",
        bound(serialize = "T: serde::Serialize", deserialize = "T: serde::Deserialize<'de>")
    )
)]
pub struct SurvivalCurve<T: Float> {
    segments: Vec<HazardSegment<T>>,
}

impl<T: Float> From<SurvivalCurve<T>> for Vec<HazardSegment<T>> {
    fn from(curve: SurvivalCurve<T>) -> Self {
        curve.segments
    }
}

impl<T: Float> TryFrom<Vec<HazardSegment<T>>> for SurvivalCurve<T> {
    type Error = MarketDataError;

    fn try_from(segments: Vec<HazardSegment<T>>) -> Result<Self, Self::Error> {
        Self::from_segments(&segments)
    }
}

impl<T: Float> Default for SurvivalCurve<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> SurvivalCurve<T> {
    /// Empty curve with no segments.
    #[inline]
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Single-segment curve with hazard `hazard_rate` on `(0, horizon]`.
    pub fn flat(hazard_rate: T, horizon: T) -> Result<Self, MarketDataError> {
        let mut curve = Self::new();
        curve.append_segment(horizon, hazard_rate)?;
        Ok(curve)
    }

    /// Build a curve from segment end times and their hazard rates.
    ///
    /// Applies the same validation as repeated [`append_segment`](Self::append_segment).
    pub fn from_pillars(end_times: &[T], hazard_rates: &[T]) -> Result<Self, MarketDataError> {
        if end_times.is_empty() {
            return Err(MarketDataError::InsufficientData { got: 0, need: 1 });
        }
        if end_times.len() != hazard_rates.len() {
            return Err(MarketDataError::InsufficientData {
                got: hazard_rates.len(),
                need: end_times.len(),
            });
        }
        let mut curve = Self::new();
        for (&end_time, &hazard_rate) in end_times.iter().zip(hazard_rates) {
            curve.append_segment(end_time, hazard_rate)?;
        }
        Ok(curve)
    }

    /// Rebuild a curve from previously stripped segments, checking contiguity.
    pub fn from_segments(segments: &[HazardSegment<T>]) -> Result<Self, MarketDataError> {
        let mut curve = Self::new();
        for segment in segments {
            if segment.start_time != curve.end_time() {
                return Err(MarketDataError::NonIncreasingSegment {
                    end_time: lossy_f64(segment.start_time),
                    current_end: lossy_f64(curve.end_time()),
                });
            }
            curve.append_segment(segment.end_time, segment.hazard_rate)?;
        }
        Ok(curve)
    }

    /// Extend the curve by one segment starting at the current end time.
    ///
    /// # Errors
    ///
    /// - [`MarketDataError::NonIncreasingSegment`] if `end_time` is not finite
    ///   or not strictly greater than the current end time
    /// - [`MarketDataError::NegativeHazardRate`] if `hazard_rate` is negative
    ///   or not finite
    pub fn append_segment(&mut self, end_time: T, hazard_rate: T) -> Result<(), MarketDataError> {
        let start_time = self.end_time();
        if !end_time.is_finite() || end_time <= start_time {
            return Err(MarketDataError::NonIncreasingSegment {
                end_time: lossy_f64(end_time),
                current_end: lossy_f64(start_time),
            });
        }
        if !hazard_rate.is_finite() || hazard_rate < T::zero() {
            return Err(MarketDataError::NegativeHazardRate {
                hazard_rate: lossy_f64(hazard_rate),
            });
        }
        self.segments.push(HazardSegment {
            start_time,
            end_time,
            hazard_rate,
        });
        Ok(())
    }

    /// Copy of this curve with one more segment appended; `self` is unchanged.
    pub fn with_segment(&self, end_time: T, hazard_rate: T) -> Result<Self, MarketDataError> {
        let mut extended = self.clone();
        extended.append_segment(end_time, hazard_rate)?;
        Ok(extended)
    }

    /// Accepted segments in time order.
    #[inline]
    pub fn segments(&self) -> &[HazardSegment<T>] {
        &self.segments
    }

    /// Consume the curve, returning its segments.
    #[inline]
    pub fn into_segments(self) -> Vec<HazardSegment<T>> {
        self.segments
    }

    /// End time of the last segment, or zero for an empty curve.
    #[inline]
    pub fn end_time(&self) -> T {
        self.segments
            .last()
            .map_or_else(T::zero, |segment| segment.end_time)
    }

    /// Number of segments.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the curve has no segments.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// ∫₀ᵗ λ(s)ds for `t > 0` on a non-empty curve.
    fn integrated_hazard(&self, t: T) -> Result<T, MarketDataError> {
        let last = self.segments.last().ok_or(MarketDataError::EmptyCurve)?;
        let mut acc = T::zero();
        for segment in &self.segments {
            if t <= segment.start_time {
                break;
            }
            if segment.hazard_rate < T::zero() {
                return Err(MarketDataError::NegativeHazardRate {
                    hazard_rate: lossy_f64(segment.hazard_rate),
                });
            }
            let upto = t.min(segment.end_time);
            acc = acc + segment.hazard_rate * (upto - segment.start_time);
        }
        if t > last.end_time {
            acc = acc + last.hazard_rate * (t - last.end_time);
        }
        Ok(acc)
    }
}

impl<T: Float> CreditCurve<T> for SurvivalCurve<T> {
    fn hazard_rate(&self, t: T) -> Result<T, MarketDataError> {
        if t < T::zero() || t.is_nan() {
            return Err(MarketDataError::InvalidMaturity { t: lossy_f64(t) });
        }
        let last = self.segments.last().ok_or(MarketDataError::EmptyCurve)?;
        Ok(self
            .segments
            .iter()
            .find(|segment| t <= segment.end_time)
            .unwrap_or(last)
            .hazard_rate)
    }

    fn survival_probability(&self, t: T) -> Result<T, MarketDataError> {
        if t.is_nan() {
            return Err(MarketDataError::InvalidMaturity { t: lossy_f64(t) });
        }
        if t <= T::zero() {
            return Ok(T::one());
        }
        let survival = (-self.integrated_hazard(t)?).exp();
        Ok(survival.max(T::zero()).min(T::one()))
    }

    fn horizon(&self) -> Option<T> {
        self.segments.last().map(|segment| segment.end_time)
    }

    fn knots(&self) -> Vec<T> {
        self.segments.iter().map(|segment| segment.end_time).collect()
    }
}
