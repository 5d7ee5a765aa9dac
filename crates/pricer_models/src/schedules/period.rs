//! Accrual period definition.

use num_traits::Float;
use pricer_core::types::constant;

/// One premium accrual period `(start, end]` in year-fraction time.
///
/// The premium for the period is paid at `end`.
///
/// # Examples
///
/// ```
/// use pricer_models::schedules::AccrualPeriod;
///
/// let period = AccrualPeriod::new(0.25_f64, 0.5);
/// assert_eq!(period.year_fraction(), 0.25);
/// assert_eq!(period.midpoint(), 0.375);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccrualPeriod<T: Float> {
    start: T,
    end: T,
}

impl<T: Float> AccrualPeriod<T> {
    /// Creates a period from its start and end times.
    #[inline]
    pub fn new(start: T, end: T) -> Self {
        Self { start, end }
    }

    /// Accrual start time.
    #[inline]
    pub fn start(&self) -> T {
        self.start
    }

    /// Accrual end time, also the payment time.
    #[inline]
    pub fn end(&self) -> T {
        self.end
    }

    /// Accrual fraction Δ = end - start.
    #[inline]
    pub fn year_fraction(&self) -> T {
        self.end - self.start
    }

    /// Period midpoint, where accrued-on-default is discounted.
    #[inline]
    pub fn midpoint(&self) -> T {
        (self.start + self.end) / constant(2.0)
    }
}
