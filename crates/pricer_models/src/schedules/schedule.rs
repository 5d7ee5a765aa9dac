//! Premium payment schedule.

use super::error::ScheduleError;
use super::period::AccrualPeriod;
use num_traits::Float;
use pricer_core::types::{constant, lossy_f64};

/// Shortest final stub kept as its own period; shorter stubs merge into the
/// preceding period.
const MIN_STUB: f64 = 1e-12;

/// Largest number of accrual periods in one schedule.
pub const MAX_PERIODS: usize = 100_000;

/// Premium accrual periods covering `(0, tenor]`.
///
/// Regular periods have length `1 / payments_per_year` and end at
/// `1/f, 2/f, ...`. When the tenor is not a whole number of periods the last
/// period is a short stub ending exactly at the tenor.
///
/// # Examples
///
/// ```
/// use pricer_models::schedules::PremiumSchedule;
///
/// let schedule = PremiumSchedule::generate(5.0_f64, 4).unwrap();
/// assert_eq!(schedule.len(), 20);
/// assert_eq!(schedule.payment_times().last(), Some(&5.0));
///
/// let stub = PremiumSchedule::generate(1.1_f64, 2).unwrap();
/// assert_eq!(stub.len(), 3);
/// assert!((stub.periods()[2].year_fraction() - 0.1).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PremiumSchedule<T: Float> {
    periods: Vec<AccrualPeriod<T>>,
}

impl<T: Float> PremiumSchedule<T> {
    /// Generate the schedule for a contract of `tenor` years paying
    /// `payments_per_year` coupons a year.
    ///
    /// # Errors
    ///
    /// - [`ScheduleError::InvalidTenor`] if `tenor` is not positive and finite
    /// - [`ScheduleError::InvalidFrequency`] if `payments_per_year == 0`
    /// - [`ScheduleError::TooManyPeriods`] if `tenor × payments_per_year`
    ///   exceeds [`MAX_PERIODS`]
    pub fn generate(tenor: T, payments_per_year: u32) -> Result<Self, ScheduleError> {
        if !tenor.is_finite() || tenor <= T::zero() {
            return Err(ScheduleError::InvalidTenor {
                tenor: lossy_f64(tenor),
            });
        }
        if payments_per_year == 0 {
            return Err(ScheduleError::InvalidFrequency { payments_per_year });
        }

        let requested = lossy_f64(tenor) * f64::from(payments_per_year);
        if requested > MAX_PERIODS as f64 {
            return Err(ScheduleError::TooManyPeriods {
                periods: requested,
                max: MAX_PERIODS,
            });
        }

        let frequency: T = constant(f64::from(payments_per_year));
        let last_regular = tenor - constant(MIN_STUB);
        let mut periods = Vec::new();
        let mut start = T::zero();
        let mut index = 1_u32;
        loop {
            let end = constant::<T>(f64::from(index)) / frequency;
            if !(end < last_regular) {
                break;
            }
            periods.push(AccrualPeriod::new(start, end));
            start = end;
            index += 1;
        }
        periods.push(AccrualPeriod::new(start, tenor));

        Ok(Self { periods })
    }

    /// Accrual periods in time order.
    #[inline]
    pub fn periods(&self) -> &[AccrualPeriod<T>] {
        &self.periods
    }

    /// Payment times (period end times).
    pub fn payment_times(&self) -> Vec<T> {
        self.periods.iter().map(AccrualPeriod::end).collect()
    }

    /// Final payment time, equal to the contract tenor.
    #[inline]
    pub fn tenor(&self) -> T {
        self.periods
            .last()
            .map_or_else(T::zero, |period| period.end())
    }

    /// Number of periods.
    #[inline]
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Whether the schedule has no periods (never true for a generated schedule).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ========================================
    // Regular Schedule Tests
    // ========================================

    #[test]
    fn test_quarterly_five_year() {
        let schedule = PremiumSchedule::generate(5.0_f64, 4).unwrap();
        assert_eq!(schedule.len(), 20);
        for (i, period) in schedule.periods().iter().enumerate() {
            assert_relative_eq!(period.start(), i as f64 * 0.25, epsilon = 1e-14);
            assert_relative_eq!(period.year_fraction(), 0.25, epsilon = 1e-14);
        }
        assert_eq!(schedule.tenor(), 5.0);
    }

    #[test]
    fn test_annual_schedule() {
        let schedule = PremiumSchedule::generate(3.0_f64, 1).unwrap();
        assert_eq!(schedule.payment_times(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_periods_are_contiguous() {
        let schedule = PremiumSchedule::generate(7.3_f64, 12).unwrap();
        let periods = schedule.periods();
        assert_eq!(periods[0].start(), 0.0);
        for pair in periods.windows(2) {
            assert_eq!(pair[0].end(), pair[1].start());
        }
        assert_eq!(schedule.tenor(), 7.3);
    }

    // ========================================
    // Stub Tests
    // ========================================

    #[test]
    fn test_short_final_stub() {
        let schedule = PremiumSchedule::generate(2.6_f64, 2).unwrap();
        assert_eq!(schedule.len(), 6);
        let last = schedule.periods()[5];
        assert_relative_eq!(last.start(), 2.5, epsilon = 1e-14);
        assert_eq!(last.end(), 2.6);
    }

    #[test]
    fn test_tenor_shorter_than_one_period() {
        let schedule = PremiumSchedule::generate(0.1_f64, 1).unwrap();
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.periods()[0], AccrualPeriod::new(0.0, 0.1));
    }

    #[test]
    fn test_tiny_stub_is_merged() {
        let schedule = PremiumSchedule::generate(3.0_f64 + 1e-13, 1).unwrap();
        assert_eq!(schedule.len(), 3);
        assert_eq!(schedule.tenor(), 3.0 + 1e-13);
    }

    // ========================================
    // Validation Tests
    // ========================================

    #[test]
    fn test_invalid_tenor() {
        for tenor in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                PremiumSchedule::generate(tenor, 4),
                Err(ScheduleError::InvalidTenor { .. })
            ));
        }
    }

    #[test]
    fn test_rejects_oversized_schedule() {
        assert!(matches!(
            PremiumSchedule::generate(1e9_f64, 12),
            Err(ScheduleError::TooManyPeriods { max: MAX_PERIODS, .. })
        ));
        assert!(matches!(
            PremiumSchedule::generate(1.0_f64, u32::MAX),
            Err(ScheduleError::TooManyPeriods { .. })
        ));
        assert_eq!(PremiumSchedule::generate(100.0_f64, 1000).unwrap().len(), MAX_PERIODS);
    }

    #[test]
    fn test_invalid_frequency() {
        assert_eq!(
            PremiumSchedule::generate(5.0_f64, 0).unwrap_err(),
            ScheduleError::InvalidFrequency {
                payments_per_year: 0
            }
        );
    }
}
