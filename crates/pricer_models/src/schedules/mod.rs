//! Premium payment schedules for credit default swaps.
//!
//! This module provides:
//! - [`PremiumSchedule`]: Accrual periods covering `(0, tenor]`
//! - [`AccrualPeriod`]: A single accrual period with start and end times
//! - [`Frequency`]: Named payment frequencies (Annual, SemiAnnual, etc.)
//! - [`ScheduleError`]: Schedule generation failures
//!
//! Times are year fractions from the valuation date; there is no calendar or
//! day-count layer.
//!
//! # Examples
//!
//! ```
//! use pricer_models::schedules::{Frequency, PremiumSchedule};
//!
//! let schedule = PremiumSchedule::generate(2.0_f64, Frequency::SemiAnnual.periods_per_year())
//!     .unwrap();
//! assert_eq!(schedule.payment_times(), vec![0.5, 1.0, 1.5, 2.0]);
//! ```

mod error;
mod frequency;
mod period;
mod schedule;

pub use error::ScheduleError;
pub use frequency::Frequency;
pub use period::AccrualPeriod;
pub use schedule::{PremiumSchedule, MAX_PERIODS};
