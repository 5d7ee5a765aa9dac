//! Schedule generation error types.

use thiserror::Error;

/// Errors that can occur during premium schedule generation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScheduleError {
    /// Tenor must be positive and finite.
    #[error("Invalid tenor = {tenor}: must be positive and finite")]
    InvalidTenor {
        /// The rejected tenor in years.
        tenor: f64,
    },

    /// Payment frequency must be a positive number of payments per year.
    #[error("Invalid payment_frequency = {payments_per_year}: must be a positive integer")]
    InvalidFrequency {
        /// The rejected payments-per-year count.
        payments_per_year: u32,
    },

    /// Tenor and frequency would generate more periods than a schedule holds.
    #[error("Schedule of {periods} periods exceeds the maximum of {max}")]
    TooManyPeriods {
        /// Requested number of periods, `tenor × payments_per_year`.
        periods: f64,
        /// Largest schedule generated.
        max: usize,
    },

    /// Frequency name could not be parsed.
    #[error("Unknown frequency: {name}")]
    UnknownFrequency {
        /// The unparseable input.
        name: String,
    },
}
