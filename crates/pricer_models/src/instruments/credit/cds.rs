//! Credit Default Swap contract terms and market quotes.
//!
//! # Structure
//!
//! A single-name CDS consists of:
//! - **Protection Leg**: Pays `(1 - recovery_rate)` on default before the tenor
//! - **Premium Leg**: Pays `coupon × Δ` at each scheduled date while the
//!   reference entity survives, plus accrued premium on default
//!
//! # Example
//!
//! ```
//! use pricer_models::instruments::credit::CdsContract;
//!
//! let contract = CdsContract::new(5.0_f64, 0.01, 0.4, 4).unwrap();
//! assert_eq!(contract.tenor(), 5.0);
//! assert!((contract.loss_given_default() - 0.6).abs() < 1e-15);
//!
//! let repriced = contract.with_coupon(0.0125).unwrap();
//! assert_eq!(repriced.coupon(), 0.0125);
//! assert_eq!(repriced.recovery_rate(), 0.4);
//! ```

use num_traits::Float;
use pricer_core::types::lossy_f64;

use crate::instruments::error::InstrumentError;
use crate::schedules::PremiumSchedule;

/// Longest contract tenor in years.
pub const MAX_TENOR: f64 = 100.0;

/// Most premium payments per year (daily).
pub const MAX_PAYMENT_FREQUENCY: u32 = 365;

/// Terms of a single-name CDS, valid by construction.
///
/// # Invariants
///
/// - `tenor` is positive and at most [`MAX_TENOR`] years
/// - `coupon` is finite and `>= 0`
/// - `recovery_rate` lies in `[0, 1]`
/// - `payment_frequency` lies in `1..=`[`MAX_PAYMENT_FREQUENCY`]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CdsContract<T: Float> {
    tenor: T,
    coupon: T,
    recovery_rate: T,
    payment_frequency: u32,
}

impl<T: Float> CdsContract<T> {
    /// Create validated contract terms.
    ///
    /// # Errors
    ///
    /// [`InstrumentError::Validation`] naming the first offending field.
    pub fn new(
        tenor: T,
        coupon: T,
        recovery_rate: T,
        payment_frequency: u32,
    ) -> Result<Self, InstrumentError> {
        validate_tenor(tenor)?;
        validate_coupon(coupon)?;
        validate_recovery_rate(recovery_rate)?;
        if payment_frequency == 0 || payment_frequency > MAX_PAYMENT_FREQUENCY {
            return Err(InstrumentError::validation(
                "payment_frequency",
                f64::from(payment_frequency),
                "must lie in 1..=365 payments per year",
            ));
        }
        Ok(Self {
            tenor,
            coupon,
            recovery_rate,
            payment_frequency,
        })
    }

    /// Same terms with a different coupon.
    pub fn with_coupon(&self, coupon: T) -> Result<Self, InstrumentError> {
        validate_coupon(coupon)?;
        Ok(Self { coupon, ..*self })
    }

    /// Same terms with a different tenor.
    pub fn with_tenor(&self, tenor: T) -> Result<Self, InstrumentError> {
        validate_tenor(tenor)?;
        Ok(Self { tenor, ..*self })
    }

    /// Same terms with a different recovery rate.
    pub fn with_recovery_rate(&self, recovery_rate: T) -> Result<Self, InstrumentError> {
        validate_recovery_rate(recovery_rate)?;
        Ok(Self {
            recovery_rate,
            ..*self
        })
    }

    /// Contract horizon in years.
    #[inline]
    pub fn tenor(&self) -> T {
        self.tenor
    }

    /// Fixed running coupon (decimal spread, e.g. 0.01 = 100bp).
    #[inline]
    pub fn coupon(&self) -> T {
        self.coupon
    }

    /// Recovery rate in `[0, 1]`.
    #[inline]
    pub fn recovery_rate(&self) -> T {
        self.recovery_rate
    }

    /// Loss given default, `1 - recovery_rate`.
    #[inline]
    pub fn loss_given_default(&self) -> T {
        T::one() - self.recovery_rate
    }

    /// Premium payments per year.
    #[inline]
    pub fn payment_frequency(&self) -> u32 {
        self.payment_frequency
    }

    /// Premium accrual schedule for these terms.
    pub fn schedule(&self) -> Result<PremiumSchedule<T>, InstrumentError> {
        Ok(PremiumSchedule::generate(self.tenor, self.payment_frequency)?)
    }
}

/// Observed market spread for one tenor; the calibration target of one
/// bootstrap step.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketQuote<T: Float> {
    /// Quote tenor in years.
    pub tenor: T,
    /// Par spread quoted by the market (decimal).
    pub credit_spread: T,
}

impl<T: Float> MarketQuote<T> {
    /// Create a quote; see [`validate`](Self::validate) for the checks applied
    /// before calibration.
    #[inline]
    pub fn new(tenor: T, credit_spread: T) -> Self {
        Self {
            tenor,
            credit_spread,
        }
    }

    /// Check the tenor is positive and the spread finite and non-negative.
    pub fn validate(&self) -> Result<(), InstrumentError> {
        validate_tenor(self.tenor)?;
        if !self.credit_spread.is_finite() || self.credit_spread < T::zero() {
            return Err(InstrumentError::validation(
                "credit_spread",
                lossy_f64(self.credit_spread),
                "must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

fn validate_tenor<T: Float>(tenor: T) -> Result<(), InstrumentError> {
    if !(tenor > T::zero() && lossy_f64(tenor) <= MAX_TENOR) {
        return Err(InstrumentError::validation(
            "tenor",
            lossy_f64(tenor),
            "must be positive and at most 100 years",
        ));
    }
    Ok(())
}

fn validate_coupon<T: Float>(coupon: T) -> Result<(), InstrumentError> {
    if !coupon.is_finite() || coupon < T::zero() {
        return Err(InstrumentError::validation(
            "coupon",
            lossy_f64(coupon),
            "must be finite and >= 0",
        ));
    }
    Ok(())
}

fn validate_recovery_rate<T: Float>(recovery_rate: T) -> Result<(), InstrumentError> {
    if !(recovery_rate >= T::zero() && recovery_rate <= T::one()) {
        return Err(InstrumentError::validation(
            "recovery_rate",
            lossy_f64(recovery_rate),
            "must lie in [0, 1]",
        ));
    }
    Ok(())
}
