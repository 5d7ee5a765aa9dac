//! Flat-hazard CDS with continuously paid premium.
//!
//! ## Mathematical Formulas
//!
//! With hazard `λ`, risk-free rate `r`, recovery `R`, tenor `T` and
//! `k = r + λ`:
//!
//! **Risky annuity**: A = (1 - e^{-kT}) / k
//! **Protection leg**: P = (1 - R)·λ·A
//! **Par spread**: s = P / A = (1 - R)·λ
//! **Net PV**: P - c·A - upfront
//!
//! As `k → 0` the annuity tends to `T`; that limit is used below `1e-14`.

use num_traits::Float;
use pricer_core::types::{constant, lossy_f64};

use super::error::AnalyticalError;

/// `|r + λ|` below which the small-`k` limits are used.
const SMALL_DECAY: f64 = 1e-14;

/// Hazard rate implied by the credit triangle, `spread / (1 - recovery)`.
///
/// # Errors
/// - `AnalyticalError::InvalidSpread` if the spread is negative or not finite
/// - `AnalyticalError::InvalidRecovery` unless `0 <= recovery < 1`
///
/// # Examples
/// ```
/// use pricer_models::analytical::credit_triangle_hazard;
///
/// let hazard = credit_triangle_hazard(0.01_f64, 0.4).unwrap();
/// assert!((hazard - 0.0166666).abs() < 1e-6);
/// assert!(credit_triangle_hazard(0.01_f64, 1.0).is_err());
/// ```
pub fn credit_triangle_hazard<T: Float>(spread: T, recovery_rate: T) -> Result<T, AnalyticalError> {
    if !spread.is_finite() || spread < T::zero() {
        return Err(AnalyticalError::InvalidSpread {
            spread: lossy_f64(spread),
        });
    }
    if !(recovery_rate >= T::zero() && recovery_rate < T::one()) {
        return Err(AnalyticalError::InvalidRecovery {
            recovery_rate: lossy_f64(recovery_rate),
        });
    }
    Ok(spread / (T::one() - recovery_rate))
}

/// Closed-form CDS under flat hazard and flat discounting.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float`
///
/// # Examples
/// ```
/// use pricer_models::analytical::FlatHazardCds;
///
/// let model = FlatHazardCds::new(0.02_f64, 0.04, 0.4, 5.0).unwrap();
/// assert!((model.par_spread() - 0.012).abs() < 1e-15);
/// assert!(model.net_pv(model.par_spread(), 0.0).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatHazardCds<T: Float> {
    hazard_rate: T,
    rf_rate: T,
    recovery_rate: T,
    tenor: T,
}

impl<T: Float> FlatHazardCds<T> {
    /// Creates a new model.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidHazard` if the hazard rate is negative or not finite
    /// - `AnalyticalError::InvalidRate` if the risk-free rate is not finite
    /// - `AnalyticalError::InvalidRecovery` if the recovery rate is outside `[0, 1]`
    /// - `AnalyticalError::InvalidTenor` if the tenor is not positive and finite
    pub fn new(hazard_rate: T, rf_rate: T, recovery_rate: T, tenor: T) -> Result<Self, AnalyticalError> {
        if !hazard_rate.is_finite() || hazard_rate < T::zero() {
            return Err(AnalyticalError::InvalidHazard {
                hazard_rate: lossy_f64(hazard_rate),
            });
        }
        if !rf_rate.is_finite() {
            return Err(AnalyticalError::InvalidRate {
                rate: lossy_f64(rf_rate),
            });
        }
        if !(recovery_rate >= T::zero() && recovery_rate <= T::one()) {
            return Err(AnalyticalError::InvalidRecovery {
                recovery_rate: lossy_f64(recovery_rate),
            });
        }
        if !tenor.is_finite() || tenor <= T::zero() {
            return Err(AnalyticalError::InvalidTenor {
                tenor: lossy_f64(tenor),
            });
        }
        Ok(Self {
            hazard_rate,
            rf_rate,
            recovery_rate,
            tenor,
        })
    }

    /// Returns the hazard rate.
    #[inline]
    pub fn hazard_rate(&self) -> T {
        self.hazard_rate
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rf_rate(&self) -> T {
        self.rf_rate
    }

    /// Returns the recovery rate.
    #[inline]
    pub fn recovery_rate(&self) -> T {
        self.recovery_rate
    }

    /// Returns the tenor.
    #[inline]
    pub fn tenor(&self) -> T {
        self.tenor
    }

    /// A = (1 - e^{-kT}) / k.
    pub fn risky_annuity(&self) -> T {
        let k = self.rf_rate + self.hazard_rate;
        if k.abs() < constant(SMALL_DECAY) {
            return self.tenor;
        }
        (T::one() - (-k * self.tenor).exp()) / k
    }

    /// P = (1 - R)·λ·A.
    pub fn protection_leg_pv(&self) -> T {
        (T::one() - self.recovery_rate) * self.hazard_rate * self.risky_annuity()
    }

    /// Premium leg for a running coupon.
    #[inline]
    pub fn premium_leg_pv(&self, coupon: T) -> T {
        coupon * self.risky_annuity()
    }

    /// Par spread, P / A.
    pub fn par_spread(&self) -> T {
        let annuity = self.risky_annuity();
        if annuity == T::zero() {
            return T::zero();
        }
        self.protection_leg_pv() / annuity
    }

    /// P - c·A - upfront.
    pub fn net_pv(&self, coupon: T, upfront: T) -> T {
        self.protection_leg_pv() - self.premium_leg_pv(coupon) - upfront
    }

    /// e^{-λt}, 1 for `t <= 0`.
    pub fn survival_probability(&self, t: T) -> T {
        if t <= T::zero() {
            return T::one();
        }
        (-self.hazard_rate * t).exp()
    }
}
