//! CDS leg valuation.
//!
//! # Pricing Model
//!
//! For a contract with coupon `c`, recovery `R`, accrual periods
//! `(tᵢ₋₁, tᵢ]` of length `Δᵢ`, survival curve `S` and discount curve `D`:
//!
//! ```text
//! CouponLeg     = c × Σ Δᵢ S(tᵢ) D(tᵢ)
//! AccrualOnDef  = c × Σ (S(tᵢ₋₁) - S(tᵢ)) × Δᵢ/2 × D((tᵢ₋₁ + tᵢ)/2)
//! PremiumLeg    = CouponLeg + AccrualOnDef
//! ProtectionLeg = (1 - R) × ∫₀ᵀ D(t) dQ(t)
//! NetPV         = ProtectionLeg - PremiumLeg - Upfront
//! ```
//!
//! The accrued-on-default term assumes default happens on average half way
//! through the period and discounts at the period midpoint. It can be
//! switched off with [`AccrualOnDefault::Excluded`]; the convention in force
//! is reported with every [`CdsPriceResult`].
//!
//! The protection integral is delegated to a [`ProtectionIntegrator`]; see
//! [`super::integration`].
//!
//! # Example
//!
//! ```
//! use pricer_models::instruments::credit::{price, CdsContract, HazardInput};
//!
//! let contract = CdsContract::new(5.0_f64, 0.01, 0.4, 4).unwrap();
//! let hazard = HazardInput::Flat(0.01 / 0.6);
//! let result = price(&contract, 0.04, &hazard, 0.0).unwrap();
//!
//! assert!(result.net_pv.abs() < 1e-3);
//! assert!((result.par_spread - 0.01).abs() < 1e-4);
//! ```

use std::borrow::Cow;

use num_traits::Float;
use pricer_core::market_data::curves::{CreditCurve, DiscountCurve, FlatCurve, SurvivalCurve};
use pricer_core::types::{constant, lossy_f64};

use super::cds::CdsContract;
use super::integration::{IntegrationMethod, Integrator, ProtectionIntegrator};
use crate::instruments::error::InstrumentError;

/// Grid points closer than this are treated as the same time.
const GRID_TOLERANCE: f64 = 1e-12;

/// One basis point.
const BASIS_POINT: f64 = 1e-4;

/// Treatment of premium accrued between the last payment date and default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum AccrualOnDefault {
    /// Half the period's accrual, weighted by the period default probability
    /// and discounted at the period midpoint.
    #[default]
    HalfPeriodMidpoint,
    /// No accrued premium is paid on default.
    Excluded,
}

impl AccrualOnDefault {
    /// Short label for reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::HalfPeriodMidpoint => "half-period-midpoint",
            Self::Excluded => "excluded",
        }
    }
}

impl std::fmt::Display for AccrualOnDefault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Leg valuation conventions.
///
/// # Example
///
/// ```
/// use pricer_models::instruments::credit::{AccrualOnDefault, IntegrationMethod, ValuationConfig};
///
/// let config = ValuationConfig::default()
///     .with_integration(IntegrationMethod::gauss_legendre())
///     .with_accrual_on_default(AccrualOnDefault::Excluded);
/// assert_eq!(config.accrual_on_default, AccrualOnDefault::Excluded);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValuationConfig {
    /// Protection-leg integration method.
    pub integration: IntegrationMethod,
    /// Accrued-on-default convention.
    pub accrual_on_default: AccrualOnDefault,
}

impl ValuationConfig {
    /// Set the protection-leg integration method.
    pub fn with_integration(mut self, integration: IntegrationMethod) -> Self {
        self.integration = integration;
        self
    }

    /// Set the accrued-on-default convention.
    pub fn with_accrual_on_default(mut self, accrual_on_default: AccrualOnDefault) -> Self {
        self.accrual_on_default = accrual_on_default;
        self
    }
}

/// Full valuation of one contract.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CdsPriceResult<T: Float> {
    /// Premium leg including accrued on default.
    pub premium_leg_pv: T,
    /// Scheduled coupon payments only.
    pub coupon_leg_pv: T,
    /// Accrued premium paid on default.
    pub accrual_on_default_pv: T,
    /// Protection leg.
    pub protection_leg_pv: T,
    /// Upfront paid by the protection buyer.
    pub upfront: T,
    /// `protection_leg_pv - premium_leg_pv - upfront`.
    pub net_pv: T,
    /// Coupon at which the running legs balance.
    pub par_spread: T,
    /// Premium leg value per unit coupon.
    pub risky_annuity: T,
    /// Premium leg value of one basis point of coupon.
    pub risky_pv01: T,
    /// Accrued-on-default convention used.
    pub accrual_convention: AccrualOnDefault,
    /// Protection-leg integration used.
    pub integration: IntegrationMethod,
}

/// Per-unit-coupon premium annuities.
#[derive(Debug, Clone, Copy)]
struct Annuity<T> {
    coupon: T,
    accrual: T,
}

impl<T: Float> Annuity<T> {
    fn total(&self) -> T {
        self.coupon + self.accrual
    }
}

/// Premium and protection leg valuator.
///
/// Stateless apart from its conventions; the same valuator can price any
/// number of contracts against any survival and discount curves.
#[derive(Debug, Clone, PartialEq)]
pub struct LegValuator<T: Float> {
    config: ValuationConfig,
    integrator: Integrator<T>,
}

impl<T: Float> Default for LegValuator<T> {
    fn default() -> Self {
        Self {
            config: ValuationConfig::default(),
            integrator: Integrator::Midpoint(Default::default()),
        }
    }
}

impl<T: Float> LegValuator<T> {
    /// Valuator for the given conventions.
    ///
    /// # Errors
    ///
    /// [`InstrumentError::Quadrature`] if the Gauss-Legendre order is zero.
    pub fn new(config: ValuationConfig) -> Result<Self, InstrumentError> {
        Ok(Self {
            config,
            integrator: Integrator::from_method(config.integration)?,
        })
    }

    /// Conventions in force.
    #[inline]
    pub fn config(&self) -> &ValuationConfig {
        &self.config
    }

    /// Fail with [`InstrumentError::CurveHorizon`] when the credit curve does
    /// not reach the contract tenor.
    pub fn check_horizon<C>(&self, contract: &CdsContract<T>, credit: &C) -> Result<(), InstrumentError>
    where
        C: CreditCurve<T> + ?Sized,
    {
        if let Some(horizon) = credit.horizon() {
            if horizon < contract.tenor() - constant(GRID_TOLERANCE) {
                return Err(InstrumentError::CurveHorizon {
                    horizon: lossy_f64(horizon),
                    tenor: lossy_f64(contract.tenor()),
                });
            }
        }
        Ok(())
    }

    /// Premium leg value per unit coupon, accrued on default included.
    pub fn risky_annuity<C, D>(
        &self,
        contract: &CdsContract<T>,
        credit: &C,
        discount: &D,
    ) -> Result<T, InstrumentError>
    where
        C: CreditCurve<T> + ?Sized,
        D: DiscountCurve<T> + ?Sized,
    {
        self.check_horizon(contract, credit)?;
        Ok(self.annuity(contract, credit, discount)?.total())
    }

    /// Premium leg: scheduled coupons plus accrued on default.
    pub fn premium_leg_pv<C, D>(
        &self,
        contract: &CdsContract<T>,
        credit: &C,
        discount: &D,
    ) -> Result<T, InstrumentError>
    where
        C: CreditCurve<T> + ?Sized,
        D: DiscountCurve<T> + ?Sized,
    {
        Ok(contract.coupon() * self.risky_annuity(contract, credit, discount)?)
    }

    /// Accrued premium paid on default alone.
    pub fn accrual_on_default_pv<C, D>(
        &self,
        contract: &CdsContract<T>,
        credit: &C,
        discount: &D,
    ) -> Result<T, InstrumentError>
    where
        C: CreditCurve<T> + ?Sized,
        D: DiscountCurve<T> + ?Sized,
    {
        self.check_horizon(contract, credit)?;
        Ok(contract.coupon() * self.annuity(contract, credit, discount)?.accrual)
    }

    /// Protection leg: `(1 - R) ∫ D dQ` over `[0, tenor]`.
    pub fn protection_leg_pv<C, D>(
        &self,
        contract: &CdsContract<T>,
        credit: &C,
        discount: &D,
    ) -> Result<T, InstrumentError>
    where
        C: CreditCurve<T> + ?Sized,
        D: DiscountCurve<T> + ?Sized,
    {
        self.check_horizon(contract, credit)?;
        self.protection(contract, credit, discount)
    }

    /// `protection_leg_pv - premium_leg_pv - upfront`.
    ///
    /// This is both the reported price and the calibration objective.
    pub fn net_pv<C, D>(
        &self,
        contract: &CdsContract<T>,
        credit: &C,
        discount: &D,
        upfront: T,
    ) -> Result<T, InstrumentError>
    where
        C: CreditCurve<T> + ?Sized,
        D: DiscountCurve<T> + ?Sized,
    {
        validate_upfront(upfront)?;
        self.check_horizon(contract, credit)?;
        let protection = self.protection(contract, credit, discount)?;
        let annuity = self.annuity(contract, credit, discount)?;
        Ok(protection - contract.coupon() * annuity.total() - upfront)
    }

    /// Closed-form par spread, `protection_leg_pv / risky_annuity`.
    ///
    /// Zero when the annuity vanishes.
    pub fn par_spread<C, D>(
        &self,
        contract: &CdsContract<T>,
        credit: &C,
        discount: &D,
    ) -> Result<T, InstrumentError>
    where
        C: CreditCurve<T> + ?Sized,
        D: DiscountCurve<T> + ?Sized,
    {
        self.check_horizon(contract, credit)?;
        let protection = self.protection(contract, credit, discount)?;
        let annuity = self.annuity(contract, credit, discount)?.total();
        Ok(ratio_or_zero(protection, annuity))
    }

    /// Value both legs and collect the breakdown.
    pub fn price<C, D>(
        &self,
        contract: &CdsContract<T>,
        credit: &C,
        discount: &D,
        upfront: T,
    ) -> Result<CdsPriceResult<T>, InstrumentError>
    where
        C: CreditCurve<T> + ?Sized,
        D: DiscountCurve<T> + ?Sized,
    {
        validate_upfront(upfront)?;
        self.check_horizon(contract, credit)?;

        let annuity = self.annuity(contract, credit, discount)?;
        let protection_leg_pv = self.protection(contract, credit, discount)?;
        let coupon = contract.coupon();
        let coupon_leg_pv = coupon * annuity.coupon;
        let accrual_on_default_pv = coupon * annuity.accrual;
        let premium_leg_pv = coupon_leg_pv + accrual_on_default_pv;
        let risky_annuity = annuity.total();

        Ok(CdsPriceResult {
            premium_leg_pv,
            coupon_leg_pv,
            accrual_on_default_pv,
            protection_leg_pv,
            upfront,
            net_pv: protection_leg_pv - premium_leg_pv - upfront,
            par_spread: ratio_or_zero(protection_leg_pv, risky_annuity),
            risky_annuity,
            risky_pv01: risky_annuity * constant(BASIS_POINT),
            accrual_convention: self.config.accrual_on_default,
            integration: self.integrator.method(),
        })
    }

    fn annuity<C, D>(
        &self,
        contract: &CdsContract<T>,
        credit: &C,
        discount: &D,
    ) -> Result<Annuity<T>, InstrumentError>
    where
        C: CreditCurve<T> + ?Sized,
        D: DiscountCurve<T> + ?Sized,
    {
        let two = constant::<T>(2.0);
        let include_accrual = self.config.accrual_on_default == AccrualOnDefault::HalfPeriodMidpoint;
        let mut annuity = Annuity {
            coupon: T::zero(),
            accrual: T::zero(),
        };

        let schedule = contract.schedule()?;
        let mut s_prev = T::one();
        for period in schedule.periods() {
            let dt = period.year_fraction();
            let s = credit.survival_probability(period.end())?;
            annuity.coupon = annuity.coupon + dt * s * discount.discount_factor(period.end())?;
            if include_accrual {
                let df_mid = discount.discount_factor(period.midpoint())?;
                annuity.accrual = annuity.accrual + (s_prev - s) * dt / two * df_mid;
            }
            s_prev = s;
        }
        Ok(annuity)
    }

    fn protection<C, D>(
        &self,
        contract: &CdsContract<T>,
        credit: &C,
        discount: &D,
    ) -> Result<T, InstrumentError>
    where
        C: CreditCurve<T> + ?Sized,
        D: DiscountCurve<T> + ?Sized,
    {
        let lgd = contract.loss_given_default();
        if lgd == T::zero() {
            return Ok(T::zero());
        }
        let grid = integration_grid(contract, credit)?;
        let integral = self
            .integrator
            .integrate_protection_leg(&grid, credit, discount)?;
        Ok(lgd * integral)
    }
}

/// `{0} ∪ payment times ∪ curve knots in (0, tenor)`, sorted, near-duplicates
/// removed.
fn integration_grid<T, C>(contract: &CdsContract<T>, credit: &C) -> Result<Vec<T>, InstrumentError>
where
    T: Float,
    C: CreditCurve<T> + ?Sized,
{
    let tenor = contract.tenor();
    let tolerance = constant::<T>(GRID_TOLERANCE);

    let mut grid = vec![T::zero()];
    grid.extend(contract.schedule()?.payment_times());
    grid.extend(
        credit
            .knots()
            .into_iter()
            .filter(|&t| t > T::zero() && t < tenor),
    );
    grid.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    grid.dedup_by(|later, earlier| (*later - *earlier).abs() <= tolerance);
    Ok(grid)
}

fn ratio_or_zero<T: Float>(numerator: T, denominator: T) -> T {
    if denominator == T::zero() {
        T::zero()
    } else {
        numerator / denominator
    }
}

fn validate_upfront<T: Float>(upfront: T) -> Result<(), InstrumentError> {
    if !upfront.is_finite() {
        return Err(InstrumentError::validation(
            "upfront",
            lossy_f64(upfront),
            "must be finite",
        ));
    }
    Ok(())
}

/// Credit input to [`price`]: a flat hazard rate or a bootstrapped curve.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum HazardInput<T: Float> {
    /// Constant hazard rate over the whole contract.
    Flat(T),
    /// Piecewise-constant hazard curve.
    Curve(SurvivalCurve<T>),
}

impl<T: Float> HazardInput<T> {
    /// Survival curve covering at least `tenor`.
    ///
    /// # Errors
    ///
    /// [`InstrumentError::Validation`] on `hazard_rate` if a flat rate is
    /// negative or not finite.
    pub fn survival_curve(&self, tenor: T) -> Result<Cow<'_, SurvivalCurve<T>>, InstrumentError> {
        match self {
            Self::Flat(hazard_rate) => {
                if !hazard_rate.is_finite() || *hazard_rate < T::zero() {
                    return Err(InstrumentError::validation(
                        "hazard_rate",
                        lossy_f64(*hazard_rate),
                        "must be finite and >= 0",
                    ));
                }
                Ok(Cow::Owned(SurvivalCurve::flat(*hazard_rate, tenor)?))
            }
            Self::Curve(curve) => Ok(Cow::Borrowed(curve)),
        }
    }
}

/// Check a flat risk-free rate, which must lie in `[0, 1]` so that every
/// discount factor stays in `(0, 1]`.
///
/// # Errors
///
/// [`InstrumentError::Validation`] on `rf_rate` otherwise (NaN included).
///
/// # Examples
///
/// ```
/// use pricer_models::instruments::credit::validate_rf_rate;
///
/// assert!(validate_rf_rate(0.04_f64).is_ok());
/// assert!(validate_rf_rate(-0.5_f64).is_err());
/// assert!(validate_rf_rate(1.5_f64).is_err());
/// ```
pub fn validate_rf_rate<T: Float>(rf_rate: T) -> Result<(), InstrumentError> {
    if !(rf_rate >= T::zero() && rf_rate <= T::one()) {
        return Err(InstrumentError::validation(
            "rf_rate",
            lossy_f64(rf_rate),
            "must lie in [0, 1]",
        ));
    }
    Ok(())
}

/// Price a contract with flat risk-free discounting and the default
/// conventions (midpoint protection integration, half-period accrual).
///
/// # Errors
///
/// [`InstrumentError::Validation`] naming `rf_rate` when it lies outside
/// `[0, 1]`, `upfront` when it is not finite, or `hazard_rate` when a flat
/// hazard is negative or not finite;
/// [`InstrumentError::CurveHorizon`] when a supplied curve is too short.
pub fn price<T: Float>(
    contract: &CdsContract<T>,
    rf_rate: T,
    hazard: &HazardInput<T>,
    upfront: T,
) -> Result<CdsPriceResult<T>, InstrumentError> {
    validate_rf_rate(rf_rate)?;
    price_with(
        &LegValuator::default(),
        contract,
        &FlatCurve::new(rf_rate),
        hazard,
        upfront,
    )
}

/// [`price`] with a configured valuator and any discount curve.
pub fn price_with<T, D>(
    valuator: &LegValuator<T>,
    contract: &CdsContract<T>,
    discount: &D,
    hazard: &HazardInput<T>,
    upfront: T,
) -> Result<CdsPriceResult<T>, InstrumentError>
where
    T: Float,
    D: DiscountCurve<T> + ?Sized,
{
    let credit = hazard.survival_curve(contract.tenor())?;
    valuator.price(contract, credit.as_ref(), discount, upfront)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::market_data::curves::{CurveInterpolation, InterpolatedCurve};

    fn five_year(coupon: f64) -> CdsContract<f64> {
        CdsContract::new(5.0, coupon, 0.4, 4).unwrap()
    }

    /// Continuous-premium flat-hazard annuity `(1 - e^{-kT}) / k`.
    fn continuous_annuity(hazard: f64, rate: f64, tenor: f64) -> f64 {
        let k = hazard + rate;
        (1.0 - (-k * tenor).exp()) / k
    }

    // ========================================
    // Leg Tests
    // ========================================

    #[test]
    fn test_coupon_leg_matches_sum() {
        let contract = five_year(0.01);
        let credit = SurvivalCurve::flat(0.02, 5.0).unwrap();
        let discount = FlatCurve::new(0.03);
        let valuator = LegValuator::new(
            ValuationConfig::default().with_accrual_on_default(AccrualOnDefault::Excluded),
        )
        .unwrap();

        let expected: f64 = (1..=20)
            .map(|i| {
                let t = i as f64 * 0.25;
                0.01 * 0.25 * (-0.05 * t).exp()
            })
            .sum();
        let premium = valuator.premium_leg_pv(&contract, &credit, &discount).unwrap();
        assert_relative_eq!(premium, expected, epsilon = 1e-14);
        assert_eq!(
            valuator
                .accrual_on_default_pv(&contract, &credit, &discount)
                .unwrap(),
            0.0
        );
    }

    #[test]
    fn test_accrual_on_default_term() {
        let contract = CdsContract::new(1.0_f64, 0.02, 0.4, 1).unwrap();
        let credit = SurvivalCurve::flat(0.05, 1.0).unwrap();
        let discount = FlatCurve::new(0.03);
        let valuator = LegValuator::default();

        let expected = 0.02 * (1.0 - (-0.05_f64).exp()) * 0.5 * (-0.015_f64).exp();
        assert_relative_eq!(
            valuator
                .accrual_on_default_pv(&contract, &credit, &discount)
                .unwrap(),
            expected,
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_premium_leg_includes_accrual() {
        let contract = five_year(0.01);
        let credit = SurvivalCurve::flat(0.02, 5.0).unwrap();
        let discount = FlatCurve::new(0.03);
        let result = LegValuator::default()
            .price(&contract, &credit, &discount, 0.0)
            .unwrap();
        assert!(result.accrual_on_default_pv > 0.0);
        assert_relative_eq!(
            result.premium_leg_pv,
            result.coupon_leg_pv + result.accrual_on_default_pv,
            epsilon = 1e-16
        );
    }

    #[test]
    fn test_full_recovery_has_no_protection() {
        let contract = CdsContract::new(5.0_f64, 0.01, 1.0, 4).unwrap();
        let credit = SurvivalCurve::from_pillars(&[1.0, 3.0, 5.0], &[0.5, 0.1, 0.9]).unwrap();
        let discount = FlatCurve::new(0.04);
        for method in [IntegrationMethod::Midpoint, IntegrationMethod::gauss_legendre()] {
            let valuator =
                LegValuator::new(ValuationConfig::default().with_integration(method)).unwrap();
            assert_eq!(
                valuator
                    .protection_leg_pv(&contract, &credit, &discount)
                    .unwrap(),
                0.0
            );
        }
    }

    #[test]
    fn test_zero_hazard_prices_riskless() {
        let contract = five_year(0.01);
        let credit = SurvivalCurve::flat(0.0, 5.0).unwrap();
        let discount = FlatCurve::new(0.04);
        let result = LegValuator::default()
            .price(&contract, &credit, &discount, 0.0)
            .unwrap();
        assert_eq!(result.protection_leg_pv, 0.0);
        assert_eq!(result.accrual_on_default_pv, 0.0);
        assert_eq!(result.par_spread, 0.0);
    }

    // ========================================
    // Net PV and Par Spread Tests
    // ========================================

    #[test]
    fn test_net_pv_identity() {
        let contract = five_year(0.015);
        let credit = SurvivalCurve::from_pillars(&[3.0, 5.0], &[0.012, 0.02]).unwrap();
        let discount = FlatCurve::new(0.04);
        let valuator = LegValuator::default();

        let result = valuator.price(&contract, &credit, &discount, 0.02).unwrap();
        assert_relative_eq!(
            result.net_pv,
            result.protection_leg_pv - result.premium_leg_pv - 0.02,
            epsilon = 1e-16
        );
        assert_relative_eq!(
            valuator.net_pv(&contract, &credit, &discount, 0.02).unwrap(),
            result.net_pv,
            epsilon = 1e-16
        );
    }

    #[test]
    fn test_par_spread_zeroes_net_pv() {
        let credit = SurvivalCurve::from_pillars(&[3.0, 5.0], &[0.012, 0.02]).unwrap();
        let discount = FlatCurve::new(0.04);
        let valuator = LegValuator::default();

        let par = valuator
            .par_spread(&five_year(0.0), &credit, &discount)
            .unwrap();
        let at_par = five_year(0.0).with_coupon(par).unwrap();
        assert!(valuator.net_pv(&at_par, &credit, &discount, 0.0).unwrap().abs() < 1e-15);
    }

    #[test]
    fn test_risky_pv01() {
        let contract = five_year(0.01);
        let credit = SurvivalCurve::flat(0.02, 5.0).unwrap();
        let result = LegValuator::default()
            .price(&contract, &credit, &FlatCurve::new(0.04), 0.0)
            .unwrap();
        assert_relative_eq!(result.risky_pv01, result.risky_annuity * 1e-4, epsilon = 1e-18);
        assert_relative_eq!(
            result.premium_leg_pv,
            0.01 * result.risky_annuity,
            epsilon = 1e-16
        );
    }

    #[test]
    fn test_five_year_scenario_near_par() {
        let contract = five_year(0.01);
        let result = price(&contract, 0.04, &HazardInput::Flat(0.01 / 0.6), 0.0).unwrap();

        assert!(result.net_pv.abs() < 1e-3);
        assert_relative_eq!(result.par_spread, 0.01, epsilon = 1e-4);
        assert_relative_eq!(
            result.risky_annuity,
            continuous_annuity(0.01 / 0.6, 0.04, 5.0),
            max_relative = 0.01
        );
        assert_eq!(result.accrual_convention, AccrualOnDefault::HalfPeriodMidpoint);
        assert_eq!(result.integration, IntegrationMethod::Midpoint);
    }

    // ========================================
    // Integration Method Tests
    // ========================================

    #[test]
    fn test_gauss_legendre_protection_is_exact_for_flat_curves() {
        let contract = five_year(0.01);
        let credit = SurvivalCurve::flat(0.0167, 5.0).unwrap();
        let discount = FlatCurve::new(0.04);
        let valuator = LegValuator::new(
            ValuationConfig::default().with_integration(IntegrationMethod::gauss_legendre()),
        )
        .unwrap();

        let k = 0.0567_f64;
        let expected = 0.6 * 0.0167 / k * (1.0 - (-k * 5.0).exp());
        assert_relative_eq!(
            valuator
                .protection_leg_pv(&contract, &credit, &discount)
                .unwrap(),
            expected,
            epsilon = 1e-13
        );
    }

    #[test]
    fn test_integration_methods_agree_closely() {
        let contract = five_year(0.01);
        let credit = SurvivalCurve::from_pillars(&[1.3, 5.0], &[0.01, 0.03]).unwrap();
        let discount = FlatCurve::new(0.04);
        let midpoint = LegValuator::default()
            .protection_leg_pv(&contract, &credit, &discount)
            .unwrap();
        let gauss = LegValuator::new(
            ValuationConfig::default().with_integration(IntegrationMethod::gauss_legendre()),
        )
        .unwrap()
        .protection_leg_pv(&contract, &credit, &discount)
        .unwrap();
        assert_relative_eq!(midpoint, gauss, max_relative = 1e-4);
    }

    #[test]
    fn test_grid_includes_interior_knots() {
        let contract = CdsContract::new(2.0_f64, 0.01, 0.4, 1).unwrap();
        let credit = SurvivalCurve::from_pillars(&[0.5, 1.0, 3.0], &[0.01, 0.02, 0.03]).unwrap();
        assert_eq!(
            integration_grid(&contract, &credit).unwrap(),
            vec![0.0, 0.5, 1.0, 2.0]
        );
    }

    #[test]
    fn test_invalid_quadrature_order() {
        let config = ValuationConfig::default()
            .with_integration(IntegrationMethod::GaussLegendre { points: 0 });
        assert!(matches!(
            LegValuator::<f64>::new(config),
            Err(InstrumentError::Quadrature(_))
        ));
    }

    // ========================================
    // Curve Consistency Tests
    // ========================================

    #[test]
    fn test_short_curve_rejected() {
        let contract = five_year(0.01);
        let credit = SurvivalCurve::flat(0.02, 3.0).unwrap();
        let err = LegValuator::default()
            .price(&contract, &credit, &FlatCurve::new(0.04), 0.0)
            .unwrap_err();
        assert_eq!(
            err,
            InstrumentError::CurveHorizon {
                horizon: 3.0,
                tenor: 5.0
            }
        );
        assert!(err.is_validation());
    }

    #[test]
    fn test_empty_curve_rejected() {
        let contract = five_year(0.01);
        let credit = SurvivalCurve::<f64>::new();
        let err = LegValuator::default()
            .price(&contract, &credit, &FlatCurve::new(0.04), 0.0)
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_term_structure_discounting() {
        let contract = five_year(0.01);
        let credit = SurvivalCurve::flat(0.02, 5.0).unwrap();
        let flat_pillars = InterpolatedCurve::new(
            &[1.0, 5.0],
            &[0.04, 0.04],
            CurveInterpolation::Linear,
            true,
        )
        .unwrap();
        let valuator = LegValuator::default();
        let a = valuator
            .price(&contract, &credit, &flat_pillars, 0.0)
            .unwrap();
        let b = valuator
            .price(&contract, &credit, &FlatCurve::new(0.04), 0.0)
            .unwrap();
        assert_relative_eq!(a.net_pv, b.net_pv, epsilon = 1e-14);
    }

    // ========================================
    // Entry Point Tests
    // ========================================

    #[test]
    fn test_price_validates_inputs() {
        let contract = five_year(0.01);
        let flat = HazardInput::Flat(0.02);
        let field = |r: Result<CdsPriceResult<f64>, InstrumentError>| r.unwrap_err().field();

        assert_eq!(field(price(&contract, f64::NAN, &flat, 0.0)), Some("rf_rate"));
        assert_eq!(field(price(&contract, -0.5, &flat, 0.0)), Some("rf_rate"));
        assert_eq!(field(price(&contract, 1.5, &flat, 0.0)), Some("rf_rate"));
        assert_eq!(field(price(&contract, 0.04, &flat, f64::INFINITY)), Some("upfront"));
        assert_eq!(
            field(price(&contract, 0.04, &HazardInput::Flat(-0.01), 0.0)),
            Some("hazard_rate")
        );
    }

    #[test]
    fn test_rf_rate_bounds_are_inclusive() {
        let contract = five_year(0.01);
        let flat = HazardInput::Flat(0.02);
        assert!(price(&contract, 0.0, &flat, 0.0).is_ok());
        assert!(price(&contract, 1.0, &flat, 0.0).is_ok());
        assert!(validate_rf_rate(-1e-12_f64).unwrap_err().is_validation());
    }

    #[test]
    fn test_price_flat_and_curve_inputs_agree() {
        let contract = five_year(0.01);
        let flat = price(&contract, 0.04, &HazardInput::Flat(0.02), 0.0).unwrap();
        let curve = price(
            &contract,
            0.04,
            &HazardInput::Curve(SurvivalCurve::from_pillars(&[2.0, 5.0], &[0.02, 0.02]).unwrap()),
            0.0,
        )
        .unwrap();
        assert_relative_eq!(flat.net_pv, curve.net_pv, epsilon = 1e-14);
        assert_relative_eq!(flat.par_spread, curve.par_spread, epsilon = 1e-14);
    }

    #[test]
    fn test_upfront_shifts_net_pv() {
        let contract = five_year(0.01);
        let hazard = HazardInput::Flat(0.02);
        let zero = price(&contract, 0.04, &hazard, 0.0).unwrap();
        let paid = price(&contract, 0.04, &hazard, 0.03).unwrap();
        assert_relative_eq!(zero.net_pv - paid.net_pv, 0.03, epsilon = 1e-15);
        assert_eq!(zero.par_spread, paid.par_spread);
    }
}
