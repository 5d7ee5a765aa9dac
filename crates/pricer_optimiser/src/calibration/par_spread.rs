//! Par-spread and implied-hazard solvers.
//!
//! Both problems are one-dimensional root-finds on the leg valuator's
//! `net_pv`:
//!
//! - **Par spread**: the coupon `c` in `[coupon_lower, coupon_upper]` with
//!   `net_pv(c) = 0` at zero upfront.
//! - **Implied hazard**: the hazard `h` in `[0, max_hazard_rate]` of a new
//!   terminal segment appended to a prior curve such that the contract,
//!   paying the market spread as coupon, has `net_pv = 0`.
//!
//! Trial curves are built with [`SurvivalCurve::with_segment`]; the prior
//! curve is never mutated.

use num_traits::Float;
use pricer_core::market_data::curves::{CreditCurve, DiscountCurve, SurvivalCurve};
use pricer_core::math::solvers::{BisectionSolver, BrentSolver, RootFinder, RootSolution};
use pricer_core::types::{lossy_f64, SolverError};
use pricer_models::instruments::credit::{CdsContract, LegValuator};
use pricer_models::instruments::InstrumentError;

use super::config::{CalibrationConfig, RootMethod};
use super::error::CalibrationError;

/// Failure inside one root-find, before tenor context is attached.
enum ObjectiveError {
    Solver(SolverError),
    Pricing(InstrumentError),
}

impl From<SolverError> for ObjectiveError {
    fn from(err: SolverError) -> Self {
        Self::Solver(err)
    }
}

/// Calibrates coupons and hazard rates against the leg valuator.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::curves::{FlatCurve, SurvivalCurve};
/// use pricer_models::instruments::credit::CdsContract;
/// use pricer_optimiser::calibration::ParSpreadSolver;
///
/// let solver = ParSpreadSolver::<f64>::default();
/// let contract = CdsContract::new(5.0, 0.0, 0.4, 4).unwrap();
/// let discount = FlatCurve::new(0.04);
///
/// let implied = solver
///     .solve_implied_hazard(&contract, 0.01, &discount, &SurvivalCurve::new())
///     .unwrap();
/// assert!((implied.root - 0.01 / 0.6).abs() < 5e-4);
///
/// let curve = SurvivalCurve::flat(implied.root, 5.0).unwrap();
/// let par = solver.solve_par_spread(&contract, &curve, &discount).unwrap();
/// assert!((par.root - 0.01).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ParSpreadSolver<T: Float> {
    config: CalibrationConfig<T>,
    valuator: LegValuator<T>,
}

impl<T: Float> Default for ParSpreadSolver<T> {
    fn default() -> Self {
        Self {
            config: CalibrationConfig::default(),
            valuator: LegValuator::default(),
        }
    }
}

impl<T: Float> ParSpreadSolver<T> {
    /// Create a solver.
    ///
    /// # Errors
    ///
    /// `CalibrationError::Validation` if the configuration is unusable.
    pub fn new(config: CalibrationConfig<T>, valuator: LegValuator<T>) -> Result<Self, CalibrationError> {
        config.validate()?;
        Ok(Self { config, valuator })
    }

    /// Calibration settings.
    #[inline]
    pub fn config(&self) -> &CalibrationConfig<T> {
        &self.config
    }

    /// Valuator used for every objective evaluation.
    #[inline]
    pub fn valuator(&self) -> &LegValuator<T> {
        &self.valuator
    }

    /// Coupon at which `net_pv` vanishes with zero upfront.
    ///
    /// The contract's own coupon is ignored.
    ///
    /// # Errors
    ///
    /// - `CalibrationError::Pricing` if the curves cannot price the contract
    /// - `CalibrationError::Convergence` if the par spread lies outside the
    ///   coupon bracket or the budget is exhausted
    pub fn solve_par_spread<C, D>(
        &self,
        contract: &CdsContract<T>,
        credit: &C,
        discount: &D,
    ) -> Result<RootSolution<T>, CalibrationError>
    where
        C: CreditCurve<T> + ?Sized,
        D: DiscountCurve<T> + ?Sized,
    {
        self.valuator.check_horizon(contract, credit)?;
        self.root_find(
            contract.tenor(),
            self.config.coupon_lower,
            self.config.coupon_upper,
            |coupon| {
                let trial = contract.with_coupon(coupon)?;
                self.valuator.net_pv(&trial, credit, discount, T::zero())
            },
        )
    }

    /// Hazard rate of a new segment `(prior.end_time(), contract.tenor()]`
    /// that reprices `market_spread`.
    ///
    /// A zero spread implies a zero hazard rate and returns immediately
    /// without root-finding.
    ///
    /// # Errors
    ///
    /// - `CalibrationError::Validation` if the spread is negative or not
    ///   finite, the tenor does not extend the prior curve, or the recovery
    ///   rate is 1 with a positive spread
    /// - `CalibrationError::Convergence` if no hazard in
    ///   `[0, max_hazard_rate]` reprices the spread
    pub fn solve_implied_hazard<D>(
        &self,
        contract: &CdsContract<T>,
        market_spread: T,
        discount: &D,
        prior: &SurvivalCurve<T>,
    ) -> Result<RootSolution<T>, CalibrationError>
    where
        D: DiscountCurve<T> + ?Sized,
    {
        if !market_spread.is_finite() || market_spread < T::zero() {
            return Err(CalibrationError::validation(
                "credit_spread",
                lossy_f64(market_spread),
                "must be finite and >= 0",
            ));
        }
        let tenor = contract.tenor();
        if tenor <= prior.end_time() {
            return Err(CalibrationError::validation(
                "tenor",
                lossy_f64(tenor),
                "must extend beyond the prior curve",
            ));
        }
        if market_spread == T::zero() {
            return Ok(RootSolution {
                root: T::zero(),
                residual: T::zero(),
                iterations: 0,
            });
        }
        if contract.loss_given_default() == T::zero() {
            return Err(CalibrationError::validation(
                "recovery_rate",
                lossy_f64(contract.recovery_rate()),
                "must be below 1 to reprice a positive spread",
            ));
        }

        let quoted = contract.with_coupon(market_spread)?;
        self.root_find(tenor, T::zero(), self.config.max_hazard_rate, |hazard| {
            let trial = prior.with_segment(tenor, hazard)?;
            self.valuator.net_pv(&quoted, &trial, discount, T::zero())
        })
    }

    /// Flat hazard rate at which the contract, paying its own coupon, is
    /// worth exactly `upfront`.
    ///
    /// # Errors
    ///
    /// - `CalibrationError::Validation` if `upfront` is not finite
    /// - `CalibrationError::Convergence` if no hazard in
    ///   `[0, max_hazard_rate]` matches the upfront
    pub fn solve_upfront_implied_hazard<D>(
        &self,
        contract: &CdsContract<T>,
        upfront: T,
        discount: &D,
    ) -> Result<RootSolution<T>, CalibrationError>
    where
        D: DiscountCurve<T> + ?Sized,
    {
        if !upfront.is_finite() {
            return Err(CalibrationError::validation(
                "upfront",
                lossy_f64(upfront),
                "must be finite",
            ));
        }
        let tenor = contract.tenor();
        self.root_find(tenor, T::zero(), self.config.max_hazard_rate, |hazard| {
            let trial = SurvivalCurve::flat(hazard, tenor)?;
            self.valuator.net_pv(contract, &trial, discount, upfront)
        })
    }

    fn root_find<F>(
        &self,
        tenor: T,
        lower: T,
        upper: T,
        mut objective: F,
    ) -> Result<RootSolution<T>, CalibrationError>
    where
        F: FnMut(T) -> Result<T, InstrumentError>,
    {
        let f = |x: T| objective(x).map_err(ObjectiveError::Pricing);
        let result = match self.config.method {
            RootMethod::Brent => BrentSolver::new(self.config.solver).solve(f, lower, upper),
            RootMethod::Bisection => BisectionSolver::new(self.config.solver).solve(f, lower, upper),
        };
        result.map_err(|err| match err {
            ObjectiveError::Pricing(err) => CalibrationError::Pricing(err),
            ObjectiveError::Solver(err) => CalibrationError::convergence(
                lossy_f64(tenor),
                (lossy_f64(lower), lossy_f64(upper)),
                err,
            ),
        })
    }
}
