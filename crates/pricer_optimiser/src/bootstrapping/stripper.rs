//! Sequential hazard-curve stripping.
//!
//! Quotes are consumed in ascending tenor order. Step `i` appends one
//! segment `(t_{i-1}, t_i]` whose hazard rate reprices quote `i` at par,
//! holding every earlier segment fixed:
//!
//! ```text
//! Start ──> Calibrating(i) ──ok──> Calibrating(i+1) ──...──> Complete
//!                │
//!                └──err──> Failed (no partial curve)
//! ```
//!
//! [`CurveStripper::strip`] drives the whole run; [`CurveStripper::start`]
//! and [`CurveStripper::step`] expose the individual transitions.

use std::collections::VecDeque;

use num_traits::Float;
use pricer_core::market_data::curves::{DiscountCurve, FlatCurve, HazardSegment, SurvivalCurve};
use pricer_core::types::lossy_f64;
use pricer_models::instruments::credit::{
    validate_rf_rate, AccrualOnDefault, CdsContract, IntegrationMethod, MarketQuote,
};

use super::error::BootstrapError;
use crate::calibration::{CalibrationError, ParSpreadSolver};

/// Outcome of one bootstrap step.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StripDiagnostic<T: Float> {
    /// Quote tenor (segment end).
    pub tenor: T,
    /// Quoted par spread.
    pub market_spread: T,
    /// Calibrated segment hazard rate.
    pub hazard_rate: T,
    /// Net PV of the quoted contract at the calibrated hazard.
    pub repricing_error: T,
    /// Root-finder iterations spent.
    pub iterations: usize,
}

/// Completed curve with per-quote diagnostics and the valuation
/// conventions the hazards were calibrated under.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StrippedCurve<T: Float> {
    /// Piecewise hazard curve, one segment per quote.
    pub curve: SurvivalCurve<T>,
    /// Diagnostics in quote order.
    pub diagnostics: Vec<StripDiagnostic<T>>,
    /// Accrued-on-default convention used in calibration.
    pub accrual_convention: AccrualOnDefault,
    /// Protection-leg integration used in calibration.
    pub integration: IntegrationMethod,
}

impl<T: Float> StrippedCurve<T> {
    /// Hazard segments in tenor order.
    #[inline]
    pub fn segments(&self) -> &[HazardSegment<T>] {
        self.curve.segments()
    }

    /// Largest absolute repricing error across all quotes.
    pub fn max_repricing_error(&self) -> T {
        self.diagnostics
            .iter()
            .fold(T::zero(), |acc, d| acc.max(d.repricing_error.abs()))
    }
}

/// In-progress bootstrap: the curve so far and the quotes still to fit.
///
/// After a failed [`CurveStripper::step`] the state is emptied and marked
/// failed; it holds no curve, no remaining quotes, and is never complete.
#[derive(Debug, Clone, PartialEq)]
pub struct StripState<T: Float> {
    curve: SurvivalCurve<T>,
    remaining: VecDeque<MarketQuote<T>>,
    index: usize,
    failed: bool,
}

impl<T: Float> StripState<T> {
    /// Curve built so far.
    #[inline]
    pub fn curve(&self) -> &SurvivalCurve<T> {
        &self.curve
    }

    /// Number of quotes still to calibrate.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    /// Position of the next quote in the original input.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether every quote has been calibrated.
    #[inline]
    pub fn is_complete(&self) -> bool {
        !self.failed && self.remaining.is_empty()
    }

    /// Whether a step failed and the run was aborted.
    #[inline]
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    fn into_curve(self) -> SurvivalCurve<T> {
        self.curve
    }

    fn abort(&mut self) {
        self.curve = SurvivalCurve::new();
        self.remaining.clear();
        self.failed = true;
    }
}

/// Bootstraps piecewise-constant hazard curves from par spread quotes.
///
/// All quotes share one recovery rate and payment frequency; each bootstrap
/// step calibrates a contract with the quote's tenor and the quoted spread
/// as coupon.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::curves::FlatCurve;
/// use pricer_models::instruments::credit::MarketQuote;
/// use pricer_optimiser::bootstrapping::CurveStripper;
///
/// let stripper = CurveStripper::new(0.4_f64, 4).unwrap();
/// let quotes = [MarketQuote::new(3.0, 0.008), MarketQuote::new(5.0, 0.010)];
/// let stripped = stripper.strip(&quotes, &FlatCurve::new(0.04)).unwrap();
///
/// assert_eq!(stripped.segments().len(), 2);
/// assert!(stripped.max_repricing_error() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CurveStripper<T: Float> {
    solver: ParSpreadSolver<T>,
    template: CdsContract<T>,
}

impl<T: Float> CurveStripper<T> {
    /// Stripper with the default solver.
    ///
    /// # Errors
    ///
    /// `BootstrapError::Validation` if the recovery rate lies outside
    /// `[0, 1]` or the payment frequency is zero.
    pub fn new(recovery_rate: T, payment_frequency: u32) -> Result<Self, BootstrapError> {
        let template = CdsContract::new(T::one(), T::zero(), recovery_rate, payment_frequency)?;
        Ok(Self {
            solver: ParSpreadSolver::default(),
            template,
        })
    }

    /// Replace the solver.
    pub fn with_solver(mut self, solver: ParSpreadSolver<T>) -> Self {
        self.solver = solver;
        self
    }

    /// The calibration solver.
    #[inline]
    pub fn solver(&self) -> &ParSpreadSolver<T> {
        &self.solver
    }

    /// Recovery rate shared by every quote.
    #[inline]
    pub fn recovery_rate(&self) -> T {
        self.template.recovery_rate()
    }

    /// Premium payments per year shared by every quote.
    #[inline]
    pub fn payment_frequency(&self) -> u32 {
        self.template.payment_frequency()
    }

    /// Validate `quotes` and set up an empty curve.
    ///
    /// # Errors
    ///
    /// `BootstrapError::Validation` if the quote set is empty, a quote is
    /// malformed, or tenors are not strictly increasing. Quotes are never
    /// reordered.
    pub fn start(&self, quotes: &[MarketQuote<T>]) -> Result<StripState<T>, BootstrapError> {
        if quotes.is_empty() {
            return Err(BootstrapError::validation(
                "quotes",
                0.0,
                "at least one quote is required",
            ));
        }
        let mut previous = T::zero();
        for quote in quotes {
            quote.validate()?;
            if quote.tenor <= previous {
                return Err(BootstrapError::validation(
                    "tenor",
                    lossy_f64(quote.tenor),
                    "quote tenors must be strictly increasing",
                ));
            }
            previous = quote.tenor;
        }
        Ok(StripState {
            curve: SurvivalCurve::new(),
            remaining: quotes.iter().copied().collect(),
            index: 0,
            failed: false,
        })
    }

    /// Calibrate the next quote and append its segment.
    ///
    /// Returns `Ok(None)` once the state is complete, or when it has
    /// already failed.
    ///
    /// # Errors
    ///
    /// `BootstrapError::CurveStripping` naming the failing quote; the state
    /// is emptied.
    pub fn step<D>(
        &self,
        state: &mut StripState<T>,
        discount: &D,
    ) -> Result<Option<StripDiagnostic<T>>, BootstrapError>
    where
        D: DiscountCurve<T> + ?Sized,
    {
        let quote = match state.remaining.pop_front() {
            Some(quote) => quote,
            None => return Ok(None),
        };
        match self.calibrate(&quote, &mut state.curve, discount) {
            Ok(diagnostic) => {
                tracing::debug!(
                    index = state.index,
                    tenor = lossy_f64(quote.tenor),
                    spread = lossy_f64(quote.credit_spread),
                    hazard_rate = lossy_f64(diagnostic.hazard_rate),
                    iterations = diagnostic.iterations,
                    "segment calibrated"
                );
                state.index += 1;
                Ok(Some(diagnostic))
            }
            Err(source) => {
                tracing::warn!(
                    index = state.index,
                    tenor = lossy_f64(quote.tenor),
                    error = %source,
                    "curve stripping failed"
                );
                let index = state.index;
                state.abort();
                Err(BootstrapError::CurveStripping {
                    index,
                    tenor: lossy_f64(quote.tenor),
                    source,
                })
            }
        }
    }

    /// Strip the full curve.
    ///
    /// # Errors
    ///
    /// See [`start`](Self::start) and [`step`](Self::step). No partial
    /// curve is returned on failure.
    pub fn strip<D>(
        &self,
        quotes: &[MarketQuote<T>],
        discount: &D,
    ) -> Result<StrippedCurve<T>, BootstrapError>
    where
        D: DiscountCurve<T> + ?Sized,
    {
        let mut state = self.start(quotes)?;
        let mut diagnostics = Vec::with_capacity(quotes.len());
        while let Some(diagnostic) = self.step(&mut state, discount)? {
            diagnostics.push(diagnostic);
        }
        let conventions = self.solver.valuator().config();
        let stripped = StrippedCurve {
            curve: state.into_curve(),
            diagnostics,
            accrual_convention: conventions.accrual_on_default,
            integration: conventions.integration,
        };
        tracing::info!(
            quotes = quotes.len(),
            horizon = lossy_f64(stripped.curve.end_time()),
            max_repricing_error = lossy_f64(stripped.max_repricing_error()),
            "credit curve stripped"
        );
        Ok(stripped)
    }

    fn calibrate<D>(
        &self,
        quote: &MarketQuote<T>,
        curve: &mut SurvivalCurve<T>,
        discount: &D,
    ) -> Result<StripDiagnostic<T>, CalibrationError>
    where
        D: DiscountCurve<T> + ?Sized,
    {
        let contract = self.template.with_tenor(quote.tenor)?;
        let solution = self
            .solver
            .solve_implied_hazard(&contract, quote.credit_spread, discount, curve)?;
        curve
            .append_segment(quote.tenor, solution.root)
            .map_err(|err| CalibrationError::Pricing(err.into()))?;
        Ok(StripDiagnostic {
            tenor: quote.tenor,
            market_spread: quote.credit_spread,
            hazard_rate: solution.root,
            repricing_error: solution.residual,
            iterations: solution.iterations,
        })
    }
}

/// Strip a curve under flat discounting at `rf_rate`.
///
/// # Errors
///
/// - `BootstrapError::Validation` if `rf_rate` is outside `[0, 1]`, the terms are
///   invalid, or the quotes are malformed
/// - `BootstrapError::CurveStripping` if any quote fails to calibrate
///
/// # Examples
///
/// ```
/// use pricer_models::instruments::credit::MarketQuote;
/// use pricer_optimiser::bootstrapping::strip_curve;
///
/// let quotes = [MarketQuote::new(3.0_f64, 0.008), MarketQuote::new(5.0, 0.010)];
/// let segments = strip_curve(&quotes, 0.04, 0.4, 4).unwrap();
///
/// assert_eq!(segments[0].end_time, 3.0);
/// assert_eq!(segments[1].start_time, 3.0);
/// assert!(segments[1].hazard_rate > segments[0].hazard_rate);
/// ```
pub fn strip_curve<T: Float>(
    quotes: &[MarketQuote<T>],
    rf_rate: T,
    recovery_rate: T,
    payment_frequency: u32,
) -> Result<Vec<HazardSegment<T>>, BootstrapError> {
    validate_rf_rate(rf_rate)?;
    let stripper = CurveStripper::new(recovery_rate, payment_frequency)?;
    let stripped = stripper.strip(quotes, &FlatCurve::new(rf_rate))?;
    Ok(stripped.curve.into_segments())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::CalibrationConfig;
    use approx::assert_relative_eq;
    use pricer_core::market_data::curves::CreditCurve;
    use pricer_models::instruments::credit::{LegValuator, ValuationConfig};

    fn two_quotes() -> [MarketQuote<f64>; 2] {
        [MarketQuote::new(3.0, 0.008), MarketQuote::new(5.0, 0.010)]
    }

    fn discount() -> FlatCurve<f64> {
        FlatCurve::new(0.04)
    }

    // ========================================
    // Two-Quote Scenario Tests
    // ========================================

    #[test]
    fn test_two_quote_segments() {
        let stripper = CurveStripper::new(0.4, 4).unwrap();
        let stripped = stripper.strip(&two_quotes(), &discount()).unwrap();
        let segments = stripped.segments();

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].start_time, 0.0);
        assert_eq!(segments[0].end_time, 3.0);
        assert_eq!(segments[1].start_time, 3.0);
        assert_eq!(segments[1].end_time, 5.0);
        assert!(segments[1].hazard_rate > segments[0].hazard_rate);
    }

    #[test]
    fn test_first_segment_matches_single_quote() {
        let stripper = CurveStripper::new(0.4, 4).unwrap();
        let stripped = stripper.strip(&two_quotes(), &discount()).unwrap();
        let single = stripper
            .strip(&[MarketQuote::new(3.0, 0.008)], &discount())
            .unwrap();
        assert_eq!(
            stripped.segments()[0].hazard_rate,
            single.segments()[0].hazard_rate
        );
    }

    #[test]
    fn test_forward_hazard_differs_from_flat() {
        let stripper = CurveStripper::new(0.4, 4).unwrap();
        let stripped = stripper.strip(&two_quotes(), &discount()).unwrap();
        let flat = stripper
            .strip(&[MarketQuote::new(5.0, 0.010)], &discount())
            .unwrap();
        let forward = stripped.segments()[1].hazard_rate;
        assert!((forward - flat.segments()[0].hazard_rate).abs() > 1e-4);
    }

    #[test]
    fn test_every_quote_reprices() {
        let stripper = CurveStripper::new(0.4, 4).unwrap();
        let stripped = stripper.strip(&two_quotes(), &discount()).unwrap();
        let valuator = LegValuator::default();

        for quote in two_quotes() {
            let contract = CdsContract::new(quote.tenor, quote.credit_spread, 0.4, 4).unwrap();
            let pv = valuator
                .net_pv(&contract, &stripped.curve, &discount(), 0.0)
                .unwrap();
            assert!(pv.abs() < 1e-10, "tenor {}: pv {}", quote.tenor, pv);
        }
        assert_eq!(stripped.diagnostics.len(), 2);
        assert!(stripped.max_repricing_error() < 1e-10);
    }

    #[test]
    fn test_recovers_known_curve() {
        let truth = SurvivalCurve::from_pillars(&[1.0, 3.0, 5.0, 7.0], &[0.01, 0.015, 0.022, 0.03])
            .unwrap();
        let valuator = LegValuator::default();
        let quotes: Vec<_> = truth
            .segments()
            .iter()
            .map(|segment| {
                let contract = CdsContract::new(segment.end_time, 0.0, 0.4, 4).unwrap();
                let spread = valuator.par_spread(&contract, &truth, &discount()).unwrap();
                MarketQuote::new(segment.end_time, spread)
            })
            .collect();

        let stripper = CurveStripper::new(0.4, 4).unwrap();
        let stripped = stripper.strip(&quotes, &discount()).unwrap();
        for (got, want) in stripped.segments().iter().zip(truth.segments()) {
            assert_eq!(got.end_time, want.end_time);
            assert_relative_eq!(got.hazard_rate, want.hazard_rate, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_zero_spread_gives_zero_hazard() {
        let stripper = CurveStripper::new(0.4, 4).unwrap();
        let quotes = [MarketQuote::new(1.0, 0.0), MarketQuote::new(3.0, 0.005)];
        let stripped = stripper.strip(&quotes, &discount()).unwrap();
        assert_eq!(stripped.segments()[0].hazard_rate, 0.0);
        assert_eq!(stripped.diagnostics[0].iterations, 0);
        assert!(stripped.segments()[1].hazard_rate > 0.0);
        assert_eq!(stripped.curve.survival_probability(1.0).unwrap(), 1.0);
    }

    // ========================================
    // Validation Tests
    // ========================================

    #[test]
    fn test_rejects_empty_quotes() {
        let stripper = CurveStripper::<f64>::new(0.4, 4).unwrap();
        let err = stripper.strip(&[], &discount()).unwrap_err();
        assert!(matches!(
            err,
            BootstrapError::Validation { field: "quotes", .. }
        ));
    }

    #[test]
    fn test_rejects_unsorted_quotes() {
        let stripper = CurveStripper::new(0.4, 4).unwrap();
        let quotes = [MarketQuote::new(5.0, 0.010), MarketQuote::new(3.0, 0.008)];
        let err = stripper.strip(&quotes, &discount()).unwrap_err();
        assert!(err.is_validation());
        assert!(matches!(
            err,
            BootstrapError::Validation { field: "tenor", value, .. } if value == 3.0
        ));
    }

    #[test]
    fn test_rejects_duplicate_tenors() {
        let stripper = CurveStripper::new(0.4, 4).unwrap();
        let quotes = [MarketQuote::new(3.0, 0.008), MarketQuote::new(3.0, 0.009)];
        assert!(stripper.strip(&quotes, &discount()).unwrap_err().is_validation());
    }

    #[test]
    fn test_rejects_negative_spread() {
        let stripper = CurveStripper::new(0.4, 4).unwrap();
        let quotes = [MarketQuote::new(3.0, -0.008)];
        let err = stripper.strip(&quotes, &discount()).unwrap_err();
        assert!(matches!(
            err,
            BootstrapError::Validation { field: "credit_spread", .. }
        ));
    }

    #[test]
    fn test_rejects_invalid_terms() {
        assert!(CurveStripper::new(1.5_f64, 4).unwrap_err().is_validation());
        assert!(CurveStripper::new(0.4_f64, 0).unwrap_err().is_validation());
        assert!(matches!(
            strip_curve(&two_quotes(), f64::NAN, 0.4, 4),
            Err(BootstrapError::Validation { field: "rf_rate", .. })
        ));
    }

    #[test]
    fn test_rejects_rf_rate_outside_unit_interval() {
        for rf_rate in [-0.5, -1e-9, 1.5] {
            assert!(matches!(
                strip_curve(&two_quotes(), rf_rate, 0.4, 4),
                Err(BootstrapError::Validation { field: "rf_rate", .. })
            ));
        }
        assert_eq!(strip_curve(&two_quotes(), 0.0, 0.4, 4).unwrap().len(), 2);
    }

    // ========================================
    // Failure Tests
    // ========================================

    #[test]
    fn test_failure_names_quote_and_returns_no_curve() {
        let config = CalibrationConfig::default().with_max_hazard_rate(0.02);
        let solver = ParSpreadSolver::new(config, LegValuator::default()).unwrap();
        let stripper = CurveStripper::new(0.4, 4).unwrap().with_solver(solver);
        let quotes = [MarketQuote::new(3.0, 0.008), MarketQuote::new(5.0, 0.050)];

        let err = stripper.strip(&quotes, &discount()).unwrap_err();
        match &err {
            BootstrapError::CurveStripping { index, tenor, .. } => {
                assert_eq!(*index, 1);
                assert_eq!(*tenor, 5.0);
            }
            other => panic!("Expected CurveStripping, got {:?}", other),
        }
        assert!(err.is_convergence());
    }

    #[test]
    fn test_full_recovery_positive_spread_fails() {
        let stripper = CurveStripper::new(1.0, 4).unwrap();
        let err = stripper
            .strip(&[MarketQuote::new(3.0, 0.008)], &discount())
            .unwrap_err();
        assert!(matches!(err, BootstrapError::CurveStripping { index: 0, .. }));
        assert!(err.is_validation());
    }

    // ========================================
    // State Machine Tests
    // ========================================

    #[test]
    fn test_step_by_step() {
        let stripper = CurveStripper::new(0.4, 4).unwrap();
        let mut state = stripper.start(&two_quotes()).unwrap();
        assert!(!state.is_failed());
        assert_eq!(state.remaining(), 2);
        assert!(state.curve().is_empty());

        let first = stripper.step(&mut state, &discount()).unwrap().unwrap();
        assert_eq!(first.tenor, 3.0);
        assert_eq!(state.index(), 1);
        assert_eq!(state.curve().end_time(), 3.0);

        let second = stripper.step(&mut state, &discount()).unwrap().unwrap();
        assert_eq!(second.tenor, 5.0);
        assert!(state.is_complete());
        assert_eq!(stripper.step(&mut state, &discount()).unwrap(), None);
    }

    #[test]
    fn test_failed_step_empties_state() {
        let config = CalibrationConfig::default().with_max_hazard_rate(0.02);
        let solver = ParSpreadSolver::new(config, LegValuator::default()).unwrap();
        let stripper = CurveStripper::new(0.4, 4).unwrap().with_solver(solver);
        let quotes = [MarketQuote::new(3.0, 0.050), MarketQuote::new(5.0, 0.060)];

        let mut state = stripper.start(&quotes).unwrap();
        assert!(stripper.step(&mut state, &discount()).is_err());
        assert!(state.is_failed());
        assert!(!state.is_complete());
        assert!(state.curve().is_empty());
        assert_eq!(state.remaining(), 0);
        assert_eq!(stripper.step(&mut state, &discount()).unwrap(), None);
        assert!(!state.is_complete());
    }

    #[test]
    fn test_stripped_curve_reports_conventions() {
        let stripped = CurveStripper::new(0.4, 4)
            .unwrap()
            .strip(&two_quotes(), &discount())
            .unwrap();
        assert_eq!(stripped.accrual_convention, AccrualOnDefault::HalfPeriodMidpoint);
        assert_eq!(stripped.integration, IntegrationMethod::Midpoint);

        let valuator = LegValuator::new(
            ValuationConfig::default()
                .with_integration(IntegrationMethod::gauss_legendre())
                .with_accrual_on_default(AccrualOnDefault::Excluded),
        )
        .unwrap();
        let solver = ParSpreadSolver::new(CalibrationConfig::default(), valuator).unwrap();
        let stripped = CurveStripper::new(0.4, 4)
            .unwrap()
            .with_solver(solver)
            .strip(&two_quotes(), &discount())
            .unwrap();
        assert_eq!(stripped.accrual_convention, AccrualOnDefault::Excluded);
        assert_eq!(stripped.integration, IntegrationMethod::gauss_legendre());
    }

    #[test]
    fn test_strip_curve_flat_discounting() {
        let segments = strip_curve(&two_quotes(), 0.04, 0.4, 4).unwrap();
        let stripper = CurveStripper::new(0.4, 4).unwrap();
        let stripped = stripper.strip(&two_quotes(), &discount()).unwrap();
        assert_eq!(segments.as_slice(), stripped.segments());
    }
}
