//! Calibration configuration types.

use num_traits::Float;
use pricer_core::math::solvers::SolverConfig;
use pricer_core::types::{constant, lossy_f64};

use super::error::CalibrationError;

/// Bracketing root-finder used by the calibration routines.
///
/// # Variants
///
/// - `Brent`: Inverse quadratic interpolation with bisection safeguard - default
/// - `Bisection`: Plain interval halving; slower but needs no smoothness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum RootMethod {
    /// Brent's method (default).
    #[default]
    Brent,
    /// Bisection.
    Bisection,
}

impl RootMethod {
    /// Short label for reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Brent => "brent",
            Self::Bisection => "bisection",
        }
    }
}

/// Configuration for par-spread and implied-hazard calibration.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`)
///
/// # Examples
///
/// ```
/// use pricer_optimiser::calibration::{CalibrationConfig, RootMethod};
///
/// let config: CalibrationConfig<f64> = CalibrationConfig::default();
/// assert_eq!(config.solver.tolerance, 1e-12);
/// assert_eq!(config.max_hazard_rate, 20.0);
///
/// let config = CalibrationConfig::<f64>::default()
///     .with_method(RootMethod::Bisection)
///     .with_max_iterations(400);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationConfig<T: Float> {
    /// Tolerance and iteration budget per root-find.
    ///
    /// Default: 1e-12, 200 iterations
    pub solver: SolverConfig<T>,

    /// Root-finding method.
    ///
    /// Default: Brent
    pub method: RootMethod,

    /// Upper end of the hazard-rate search bracket `[0, max_hazard_rate]`.
    ///
    /// Default: 20.0
    pub max_hazard_rate: T,

    /// Lower end of the coupon search bracket.
    ///
    /// Default: 0.0
    pub coupon_lower: T,

    /// Upper end of the coupon search bracket.
    ///
    /// Default: 1.0 (10,000bp)
    pub coupon_upper: T,
}

impl<T: Float> Default for CalibrationConfig<T> {
    fn default() -> Self {
        Self {
            solver: SolverConfig::new(constant(1e-12), 200),
            method: RootMethod::Brent,
            max_hazard_rate: constant(20.0),
            coupon_lower: T::zero(),
            coupon_upper: T::one(),
        }
    }
}

impl<T: Float> CalibrationConfig<T> {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: T) -> Self {
        self.solver.tolerance = tolerance;
        self
    }

    /// Set the maximum iterations per root-find.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.solver.max_iterations = max_iterations;
        self
    }

    /// Set the root-finding method.
    pub fn with_method(mut self, method: RootMethod) -> Self {
        self.method = method;
        self
    }

    /// Set the upper end of the hazard-rate bracket.
    pub fn with_max_hazard_rate(mut self, max_hazard_rate: T) -> Self {
        self.max_hazard_rate = max_hazard_rate;
        self
    }

    /// Set the coupon search bracket.
    pub fn with_coupon_bracket(mut self, lower: T, upper: T) -> Self {
        self.coupon_lower = lower;
        self.coupon_upper = upper;
        self
    }

    /// Check every setting is usable.
    ///
    /// # Errors
    ///
    /// `CalibrationError::Validation` naming the first unusable setting.
    pub fn validate(&self) -> Result<(), CalibrationError> {
        if !self.solver.tolerance.is_finite() || self.solver.tolerance <= T::zero() {
            return Err(CalibrationError::validation(
                "tolerance",
                lossy_f64(self.solver.tolerance),
                "must be positive and finite",
            ));
        }
        if self.solver.max_iterations == 0 {
            return Err(CalibrationError::validation(
                "max_iterations",
                0.0,
                "must be > 0",
            ));
        }
        if !self.max_hazard_rate.is_finite() || self.max_hazard_rate <= T::zero() {
            return Err(CalibrationError::validation(
                "max_hazard_rate",
                lossy_f64(self.max_hazard_rate),
                "must be positive and finite",
            ));
        }
        if !self.coupon_lower.is_finite() || self.coupon_lower < T::zero() {
            return Err(CalibrationError::validation(
                "coupon_lower",
                lossy_f64(self.coupon_lower),
                "must be finite and >= 0",
            ));
        }
        if !self.coupon_upper.is_finite() || self.coupon_upper <= self.coupon_lower {
            return Err(CalibrationError::validation(
                "coupon_upper",
                lossy_f64(self.coupon_upper),
                "must be finite and above coupon_lower",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CalibrationConfig::<f64>::default();
        assert_eq!(config.solver.max_iterations, 200);
        assert_eq!(config.method, RootMethod::Brent);
        assert_eq!((config.coupon_lower, config.coupon_upper), (0.0, 1.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = CalibrationConfig::<f64>::new()
            .with_tolerance(1e-10)
            .with_max_iterations(50)
            .with_method(RootMethod::Bisection)
            .with_max_hazard_rate(5.0)
            .with_coupon_bracket(0.0, 0.5);
        assert_eq!(config.solver.tolerance, 1e-10);
        assert_eq!(config.solver.max_iterations, 50);
        assert_eq!(config.method.label(), "bisection");
        assert_eq!(config.max_hazard_rate, 5.0);
        assert_eq!(config.coupon_upper, 0.5);
    }

    #[test]
    fn test_validate_rejects() {
        let field = |config: CalibrationConfig<f64>| match config.validate() {
            Err(CalibrationError::Validation { field, .. }) => field,
            other => panic!("Expected Validation error, got {:?}", other),
        };
        let base = CalibrationConfig::<f64>::default();
        assert_eq!(field(base.with_tolerance(0.0)), "tolerance");
        assert_eq!(field(base.with_max_iterations(0)), "max_iterations");
        assert_eq!(field(base.with_max_hazard_rate(-1.0)), "max_hazard_rate");
        assert_eq!(field(base.with_coupon_bracket(-0.1, 1.0)), "coupon_lower");
        assert_eq!(field(base.with_coupon_bracket(0.5, 0.5)), "coupon_upper");
    }
}
