//! Solver configuration types.

use crate::types::constant;
use num_traits::Float;

/// Configuration for root-finding algorithms.
///
/// Provides common settings shared across all solver implementations,
/// including convergence tolerance and iteration limits. The iteration limit
/// is a hard bound: every solver terminates after at most `max_iterations`
/// objective evaluations beyond the two bracket endpoints.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::SolverConfig;
///
/// let config: SolverConfig<f64> = SolverConfig::default();
/// assert!(config.tolerance < 1e-8);
/// assert!(config.max_iterations >= 50);
///
/// let custom = SolverConfig::default()
///     .with_tolerance(1e-12)
///     .with_max_iterations(200);
/// assert_eq!(custom.max_iterations, 200);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig<T: Float> {
    /// Convergence tolerance.
    ///
    /// The solver stops when `|f(x)| < tolerance` or the bracket half-width
    /// falls to `tolerance`.
    pub tolerance: T,

    /// Maximum number of iterations before giving up with
    /// `SolverError::MaxIterationsExceeded`.
    pub max_iterations: usize,
}

impl<T: Float> Default for SolverConfig<T> {
    /// Default values: `tolerance` 1e-10, `max_iterations` 100.
    fn default() -> Self {
        Self {
            tolerance: constant(1e-10),
            max_iterations: 100,
        }
    }
}

impl<T: Float> SolverConfig<T> {
    /// Create a new configuration with specified values.
    ///
    /// # Panics
    ///
    /// Panics if `tolerance <= 0` or `max_iterations == 0`.
    pub fn new(tolerance: T, max_iterations: usize) -> Self {
        assert!(tolerance > T::zero(), "tolerance must be positive");
        assert!(max_iterations > 0, "max_iterations must be > 0");
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Tight settings for calibration: tolerance 1e-14, 500 iterations.
    pub fn high_precision() -> Self {
        Self {
            tolerance: constant(1e-14),
            max_iterations: 500,
        }
    }

    /// Relaxed settings: tolerance 1e-6, 50 iterations.
    pub fn fast() -> Self {
        Self {
            tolerance: constant(1e-6),
            max_iterations: 50,
        }
    }

    /// Set the convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Check that the settings can drive a solver to termination.
    pub fn is_valid(&self) -> bool {
        self.tolerance > T::zero() && self.tolerance.is_finite() && self.max_iterations > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config: SolverConfig<f64> = SolverConfig::default();
        assert!((config.tolerance - 1e-10).abs() < 1e-15);
        assert_eq!(config.max_iterations, 100);
        assert!(config.is_valid());
    }

    #[test]
    fn test_new_config() {
        let config: SolverConfig<f64> = SolverConfig::new(1e-12, 200);
        assert_eq!(config.tolerance, 1e-12);
        assert_eq!(config.max_iterations, 200);
    }

    #[test]
    #[should_panic(expected = "tolerance must be positive")]
    fn test_new_config_zero_tolerance_panics() {
        let _: SolverConfig<f64> = SolverConfig::new(0.0, 100);
    }

    #[test]
    #[should_panic(expected = "max_iterations must be > 0")]
    fn test_new_config_zero_iterations_panics() {
        let _: SolverConfig<f64> = SolverConfig::new(1e-10, 0);
    }

    #[test]
    fn test_presets() {
        let precise: SolverConfig<f64> = SolverConfig::high_precision();
        assert!(precise.tolerance < 1e-12);
        assert_eq!(precise.max_iterations, 500);

        let fast: SolverConfig<f64> = SolverConfig::fast();
        assert!(fast.tolerance > 1e-8);
        assert_eq!(fast.max_iterations, 50);
    }

    #[test]
    fn test_builder_and_validity() {
        let config: SolverConfig<f64> = SolverConfig::default()
            .with_tolerance(1e-13)
            .with_max_iterations(7);
        assert_eq!(config.tolerance, 1e-13);
        assert_eq!(config.max_iterations, 7);

        assert!(!config.with_max_iterations(0).is_valid());
        assert!(!config.with_tolerance(-1.0).is_valid());
        assert!(!config.with_tolerance(f64::NAN).is_valid());
    }

    #[test]
    fn test_config_with_f32() {
        let config: SolverConfig<f32> = SolverConfig::default();
        assert!(config.tolerance > 0.0);
        assert_eq!(config.max_iterations, 100);
    }
}
