//! Interval-halving root finder.

use super::{evaluate, open_bracket, RootFinder, RootSolution, SolverConfig};
use crate::types::{constant, lossy_f64, SolverError};
use num_traits::Float;

/// Bisection root finder.
///
/// Slower than [`BrentSolver`](super::BrentSolver) but with a predictable
/// iteration count of roughly `log2(|b - a| / tolerance)`.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::{BisectionSolver, RootFinder, SolverConfig};
///
/// let solver = BisectionSolver::new(SolverConfig::new(1e-12, 200));
/// let root = solver.find_root(|x: f64| x.exp() - 2.0, 0.0, 1.0).unwrap();
/// assert!((root - 2.0_f64.ln()).abs() < 1e-11);
/// ```
#[derive(Debug, Clone)]
pub struct BisectionSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> BisectionSolver<T> {
    /// Create a new bisection solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SolverConfig::default())
    }
}

impl<T: Float> RootFinder<T> for BisectionSolver<T> {
    fn solve<F, E>(&self, mut f: F, a: T, b: T) -> Result<RootSolution<T>, E>
    where
        F: FnMut(T) -> Result<T, E>,
        E: From<SolverError>,
    {
        let (mut lo, mut hi) = (a, b);
        let (mut f_lo, _) = match open_bracket(&mut f, lo, hi)? {
            Ok(values) => values,
            Err(endpoint_root) => return Ok(endpoint_root),
        };

        let two = constant::<T>(2.0);
        let tol = self.config.tolerance;
        let mut residual = f_lo;

        for iteration in 0..self.config.max_iterations {
            let mid = (lo + hi) / two;
            let f_mid = evaluate(&mut f, mid)?;

            if f_mid.abs() < tol || ((hi - lo) / two).abs() <= tol {
                return Ok(RootSolution {
                    root: mid,
                    residual: f_mid,
                    iterations: iteration + 1,
                });
            }

            if f_mid.signum() == f_lo.signum() {
                lo = mid;
                f_lo = f_mid;
            } else {
                hi = mid;
            }
            residual = f_mid;
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
            a: lossy_f64(lo),
            b: lossy_f64(hi),
            residual: lossy_f64(residual),
        }
        .into())
    }

    fn config(&self) -> &SolverConfig<T> {
        &self.config
    }
}
