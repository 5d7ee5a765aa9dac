//! Brent's method root-finding solver.

use super::{evaluate, open_bracket, RootFinder, RootSolution, SolverConfig};
use crate::types::{constant, lossy_f64, SolverError};
use num_traits::Float;

/// Brent's method root finder.
///
/// Switches between inverse quadratic interpolation, the secant step and
/// bisection, keeping a sign-changing bracket `[b, c]` at all times. Converges
/// for any continuous objective with a valid bracket.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::{BrentSolver, RootFinder, SolverConfig};
///
/// let solver = BrentSolver::new(SolverConfig::default());
///
/// // Solve x³ - x - 2 = 0 in bracket [1, 2]
/// let f = |x: f64| x * x * x - x - 2.0;
/// let root = solver.find_root(f, 1.0, 2.0).unwrap();
/// assert!((root - 1.5213797068045676).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct BrentSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> BrentSolver<T> {
    /// Create a new Brent solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SolverConfig::default())
    }
}

impl<T: Float> RootFinder<T> for BrentSolver<T> {
    fn solve<F, E>(&self, mut f: F, a: T, b: T) -> Result<RootSolution<T>, E>
    where
        F: FnMut(T) -> Result<T, E>,
        E: From<SolverError>,
    {
        let (mut fa, mut fb) = match open_bracket(&mut f, a, b)? {
            Ok(values) => values,
            Err(endpoint_root) => return Ok(endpoint_root),
        };
        let (mut a, mut b) = (a, b);

        // b is the best estimate, c the contrapoint with f(c) of opposite sign.
        if fa.abs() < fb.abs() {
            std::mem::swap(&mut a, &mut b);
            std::mem::swap(&mut fa, &mut fb);
        }
        let mut c = a;
        let mut fc = fa;
        let mut d = b - a;
        let mut e = d;

        let two = constant::<T>(2.0);
        let three = constant::<T>(3.0);
        let tol = self.config.tolerance;

        for iteration in 0..self.config.max_iterations {
            let m = (c - b) / two;
            if fb.abs() < tol || m.abs() <= tol {
                return Ok(RootSolution {
                    root: b,
                    residual: fb,
                    iterations: iteration,
                });
            }

            let mut use_bisection = true;
            if e.abs() > tol && fa.abs() > fb.abs() {
                let s = fb / fa;
                let (p, q) = if a == c {
                    // Secant
                    (two * m * s, T::one() - s)
                } else {
                    // Inverse quadratic interpolation
                    let q = fa / fc;
                    let r = fb / fc;
                    (
                        s * (two * m * q * (q - r) - (b - a) * (r - T::one())),
                        (q - T::one()) * (r - T::one()) * (s - T::one()),
                    )
                };
                let (p, q) = if p > T::zero() { (p, -q) } else { (-p, q) };
                if two * p < (three * m * q - (tol * q).abs()).min((e * q).abs()) {
                    e = d;
                    d = p / q;
                    use_bisection = false;
                }
            }
            if use_bisection {
                d = m;
                e = m;
            }

            a = b;
            fa = fb;
            b = if d.abs() > tol {
                b + d
            } else if m > T::zero() {
                b + tol
            } else {
                b - tol
            };
            fb = evaluate(&mut f, b)?;

            if fb.signum() == fc.signum() {
                c = a;
                fc = fa;
                d = b - a;
                e = d;
            }
            if fc.abs() < fb.abs() {
                a = b;
                b = c;
                c = a;
                fa = fb;
                fb = fc;
                fc = fa;
            }
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
            a: lossy_f64(b),
            b: lossy_f64(c),
            residual: lossy_f64(fb),
        }
        .into())
    }

    fn config(&self) -> &SolverConfig<T> {
        &self.config
    }
}
