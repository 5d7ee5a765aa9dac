//! Bracketing root-finders for calibration.
//!
//! ## Available Solvers
//!
//! - [`BrentSolver`]: Inverse quadratic interpolation and secant steps with a
//!   bisection safeguard
//! - [`BisectionSolver`]: Plain interval halving
//!
//! Both implement [`RootFinder`], honour [`SolverConfig`] and terminate within
//! `max_iterations` evaluations, either with a [`RootSolution`] or a
//! [`SolverError`](crate::types::SolverError) carrying the last bracket and
//! residual.
//!
//! Objectives are fallible (`FnMut(T) -> Result<T, E>`): a pricing error
//! raised inside the objective aborts the search and is returned unchanged.
//!
//! ## Example
//!
//! ```
//! use pricer_core::math::solvers::{BrentSolver, RootFinder, SolverConfig};
//! use pricer_core::types::SolverError;
//!
//! let solver = BrentSolver::new(SolverConfig::default());
//! let solution = solver
//!     .solve(|x: f64| Ok::<_, SolverError>(x * x - 2.0), 0.0, 2.0)
//!     .unwrap();
//! assert!((solution.root - std::f64::consts::SQRT_2).abs() < 1e-10);
//! assert!(solution.iterations > 0);
//! ```

mod bisection;
mod brent;
mod config;

pub use bisection::BisectionSolver;
pub use brent::BrentSolver;
pub use config::SolverConfig;

use crate::types::{lossy_f64, SolverError};
use num_traits::Float;

/// Converged root with diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RootSolution<T: Float> {
    /// Root estimate.
    pub root: T,
    /// Objective value at `root`.
    pub residual: T,
    /// Objective evaluations after the two bracket endpoints.
    pub iterations: usize,
}

/// A bracketing 1-D root-finder.
pub trait RootFinder<T: Float> {
    /// Find a root of `f` in `[a, b]`.
    ///
    /// # Errors
    ///
    /// - `SolverError::InvalidBracket` if an endpoint is not finite or `a == b`
    /// - `SolverError::NoBracket` if `f(a)` and `f(b)` share a sign
    /// - `SolverError::MaxIterationsExceeded` if the budget is exhausted
    /// - `SolverError::NumericalInstability` if `f` returns a non-finite value
    /// - any error returned by `f` itself
    fn solve<F, E>(&self, f: F, a: T, b: T) -> Result<RootSolution<T>, E>
    where
        F: FnMut(T) -> Result<T, E>,
        E: From<SolverError>;

    /// Solver settings.
    fn config(&self) -> &SolverConfig<T>;

    /// Infallible convenience wrapper returning only the root.
    fn find_root<F>(&self, mut f: F, a: T, b: T) -> Result<T, SolverError>
    where
        F: FnMut(T) -> T,
    {
        self.solve(|x| Ok::<T, SolverError>(f(x)), a, b)
            .map(|solution| solution.root)
    }
}

/// Evaluate the objective, rejecting NaN and infinite values.
pub(crate) fn evaluate<T, F, E>(f: &mut F, x: T) -> Result<T, E>
where
    T: Float,
    F: FnMut(T) -> Result<T, E>,
    E: From<SolverError>,
{
    let value = f(x)?;
    if !value.is_finite() {
        return Err(SolverError::NumericalInstability(format!(
            "objective returned {} at x = {}",
            lossy_f64(value),
            lossy_f64(x)
        ))
        .into());
    }
    Ok(value)
}

/// Validate the bracket and evaluate both endpoints.
///
/// Returns `Ok(Err(solution))` when an endpoint is already a root.
#[allow(clippy::type_complexity)]
pub(crate) fn open_bracket<T, F, E>(
    f: &mut F,
    a: T,
    b: T,
) -> Result<Result<(T, T), RootSolution<T>>, E>
where
    T: Float,
    F: FnMut(T) -> Result<T, E>,
    E: From<SolverError>,
{
    if !a.is_finite() || !b.is_finite() || a == b {
        return Err(SolverError::InvalidBracket {
            a: lossy_f64(a),
            b: lossy_f64(b),
        }
        .into());
    }

    let fa = evaluate(f, a)?;
    if fa == T::zero() {
        return Ok(Err(RootSolution {
            root: a,
            residual: fa,
            iterations: 0,
        }));
    }
    let fb = evaluate(f, b)?;
    if fb == T::zero() {
        return Ok(Err(RootSolution {
            root: b,
            residual: fb,
            iterations: 0,
        }));
    }

    if fa.signum() == fb.signum() {
        return Err(SolverError::NoBracket {
            a: lossy_f64(a),
            b: lossy_f64(b),
            fa: lossy_f64(fa),
            fb: lossy_f64(fb),
        }
        .into());
    }
    Ok(Ok((fa, fb)))
}
