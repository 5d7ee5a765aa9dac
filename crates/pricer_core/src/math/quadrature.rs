//! Gauss-Legendre quadrature.
//!
//! Nodes and weights are computed once in `f64` by Newton iteration on the
//! Legendre polynomial and then converted to the working float type.

use crate::types::constant;
use num_traits::Float;
use std::f64::consts::PI;
use thiserror::Error;

/// Quadrature construction errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuadratureError {
    /// A rule needs at least one node.
    #[error("Gauss-Legendre rule needs at least one point, got {points}")]
    InvalidOrder {
        /// Requested number of points
        points: usize,
    },
}

/// n-point Gauss-Legendre rule on `[-1, 1]`, mapped onto arbitrary intervals.
///
/// Exact for polynomials of degree up to `2n - 1`.
///
/// # Example
///
/// ```
/// use pricer_core::math::quadrature::GaussLegendre;
///
/// let rule = GaussLegendre::<f64>::new(8).unwrap();
/// let integral = rule.integrate_fn(0.0, 2.0, |x| (-0.5 * x).exp());
/// assert!((integral - 2.0 * (1.0 - (-1.0_f64).exp())).abs() < 1e-14);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GaussLegendre<T: Float> {
    nodes: Vec<T>,
    weights: Vec<T>,
}

impl<T: Float> GaussLegendre<T> {
    /// Build an n-point rule.
    pub fn new(points: usize) -> Result<Self, QuadratureError> {
        let (nodes, weights) = nodes_and_weights(points)?;
        Ok(Self {
            nodes: nodes.into_iter().map(constant).collect(),
            weights: weights.into_iter().map(constant).collect(),
        })
    }

    /// Number of nodes.
    #[inline]
    pub fn points(&self) -> usize {
        self.nodes.len()
    }

    /// Nodes on `[-1, 1]` in increasing order.
    #[inline]
    pub fn nodes(&self) -> &[T] {
        &self.nodes
    }

    /// Weights matching [`nodes`](Self::nodes); they sum to 2.
    #[inline]
    pub fn weights(&self) -> &[T] {
        &self.weights
    }

    /// Integrate a fallible integrand over `[a, b]`.
    ///
    /// The first integrand error aborts the integration.
    pub fn integrate<F, E>(&self, a: T, b: T, mut f: F) -> Result<T, E>
    where
        F: FnMut(T) -> Result<T, E>,
    {
        let two = constant::<T>(2.0);
        let half_width = (b - a) / two;
        let centre = (b + a) / two;
        let mut sum = T::zero();
        for (&x, &w) in self.nodes.iter().zip(&self.weights) {
            sum = sum + w * f(half_width * x + centre)?;
        }
        Ok(sum * half_width)
    }

    /// Integrate an infallible integrand over `[a, b]`.
    pub fn integrate_fn<F>(&self, a: T, b: T, mut f: F) -> T
    where
        F: FnMut(T) -> T,
    {
        let result: Result<T, std::convert::Infallible> = self.integrate(a, b, |x| Ok(f(x)));
        match result {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }
}

fn nodes_and_weights(n: usize) -> Result<(Vec<f64>, Vec<f64>), QuadratureError> {
    if n == 0 {
        return Err(QuadratureError::InvalidOrder { points: n });
    }

    let mut nodes = vec![0.0_f64; n];
    let mut weights = vec![0.0_f64; n];
    let nf = n as f64;

    for i in 0..n.div_ceil(2) {
        let mut z = (PI * (i as f64 + 0.75) / (nf + 0.5)).cos();
        for _ in 0..100 {
            let (p, dp) = legendre(n, z);
            let dz = p / dp;
            z -= dz;
            if dz.abs() < 1e-15 {
                break;
            }
        }
        let (_, dp) = legendre(n, z);
        let w = 2.0 / ((1.0 - z * z) * dp * dp);

        nodes[i] = -z;
        nodes[n - 1 - i] = z;
        weights[i] = w;
        weights[n - 1 - i] = w;
    }

    Ok((nodes, weights))
}

/// `(P_n(x), P_n'(x))` by the three-term recurrence.
fn legendre(n: usize, x: f64) -> (f64, f64) {
    let mut p_prev = 1.0;
    let mut p = x;
    for k in 2..=n {
        let kf = k as f64;
        let next = ((2.0 * kf - 1.0) * x * p - (kf - 1.0) * p_prev) / kf;
        p_prev = p;
        p = next;
    }
    if n == 1 {
        return (x, 1.0);
    }
    (p, n as f64 * (x * p - p_prev) / (x * x - 1.0))
}
