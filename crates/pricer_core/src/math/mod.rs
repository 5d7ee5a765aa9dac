//! Numerical routines shared by the pricing and calibration layers.
//!
//! - [`solvers`]: Bracketing root-finders (Brent, bisection)
//! - [`quadrature`]: Gauss-Legendre integration

pub mod quadrature;
pub mod solvers;
