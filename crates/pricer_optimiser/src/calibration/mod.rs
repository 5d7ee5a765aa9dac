//! Single-contract calibration.
//!
//! This module provides:
//! - [`ParSpreadSolver`]: Par spread, implied hazard and upfront-implied hazard
//! - [`CalibrationConfig`]: Solver tolerance, budget, method and brackets
//! - [`CalibrationError`]: Validation, convergence and pricing failures
//!
//! Every root-find is bounded by `CalibrationConfig::solver.max_iterations`
//! and ends either with a solution or a `CalibrationError::Convergence`
//! carrying the last bracket and residual.

mod config;
mod error;
mod par_spread;

pub use config::{CalibrationConfig, RootMethod};
pub use error::CalibrationError;
pub use par_spread::ParSpreadSolver;
