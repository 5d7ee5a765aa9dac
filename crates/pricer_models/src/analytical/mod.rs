//! Closed-form credit formulas.
//!
//! This module provides:
//! - [`FlatHazardCds`]: Continuous-premium CDS under a flat hazard rate and
//!   flat risk-free rate
//! - [`credit_triangle_hazard`]: Hazard rate implied by a spread and recovery
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`**: Same numeric convention as the leg valuator
//! - **Analytic cross-check**: The discrete valuator converges to
//!   [`FlatHazardCds`] as the payment frequency grows

pub mod error;
pub mod flat_hazard;

pub use error::AnalyticalError;
pub use flat_hazard::{credit_triangle_hazard, FlatHazardCds};
