//! Curve abstractions for discounting and credit risk calculations.
//!
//! This module provides:
//! - [`DiscountCurve`]: Generic capability for discount factor and rate calculations
//! - [`FlatCurve`]: Constant rate discount curve implementation
//! - [`InterpolatedCurve`]: Pillar-based term-structure discount curve
//! - [`CurveInterpolation`]: Interpolation method selection
//! - [`CreditCurve`]: Generic capability for hazard rate and survival probability calculations
//! - [`SurvivalCurve`]: Piecewise-constant hazard rate curve built from [`HazardSegment`]s

mod credit;
mod flat;
mod interpolated;
mod traits;

pub use credit::{CreditCurve, HazardSegment, SurvivalCurve};
pub use flat::FlatCurve;
pub use interpolated::{CurveInterpolation, InterpolatedCurve};
pub use traits::DiscountCurve;
