//! Market data structures for credit pricing.
//!
//! This module provides discount curve and credit (survival) curve
//! abstractions used by the premium and protection leg valuations.
//!
//! # Architecture
//!
//! All structures are generic over `T: Float` so that the same curve code
//! runs in `f64` for production and `f32` for memory-bound batch work.
//!
//! # Components
//!
//! - [`curves`]: Discount and credit curve traits and implementations
//! - [`error`]: Market data error types (MarketDataError)
//!
//! # Example
//!
//! ```
//! use pricer_core::market_data::curves::{CreditCurve, DiscountCurve, FlatCurve, SurvivalCurve};
//!
//! // Create a flat discount curve with 4% rate
//! let curve = FlatCurve::new(0.04_f64);
//! let df = curve.discount_factor(1.0).unwrap();
//! assert!((df - 0.960789).abs() < 1e-6);
//!
//! // Create a one-segment credit curve with 100bp hazard
//! let credit = SurvivalCurve::flat(0.01_f64, 5.0).unwrap();
//! let q = credit.survival_probability(1.0).unwrap();
//! assert!((q - 0.990050).abs() < 1e-6);
//! ```

pub mod curves;
pub mod error;

// Re-export commonly used types
pub use curves::{
    CreditCurve, CurveInterpolation, DiscountCurve, FlatCurve, HazardSegment, InterpolatedCurve,
    SurvivalCurve,
};
pub use error::MarketDataError;
