//! # pricer_core: Numerical Foundation for the Credit Pricer
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core serves as the bottom layer of the credit pricing stack, providing:
//! - Discount curves: [`DiscountCurve`](market_data::curves::DiscountCurve),
//!   `FlatCurve`, `InterpolatedCurve` (`market_data::curves`)
//! - Piecewise-constant hazard curves: `SurvivalCurve`, `HazardSegment`,
//!   and the [`CreditCurve`](market_data::curves::CreditCurve) capability
//! - Bracketing root-finders: `BrentSolver`, `BisectionSolver` (`math::solvers`)
//! - Gauss-Legendre quadrature (`math::quadrature`)
//! - Error types: `MarketDataError`, `SolverError`
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::market_data::curves::{CreditCurve, DiscountCurve, FlatCurve, SurvivalCurve};
//!
//! let discount = FlatCurve::new(0.04_f64);
//! let mut credit = SurvivalCurve::new();
//! credit.append_segment(3.0, 0.012).unwrap();
//! credit.append_segment(5.0, 0.018).unwrap();
//!
//! let df = discount.discount_factor(5.0).unwrap();
//! let q = credit.survival_probability(5.0).unwrap();
//! assert!((q - (-(0.012 * 3.0 + 0.018 * 2.0_f64)).exp()).abs() < 1e-14);
//! assert!(df < 1.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for hazard segments and solver errors

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod types;
