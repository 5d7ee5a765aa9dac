//! # Pricer Models (L2: Business Logic)
//!
//! Single-name CDS contracts, premium schedules and leg valuation.
//!
//! This crate provides:
//! - Contract terms and market quotes ([`instruments::credit`])
//! - Premium accrual schedules ([`schedules`])
//! - The leg valuator and `price` entry point, with swappable protection-leg
//!   integration and accrued-on-default conventions
//! - Closed-form flat-hazard formulas for cross-checking ([`analytical`])
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`**: Curves and valuations share one numeric type
//! - **Capability-based curves**: Anything implementing `DiscountCurve` or
//!   `CreditCurve` from `pricer_core` can be priced against
//! - **Builder pattern** for valuation conventions with sensible defaults
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_models::instruments::credit::{price, CdsContract, HazardInput};
//!
//! let contract = CdsContract::new(5.0_f64, 0.01, 0.4, 4).unwrap();
//! let result = price(&contract, 0.04, &HazardInput::Flat(0.02), 0.0).unwrap();
//! assert!(result.net_pv > 0.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
pub mod schedules;
