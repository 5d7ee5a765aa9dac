//! # pricer_optimiser
//!
//! Calibration and bootstrapping of credit curves for Neutryx.
//!
//! This crate sits on top of Models (L2), solving inverse problems: given
//! observed par spreads, find the hazard rates that reprice them.
//!
//! ## Architecture Position
//!
//! Layer 2.5 in the **P**ricer layer of the A-I-P-S architecture.
//! Depends on `pricer_core` (L1) and `pricer_models` (L2).
//!
//! ## Modules
//!
//! - `calibration`: One-dimensional root-finding for par spreads and implied
//!   hazard rates
//! - `bootstrapping`: Sequential piecewise hazard-curve stripping from a term
//!   structure of quotes, single issuer or batched
//!
//! ## Example
//!
//! ```
//! use pricer_models::instruments::credit::MarketQuote;
//! use pricer_optimiser::prelude::*;
//!
//! let quotes = [MarketQuote::new(3.0_f64, 0.008), MarketQuote::new(5.0, 0.010)];
//! let segments = strip_curve(&quotes, 0.04, 0.4, 4).unwrap();
//! assert_eq!(segments.len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bootstrapping;
pub mod calibration;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::bootstrapping::*;
    pub use crate::calibration::*;
}
