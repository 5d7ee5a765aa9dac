//! Single-name credit default swaps.
//!
//! This module provides:
//! - [`CdsContract`]: Validated contract terms (tenor, coupon, recovery, frequency)
//! - [`MarketQuote`]: A quoted par spread for one tenor
//! - [`LegValuator`]: Premium, accrued-on-default and protection leg valuation
//! - [`ProtectionIntegrator`]: Swappable protection-leg integration strategies
//! - [`price`] / [`price_with`]: One-call pricing entry points
//!
//! # Examples
//!
//! ```
//! use pricer_core::market_data::curves::{FlatCurve, SurvivalCurve};
//! use pricer_models::instruments::credit::{CdsContract, LegValuator};
//!
//! let contract = CdsContract::new(5.0_f64, 0.01, 0.4, 4).unwrap();
//! let credit = SurvivalCurve::from_pillars(&[3.0, 5.0], &[0.0133, 0.0167]).unwrap();
//! let discount = FlatCurve::new(0.04);
//!
//! let valuator = LegValuator::default();
//! let result = valuator.price(&contract, &credit, &discount, 0.0).unwrap();
//! assert!(result.protection_leg_pv > 0.0);
//! assert!(result.premium_leg_pv > 0.0);
//! ```

mod cds;
pub mod integration;
mod pricing;

pub use cds::{CdsContract, MarketQuote, MAX_PAYMENT_FREQUENCY, MAX_TENOR};
pub use integration::{
    GaussLegendreRule, IntegrationMethod, Integrator, MidpointRule, ProtectionIntegrator,
    DEFAULT_QUADRATURE_POINTS,
};
pub use pricing::{
    price, price_with, validate_rf_rate, AccrualOnDefault, CdsPriceResult, HazardInput,
    LegValuator, ValuationConfig,
};
