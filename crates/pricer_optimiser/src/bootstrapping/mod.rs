//! Credit curve bootstrapping.
//!
//! Turns a term structure of par spread quotes into a piecewise-constant
//! hazard curve, one segment per quote.
//!
//! - [`CurveStripper`]: sequential strip for one reference entity
//! - [`strip_curve`]: convenience entry point with flat discounting
//! - [`strip_curves`]: many issuers at once, in parallel with the
//!   `parallel` feature

mod batch;
mod error;
mod stripper;

pub use batch::{strip_curves, IssuerQuotes};
pub use error::BootstrapError;
pub use stripper::{strip_curve, CurveStripper, StripDiagnostic, StripState, StrippedCurve};
