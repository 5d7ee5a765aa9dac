//! Credit instrument definitions and leg valuation.
//!
//! # Modules
//!
//! - [`credit`]: CDS contract terms, market quotes and the leg valuator
//!
//! [`InstrumentError`] is shared by every fallible operation in this module.

mod error;

pub mod credit;

pub use error::InstrumentError;
