//! CLI error types.

use pricer_core::market_data::MarketDataError;
use pricer_models::analytical::AnalyticalError;
use pricer_models::instruments::InstrumentError;
use pricer_optimiser::bootstrapping::BootstrapError;
use pricer_optimiser::calibration::CalibrationError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Analytical error: {0}")]
    Analytical(#[from] AnalyticalError),

    #[error("Pricing error: {0}")]
    Instrument(#[from] InstrumentError),

    #[error("Calibration error: {0}")]
    Calibration(#[from] CalibrationError),

    #[error("Bootstrap error: {0}")]
    Bootstrap(#[from] BootstrapError),
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
