//! CLI command implementations
//!
//! Each submodule implements one subcommand and returns its rendered output.

pub mod implied;
pub mod price;
pub mod strip;
pub mod sweep;

/// Market overrides shared by the pricing and calibration commands.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct MarketArgs {
    /// Flat risk-free rate (overrides config)
    #[arg(long, allow_negative_numbers = true)]
    pub rf_rate: Option<f64>,

    /// Recovery rate (overrides config)
    #[arg(long)]
    pub recovery_rate: Option<f64>,

    /// Premium payments per year (overrides config)
    #[arg(long)]
    pub frequency: Option<u32>,
}
