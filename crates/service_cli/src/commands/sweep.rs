//! Sweep command implementation
//!
//! Tabulates the par spread against the recovery rate for a fixed credit
//! spread, each point priced with the credit-triangle hazard.

use clap::Args;
use pricer_core::market_data::curves::FlatCurve;
use pricer_models::analytical::credit_triangle_hazard;
use pricer_models::instruments::credit::{price_with, CdsContract, HazardInput};
use serde::Serialize;
use tracing::info;

use crate::config::CliConfig;
use crate::output::{render, TableRow};
use crate::{CliError, Result};

/// Lowest recovery rate in the sweep.
pub const MIN_RECOVERY: f64 = 0.01;
/// Highest recovery rate in the sweep.
pub const MAX_RECOVERY: f64 = 0.99;

/// Arguments of `neutryx-cds sweep`
#[derive(Debug, Clone, Args)]
pub struct SweepArgs {
    /// Contract tenor in years
    #[arg(long, default_value_t = 5.0)]
    pub tenor: f64,

    /// Running coupon as a decimal (0.01 = 100bp)
    #[arg(long, default_value_t = 0.01)]
    pub coupon: f64,

    /// Upfront paid by the protection buyer
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub upfront: f64,

    /// Credit spread held fixed across the sweep
    #[arg(long, default_value_t = 0.01)]
    pub credit_spread: f64,

    /// Number of recovery rates between 1% and 99%
    #[arg(long, default_value_t = 100)]
    pub steps: usize,

    /// Flat risk-free rate (overrides config)
    #[arg(long, allow_negative_numbers = true)]
    pub rf_rate: Option<f64>,

    /// Premium payments per year (overrides config)
    #[arg(long)]
    pub frequency: Option<u32>,
}

/// One point of the sweep, with the conventions it was priced under.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepRow {
    pub recovery_rate: f64,
    pub hazard_rate: f64,
    pub par_spread_bp: f64,
    pub net_pv: f64,
    pub accrual_convention: String,
    pub integration: String,
}

impl TableRow for SweepRow {
    fn headers() -> &'static [&'static str] {
        &[
            "Recovery (%)",
            "Hazard",
            "Par spread (bp)",
            "Net PV",
            "Accrual",
            "Integration",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            format!("{:.2}", self.recovery_rate * 100.0),
            format!("{:.6}", self.hazard_rate),
            format!("{:.2}", self.par_spread_bp),
            format!("{:.8}", self.net_pv),
            self.accrual_convention.clone(),
            self.integration.clone(),
        ]
    }
}

/// `steps` evenly spaced recovery rates from 1% to 99%.
pub fn recovery_grid(steps: usize) -> Vec<f64> {
    let last = steps.saturating_sub(1).max(1) as f64;
    (0..steps)
        .map(|i| MIN_RECOVERY + (MAX_RECOVERY - MIN_RECOVERY) * i as f64 / last)
        .collect()
}

/// Price the contract at every recovery rate of the grid.
pub fn sweep(args: &SweepArgs, config: &CliConfig) -> Result<Vec<SweepRow>> {
    if args.steps < 2 {
        return Err(CliError::InvalidArgument(format!(
            "--steps must be at least 2, got {}",
            args.steps
        )));
    }
    info!(
        steps = args.steps,
        credit_spread = args.credit_spread,
        "Running par spread vs recovery sweep"
    );

    let valuator = config.valuator()?;
    let discount = FlatCurve::new(config.rf_rate);
    recovery_grid(args.steps)
        .into_iter()
        .map(|recovery_rate| -> Result<SweepRow> {
            let contract = CdsContract::new(
                args.tenor,
                args.coupon,
                recovery_rate,
                config.payment_frequency,
            )?;
            let hazard_rate = credit_triangle_hazard(args.credit_spread, recovery_rate)?;
            let result = price_with(
                &valuator,
                &contract,
                &discount,
                &HazardInput::Flat(hazard_rate),
                args.upfront,
            )?;
            Ok(SweepRow {
                recovery_rate,
                hazard_rate,
                par_spread_bp: result.par_spread * 1e4,
                net_pv: result.net_pv,
                accrual_convention: result.accrual_convention.to_string(),
                integration: result.integration.to_string(),
            })
        })
        .collect()
}

/// Run the sweep command
pub fn run(args: &SweepArgs, config: &CliConfig) -> Result<String> {
    render(config.format, &sweep(args, config)?)
}
