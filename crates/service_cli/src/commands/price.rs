//! Price command implementation
//!
//! Prices a single CDS under a flat hazard rate and flat discounting.

use clap::Args;
use pricer_core::market_data::curves::FlatCurve;
use pricer_models::analytical::credit_triangle_hazard;
use pricer_models::instruments::credit::{price_with, CdsContract, CdsPriceResult, HazardInput};
use serde::Serialize;
use tracing::info;

use super::MarketArgs;
use crate::config::CliConfig;
use crate::output::{render_report, Metric};
use crate::Result;

/// Credit spread used when neither a spread nor a hazard rate is given.
const DEFAULT_CREDIT_SPREAD: f64 = 0.01;

/// Arguments of `neutryx-cds price`
#[derive(Debug, Clone, Args)]
pub struct PriceArgs {
    /// Contract tenor in years
    #[arg(long, default_value_t = 5.0)]
    pub tenor: f64,

    /// Running coupon as a decimal (0.01 = 100bp)
    #[arg(long, default_value_t = 0.01)]
    pub coupon: f64,

    /// Upfront paid by the protection buyer
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub upfront: f64,

    /// Credit spread, converted to a flat hazard via spread / (1 - recovery) [default: 0.01]
    #[arg(long, conflicts_with = "hazard_rate")]
    pub credit_spread: Option<f64>,

    /// Flat hazard rate
    #[arg(long)]
    pub hazard_rate: Option<f64>,

    #[command(flatten)]
    pub market: MarketArgs,
}

/// Inputs and valuation of one contract.
#[derive(Debug, Clone, Serialize)]
pub struct PriceReport {
    pub contract: CdsContract<f64>,
    pub rf_rate: f64,
    pub hazard_rate: f64,
    pub result: CdsPriceResult<f64>,
}

impl PriceReport {
    fn metrics(&self) -> Vec<Metric> {
        let r = &self.result;
        vec![
            Metric::new("hazard_rate", format!("{:.8}", self.hazard_rate)),
            Metric::new("protection_leg_pv", format!("{:.8}", r.protection_leg_pv)),
            Metric::new("coupon_leg_pv", format!("{:.8}", r.coupon_leg_pv)),
            Metric::new("accrual_on_default_pv", format!("{:.8}", r.accrual_on_default_pv)),
            Metric::new("premium_leg_pv", format!("{:.8}", r.premium_leg_pv)),
            Metric::new("upfront", format!("{:.8}", r.upfront)),
            Metric::new("net_pv", format!("{:.8}", r.net_pv)),
            Metric::new("par_spread", format!("{:.8}", r.par_spread)),
            Metric::new("par_spread_bp", format!("{:.2}", r.par_spread * 1e4)),
            Metric::new("risky_annuity", format!("{:.8}", r.risky_annuity)),
            Metric::new("risky_pv01", format!("{:.8}", r.risky_pv01)),
            Metric::new("accrual_convention", r.accrual_convention),
            Metric::new("integration", r.integration),
        ]
    }
}

/// Value one contract.
pub fn price(args: &PriceArgs, config: &CliConfig) -> Result<PriceReport> {
    let contract = CdsContract::new(
        args.tenor,
        args.coupon,
        config.recovery_rate,
        config.payment_frequency,
    )?;
    let hazard_rate = match args.hazard_rate {
        Some(hazard_rate) => hazard_rate,
        None => credit_triangle_hazard(
            args.credit_spread.unwrap_or(DEFAULT_CREDIT_SPREAD),
            config.recovery_rate,
        )?,
    };

    info!(
        tenor = args.tenor,
        coupon = args.coupon,
        upfront = args.upfront,
        hazard_rate,
        rf_rate = config.rf_rate,
        recovery_rate = config.recovery_rate,
        "Running CDS pricer"
    );

    let valuator = config.valuator()?;
    let result = price_with(
        &valuator,
        &contract,
        &FlatCurve::new(config.rf_rate),
        &HazardInput::Flat(hazard_rate),
        args.upfront,
    )?;

    info!(net_pv = result.net_pv, par_spread = result.par_spread, "Pricing complete");
    Ok(PriceReport {
        contract,
        rf_rate: config.rf_rate,
        hazard_rate,
        result,
    })
}

/// Run the price command
pub fn run(args: &PriceArgs, config: &CliConfig) -> Result<String> {
    let report = price(args, config)?;
    render_report(config.format, &report, &report.metrics())
}
