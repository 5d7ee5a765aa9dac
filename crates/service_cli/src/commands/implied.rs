//! Implied command implementation
//!
//! Fits the flat hazard rate at which a contract is worth its upfront, and
//! reports it as a credit spread.

use clap::Args;
use pricer_core::market_data::curves::{FlatCurve, SurvivalCurve};
use pricer_models::instruments::credit::{AccrualOnDefault, CdsContract, IntegrationMethod};
use serde::Serialize;
use tracing::info;

use super::MarketArgs;
use crate::config::CliConfig;
use crate::output::{render_report, Metric};
use crate::Result;

/// Arguments of `neutryx-cds implied`
#[derive(Debug, Clone, Args)]
pub struct ImpliedArgs {
    /// Contract tenor in years
    #[arg(long, default_value_t = 5.0)]
    pub tenor: f64,

    /// Running coupon as a decimal (0.01 = 100bp)
    #[arg(long, default_value_t = 0.01)]
    pub coupon: f64,

    /// Upfront paid by the protection buyer
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub upfront: f64,

    #[command(flatten)]
    pub market: MarketArgs,
}

/// Fitted hazard rate and the credit spread it implies.
#[derive(Debug, Clone, Serialize)]
pub struct ImpliedReport {
    pub contract: CdsContract<f64>,
    pub upfront: f64,
    pub hazard_rate: f64,
    pub fitted_spread: f64,
    pub fitted_spread_bp: f64,
    pub residual: f64,
    pub iterations: usize,
    pub accrual_convention: AccrualOnDefault,
    pub integration: IntegrationMethod,
}

impl ImpliedReport {
    fn metrics(&self) -> Vec<Metric> {
        vec![
            Metric::new("hazard_rate", format!("{:.8}", self.hazard_rate)),
            Metric::new("fitted_spread", format!("{:.8}", self.fitted_spread)),
            Metric::new("fitted_spread_bp", format!("{:.0}", self.fitted_spread_bp)),
            Metric::new("residual", format!("{:.2e}", self.residual)),
            Metric::new("iterations", self.iterations),
            Metric::new("accrual_convention", self.accrual_convention),
            Metric::new("integration", self.integration),
        ]
    }
}

/// Fit the flat hazard rate for the contract and upfront.
pub fn implied(args: &ImpliedArgs, config: &CliConfig) -> Result<ImpliedReport> {
    let contract = CdsContract::new(
        args.tenor,
        args.coupon,
        config.recovery_rate,
        config.payment_frequency,
    )?;
    let discount = FlatCurve::new(config.rf_rate);
    let solver = config.solver()?;

    info!(
        tenor = args.tenor,
        coupon = args.coupon,
        upfront = args.upfront,
        rf_rate = config.rf_rate,
        recovery_rate = config.recovery_rate,
        "Running credit spread stripper"
    );

    let solution = solver.solve_upfront_implied_hazard(&contract, args.upfront, &discount)?;
    let curve = SurvivalCurve::flat(solution.root, args.tenor)?;
    let fitted_spread = solver.valuator().par_spread(&contract, &curve, &discount)?;

    info!("Fitted credit spread: {:.0} bp", fitted_spread * 1e4);
    let conventions = solver.valuator().config();
    Ok(ImpliedReport {
        contract,
        upfront: args.upfront,
        hazard_rate: solution.root,
        fitted_spread,
        fitted_spread_bp: fitted_spread * 1e4,
        residual: solution.residual,
        iterations: solution.iterations,
        accrual_convention: conventions.accrual_on_default,
        integration: conventions.integration,
    })
}

/// Run the implied command
pub fn run(args: &ImpliedArgs, config: &CliConfig) -> Result<String> {
    let report = implied(args, config)?;
    render_report(config.format, &report, &report.metrics())
}
