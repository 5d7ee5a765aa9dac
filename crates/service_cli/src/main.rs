//! Neutryx CDS CLI - Command Line Operations for Credit Default Swaps
//!
//! This is the operational entry point for the Neutryx credit pricer.
//!
//! # Commands
//!
//! - `neutryx-cds price` - Value a CDS under a flat hazard rate
//! - `neutryx-cds strip --quote 3:0.008 --quote 5:0.01` - Bootstrap a hazard curve
//! - `neutryx-cds implied --upfront 0.02` - Fit the credit spread implied by an upfront
//! - `neutryx-cds sweep` - Par spread against recovery rate
//!
//! # Architecture
//!
//! As part of the **S**ervice layer in the A-I-P-S architecture, this crate
//! orchestrates the pricer layers behind a thin command dispatcher.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use error::{CliError, Result};

use commands::implied::ImpliedArgs;
use commands::price::PriceArgs;
use commands::strip::StripArgs;
use commands::sweep::SweepArgs;
use commands::MarketArgs;
use config::{build_config, CliConfig, CliOverrides, LogLevel};

/// Neutryx CDS pricer and credit curve stripper
#[derive(Parser)]
#[command(name = "neutryx-cds")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Output format (table, json, csv)
    #[arg(short, long, global = true)]
    format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a CDS under a flat hazard rate
    Price(PriceArgs),

    /// Bootstrap a piecewise hazard curve from par spread quotes
    Strip(StripArgs),

    /// Fit the flat credit spread implied by a coupon and upfront
    Implied(ImpliedArgs),

    /// Tabulate par spread against recovery rate
    Sweep(SweepArgs),
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Price(_) => "price",
            Commands::Strip(_) => "strip",
            Commands::Implied(_) => "implied",
            Commands::Sweep(_) => "sweep",
        }
    }

    fn market(&self) -> MarketArgs {
        match self {
            Commands::Price(args) => args.market.clone(),
            Commands::Strip(args) => args.market.clone(),
            Commands::Implied(args) => args.market.clone(),
            Commands::Sweep(args) => MarketArgs {
                rf_rate: args.rf_rate,
                recovery_rate: None,
                frequency: args.frequency,
            },
        }
    }

    fn run(&self, config: &CliConfig) -> Result<String> {
        match self {
            Commands::Price(args) => commands::price::run(args, config),
            Commands::Strip(args) => commands::strip::run(args, config),
            Commands::Implied(args) => commands::implied::run(args, config),
            Commands::Sweep(args) => commands::sweep::run(args, config),
        }
    }
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        let market = self.command.market();
        CliOverrides {
            config_file: self.config.clone(),
            log_level: self.log_level.clone(),
            format: self.format.clone(),
            rf_rate: market.rf_rate,
            recovery_rate: market.recovery_rate,
            payment_frequency: market.frequency,
        }
    }
}

fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = build_config(&cli.overrides()).context("failed to load configuration")?;
    let level = if cli.verbose && config.log_level != LogLevel::Trace {
        LogLevel::Debug
    } else {
        config.log_level
    };
    init_tracing(level);

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    debug!(?config, "Configuration loaded");

    let output = cli
        .command
        .run(&config)
        .with_context(|| format!("{} command failed", cli.command.name()))?;
    println!("{}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_strip_quotes() {
        let cli = Cli::try_parse_from([
            "neutryx-cds",
            "strip",
            "--quote",
            "3:0.008",
            "--quote",
            "5:0.010",
            "--rf-rate",
            "0.03",
            "--format",
            "json",
        ])
        .unwrap();
        let overrides = cli.overrides();
        assert_eq!(overrides.rf_rate, Some(0.03));
        assert_eq!(overrides.format.as_deref(), Some("json"));
        match cli.command {
            Commands::Strip(args) => assert_eq!(args.quotes.len(), 2),
            _ => panic!("Expected strip command"),
        }
    }

    #[test]
    fn test_parse_negative_upfront() {
        let cli = Cli::try_parse_from(["neutryx-cds", "implied", "--upfront", "-0.02"]).unwrap();
        match cli.command {
            Commands::Implied(args) => assert_eq!(args.upfront, -0.02),
            _ => panic!("Expected implied command"),
        }
    }

    #[test]
    fn test_spread_and_hazard_conflict() {
        assert!(Cli::try_parse_from([
            "neutryx-cds",
            "price",
            "--credit-spread",
            "0.01",
            "--hazard-rate",
            "0.02",
        ])
        .is_err());
    }

    #[test]
    fn test_sweep_overrides_skip_recovery() {
        let cli = Cli::try_parse_from(["neutryx-cds", "sweep", "--frequency", "12"]).unwrap();
        let overrides = cli.overrides();
        assert_eq!(overrides.payment_frequency, Some(12));
        assert_eq!(overrides.recovery_rate, None);
    }
}
