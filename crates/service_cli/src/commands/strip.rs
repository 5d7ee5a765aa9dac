//! Strip command implementation
//!
//! Bootstraps a piecewise hazard curve from a term structure of par spreads.

use std::path::{Path, PathBuf};

use clap::Args;
use pricer_core::market_data::curves::{CreditCurve, FlatCurve};
use pricer_models::instruments::credit::MarketQuote;
use pricer_optimiser::bootstrapping::{CurveStripper, StrippedCurve};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::MarketArgs;
use crate::config::CliConfig;
use crate::output::{render, TableRow};
use crate::{CliError, Result};

/// Arguments of `neutryx-cds strip`
#[derive(Debug, Clone, Args)]
pub struct StripArgs {
    /// Market quote as TENOR:SPREAD, e.g. 5:0.01 (repeatable, ascending tenors)
    #[arg(long = "quote", value_name = "TENOR:SPREAD", value_parser = parse_quote)]
    pub quotes: Vec<MarketQuote<f64>>,

    /// CSV file with a `tenor,spread` header
    #[arg(long, conflicts_with = "quotes")]
    pub quotes_file: Option<PathBuf>,

    #[command(flatten)]
    pub market: MarketArgs,
}

/// Parse a `TENOR:SPREAD` pair.
pub fn parse_quote(s: &str) -> std::result::Result<MarketQuote<f64>, String> {
    let (tenor, spread) = s
        .split_once(':')
        .ok_or_else(|| format!("expected TENOR:SPREAD, got {:?}", s))?;
    let tenor: f64 = tenor
        .trim()
        .parse()
        .map_err(|_| format!("invalid tenor {:?}", tenor))?;
    let spread: f64 = spread
        .trim()
        .parse()
        .map_err(|_| format!("invalid spread {:?}", spread))?;
    Ok(MarketQuote::new(tenor, spread))
}

#[derive(Debug, Deserialize)]
struct QuoteRecord {
    tenor: f64,
    spread: f64,
}

/// Read quotes from CSV text with a `tenor,spread` header.
pub fn parse_quotes_csv(content: &str) -> Result<Vec<MarketQuote<f64>>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());
    reader
        .deserialize::<QuoteRecord>()
        .map(|record| -> Result<MarketQuote<f64>> {
            let record = record?;
            Ok(MarketQuote::new(record.tenor, record.spread))
        })
        .collect()
}

fn read_quotes_file(path: &Path) -> Result<Vec<MarketQuote<f64>>> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_quotes_csv(&content)
}

fn load_quotes(args: &StripArgs) -> Result<Vec<MarketQuote<f64>>> {
    match &args.quotes_file {
        Some(path) => read_quotes_file(path),
        None if args.quotes.is_empty() => Err(CliError::InvalidArgument(
            "no quotes given; use --quote TENOR:SPREAD or --quotes-file".to_string(),
        )),
        None => Ok(args.quotes.clone()),
    }
}

/// One calibrated segment with its repricing diagnostics and the
/// conventions it was calibrated under.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentRow {
    pub start_time: f64,
    pub end_time: f64,
    pub market_spread_bp: f64,
    pub hazard_rate: f64,
    pub survival_probability: f64,
    pub repricing_error: f64,
    pub iterations: usize,
    pub accrual_convention: String,
    pub integration: String,
}

impl TableRow for SegmentRow {
    fn headers() -> &'static [&'static str] {
        &[
            "Start",
            "End",
            "Spread (bp)",
            "Hazard",
            "Survival",
            "Repricing error",
            "Iterations",
            "Accrual",
            "Integration",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            format!("{:.4}", self.start_time),
            format!("{:.4}", self.end_time),
            format!("{:.2}", self.market_spread_bp),
            format!("{:.8}", self.hazard_rate),
            format!("{:.8}", self.survival_probability),
            format!("{:.2e}", self.repricing_error),
            self.iterations.to_string(),
            self.accrual_convention.clone(),
            self.integration.clone(),
        ]
    }
}

fn segment_rows(stripped: &StrippedCurve<f64>) -> Result<Vec<SegmentRow>> {
    let accrual_convention = stripped.accrual_convention.to_string();
    let integration = stripped.integration.to_string();
    stripped
        .segments()
        .iter()
        .zip(&stripped.diagnostics)
        .map(|(segment, diagnostic)| -> Result<SegmentRow> {
            Ok(SegmentRow {
                start_time: segment.start_time,
                end_time: segment.end_time,
                market_spread_bp: diagnostic.market_spread * 1e4,
                hazard_rate: segment.hazard_rate,
                survival_probability: stripped.curve.survival_probability(segment.end_time)?,
                repricing_error: diagnostic.repricing_error,
                iterations: diagnostic.iterations,
                accrual_convention: accrual_convention.clone(),
                integration: integration.clone(),
            })
        })
        .collect()
}

/// Strip the curve for the given quotes.
pub fn strip(quotes: &[MarketQuote<f64>], config: &CliConfig) -> Result<StrippedCurve<f64>> {
    info!(
        quotes = quotes.len(),
        rf_rate = config.rf_rate,
        recovery_rate = config.recovery_rate,
        "Running credit curve stripper"
    );
    let stripper = CurveStripper::new(config.recovery_rate, config.payment_frequency)?
        .with_solver(config.solver()?);
    Ok(stripper.strip(quotes, &FlatCurve::new(config.rf_rate))?)
}

/// Run the strip command
pub fn run(args: &StripArgs, config: &CliConfig) -> Result<String> {
    let quotes = load_quotes(args)?;
    let stripped = strip(&quotes, config)?;
    render(config.format, &segment_rows(&stripped)?)
}
