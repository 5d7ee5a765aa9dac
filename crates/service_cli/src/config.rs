//! CLI configuration management
//!
//! Handles loading configuration from TOML files, environment variables, and
//! command-line flags.
//!
//! Priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (`NEUTRYX_CDS_*`)
//! 3. Config file
//! 4. Default values

use pricer_models::instruments::credit::{
    AccrualOnDefault, IntegrationMethod, LegValuator, ValuationConfig, MAX_PAYMENT_FREQUENCY,
};
use pricer_models::instruments::InstrumentError;
use pricer_optimiser::calibration::{CalibrationConfig, CalibrationError, ParSpreadSolver, RootMethod};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

const ENV_PREFIX: &str = "NEUTRYX_CDS_";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {field} = {value}: {reason}")]
    InvalidValue {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid output format: {0}. Must be one of: table, json, csv")]
    InvalidFormat(String),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Log levels understood by `--log-level`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Output rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(ConfigError::InvalidFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Protection-leg integration scheme, without its parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Integration {
    #[default]
    Midpoint,
    GaussLegendre,
}

impl FromStr for Integration {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "midpoint" => Ok(Integration::Midpoint),
            "gauss-legendre" | "gl" => Ok(Integration::GaussLegendre),
            _ => Err(ConfigError::InvalidValue {
                field: "integration",
                value: s.to_string(),
                reason: "must be midpoint or gauss-legendre",
            }),
        }
    }
}

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level
    #[serde(deserialize_with = "deserialize_from_str")]
    pub log_level: LogLevel,
    /// Output format
    #[serde(deserialize_with = "deserialize_from_str")]
    pub format: OutputFormat,
    /// Premium payments per year
    pub payment_frequency: u32,
    /// Flat continuously compounded risk-free rate
    pub rf_rate: f64,
    /// Recovery rate
    pub recovery_rate: f64,
    /// Protection-leg integration
    pub integration: Integration,
    /// Gauss-Legendre nodes per grid interval
    pub quadrature_points: usize,
    /// Whether accrued premium is paid on default
    pub accrual_on_default: bool,
    /// Root-finding method for calibration
    pub solver_method: RootMethod,
    /// Root-finder tolerance
    pub tolerance: f64,
    /// Root-finder iteration budget
    pub max_iterations: usize,
    /// Upper end of the hazard-rate search bracket
    pub max_hazard_rate: f64,
}

fn deserialize_from_str<'de, D, V>(deserializer: D) -> Result<V, D::Error>
where
    D: serde::Deserializer<'de>,
    V: FromStr<Err = ConfigError>,
{
    let s = String::deserialize(deserializer)?;
    V::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Warn,
            format: OutputFormat::Table,
            payment_frequency: 4,
            rf_rate: 0.04,
            recovery_rate: 0.40,
            integration: Integration::Midpoint,
            quadrature_points: 8,
            accrual_on_default: true,
            solver_method: RootMethod::Brent,
            tolerance: 1e-12,
            max_iterations: 200,
            max_hazard_rate: 20.0,
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Override fields from `NEUTRYX_CDS_*` variables returned by `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

        if let Some(level) = var("LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(format) = var("FORMAT") {
            self.format = OutputFormat::from_str(&format)?;
        }
        if let Some(raw) = var("PAYMENT_FREQUENCY") {
            self.payment_frequency = parse_env("PAYMENT_FREQUENCY", &raw)?;
        }
        if let Some(raw) = var("RF_RATE") {
            self.rf_rate = parse_env("RF_RATE", &raw)?;
        }
        if let Some(raw) = var("RECOVERY_RATE") {
            self.recovery_rate = parse_env("RECOVERY_RATE", &raw)?;
        }
        if let Some(raw) = var("INTEGRATION") {
            self.integration = Integration::from_str(&raw)?;
        }
        if let Some(raw) = var("QUADRATURE_POINTS") {
            self.quadrature_points = parse_env("QUADRATURE_POINTS", &raw)?;
        }
        if let Some(raw) = var("ACCRUAL_ON_DEFAULT") {
            self.accrual_on_default = parse_env("ACCRUAL_ON_DEFAULT", &raw.to_lowercase())?;
        }
        if let Some(raw) = var("SOLVER_METHOD") {
            self.solver_method = match raw.to_lowercase().as_str() {
                "brent" => RootMethod::Brent,
                "bisection" => RootMethod::Bisection,
                _ => {
                    return Err(ConfigError::EnvError(format!(
                        "{}SOLVER_METHOD: {} (expected brent or bisection)",
                        ENV_PREFIX, raw
                    )))
                }
            };
        }
        if let Some(raw) = var("TOLERANCE") {
            self.tolerance = parse_env("TOLERANCE", &raw)?;
        }
        if let Some(raw) = var("MAX_ITERATIONS") {
            self.max_iterations = parse_env("MAX_ITERATIONS", &raw)?;
        }
        if let Some(raw) = var("MAX_HAZARD_RATE") {
            self.max_hazard_rate = parse_env("MAX_HAZARD_RATE", &raw)?;
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliOverrides) -> Result<(), ConfigError> {
        if let Some(level) = &cli.log_level {
            self.log_level = LogLevel::from_str(level)?;
        }
        if let Some(format) = &cli.format {
            self.format = OutputFormat::from_str(format)?;
        }
        if let Some(rf_rate) = cli.rf_rate {
            self.rf_rate = rf_rate;
        }
        if let Some(recovery_rate) = cli.recovery_rate {
            self.recovery_rate = recovery_rate;
        }
        if let Some(frequency) = cli.payment_frequency {
            self.payment_frequency = frequency;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, value: String, reason| {
            Err(ConfigError::InvalidValue {
                field,
                value,
                reason,
            })
        };

        if !(1..=MAX_PAYMENT_FREQUENCY).contains(&self.payment_frequency) {
            return invalid(
                "payment_frequency",
                self.payment_frequency.to_string(),
                "must lie in 1..=365",
            );
        }
        if !(0.0..=1.0).contains(&self.rf_rate) {
            return invalid("rf_rate", self.rf_rate.to_string(), "must lie in [0, 1]");
        }
        if !(0.0..=1.0).contains(&self.recovery_rate) {
            return invalid(
                "recovery_rate",
                self.recovery_rate.to_string(),
                "must lie in [0, 1]",
            );
        }
        if self.quadrature_points == 0 {
            return invalid("quadrature_points", "0".into(), "must be positive");
        }
        if let Err(CalibrationError::Validation {
            field,
            value,
            reason,
        }) = self.calibration_config().validate()
        {
            return invalid(field, value.to_string(), reason);
        }
        Ok(())
    }

    /// Valuation conventions
    pub fn valuation_config(&self) -> ValuationConfig {
        let integration = match self.integration {
            Integration::Midpoint => IntegrationMethod::Midpoint,
            Integration::GaussLegendre => IntegrationMethod::GaussLegendre {
                points: self.quadrature_points,
            },
        };
        let accrual = if self.accrual_on_default {
            AccrualOnDefault::HalfPeriodMidpoint
        } else {
            AccrualOnDefault::Excluded
        };
        ValuationConfig::default()
            .with_integration(integration)
            .with_accrual_on_default(accrual)
    }

    /// Leg valuator for the configured conventions
    pub fn valuator(&self) -> Result<LegValuator<f64>, InstrumentError> {
        LegValuator::new(self.valuation_config())
    }

    /// Root-finding settings
    pub fn calibration_config(&self) -> CalibrationConfig<f64> {
        CalibrationConfig::default()
            .with_tolerance(self.tolerance)
            .with_max_iterations(self.max_iterations)
            .with_method(self.solver_method)
            .with_max_hazard_rate(self.max_hazard_rate)
    }

    /// Calibration solver for the configured conventions
    pub fn solver(&self) -> Result<ParSpreadSolver<f64>, CalibrationError> {
        ParSpreadSolver::new(self.calibration_config(), self.valuator()?)
    }
}

fn parse_env<V: FromStr>(name: &str, raw: &str) -> Result<V, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::EnvError(format!("{}{}: cannot parse {:?}", ENV_PREFIX, name, raw)))
}

/// Overrides collected from command-line flags
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<String>,
    /// Output format override
    pub format: Option<String>,
    /// Risk-free rate override
    pub rf_rate: Option<f64>,
    /// Recovery rate override
    pub recovery_rate: Option<f64>,
    /// Payment frequency override
    pub payment_frequency: Option<u32>,
}

/// Build configuration from all sources, reading the process environment
pub fn build_config(cli: &CliOverrides) -> Result<CliConfig, ConfigError> {
    build_config_with_env(cli, |name| std::env::var(name).ok())
}

/// Build configuration from all sources with an explicit environment
pub fn build_config_with_env<F>(cli: &CliOverrides, env: F) -> Result<CliConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) => CliConfig::from_file(path)?,
        None => CliConfig::default(),
    };
    config.apply_env(env)?;
    config.merge_with_cli(cli)?;
    config.validate()?;
    Ok(config)
}
