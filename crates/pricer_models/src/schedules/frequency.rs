//! Payment frequency enumeration.

use super::error::ScheduleError;
use std::fmt;
use std::str::FromStr;

/// Standard premium payment frequencies.
///
/// Contracts store the raw payments-per-year count; this enum names the
/// common values and parses them from configuration and command lines.
///
/// # Examples
///
/// ```
/// use pricer_models::schedules::Frequency;
///
/// let freq: Frequency = "quarterly".parse().unwrap();
/// assert_eq!(freq.periods_per_year(), 4);
/// assert_eq!("12".parse::<Frequency>().unwrap(), Frequency::Monthly);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Frequency {
    /// One payment per year.
    Annual,
    /// Two payments per year.
    SemiAnnual,
    /// Four payments per year.
    #[default]
    Quarterly,
    /// Twelve payments per year.
    Monthly,
}

impl Frequency {
    /// Number of payment periods per year.
    #[inline]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Annual => 1,
            Frequency::SemiAnnual => 2,
            Frequency::Quarterly => 4,
            Frequency::Monthly => 12,
        }
    }

    /// Number of months between payment dates.
    #[inline]
    pub fn months_between_payments(&self) -> u32 {
        12 / self.periods_per_year()
    }

    /// Standard name for this frequency.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Frequency::Annual => "Annual",
            Frequency::SemiAnnual => "Semi-Annual",
            Frequency::Quarterly => "Quarterly",
            Frequency::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl TryFrom<u32> for Frequency {
    type Error = ScheduleError;

    fn try_from(payments_per_year: u32) -> Result<Self, Self::Error> {
        match payments_per_year {
            1 => Ok(Frequency::Annual),
            2 => Ok(Frequency::SemiAnnual),
            4 => Ok(Frequency::Quarterly),
            12 => Ok(Frequency::Monthly),
            other => Err(ScheduleError::InvalidFrequency {
                payments_per_year: other,
            }),
        }
    }
}

impl From<Frequency> for u32 {
    fn from(frequency: Frequency) -> Self {
        frequency.periods_per_year()
    }
}

impl FromStr for Frequency {
    type Err = ScheduleError;

    /// Parses a frequency (case-insensitive).
    ///
    /// Supported formats:
    /// - Annual: "annual", "yearly", "1y", "12m", "1"
    /// - SemiAnnual: "semi-annual", "semiannual", "6m", "2"
    /// - Quarterly: "quarterly", "3m", "4"
    /// - Monthly: "monthly", "1m", "12"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "annual" | "yearly" | "1y" | "12m" | "1" => Ok(Frequency::Annual),
            "semiannual" | "6m" | "2" => Ok(Frequency::SemiAnnual),
            "quarterly" | "3m" | "4" => Ok(Frequency::Quarterly),
            "monthly" | "1m" | "12" => Ok(Frequency::Monthly),
            _ => Err(ScheduleError::UnknownFrequency {
                name: s.to_string(),
            }),
        }
    }
}
