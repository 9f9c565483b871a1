use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use serde::Serialize;
use std::fmt;

use crate::core::DashError;

/* ----- SYMBOL ----- */

const MAX_SYMBOL_LEN: usize = 20;

/// A validated, uppercase ticker symbol (e.g. `AAPL`, `SAP.DE`, `BRK-B`, `^GSPC`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Trims and uppercases `raw`, rejecting empty or garbage input.
    ///
    /// # Errors
    ///
    /// Returns [`DashError::InvalidInput`] when the input is empty, too long, or
    /// contains characters that never appear in a Yahoo symbol.
    pub fn parse(raw: &str) -> Result<Self, DashError> {
        let s = raw.trim().to_ascii_uppercase();
        if s.is_empty() {
            return Err(DashError::InvalidInput("symbol must not be empty".into()));
        }
        if s.len() > MAX_SYMBOL_LEN {
            return Err(DashError::InvalidInput(format!("symbol '{s}' is too long")));
        }
        if let Some(c) = s
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '=')))
        {
            return Err(DashError::InvalidInput(format!(
                "symbol '{s}' contains invalid character '{c}'"
            )));
        }
        Ok(Self(s))
    }

    /// The symbol as it is sent to the provider.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/* ----- HISTORY PARAMS ----- */

/// The selectable history windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Period {
    D1,
    D5,
    M1,
    M3,
    M6,
    Y1,
    Y5,
    Max,
    /// Fixed trailing 90 calendar days.
    Last90Days,
}

impl Period {
    /// All periods in selector order.
    pub const ALL: [Self; 9] = [
        Self::D1,
        Self::D5,
        Self::M1,
        Self::M3,
        Self::M6,
        Self::Y1,
        Self::Y5,
        Self::Max,
        Self::Last90Days,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::D1 => "1d",
            Self::D5 => "5d",
            Self::M1 => "1mo",
            Self::M3 => "3mo",
            Self::M6 => "6mo",
            Self::Y1 => "1y",
            Self::Y5 => "5y",
            Self::Max => "max",
            Self::Last90Days => "90d",
        }
    }

    /// Parses a selector label such as `"3mo"`.
    ///
    /// # Errors
    ///
    /// Returns [`DashError::InvalidInput`] for unknown labels.
    pub fn parse(label: &str) -> Result<Self, DashError> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(label))
            .ok_or_else(|| DashError::InvalidInput(format!("unknown period '{label}'")))
    }

    /// Calendar days covered by the window. `max` is capped at ten years.
    #[must_use]
    pub const fn days(self) -> i64 {
        match self {
            Self::D1 => 1,
            Self::D5 => 5,
            Self::M1 => 30,
            Self::M3 | Self::Last90Days => 90,
            Self::M6 => 180,
            Self::Y1 => 365,
            Self::Y5 => 1825,
            Self::Max => 3650,
        }
    }

    /// Intraday bars for a single day, daily bars otherwise.
    #[must_use]
    pub const fn interval(self) -> Interval {
        match self {
            Self::D1 => Interval::I5m,
            _ => Interval::D1,
        }
    }

    /// `(start, end)` as unix seconds: `end` is `today` at 00:00 UTC.
    #[must_use]
    pub fn window(self, today: NaiveDate) -> (i64, i64) {
        let end = today.and_time(NaiveTime::MIN).and_utc();
        let start = end - TimeDelta::days(self.days());
        (start.timestamp(), end.timestamp())
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Interval {
    I5m,
    D1,
}

impl Interval {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::I5m => "5m",
            Self::D1 => "1d",
        }
    }
}

/* ----- BARS ----- */

/// One OHLCV row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceBar {
    /// Seconds since Unix epoch (UTC) as returned by the endpoint.
    pub ts: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<u64>,
}

impl PriceBar {
    #[must_use]
    pub fn datetime_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.ts, 0)
    }
}
