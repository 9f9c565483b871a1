//! Fundamentals snapshot from the quoteSummary v10 endpoint.

mod fetch;
mod wire;

use std::fmt;

use serde::Serialize;

use crate::core::cache::{CacheKey, CacheMode};
use crate::core::client::RetryConfig;
use crate::core::{DashClient, DashError, Symbol};

/// Fundamental and quote fields for one symbol. `None` always means "not available".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteMetrics {
    pub symbol: Symbol,
    pub short_name: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub previous_close: Option<f64>,
    pub market_cap: Option<f64>,
    pub trailing_pe: Option<f64>,
    pub forward_pe: Option<f64>,
    /// Fraction, e.g. `0.0045` for 0.45 %.
    pub dividend_yield: Option<f64>,
    /// Annual dividend per share in `currency`.
    pub dividend_rate: Option<f64>,
    pub trailing_eps: Option<f64>,
    pub forward_eps: Option<f64>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
    pub sector: Option<String>,
    pub industry: Option<String>,
}

/// A single metric value, numeric or textual.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A labeled, preformatted value for a metric tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricTile {
    pub label: &'static str,
    pub value: String,
}

/// Wire names accepted by [`QuoteMetrics::get`], in display order.
pub const METRIC_NAMES: [&str; 15] = [
    "shortName",
    "regularMarketPrice",
    "currency",
    "previousClose",
    "marketCap",
    "trailingPE",
    "forwardPE",
    "dividendYield",
    "dividendRate",
    "trailingEps",
    "forwardEps",
    "fiftyTwoWeekHigh",
    "fiftyTwoWeekLow",
    "sector",
    "industry",
];

const NA: &str = "n/a";

impl QuoteMetrics {
    /// A snapshot with every field absent.
    #[must_use]
    pub const fn empty(symbol: Symbol) -> Self {
        Self {
            symbol,
            short_name: None,
            price: None,
            currency: None,
            previous_close: None,
            market_cap: None,
            trailing_pe: None,
            forward_pe: None,
            dividend_yield: None,
            dividend_rate: None,
            trailing_eps: None,
            forward_eps: None,
            fifty_two_week_high: None,
            fifty_two_week_low: None,
            sector: None,
            industry: None,
        }
    }

    /// Looks a field up by its Yahoo name (see [`METRIC_NAMES`]).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<MetricValue> {
        let num = |v: Option<f64>| v.map(MetricValue::Number);
        let text = |v: &Option<String>| v.clone().map(MetricValue::Text);
        match name {
            "shortName" => text(&self.short_name),
            "regularMarketPrice" => num(self.price),
            "currency" => text(&self.currency),
            "previousClose" => num(self.previous_close),
            "marketCap" => num(self.market_cap),
            "trailingPE" => num(self.trailing_pe),
            "forwardPE" => num(self.forward_pe),
            "dividendYield" => num(self.dividend_yield),
            "dividendRate" => num(self.dividend_rate),
            "trailingEps" => num(self.trailing_eps),
            "forwardEps" => num(self.forward_eps),
            "fiftyTwoWeekHigh" => num(self.fifty_two_week_high),
            "fiftyTwoWeekLow" => num(self.fifty_two_week_low),
            "sector" => text(&self.sector),
            "industry" => text(&self.industry),
            _ => None,
        }
    }

    /// The fields that are present, as `(name, value)` pairs.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, MetricValue)> + '_ {
        METRIC_NAMES
            .into_iter()
            .filter_map(|name| self.get(name).map(|v| (name, v)))
    }

    /// Labeled tiles for the detail screen; absent values render as `n/a`.
    #[must_use]
    pub fn tiles(&self) -> Vec<MetricTile> {
        let cur = self.currency.as_deref().unwrap_or("");
        let money = |v: Option<f64>| {
            v.map_or_else(|| NA.to_string(), |v| format!("{v:.2} {cur}").trim_end().to_string())
        };
        let plain = |v: Option<f64>| v.map_or_else(|| NA.to_string(), |v| format!("{v:.2}"));
        let text = |v: &Option<String>| v.clone().unwrap_or_else(|| NA.to_string());

        vec![
            MetricTile {
                label: "Price",
                value: money(self.price),
            },
            MetricTile {
                label: "Market Cap",
                value: self
                    .market_cap
                    .map_or_else(|| NA.to_string(), format_thousands),
            },
            MetricTile {
                label: "P/E (ttm)",
                value: plain(self.trailing_pe),
            },
            MetricTile {
                label: "Forward P/E",
                value: plain(self.forward_pe),
            },
            MetricTile {
                label: "Dividend Yield",
                value: self
                    .dividend_yield
                    .map_or_else(|| NA.to_string(), |y| format!("{:.2}%", y * 100.0)),
            },
            MetricTile {
                label: "Dividend Rate",
                value: money(self.dividend_rate),
            },
            MetricTile {
                label: "EPS (ttm)",
                value: plain(self.trailing_eps),
            },
            MetricTile {
                label: "EPS (fwd)",
                value: plain(self.forward_eps),
            },
            MetricTile {
                label: "52W High",
                value: money(self.fifty_two_week_high),
            },
            MetricTile {
                label: "52W Low",
                value: money(self.fifty_two_week_low),
            },
            MetricTile {
                label: "Sector",
                value: text(&self.sector),
            },
            MetricTile {
                label: "Industry",
                value: text(&self.industry),
            },
        ]
    }
}

/// `2950000000000.0` -> `"2,950,000,000,000"`.
#[must_use]
pub fn format_thousands(v: f64) -> String {
    if !v.is_finite() {
        return NA.to_string();
    }
    #[allow(clippy::cast_possible_truncation)]
    let n = v.round() as i64;
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// A builder for one fundamentals snapshot.
#[derive(Clone)]
pub struct MetricsBuilder {
    client: DashClient,
    symbol: Symbol,
    cache_mode: CacheMode,
    retry_override: Option<RetryConfig>,
}

impl MetricsBuilder {
    /// # Errors
    ///
    /// Returns [`DashError::InvalidInput`] for an empty or malformed symbol.
    pub fn new(client: &DashClient, symbol: &str) -> Result<Self, DashError> {
        Ok(Self {
            client: client.clone(),
            symbol: Symbol::parse(symbol)?,
            cache_mode: CacheMode::Use,
            retry_override: None,
        })
    }

    /// Sets the cache mode for this specific API call.
    #[must_use]
    pub const fn cache_mode(mut self, mode: CacheMode) -> Self {
        self.cache_mode = mode;
        self
    }

    /// Overrides the default retry policy for this specific API call.
    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    /// Executes the request.
    ///
    /// # Errors
    ///
    /// Returns [`DashError::NotFound`] for unknown symbols, [`DashError::Malformed`]
    /// for unparseable payloads and a remote variant when the provider is unavailable.
    pub async fn fetch(self) -> Result<QuoteMetrics, DashError> {
        let key = CacheKey::metrics(self.symbol.clone());
        self.client
            .cached(key, self.cache_mode, self.retry_override.as_ref(), || {
                fetch::fetch_summary(&self.client, &self.symbol)
            })
            .await
    }
}
