//! Historical price bars from the chart v8 endpoint, plus Change% derivation.

mod fetch;
mod series;
mod wire;

pub use series::{ChartPoint, change_pct, chart_series, latest_change_pct};

use chrono::{NaiveDate, Utc};

use crate::core::cache::{CacheKey, CacheMode};
use crate::core::client::RetryConfig;
use crate::core::{DashClient, DashError, Period, PriceBar, Symbol};

/// A builder for fetching historical price bars for a single symbol.
///
/// The window is derived from the [`Period`]: it ends today at 00:00 UTC and
/// reaches back `period.days()`. `1d` uses 5-minute bars, everything else daily bars.
#[derive(Clone)]
pub struct HistoryBuilder {
    client: DashClient,
    symbol: Symbol,
    period: Period,
    as_of: Option<NaiveDate>,
    cache_mode: CacheMode,
    retry_override: Option<RetryConfig>,
}

impl HistoryBuilder {
    /// Creates a new `HistoryBuilder`, validating `symbol` up front.
    ///
    /// Defaults to [`Period::M1`].
    ///
    /// # Errors
    ///
    /// Returns [`DashError::InvalidInput`] for an empty or malformed symbol.
    pub fn new(client: &DashClient, symbol: &str) -> Result<Self, DashError> {
        Ok(Self {
            client: client.clone(),
            symbol: Symbol::parse(symbol)?,
            period: Period::M1,
            as_of: None,
            cache_mode: CacheMode::Use,
            retry_override: None,
        })
    }

    #[must_use]
    pub const fn period(mut self, period: Period) -> Self {
        self.period = period;
        self
    }

    /// Pin "today" instead of reading the system clock.
    #[must_use]
    pub const fn as_of(mut self, today: NaiveDate) -> Self {
        self.as_of = Some(today);
        self
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

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Executes the request.
    ///
    /// # Errors
    ///
    /// Returns [`DashError::NotFound`] if the provider does not know the symbol,
    /// [`DashError::Malformed`] for an unparseable payload and one of the remote
    /// variants when the provider is unreachable or keeps rate limiting.
    pub async fn fetch(self) -> Result<Vec<PriceBar>, DashError> {
        let today = self.as_of.unwrap_or_else(|| Utc::now().date_naive());
        let url = fetch::chart_url(
            &self.client,
            &self.symbol,
            self.period.window(today),
            self.period.interval(),
        )?;

        let key = CacheKey::history(self.symbol.clone(), self.period, today);
        self.client
            .cached(key, self.cache_mode, self.retry_override.as_ref(), || {
                fetch::fetch_chart(&self.client, &self.symbol, &url)
            })
            .await
    }
}
