//! The overview screen: a fixed list of large caps, sorted by market cap and paginated.

mod pager;

pub use pager::{DEFAULT_PAGE_SIZE, Page, Pager};

use std::cmp::Ordering;

use serde::Serialize;

use crate::core::{DashClient, DashError, Period, Symbol};
use crate::history::latest_change_pct;

/// The symbols listed on the overview screen.
pub const OVERVIEW_SYMBOLS: [&str; 20] = [
    "AAPL", "MSFT", "NVDA", "AMZN", "GOOGL", "META", "BRK-B", "TSLA", "AVGO", "JPM", "LLY", "V",
    "UNH", "XOM", "MA", "JNJ", "PG", "HD", "COST", "WMT",
];

/// History window used to derive the daily change on the overview.
pub const OVERVIEW_PERIOD: Period = Period::D5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewRow {
    pub symbol: Symbol,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    /// Change% of the latest daily close.
    pub change_pct: Option<f64>,
    pub market_cap: Option<f64>,
}

/// All overview rows plus whatever could not be loaded.
#[derive(Debug, Default)]
pub struct OverviewTable {
    /// Sorted by market cap, largest first.
    pub rows: Vec<OverviewRow>,
    /// Per-symbol failures; a failed metrics fetch drops the row, a failed
    /// history fetch only blanks its change.
    pub failures: Vec<(String, DashError)>,
}

impl OverviewTable {
    #[must_use]
    pub fn page(&self, pager: Pager, page: usize) -> Page<OverviewRow> {
        Page::from_rows(pager, &self.rows, page)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.rows.iter().map(|r| &r.symbol)
    }
}

/// Builds the overview table, fetching symbols one after another through the client's cache.
pub async fn build_overview<S: AsRef<str>>(client: &DashClient, symbols: &[S]) -> OverviewTable {
    let mut table = OverviewTable::default();

    for raw in symbols {
        let raw = raw.as_ref();
        let metrics = match client.fetch_metrics(raw).await {
            Ok(m) => m,
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(symbol = raw, error = %e, "overview: metrics unavailable");
                table.failures.push((raw.to_string(), e));
                continue;
            }
        };

        let change_pct = match client.fetch_history(raw, OVERVIEW_PERIOD).await {
            Ok(bars) => latest_change_pct(&bars),
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(symbol = raw, error = %e, "overview: history unavailable");
                table.failures.push((raw.to_string(), e));
                None
            }
        };

        table.rows.push(OverviewRow {
            symbol: metrics.symbol,
            name: metrics.short_name,
            price: metrics.price,
            currency: metrics.currency,
            change_pct,
            market_cap: metrics.market_cap,
        });
    }

    sort_by_market_cap(&mut table.rows);
    table
}

/// Largest market cap first; rows without one go last, ties by symbol.
pub fn sort_by_market_cap(rows: &mut [OverviewRow]) {
    rows.sort_by(|a, b| {
        let by_cap = match (a.market_cap, b.market_cap) {
            (Some(x), Some(y)) => y.total_cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_cap.then_with(|| a.symbol.cmp(&b.symbol))
    });
}
