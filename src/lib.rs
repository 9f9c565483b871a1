//! tickerboard: the data side of a ticker dashboard on top of Yahoo Finance.
//!
//! - [`DashClient`] fetches price history (chart v8) and a fundamentals snapshot
//!   (quoteSummary v10), retrying rate-limited calls with exponential backoff and
//!   memoizing results in a one-hour [`ResultCache`].
//! - [`history`] derives per-bar Change% and chart points.
//! - [`overview`] builds the market-cap sorted, paginated large-cap table.
//! - [`view::ViewState`] is the overview/detail navigation state.
//! - [`Dashboard`] ties it together for one session and reports through a [`Presenter`].
//!
//! ```no_run
//! # use tickerboard::{DashClient, Period};
//! # #[tokio::main]
//! # async fn main() -> Result<(), tickerboard::DashError> {
//! let client = DashClient::new()?;
//! let bars = client.fetch_history("AAPL", Period::M3).await?;
//! let points = tickerboard::history::chart_series(&bars);
//! let metrics = client.fetch_metrics("AAPL").await?;
//! println!("{} bars, P/E {:?}", points.len(), metrics.trailing_pe);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod dashboard;
pub mod history;
pub mod metrics;
pub mod overview;
pub mod view;

pub use crate::core::client::{Backoff, RetryConfig, Sleeper, TokioSleeper};
pub use crate::core::{
    CacheKey, CacheMode, DashClient, DashClientBuilder, DashError, ErrorKind, FetchKind, Interval,
    Period, PriceBar, ResultCache, Symbol,
};
pub use dashboard::{Dashboard, DashboardConfig, Presenter, UserAction};
pub use history::{ChartPoint, HistoryBuilder};
pub use metrics::{MetricTile, MetricValue, MetricsBuilder, QuoteMetrics};
pub use overview::{OverviewRow, OverviewTable, Page, Pager};
pub use view::ViewState;

/// Installs a `tracing-subscriber` fmt layer filtered by `RUST_LOG` (default `tickerboard=info`).
#[cfg(feature = "tracing-subscriber")]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tickerboard=info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
