//! Per-session controller: turns user actions into view transitions, fetches and presenter calls.

use crate::core::{DashClient, DashError, ErrorKind, Period, PriceBar, Symbol};
use crate::history::{ChartPoint, chart_series};
use crate::metrics::MetricTile;
use crate::overview::{OVERVIEW_SYMBOLS, OverviewRow, Page, Pager, build_overview};
use crate::view::ViewState;

/// The rendering side. Implementations draw; they never call back into the dashboard.
pub trait Presenter {
    /// Line chart of closes; each point carries the tooltip fields.
    fn chart(&mut self, symbol: &Symbol, period: Period, points: &[ChartPoint]);
    /// The raw OHLCV rows behind the chart, oldest first.
    fn history_table(&mut self, symbol: &Symbol, bars: &[PriceBar]);
    fn metrics(&mut self, symbol: &Symbol, tiles: &[MetricTile]);
    fn overview(&mut self, page: &Page<OverviewRow>);
    /// A user-facing message; the session keeps running.
    fn error(&mut self, message: &str);
}

/// Discrete user inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// Free-text ticker entry; opens the detail screen.
    EnterSymbol(String),
    ChangePeriod(Period),
    ShowOverview,
    ChangePage(usize),
    /// "View details" on an overview row.
    SelectForDetail(String),
    CloseDetail,
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub overview_symbols: Vec<String>,
    pub page_size: usize,
    pub default_period: Period,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            overview_symbols: OVERVIEW_SYMBOLS.iter().map(|s| (*s).to_string()).collect(),
            page_size: crate::overview::DEFAULT_PAGE_SIZE,
            default_period: Period::M1,
        }
    }
}

/// One user session. Provider failures are reported through [`Presenter::error`]
/// and never escape [`Dashboard::handle`].
pub struct Dashboard<P: Presenter> {
    client: DashClient,
    config: DashboardConfig,
    pager: Pager,
    view: ViewState,
    period: Period,
    page: usize,
    displayed: Vec<Symbol>,
    presenter: P,
}

impl<P: Presenter> Dashboard<P> {
    pub fn new(client: DashClient, config: DashboardConfig, presenter: P) -> Self {
        Self {
            pager: Pager::new(config.page_size),
            period: config.default_period,
            client,
            config,
            view: ViewState::Overview,
            page: 1,
            displayed: Vec::new(),
            presenter,
        }
    }

    pub const fn view(&self) -> &ViewState {
        &self.view
    }

    pub const fn period(&self) -> Period {
        self.period
    }

    pub const fn page(&self) -> usize {
        self.page
    }

    pub const fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    pub async fn handle(&mut self, action: UserAction) {
        match action {
            UserAction::EnterSymbol(text) => {
                if let Err(e) = Symbol::parse(&text) {
                    self.report(&e);
                    return;
                }
                self.view.close_detail();
                let selected = self.view.select_for_detail(&text).map(|_| ());
                match selected {
                    Ok(()) => self.render_detail().await,
                    Err(e) => self.report(&e),
                }
            }
            UserAction::ChangePeriod(period) => {
                self.period = period;
                if !self.view.is_overview() {
                    self.render_detail().await;
                }
            }
            UserAction::ShowOverview => {
                self.view.close_detail();
                self.render_overview().await;
            }
            UserAction::ChangePage(page) => {
                self.page = page;
                if self.view.is_overview() {
                    self.render_overview().await;
                }
            }
            UserAction::SelectForDetail(text) => {
                let selected = self.view.select_listed(&text, &self.displayed).map(|_| ());
                match selected {
                    Ok(()) => self.render_detail().await,
                    Err(e) => self.report(&e),
                }
            }
            UserAction::CloseDetail => {
                self.view.close_detail();
                self.render_overview().await;
            }
        }
    }

    async fn render_detail(&mut self) {
        let Some(symbol) = self.view.selected().cloned() else {
            return;
        };

        match self.client.fetch_history(symbol.as_str(), self.period).await {
            Ok(bars) if bars.is_empty() => self.report(&DashError::NotFound {
                symbol: symbol.to_string(),
            }),
            Ok(bars) => {
                self.presenter
                    .chart(&symbol, self.period, &chart_series(&bars));
                self.presenter.history_table(&symbol, &bars);
            }
            Err(e) => self.report(&e),
        }

        match self.client.fetch_metrics(symbol.as_str()).await {
            Ok(m) => self.presenter.metrics(&symbol, &m.tiles()),
            Err(e) => self.report(&e),
        }
    }

    async fn render_overview(&mut self) {
        let table = build_overview(&self.client, &self.config.overview_symbols).await;
        for message in failure_messages(&table.failures) {
            #[cfg(feature = "tracing")]
            tracing::warn!(%message, "overview rows unavailable");
            self.presenter.error(&message);
        }
        let page = table.page(self.pager, self.page);
        self.displayed = page.rows.iter().map(|r| r.symbol.clone()).collect();
        self.presenter.overview(&page);
    }

    fn report(&mut self, e: &DashError) {
        #[cfg(feature = "tracing")]
        tracing::warn!(error = %e, kind = ?e.kind(), "reporting error to user");
        self.presenter.error(&e.user_message());
    }
}

/// One message per [`ErrorKind`], in the order the kinds first failed.
fn failure_messages(failures: &[(String, DashError)]) -> Vec<String> {
    let mut groups: Vec<(ErrorKind, Vec<&(String, DashError)>)> = Vec::new();
    for f in failures {
        let kind = f.1.kind();
        match groups.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, members)) => members.push(f),
            None => groups.push((kind, vec![f])),
        }
    }

    groups
        .into_iter()
        .filter_map(|(kind, members)| match members.as_slice() {
            [] => None,
            [(_, e)] => Some(e.user_message()),
            [(_, first), ..] => {
                let symbols = members
                    .iter()
                    .map(|(s, _)| s.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                Some(match kind {
                    ErrorKind::NotFound => format!("No data found for {symbols}."),
                    _ => format!("{} Affected: {symbols}.", first.user_message()),
                })
            }
        })
        .collect()
}
