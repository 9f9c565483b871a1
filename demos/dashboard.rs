use std::time::Duration;

use tickerboard::{
    ChartPoint, DashClient, Dashboard, DashboardConfig, MetricTile, OverviewRow, Page, Period,
    Presenter, PriceBar, Symbol, UserAction,
};

/// Prints every screen to stdout.
struct TextPresenter;

impl Presenter for TextPresenter {
    fn chart(&mut self, symbol: &Symbol, period: Period, points: &[ChartPoint]) {
        println!("--- {symbol} ({}) ---", period.as_str());
        for p in points.iter().rev().take(5).rev() {
            let date = chrono::DateTime::from_timestamp(p.ts, 0)
                .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default();
            match p.change_pct {
                Some(c) => println!("  {date}  {:>10.2}  {c:+.2}%", p.close),
                None => println!("  {date}  {:>10.2}", p.close),
            }
        }
        println!("  ({} points)", points.len());
    }

    fn history_table(&mut self, symbol: &Symbol, bars: &[PriceBar]) {
        println!("--- {symbol} history ---");
        println!(
            "  {:<10} {:>10} {:>10} {:>10} {:>10} {:>12}",
            "date", "open", "high", "low", "close", "volume"
        );
        for b in bars.iter().rev().take(5).rev() {
            let date = b
                .datetime_utc()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            let volume = b.volume.map(|v| v.to_string()).unwrap_or_else(|| "n/a".into());
            println!(
                "  {date:<10} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {volume:>12}",
                b.open, b.high, b.low, b.close
            );
        }
    }

    fn metrics(&mut self, symbol: &Symbol, tiles: &[MetricTile]) {
        println!("--- {symbol} key metrics ---");
        for t in tiles {
            println!("  {:<15} {}", t.label, t.value);
        }
        println!();
    }

    fn overview(&mut self, page: &Page<OverviewRow>) {
        println!(
            "--- Overview (page {}/{}, {} companies) ---",
            page.page, page.page_count, page.total_rows
        );
        for r in &page.rows {
            println!(
                "  {:<6} {:<28} {:>10.2} {:>8} {:>20}",
                r.symbol.as_str(),
                r.name.as_deref().unwrap_or("n/a"),
                r.price.unwrap_or_default(),
                r.change_pct
                    .map(|c| format!("{c:+.2}%"))
                    .unwrap_or_else(|| "n/a".into()),
                r.market_cap
                    .map(tickerboard::metrics::format_thousands)
                    .unwrap_or_else(|| "n/a".into()),
            );
        }
        println!();
    }

    fn error(&mut self, message: &str) {
        eprintln!("! {message}");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing-subscriber")]
    tickerboard::init_tracing();

    let client = DashClient::builder()
        .timeout(Duration::from_secs(10))
        .build()?;

    let config = DashboardConfig {
        page_size: 5,
        ..DashboardConfig::default()
    };
    let mut dash = Dashboard::new(client, config, TextPresenter);

    // 1. The overview, largest companies first.
    dash.handle(UserAction::ShowOverview).await;
    dash.handle(UserAction::ChangePage(2)).await;

    // 2. Drill into a listed company and switch the chart window.
    dash.handle(UserAction::ChangePage(1)).await;
    dash.handle(UserAction::SelectForDetail("MSFT".into())).await;
    dash.handle(UserAction::ChangePeriod(Period::Y1)).await;
    dash.handle(UserAction::CloseDetail).await;

    // 3. Free-text entry, including one that will not resolve.
    dash.handle(UserAction::EnterSymbol("nvda".into())).await;
    dash.handle(UserAction::EnterSymbol("NOT_A_TICKER".into())).await;

    Ok(())
}
