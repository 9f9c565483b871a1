use httpmock::Method::GET;
use tickerboard::overview::{build_overview, sort_by_market_cap};
use tickerboard::{ErrorKind, OverviewRow, Pager, Symbol};

use crate::common::{
    chart_body, client, mock_chart, mock_cookie_crumb, mock_summary, setup_server, summary_body,
};

fn row(symbol: &str, cap: Option<f64>) -> OverviewRow {
    OverviewRow {
        symbol: Symbol::parse(symbol).unwrap(),
        name: None,
        price: None,
        currency: None,
        change_pct: None,
        market_cap: cap,
    }
}

#[test]
fn sorts_by_market_cap_descending_with_missing_last() {
    let mut rows = vec![
        row("B", None),
        row("SMALL", Some(1.0e9)),
        row("A", None),
        row("BIG", Some(3.0e12)),
        row("MID", Some(5.0e11)),
        row("MID2", Some(5.0e11)),
    ];
    sort_by_market_cap(&mut rows);

    let order: Vec<&str> = rows.iter().map(|r| r.symbol.as_str()).collect();
    assert_eq!(order, vec!["BIG", "MID", "MID2", "SMALL", "A", "B"]);
}

#[tokio::test]
async fn overview_rows_sorted_and_failures_recorded() {
    let server = setup_server();
    let (_cookie, _crumb) = mock_cookie_crumb(&server);

    let aapl_summary = mock_summary(&server, "AAPL", summary_body("AAPL", 190.0, 2.9e12));
    let msft_summary = mock_summary(&server, "MSFT", summary_body("MSFT", 410.0, 3.1e12));
    let aapl_chart = mock_chart(
        &server,
        "AAPL",
        chart_body(&[1704153600, 1704240000], &[100.0, 102.0]),
    );
    let msft_chart = mock_chart(
        &server,
        "MSFT",
        chart_body(&[1704153600, 1704240000], &[400.0, 396.0]),
    );
    let missing = server.mock(|when, then| {
        when.method(GET).path("/v10/finance/quoteSummary/ZZZZ");
        then.status(404);
    });

    let client = client(&server);
    let table = build_overview(&client, &["AAPL", "ZZZZ", "MSFT"]).await;

    aapl_summary.assert();
    msft_summary.assert();
    aapl_chart.assert();
    msft_chart.assert();
    missing.assert();

    let symbols: Vec<&str> = table.symbols().map(Symbol::as_str).collect();
    assert_eq!(symbols, vec!["MSFT", "AAPL"]);

    let msft = &table.rows[0];
    assert_eq!(msft.name.as_deref(), Some("MSFT Corp"));
    assert_eq!(msft.price, Some(410.0));
    assert_eq!(msft.currency.as_deref(), Some("USD"));
    assert!((msft.change_pct.unwrap() + 1.0).abs() < 1e-9);
    assert!((table.rows[1].change_pct.unwrap() - 2.0).abs() < 1e-9);

    assert_eq!(table.failures.len(), 1);
    assert_eq!(table.failures[0].0, "ZZZZ");
    assert_eq!(table.failures[0].1.kind(), ErrorKind::NotFound);

    let page = table.page(Pager::new(1), 2);
    assert_eq!(page.page_count, 2);
    assert_eq!(page.rows[0].symbol.as_str(), "AAPL");
}

#[tokio::test]
async fn history_failure_keeps_row_without_change() {
    let server = setup_server();
    let (_cookie, _crumb) = mock_cookie_crumb(&server);
    let _summary = mock_summary(&server, "TSLA", summary_body("TSLA", 250.0, 8.0e11));
    let chart = server.mock(|when, then| {
        when.method(GET).path("/v8/finance/chart/TSLA");
        then.status(500);
    });

    let table = build_overview(&client(&server), &["TSLA"]).await;

    chart.assert();
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0].change_pct, None);
    assert_eq!(table.rows[0].market_cap, Some(8.0e11));
    assert_eq!(table.failures.len(), 1);
    assert_eq!(table.failures[0].1.kind(), ErrorKind::RemoteUnavailable);
}
