use tickerboard::metrics::format_thousands;
use tickerboard::{QuoteMetrics, Symbol};

fn tile<'a>(tiles: &'a [tickerboard::MetricTile], label: &str) -> &'a str {
    &tiles
        .iter()
        .find(|t| t.label == label)
        .unwrap_or_else(|| panic!("missing tile {label}"))
        .value
}

#[test]
fn tiles_format_present_values() {
    let mut m = QuoteMetrics::empty(Symbol::parse("AAPL").unwrap());
    m.price = Some(189.254);
    m.currency = Some("USD".into());
    m.market_cap = Some(2_950_000_000_000.0);
    m.trailing_pe = Some(28.456);
    m.dividend_yield = Some(0.0045);
    m.sector = Some("Technology".into());

    let tiles = m.tiles();
    assert_eq!(tile(&tiles, "Price"), "189.25 USD");
    assert_eq!(tile(&tiles, "Market Cap"), "2,950,000,000,000");
    assert_eq!(tile(&tiles, "P/E (ttm)"), "28.46");
    assert_eq!(tile(&tiles, "Dividend Yield"), "0.45%");
    assert_eq!(tile(&tiles, "Sector"), "Technology");
}

#[test]
fn tiles_render_absent_values_as_na() {
    let m = QuoteMetrics::empty(Symbol::parse("XYZ").unwrap());
    let tiles = m.tiles();
    assert!(tiles.iter().all(|t| t.value == "n/a"), "{tiles:?}");
    assert_eq!(m.entries().count(), 0);
}

#[test]
fn zero_dividend_yield_is_a_value_not_missing() {
    let mut m = QuoteMetrics::empty(Symbol::parse("BRK-B").unwrap());
    m.dividend_yield = Some(0.0);
    assert_eq!(tile(&m.tiles(), "Dividend Yield"), "0.00%");

    m.dividend_yield = None;
    assert_eq!(tile(&m.tiles(), "Dividend Yield"), "n/a");
}

#[test]
fn thousands_separator() {
    assert_eq!(format_thousands(0.0), "0");
    assert_eq!(format_thousands(999.0), "999");
    assert_eq!(format_thousands(1_000.0), "1,000");
    assert_eq!(format_thousands(-1_234_567.0), "-1,234,567");
}
