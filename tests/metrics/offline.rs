use httpmock::Method::GET;
use tickerboard::{DashError, ErrorKind, MetricValue};

use crate::common::{client, mock_cookie_crumb, mock_summary, setup_server, summary_body};

#[tokio::test]
async fn metrics_maps_summary_modules() {
    let server = setup_server();
    let (cookie, crumb) = mock_cookie_crumb(&server);
    let summary = server.mock(|when, then| {
        when.method(GET)
            .path("/v10/finance/quoteSummary/AAPL")
            .query_param(
                "modules",
                "price,summaryDetail,defaultKeyStatistics,assetProfile",
            )
            .query_param("crumb", "crumb-value");
        then.status(200)
            .header("content-type", "application/json")
            .body(summary_body("AAPL", 189.25, 2.95e12));
    });

    let m = client(&server).fetch_metrics("aapl").await.unwrap();

    cookie.assert();
    crumb.assert();
    summary.assert();

    assert_eq!(m.symbol.as_str(), "AAPL");
    assert_eq!(m.short_name.as_deref(), Some("AAPL Corp"));
    assert_eq!(m.price, Some(189.25));
    assert_eq!(m.currency.as_deref(), Some("USD"));
    assert_eq!(m.market_cap, Some(2.95e12));
    assert_eq!(m.trailing_pe, Some(28.5));
    assert_eq!(m.dividend_yield, Some(0.0045));
    assert_eq!(m.trailing_eps, Some(6.43));
    assert_eq!(m.forward_eps, Some(7.1));
    assert_eq!(m.fifty_two_week_high, Some(199.62));
    assert_eq!(m.sector.as_deref(), Some("Technology"));
    assert_eq!(m.industry.as_deref(), Some("Consumer Electronics"));
    assert_eq!(m.get("marketCap"), Some(MetricValue::Number(2.95e12)));
    assert_eq!(
        m.get("sector"),
        Some(MetricValue::Text("Technology".into()))
    );
}

#[tokio::test]
async fn metrics_absent_fields_are_none_not_zero() {
    let server = setup_server();
    let _auth = mock_cookie_crumb(&server);
    let body = r#"{"quoteSummary":{"result":[{
        "price":{"currency":"EUR","regularMarketPrice":{"raw":120.5,"fmt":"120.50"},"marketCap":{}},
        "summaryDetail":{"trailingPE":{},"dividendYield":{}}
    }],"error":null}}"#;
    let summary = mock_summary(&server, "SAP.DE", body.to_string());

    let m = client(&server).fetch_metrics("SAP.DE").await.unwrap();

    summary.assert();
    assert_eq!(m.price, Some(120.5));
    assert_eq!(m.currency.as_deref(), Some("EUR"));
    assert_eq!(m.market_cap, None);
    assert_eq!(m.trailing_pe, None);
    assert_eq!(m.dividend_yield, None);
    assert_eq!(m.sector, None);
    assert_eq!(m.get("trailingPE"), None);
    let names: Vec<&str> = m.entries().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["regularMarketPrice", "currency"]);
}

#[tokio::test]
async fn metrics_unknown_symbol_maps_to_not_found() {
    let server = setup_server();
    let _auth = mock_cookie_crumb(&server);
    let summary = server.mock(|when, then| {
        when.method(GET).path("/v10/finance/quoteSummary/NOPE");
        then.status(404)
            .header("content-type", "application/json")
            .body(r#"{"quoteSummary":{"result":null,"error":{"code":"Not Found","description":"Quote not found for symbol: NOPE"}}}"#);
    });

    let err = client(&server).fetch_metrics("NOPE").await.unwrap_err();

    summary.assert();
    assert!(matches!(err, DashError::NotFound { .. }), "got {err:?}");
    assert_eq!(err.user_message(), "No data found for 'NOPE'.");
}

#[tokio::test]
async fn metrics_empty_result_maps_to_not_found() {
    let server = setup_server();
    let _auth = mock_cookie_crumb(&server);
    let summary = mock_summary(
        &server,
        "EMPTY",
        r#"{"quoteSummary":{"result":[],"error":null}}"#.to_string(),
    );

    let err = client(&server).fetch_metrics("EMPTY").await.unwrap_err();

    summary.assert();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn metrics_garbage_body_is_malformed_not_empty() {
    let server = setup_server();
    let _auth = mock_cookie_crumb(&server);
    let summary = mock_summary(&server, "JUNK", "not json".to_string());

    let err = client(&server).fetch_metrics("JUNK").await.unwrap_err();

    summary.assert_calls(1);
    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
}

#[tokio::test]
async fn metrics_second_call_is_served_from_cache() {
    let server = setup_server();
    let (cookie, crumb) = mock_cookie_crumb(&server);
    let summary = mock_summary(&server, "MSFT", summary_body("MSFT", 410.0, 3.0e12));

    let client = client(&server);
    let first = client.fetch_metrics("MSFT").await.unwrap();
    let second = client.fetch_metrics("MSFT").await.unwrap();

    summary.assert_calls(1);
    cookie.assert_calls(1);
    crumb.assert_calls(1);
    assert_eq!(first, second);
}
