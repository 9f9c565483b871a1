use chrono::NaiveDate;
use httpmock::Method::GET;
use tickerboard::{HistoryBuilder, Interval, Period};

use crate::common::{chart_body, client, setup_server};

fn jan_10() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
}

#[tokio::test]
async fn history_daily_window_query_params() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v8/finance/chart/MSFT")
            .query_param("period1", "1704412800")
            .query_param("period2", "1704844800")
            .query_param("interval", "1d")
            .query_param("includePrePost", "false");
        then.status(200)
            .header("content-type", "application/json")
            .body(chart_body(&[1704412800], &[370.0]));
    });

    let client = client(&server);
    let bars = HistoryBuilder::new(&client, "MSFT")
        .unwrap()
        .period(Period::D5)
        .as_of(jan_10())
        .fetch()
        .await
        .unwrap();

    mock.assert();
    assert_eq!(bars.len(), 1);
}

#[tokio::test]
async fn history_one_day_uses_intraday_interval() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v8/finance/chart/MSFT")
            .query_param("period1", "1704758400")
            .query_param("period2", "1704844800")
            .query_param("interval", "5m");
        then.status(200)
            .header("content-type", "application/json")
            .body(chart_body(&[1704758400, 1704758700], &[370.0, 370.5]));
    });

    let client = client(&server);
    let bars = HistoryBuilder::new(&client, "MSFT")
        .unwrap()
        .period(Period::D1)
        .as_of(jan_10())
        .fetch()
        .await
        .unwrap();

    mock.assert();
    assert_eq!(bars.len(), 2);
}

#[test]
fn period_windows_and_intervals() {
    let end = 1704844800;
    for (p, days) in [
        (Period::D1, 1),
        (Period::D5, 5),
        (Period::M1, 30),
        (Period::M3, 90),
        (Period::M6, 180),
        (Period::Y1, 365),
        (Period::Y5, 1825),
        (Period::Max, 3650),
        (Period::Last90Days, 90),
    ] {
        assert_eq!(p.window(jan_10()), (end - days * 86_400, end), "{p}");
    }
    assert_eq!(Period::D1.interval(), Interval::I5m);
    assert!(
        Period::ALL
            .iter()
            .filter(|p| **p != Period::D1)
            .all(|p| p.interval() == Interval::D1)
    );
}

#[test]
fn period_parses_selector_labels() {
    assert_eq!(Period::parse("3mo").unwrap(), Period::M3);
    assert_eq!(Period::parse(" MAX ").unwrap(), Period::Max);
    assert!(Period::parse("2w").is_err());
}
