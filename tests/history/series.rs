use tickerboard::PriceBar;
use tickerboard::history::{change_pct, chart_series, latest_change_pct};

fn bars(closes: &[f64]) -> Vec<PriceBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| PriceBar {
            ts: 1_704_067_200 + i64::try_from(i).unwrap() * 86_400,
            open: c,
            high: c,
            low: c,
            close: c,
            volume: None,
        })
        .collect()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn change_pct_first_row_is_undefined() {
    let closes = [100.0, 110.0, 99.0, 99.0];
    let out = change_pct(&bars(&closes));

    assert_eq!(out.len(), 4);
    assert_eq!(out[0], None);
    for i in 1..closes.len() {
        let expected = (closes[i] - closes[i - 1]) / closes[i - 1] * 100.0;
        assert!(approx(out[i].unwrap(), expected), "row {i}");
    }
    assert!(approx(out[1].unwrap(), 10.0));
    assert!(approx(out[2].unwrap(), -10.0));
    assert!(approx(out[3].unwrap(), 0.0));
}

#[test]
fn change_pct_handles_short_and_zero_inputs() {
    assert!(change_pct(&[]).is_empty());
    assert_eq!(change_pct(&bars(&[5.0])), vec![None]);
    assert_eq!(change_pct(&bars(&[0.0, 5.0])), vec![None, None]);
}

#[test]
fn latest_change_uses_last_two_closes() {
    assert!(approx(
        latest_change_pct(&bars(&[50.0, 100.0, 105.0])).unwrap(),
        5.0
    ));
    assert_eq!(latest_change_pct(&bars(&[100.0])), None);
}

#[test]
fn chart_series_carries_tooltip_fields() {
    let points = chart_series(&bars(&[100.0, 102.0]));
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].ts, 1_704_067_200);
    assert_eq!(points[0].change_pct, None);
    assert_eq!(points[1].close, 102.0);
    assert!(approx(points[1].change_pct.unwrap(), 2.0));
}
