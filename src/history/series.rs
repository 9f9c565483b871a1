use serde::Serialize;

use crate::core::PriceBar;

/// One row handed to the chart: the tooltip shows all three fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub ts: i64,
    pub close: f64,
    /// Percent change of `close` against the previous row; `None` on the first row.
    pub change_pct: Option<f64>,
}

/// Percent change of each close against the previous close.
///
/// Element 0 is always `None`. A zero or non-finite previous close also yields `None`.
#[must_use]
pub fn change_pct(bars: &[PriceBar]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(bars.len());
    if bars.is_empty() {
        return out;
    }
    out.push(None);
    out.extend(
        bars.windows(2)
            .map(|w| pct_change(w[0].close, w[1].close)),
    );
    out
}

/// Change% of the most recent bar, i.e. the last two closes.
#[must_use]
pub fn latest_change_pct(bars: &[PriceBar]) -> Option<f64> {
    match bars {
        [.., prev, last] => pct_change(prev.close, last.close),
        _ => None,
    }
}

#[must_use]
pub fn chart_series(bars: &[PriceBar]) -> Vec<ChartPoint> {
    bars.iter()
        .zip(change_pct(bars))
        .map(|(b, change_pct)| ChartPoint {
            ts: b.ts,
            close: b.close,
            change_pct,
        })
        .collect()
}

fn pct_change(prev: f64, cur: f64) -> Option<f64> {
    if prev == 0.0 || !prev.is_finite() || !cur.is_finite() {
        return None;
    }
    Some((cur - prev) / prev * 100.0)
}
