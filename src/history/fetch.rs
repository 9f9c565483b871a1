use url::Url;

use crate::core::{DashClient, DashError, Interval, PriceBar, Symbol, net};
use crate::history::wire::{ChartEnvelope, QuoteBlock};

pub(crate) fn chart_url(
    client: &DashClient,
    symbol: &Symbol,
    (period1, period2): (i64, i64),
    interval: Interval,
) -> Result<Url, DashError> {
    if period1 >= period2 {
        return Err(DashError::InvalidInput(
            "invalid date range: start must be before end".into(),
        ));
    }
    let mut url = client.base_chart().join(symbol.as_str())?;
    url.query_pairs_mut()
        .append_pair("period1", &period1.to_string())
        .append_pair("period2", &period2.to_string())
        .append_pair("interval", interval.as_str())
        .append_pair("events", "div|split")
        .append_pair("includePrePost", "false");
    Ok(url)
}

/// One chart request, no retry and no cache.
pub(crate) async fn fetch_chart(
    client: &DashClient,
    symbol: &Symbol,
    url: &Url,
) -> Result<Vec<PriceBar>, DashError> {
    let body = net::get_text(client.http(), url, "history_chart", symbol).await?;
    decode_chart(&body, symbol)
}

pub(crate) fn decode_chart(body: &str, symbol: &Symbol) -> Result<Vec<PriceBar>, DashError> {
    let parsed: ChartEnvelope = serde_json::from_str(body)
        .map_err(|e| DashError::Malformed(format!("chart json parse error: {e}")))?;

    let chart = parsed
        .chart
        .ok_or_else(|| DashError::Malformed("missing chart".into()))?;

    if let Some(err) = chart.error {
        if err.code.eq_ignore_ascii_case("not found") {
            return Err(DashError::NotFound {
                symbol: symbol.to_string(),
            });
        }
        return Err(DashError::Malformed(format!(
            "yahoo error: {} - {}",
            err.code, err.description
        )));
    }

    let results = chart
        .result
        .ok_or_else(|| DashError::Malformed("missing result".into()))?;

    // A known symbol with nothing in the window comes back without timestamps.
    let Some(r0) = results.into_iter().next() else {
        return Ok(Vec::new());
    };
    let ts = r0.timestamp.unwrap_or_default();
    let quote = r0
        .indicators
        .and_then(|i| i.quote.into_iter().next())
        .unwrap_or_default();

    Ok(assemble_bars(&ts, &quote))
}

/// Zips the column arrays into rows, dropping rows with any missing OHLC value.
fn assemble_bars(ts: &[i64], q: &QuoteBlock) -> Vec<PriceBar> {
    let col = |v: &[Option<f64>], i: usize| v.get(i).copied().flatten();

    let mut out: Vec<PriceBar> = ts
        .iter()
        .enumerate()
        .filter_map(|(i, &t)| {
            Some(PriceBar {
                ts: t,
                open: col(&q.open, i)?,
                high: col(&q.high, i)?,
                low: col(&q.low, i)?,
                close: col(&q.close, i)?,
                volume: q.volume.get(i).copied().flatten(),
            })
        })
        .collect();

    out.sort_by_key(|b| b.ts);
    out
}
