use crate::core::wire::{from_raw_finite, non_empty};
use crate::core::{DashClient, DashError, Symbol, net};
use crate::metrics::QuoteMetrics;
use crate::metrics::wire::{SummaryResult, V10Envelope};

pub(crate) const MODULES: &str = "price,summaryDetail,defaultKeyStatistics,assetProfile";

/// One quoteSummary round trip, refreshing the crumb once if Yahoo rejects it.
pub(crate) async fn fetch_summary(
    client: &DashClient,
    symbol: &Symbol,
) -> Result<QuoteMetrics, DashError> {
    for attempt in 0..=1 {
        client.ensure_credentials().await?;
        let crumb = client
            .crumb()
            .await
            .ok_or_else(|| DashError::Auth("crumb is not set".into()))?;

        let mut url = client.base_quote_api().join(symbol.as_str())?;
        url.query_pairs_mut()
            .append_pair("modules", MODULES)
            .append_pair("crumb", &crumb);

        let body = match net::get_text(client.http(), &url, "quote_summary", symbol).await {
            Err(DashError::Status {
                status: 401 | 403, ..
            }) if attempt == 0 => {
                #[cfg(feature = "tracing")]
                tracing::debug!(%symbol, "crumb rejected; refreshing");
                client.clear_crumb().await;
                continue;
            }
            other => other?,
        };

        let env: V10Envelope = serde_json::from_str(&body)
            .map_err(|e| DashError::Malformed(format!("quoteSummary json parse: {e}")))?;
        let summary = env
            .quote_summary
            .ok_or_else(|| DashError::Malformed("missing quoteSummary".into()))?;

        if let Some(err) = summary.error {
            let desc = err.description.to_ascii_lowercase();
            if desc.contains("invalid crumb") && attempt == 0 {
                client.clear_crumb().await;
                continue;
            }
            if err.code.eq_ignore_ascii_case("not found") || desc.contains("not found") {
                return Err(DashError::NotFound {
                    symbol: symbol.to_string(),
                });
            }
            return Err(DashError::Malformed(format!(
                "yahoo error: {} - {}",
                err.code, err.description
            )));
        }

        let result = summary
            .result
            .and_then(|v| v.into_iter().next())
            .ok_or_else(|| DashError::NotFound {
                symbol: symbol.to_string(),
            })?;

        return Ok(map_summary(symbol, result));
    }

    Err(DashError::Auth(
        "quoteSummary rejected the crumb twice".into(),
    ))
}

fn map_summary(symbol: &Symbol, r: SummaryResult) -> QuoteMetrics {
    let price = r.price.unwrap_or_default();
    let detail = r.summary_detail.unwrap_or_default();
    let stats = r.key_stats.unwrap_or_default();
    let profile = r.asset_profile.unwrap_or_default();

    QuoteMetrics {
        symbol: symbol.clone(),
        short_name: non_empty(price.short_name).or_else(|| non_empty(price.long_name)),
        price: from_raw_finite(price.regular_market_price),
        currency: non_empty(price.currency).or_else(|| non_empty(detail.currency)),
        previous_close: from_raw_finite(price.regular_market_previous_close)
            .or_else(|| from_raw_finite(detail.previous_close)),
        market_cap: from_raw_finite(price.market_cap)
            .or_else(|| from_raw_finite(detail.market_cap)),
        trailing_pe: from_raw_finite(detail.trailing_pe),
        forward_pe: from_raw_finite(detail.forward_pe),
        dividend_yield: from_raw_finite(detail.dividend_yield),
        dividend_rate: from_raw_finite(detail.dividend_rate),
        trailing_eps: from_raw_finite(stats.trailing_eps),
        forward_eps: from_raw_finite(stats.forward_eps),
        fifty_two_week_high: from_raw_finite(detail.fifty_two_week_high),
        fifty_two_week_low: from_raw_finite(detail.fifty_two_week_low),
        sector: non_empty(profile.sector),
        industry: non_empty(profile.industry),
    }
}
