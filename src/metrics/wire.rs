use serde::Deserialize;

use crate::core::wire::RawNum;

#[derive(Deserialize)]
pub(crate) struct V10Envelope {
    #[serde(rename = "quoteSummary")]
    pub(crate) quote_summary: Option<V10QuoteSummary>,
}

#[derive(Deserialize)]
pub(crate) struct V10QuoteSummary {
    pub(crate) result: Option<Vec<SummaryResult>>,
    pub(crate) error: Option<V10Error>,
}

#[derive(Deserialize)]
pub(crate) struct V10Error {
    #[serde(default)]
    pub(crate) code: String,
    #[serde(default)]
    pub(crate) description: String,
}

#[derive(Deserialize, Default)]
pub(crate) struct SummaryResult {
    #[serde(default)]
    pub(crate) price: Option<PriceModule>,
    #[serde(default, rename = "summaryDetail")]
    pub(crate) summary_detail: Option<SummaryDetailModule>,
    #[serde(default, rename = "defaultKeyStatistics")]
    pub(crate) key_stats: Option<KeyStatsModule>,
    #[serde(default, rename = "assetProfile")]
    pub(crate) asset_profile: Option<AssetProfileModule>,
}

#[derive(Deserialize, Default)]
pub(crate) struct PriceModule {
    #[serde(rename = "shortName")]
    pub(crate) short_name: Option<String>,
    #[serde(rename = "longName")]
    pub(crate) long_name: Option<String>,
    pub(crate) currency: Option<String>,
    #[serde(rename = "regularMarketPrice")]
    pub(crate) regular_market_price: Option<RawNum<f64>>,
    #[serde(rename = "regularMarketPreviousClose")]
    pub(crate) regular_market_previous_close: Option<RawNum<f64>>,
    #[serde(rename = "marketCap")]
    pub(crate) market_cap: Option<RawNum<f64>>,
}

#[derive(Deserialize, Default)]
pub(crate) struct SummaryDetailModule {
    pub(crate) currency: Option<String>,
    #[serde(rename = "previousClose")]
    pub(crate) previous_close: Option<RawNum<f64>>,
    #[serde(rename = "marketCap")]
    pub(crate) market_cap: Option<RawNum<f64>>,
    #[serde(rename = "trailingPE")]
    pub(crate) trailing_pe: Option<RawNum<f64>>,
    #[serde(rename = "forwardPE")]
    pub(crate) forward_pe: Option<RawNum<f64>>,
    #[serde(rename = "dividendYield")]
    pub(crate) dividend_yield: Option<RawNum<f64>>,
    #[serde(rename = "dividendRate")]
    pub(crate) dividend_rate: Option<RawNum<f64>>,
    #[serde(rename = "fiftyTwoWeekHigh")]
    pub(crate) fifty_two_week_high: Option<RawNum<f64>>,
    #[serde(rename = "fiftyTwoWeekLow")]
    pub(crate) fifty_two_week_low: Option<RawNum<f64>>,
}

#[derive(Deserialize, Default)]
pub(crate) struct KeyStatsModule {
    #[serde(rename = "trailingEps")]
    pub(crate) trailing_eps: Option<RawNum<f64>>,
    #[serde(rename = "forwardEps")]
    pub(crate) forward_eps: Option<RawNum<f64>>,
}

#[derive(Deserialize, Default)]
pub(crate) struct AssetProfileModule {
    pub(crate) sector: Option<String>,
    pub(crate) industry: Option<String>,
}
