use reqwest::StatusCode;
use url::Url;

use crate::core::{DashError, Symbol};

/// Perform one GET and return the body text, mapping the status onto [`DashError`].
///
/// 429 becomes [`DashError::RateLimited`] (the only retryable outcome), 404 becomes
/// [`DashError::NotFound`] and any other non-success status [`DashError::Status`].
pub(crate) async fn get_text(
    http: &reqwest::Client,
    url: &Url,
    _endpoint: &str,
    symbol: &Symbol,
) -> Result<String, DashError> {
    let resp = http
        .get(url.clone())
        .header("accept", "application/json")
        .send()
        .await?;

    let status = resp.status();
    #[cfg(feature = "tracing")]
    tracing::debug!(endpoint = _endpoint, %symbol, status = status.as_u16(), "provider response");

    match status {
        StatusCode::TOO_MANY_REQUESTS => Err(DashError::RateLimited {
            url: url.to_string(),
        }),
        StatusCode::NOT_FOUND => Err(DashError::NotFound {
            symbol: symbol.to_string(),
        }),
        s if !s.is_success() => Err(DashError::Status {
            status: s.as_u16(),
            url: url.to_string(),
        }),
        _ => Ok(resp.text().await?),
    }
}
