//! Public client surface + builder.
//! Internals are split into `auth` (cookie/crumb), `constants` (UA + defaults) and `retry`.

mod auth;
mod constants;
pub mod retry;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use constants::{
    DEFAULT_BASE_CHART, DEFAULT_BASE_QUOTE_API, DEFAULT_COOKIE_URL, DEFAULT_CRUMB_URL, USER_AGENT,
};
use reqwest::Client;
use tokio::sync::{Mutex, RwLock};
use url::Url;

pub use retry::{Backoff, RetryConfig, Sleeper, TokioSleeper, with_retry};

use crate::core::cache::{CacheKey, CacheMode, Cacheable, DEFAULT_TTL, ResultCache};
use crate::core::{DashError, Period, PriceBar};
use crate::metrics::QuoteMetrics;

#[derive(Debug, Default)]
struct ClientState {
    crumb: Option<String>,
}

/// Handle to the market-data provider. Cheap to clone; clones share the cache and credentials.
#[derive(Debug, Clone)]
pub struct DashClient {
    http: Client,
    base_chart: Url,
    base_quote_api: Url,
    cookie_url: Url,
    crumb_url: Url,

    state: Arc<RwLock<ClientState>>,
    credential_fetch_lock: Arc<Mutex<()>>,

    cache: Option<ResultCache>,
    retry: RetryConfig,
    sleeper: Arc<dyn Sleeper>,
}

impl DashClient {
    /// Create a new builder.
    pub fn builder() -> DashClientBuilder {
        DashClientBuilder::default()
    }

    /// A client with default endpoints, a one-hour cache and the default retry policy.
    ///
    /// # Errors
    ///
    /// Fails only if the HTTP client cannot be constructed.
    pub fn new() -> Result<Self, DashError> {
        Self::builder().build()
    }

    /// Price bars for `symbol` over `period`, ascending by timestamp.
    ///
    /// An empty vector means the symbol exists but has no bars in the window.
    ///
    /// # Errors
    ///
    /// [`DashError::InvalidInput`] for a bad symbol (no request is made), otherwise
    /// any provider error after the retry policy has given up.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    pub async fn fetch_history(
        &self,
        symbol: &str,
        period: Period,
    ) -> Result<Vec<PriceBar>, DashError> {
        crate::history::HistoryBuilder::new(self, symbol)?
            .period(period)
            .fetch()
            .await
    }

    /// Fundamentals snapshot for `symbol`; absent fields are `None`.
    ///
    /// # Errors
    ///
    /// [`DashError::InvalidInput`] for a bad symbol (no request is made), otherwise
    /// any provider error after the retry policy has given up.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    pub async fn fetch_metrics(&self, symbol: &str) -> Result<QuoteMetrics, DashError> {
        crate::metrics::MetricsBuilder::new(self, symbol)?
            .fetch()
            .await
    }

    /// The shared result cache, if caching is enabled.
    pub fn cache(&self) -> Option<&ResultCache> {
        self.cache.as_ref()
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache.is_some()
    }

    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }
    pub(crate) fn base_chart(&self) -> &Url {
        &self.base_chart
    }
    pub(crate) fn base_quote_api(&self) -> &Url {
        &self.base_quote_api
    }

    /// Cache lookup, then on a miss the retry policy around `call`.
    pub(crate) async fn cached<V, F, Fut>(
        &self,
        key: CacheKey,
        mode: CacheMode,
        retry_override: Option<&RetryConfig>,
        call: F,
    ) -> Result<V, DashError>
    where
        V: Cacheable + Clone,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<V, DashError>>,
    {
        let retry = retry_override.unwrap_or(&self.retry);
        let producer = || with_retry(retry, self.sleeper.as_ref(), call);
        match &self.cache {
            Some(cache) => {
                cache
                    .get_or_fetch_with(key, cache.default_ttl(), mode, producer)
                    .await
            }
            None => producer().await,
        }
    }
}

/* ----------------------- Builder ----------------------- */

pub struct DashClientBuilder {
    user_agent: Option<String>,
    base_chart: Option<Url>,
    base_quote_api: Option<Url>,
    cookie_url: Option<Url>,
    crumb_url: Option<Url>,

    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    cache_ttl: Option<Duration>,
    shared_cache: Option<ResultCache>,
    retry: RetryConfig,
    sleeper: Arc<dyn Sleeper>,
}

impl Default for DashClientBuilder {
    fn default() -> Self {
        Self {
            user_agent: None,
            base_chart: None,
            base_quote_api: None,
            cookie_url: None,
            crumb_url: None,
            timeout: None,
            connect_timeout: None,
            cache_ttl: Some(DEFAULT_TTL),
            shared_cache: None,
            retry: RetryConfig::default(),
            sleeper: Arc::new(TokioSleeper),
        }
    }
}

impl DashClientBuilder {
    /// Override the User-Agent.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the chart API base (e.g., `https://query1.finance.yahoo.com/v8/finance/chart/`).
    #[must_use]
    pub fn base_chart(mut self, url: Url) -> Self {
        self.base_chart = Some(url);
        self
    }

    /// Override the quoteSummary API base (e.g., `https://query2.finance.yahoo.com/v10/finance/quoteSummary/`).
    #[must_use]
    pub fn base_quote_api(mut self, url: Url) -> Self {
        self.base_quote_api = Some(url);
        self
    }

    /// Override the cookie bootstrap URL.
    #[must_use]
    pub fn cookie_url(mut self, url: Url) -> Self {
        self.cookie_url = Some(url);
        self
    }

    /// Override the crumb URL.
    #[must_use]
    pub fn crumb_url(mut self, url: Url) -> Self {
        self.crumb_url = Some(url);
        self
    }

    /// Set a global request timeout (overall). Default: none.
    #[must_use]
    pub const fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    #[must_use]
    pub const fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Cache entry lifetime. Default: one hour.
    #[must_use]
    pub const fn cache_ttl(mut self, dur: Duration) -> Self {
        self.cache_ttl = Some(dur);
        self
    }

    /// Disable the result cache entirely.
    #[must_use]
    pub fn no_cache(mut self) -> Self {
        self.cache_ttl = None;
        self.shared_cache = None;
        self
    }

    /// Reuse an existing cache, e.g. one shared by several sessions' clients.
    #[must_use]
    pub fn shared_cache(mut self, cache: ResultCache) -> Self {
        self.shared_cache = Some(cache);
        self
    }

    /// Replace the default retry policy.
    #[must_use]
    pub fn retry_config(mut self, cfg: RetryConfig) -> Self {
        self.retry = cfg;
        self
    }

    /// Turn retries on or off without touching the rest of the policy.
    #[must_use]
    pub const fn retry_enabled(mut self, yes: bool) -> Self {
        self.retry.enabled = yes;
        self
    }

    /// Replace how backoff delays are waited out.
    #[must_use]
    pub fn sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Fails if a default URL cannot be parsed or the HTTP client cannot be built.
    pub fn build(self) -> Result<DashClient, DashError> {
        let base_chart = match self.base_chart {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_CHART)?,
        };
        let base_quote_api = match self.base_quote_api {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_QUOTE_API)?,
        };
        let cookie_url = match self.cookie_url {
            Some(u) => u,
            None => Url::parse(DEFAULT_COOKIE_URL)?,
        };
        let crumb_url = match self.crumb_url {
            Some(u) => u,
            None => Url::parse(DEFAULT_CRUMB_URL)?,
        };

        let mut httpb = reqwest::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT))
            .cookie_store(true);

        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        let cache = self
            .shared_cache
            .or_else(|| self.cache_ttl.map(ResultCache::new));

        Ok(DashClient {
            http: httpb.build()?,
            base_chart,
            base_quote_api,
            cookie_url,
            crumb_url,
            state: Arc::new(RwLock::new(ClientState::default())),
            credential_fetch_lock: Arc::new(Mutex::new(())),
            cache,
            retry: self.retry,
            sleeper: self.sleeper,
        })
    }
}
