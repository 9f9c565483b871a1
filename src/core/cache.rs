//! In-memory result cache keyed by `(kind, symbol, window, as-of date)` with a fixed time-to-live.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::core::{DashError, Period, PriceBar, Symbol};
use crate::metrics::QuoteMetrics;

/// Default entry lifetime: one hour.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Defines the behavior of the in-memory cache for an API call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CacheMode {
    /// Read from the cache if a non-expired entry is present; otherwise, fetch from the network
    /// and write the response to the cache. (Default)
    #[default]
    Use,
    /// Always fetch from the network, bypassing any cached entry, and write the new response to the cache.
    Refresh,
    /// Always fetch from the network and do not read from or write to the cache.
    Bypass,
}

/// Which fetch operation produced an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchKind {
    History,
    Metrics,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub kind: FetchKind,
    pub symbol: Symbol,
    /// The history window; `None` for snapshot kinds.
    pub window: Option<Period>,
    /// The UTC date the window was resolved against; `None` for snapshot kinds.
    pub as_of: Option<NaiveDate>,
}

impl CacheKey {
    #[must_use]
    pub const fn history(symbol: Symbol, period: Period, as_of: NaiveDate) -> Self {
        Self {
            kind: FetchKind::History,
            symbol,
            window: Some(period),
            as_of: Some(as_of),
        }
    }

    #[must_use]
    pub const fn metrics(symbol: Symbol) -> Self {
        Self {
            kind: FetchKind::Metrics,
            symbol,
            window: None,
            as_of: None,
        }
    }
}

/// A cached fetch result.
#[derive(Debug, Clone)]
pub enum CachedValue {
    History(Vec<PriceBar>),
    Metrics(QuoteMetrics),
}

/// Values that can live in a [`ResultCache`].
pub trait Cacheable: Sized {
    fn into_cached(self) -> CachedValue;
    fn from_cached(value: &CachedValue) -> Option<Self>;
}

impl Cacheable for Vec<PriceBar> {
    fn into_cached(self) -> CachedValue {
        CachedValue::History(self)
    }

    fn from_cached(value: &CachedValue) -> Option<Self> {
        match value {
            CachedValue::History(bars) => Some(bars.clone()),
            CachedValue::Metrics(_) => None,
        }
    }
}

impl Cacheable for QuoteMetrics {
    fn into_cached(self) -> CachedValue {
        CachedValue::Metrics(self)
    }

    fn from_cached(value: &CachedValue) -> Option<Self> {
        match value {
            CachedValue::Metrics(m) => Some(m.clone()),
            CachedValue::History(_) => None,
        }
    }
}

#[derive(Debug)]
struct CacheEntry {
    value: CachedValue,
    expires_at: Instant,
}

/// Process-wide memo for fetch results. Cloning shares the underlying store.
///
/// No lock is held while a producer runs, so two callers racing on the same
/// cold key may both fetch; the later write wins.
#[derive(Debug, Clone)]
pub struct ResultCache {
    map: Arc<RwLock<HashMap<CacheKey, CacheEntry>>>,
    default_ttl: Duration,
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl ResultCache {
    #[must_use]
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            map: Arc::new(RwLock::new(HashMap::new())),
            default_ttl,
        }
    }

    #[must_use]
    pub const fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Returns a live entry for `key`, if any.
    pub async fn get<V: Cacheable>(&self, key: &CacheKey) -> Option<V> {
        let guard = self.map.read().await;
        let entry = guard.get(key)?;
        if Instant::now() < entry.expires_at {
            V::from_cached(&entry.value)
        } else {
            None
        }
    }

    /// Stores `value` under `key` until `now + ttl`, replacing any previous entry.
    pub async fn put<V: Cacheable>(&self, key: CacheKey, value: V, ttl: Duration) {
        let entry = CacheEntry {
            value: value.into_cached(),
            expires_at: Instant::now() + ttl,
        };
        self.map.write().await.insert(key, entry);
    }

    /// Returns the live entry for `key`, or runs `producer` and caches its success.
    ///
    /// # Errors
    ///
    /// Propagates the producer's error; failures are never cached.
    pub async fn get_or_fetch<V, F, Fut>(
        &self,
        key: CacheKey,
        ttl: Duration,
        producer: F,
    ) -> Result<V, DashError>
    where
        V: Cacheable + Clone,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, DashError>>,
    {
        self.get_or_fetch_with(key, ttl, CacheMode::Use, producer)
            .await
    }

    /// [`get_or_fetch`](Self::get_or_fetch) with an explicit [`CacheMode`].
    ///
    /// # Errors
    ///
    /// Propagates the producer's error; failures are never cached.
    pub async fn get_or_fetch_with<V, F, Fut>(
        &self,
        key: CacheKey,
        ttl: Duration,
        mode: CacheMode,
        producer: F,
    ) -> Result<V, DashError>
    where
        V: Cacheable + Clone,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, DashError>>,
    {
        if mode == CacheMode::Use
            && let Some(hit) = self.get::<V>(&key).await
        {
            #[cfg(feature = "tracing")]
            tracing::debug!(symbol = %key.symbol, kind = ?key.kind, "cache hit");
            return Ok(hit);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(symbol = %key.symbol, kind = ?key.kind, ?mode, "cache miss");

        let value = producer().await?;
        if mode != CacheMode::Bypass {
            self.put(key, value.clone(), ttl).await;
        }
        Ok(value)
    }

    /// Number of entries that have not yet expired.
    pub async fn live_len(&self) -> usize {
        let now = Instant::now();
        self.map
            .read()
            .await
            .values()
            .filter(|e| now < e.expires_at)
            .count()
    }

    /// Drops every entry.
    pub async fn clear(&self) {
        self.map.write().await.clear();
    }
}
