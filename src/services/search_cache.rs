//! Time-boxed cache of lookup results keyed by normalized address.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use tracing::{debug, warn};

use crate::db::Store;
use crate::models::GeoResult;
use crate::services::LookupError;

#[async_trait]
pub trait SearchCache: Send + Sync {
    /// Results stored under `key`, if they have not expired.
    async fn get(&self, key: &str) -> anyhow::Result<Option<Vec<GeoResult>>>;

    async fn put(&self, key: &str, results: &[GeoResult], ttl: Duration) -> anyhow::Result<()>;

    /// Number of live entries.
    async fn entry_count(&self) -> anyhow::Result<u64>;
}

/// Returns the cached value for `key`, or runs `compute` once and caches its
/// successful result for `ttl`.
///
/// Errors from `compute` are returned without touching the cache. A broken
/// cache never fails the lookup: read errors count as a miss and write errors
/// are only logged. Concurrent misses for one key may each run `compute`.
pub async fn get_or_compute<F, Fut>(
    cache: &dyn SearchCache,
    key: &str,
    ttl: Duration,
    compute: F,
) -> Result<Vec<GeoResult>, LookupError>
where
    F: FnOnce() -> Fut + Send,
    Fut: Future<Output = Result<Vec<GeoResult>, LookupError>> + Send,
{
    match cache.get(key).await {
        Ok(Some(results)) => {
            debug!(key, "Lookup cache hit");
            metrics::counter!("lookup_cache_hits_total").increment(1);
            return Ok(results);
        }
        Ok(None) => {}
        Err(e) => warn!(key, error = %e, "Lookup cache read failed, treating as miss"),
    }

    debug!(key, "Lookup cache miss");
    metrics::counter!("lookup_cache_misses_total").increment(1);

    let results = compute().await?;

    if let Err(e) = cache.put(key, &results, ttl).await {
        warn!(key, error = %e, "Failed to store lookup results in cache");
    }

    Ok(results)
}

/// Cache rows in the `search_cache` table.
pub struct SeaOrmSearchCache {
    store: Store,
}

impl SeaOrmSearchCache {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SearchCache for SeaOrmSearchCache {
    async fn get(&self, key: &str) -> anyhow::Result<Option<Vec<GeoResult>>> {
        self.store.get_cached_lookup(key).await
    }

    async fn put(&self, key: &str, results: &[GeoResult], ttl: Duration) -> anyhow::Result<()> {
        self.store.cache_lookup_results(key, results, ttl).await
    }

    async fn entry_count(&self) -> anyhow::Result<u64> {
        self.store.cached_lookup_count().await
    }
}

/// Process-local cache. The TTL is fixed when the cache is built, so the
/// `ttl` passed to [`SearchCache::put`] is ignored here.
pub struct MemorySearchCache {
    inner: Cache<String, Vec<GeoResult>>,
}

impl MemorySearchCache {
    #[must_use]
    pub fn new(ttl: Duration, max_entries: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build();

        Self { inner }
    }
}

#[async_trait]
impl SearchCache for MemorySearchCache {
    async fn get(&self, key: &str) -> anyhow::Result<Option<Vec<GeoResult>>> {
        Ok(self.inner.get(key).await)
    }

    async fn put(&self, key: &str, results: &[GeoResult], _ttl: Duration) -> anyhow::Result<()> {
        self.inner.insert(key.to_string(), results.to_vec()).await;
        Ok(())
    }

    async fn entry_count(&self) -> anyhow::Result<u64> {
        // moka updates its counters lazily
        self.inner.run_pending_tasks().await;
        Ok(self.inner.entry_count())
    }
}
