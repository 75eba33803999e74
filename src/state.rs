use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::info;

use crate::clients::{GeoClient, YandexGeoClient};
use crate::config::{CacheBackend, Config};
use crate::db::Store;
use crate::services::{
    LookupService, MemorySearchCache, SeaOrmHistoryStore, SeaOrmSearchCache, SearchCache,
    SearchHistoryStore,
};

/// Shared HTTP client for outbound geocoder calls, reused so connections are
/// pooled across requests.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .user_agent(concat!("geolookup/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub lookup_service: Arc<LookupService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let http_client = build_shared_http_client(config.geocoder.request_timeout_seconds)?;
        let geocoder: Arc<dyn GeoClient> = Arc::new(YandexGeoClient::with_shared_client(
            http_client,
            &config.geocoder,
        ));

        let ttl = config.cache.ttl();
        let cache: Arc<dyn SearchCache> = match config.cache.backend {
            CacheBackend::Database => Arc::new(SeaOrmSearchCache::new(store.clone())),
            CacheBackend::Memory => {
                Arc::new(MemorySearchCache::new(ttl, config.cache.max_entries))
            }
        };
        info!(backend = ?config.cache.backend, ttl_hours = config.cache.ttl_hours, "Lookup cache ready");

        let history: Arc<dyn SearchHistoryStore> =
            Arc::new(SeaOrmHistoryStore::new(store.clone()));

        let lookup_service = Arc::new(LookupService::new(
            geocoder,
            cache,
            history,
            ttl,
        ));

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store,
            lookup_service,
        })
    }
}
