use crate::models::{GeoResult, SearchRecord};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite://").trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn cache_repo(&self) -> repositories::cache::CacheRepository {
        repositories::cache::CacheRepository::new(self.conn.clone())
    }

    fn history_repo(&self) -> repositories::history::HistoryRepository {
        repositories::history::HistoryRepository::new(self.conn.clone())
    }

    pub async fn get_cached_lookup(&self, query: &str) -> Result<Option<Vec<GeoResult>>> {
        self.cache_repo().get_cached_lookup(query).await
    }

    pub async fn cache_lookup_results(
        &self,
        query: &str,
        results: &[GeoResult],
        ttl: Duration,
    ) -> Result<()> {
        self.cache_repo()
            .cache_lookup_results(query, results, ttl)
            .await
    }

    pub async fn cached_lookup_count(&self) -> Result<u64> {
        self.cache_repo().count_live().await
    }

    pub async fn record_searched_address(&self, address: &str) -> Result<bool> {
        self.history_repo().insert_if_absent(address).await
    }

    pub async fn list_searched_addresses(&self, limit: Option<u64>) -> Result<Vec<SearchRecord>> {
        let rows = self.history_repo().list(limit).await?;
        Ok(rows.into_iter().map(SearchRecord::from).collect())
    }

    pub async fn searched_address_count(&self) -> Result<u64> {
        self.history_repo().count().await
    }
}
