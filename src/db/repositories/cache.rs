use crate::entities::{prelude::*, search_cache};
use crate::models::GeoResult;
use anyhow::{Context, Result};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set};
use std::time::Duration;

pub struct CacheRepository {
    conn: DatabaseConnection,
}

impl CacheRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get_cached_lookup(&self, query: &str) -> Result<Option<Vec<GeoResult>>> {
        let now = chrono::Utc::now().to_rfc3339();

        // Opportunistic cleanup of expired rows
        let _ = SearchCache::delete_many()
            .filter(search_cache::Column::ExpiresAt.lte(&now))
            .exec(&self.conn)
            .await;

        let entry = SearchCache::find()
            .filter(search_cache::Column::Query.eq(query))
            .filter(search_cache::Column::ExpiresAt.gt(&now))
            .one(&self.conn)
            .await?;

        let Some(entry) = entry else {
            return Ok(None);
        };

        let results: Vec<GeoResult> = serde_json::from_str(&entry.results_json)
            .with_context(|| format!("Corrupt cache entry for '{query}'"))?;

        Ok(Some(results))
    }

    pub async fn cache_lookup_results(
        &self,
        query: &str,
        results: &[GeoResult],
        ttl: Duration,
    ) -> Result<()> {
        let results_json = serde_json::to_string(results)?;
        let now = chrono::Utc::now();
        let ttl = chrono::Duration::from_std(ttl).context("Cache TTL out of range")?;
        let expires_at = (now + ttl).to_rfc3339();

        let active_model = search_cache::ActiveModel {
            query: Set(query.to_string()),
            results_json: Set(results_json),
            created_at: Set(now.to_rfc3339()),
            expires_at: Set(expires_at),
            ..Default::default()
        };

        SearchCache::insert(active_model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(search_cache::Column::Query)
                    .update_columns([
                        search_cache::Column::ResultsJson,
                        search_cache::Column::CreatedAt,
                        search_cache::Column::ExpiresAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.conn)
            .await?;

        Ok(())
    }

    pub async fn count_live(&self) -> Result<u64> {
        let now = chrono::Utc::now().to_rfc3339();

        let count = SearchCache::find()
            .filter(search_cache::Column::ExpiresAt.gt(now))
            .count(&self.conn)
            .await?;

        Ok(count)
    }
}
