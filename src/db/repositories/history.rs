use crate::entities::{prelude::*, searched_addresses};
use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

pub struct HistoryRepository {
    conn: DatabaseConnection,
}

impl HistoryRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn exists(&self, address: &str) -> Result<bool> {
        let count = SearchedAddresses::find()
            .filter(searched_addresses::Column::NormalizedAddress.eq(address))
            .count(&self.conn)
            .await?;

        Ok(count > 0)
    }

    /// Inserts `address` unless a row already holds it. Returns whether a row
    /// was written.
    pub async fn insert_if_absent(&self, address: &str) -> Result<bool> {
        if self.exists(address).await? {
            return Ok(false);
        }

        let active_model = searched_addresses::ActiveModel {
            normalized_address: Set(address.to_string()),
            first_seen_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        // The unique index settles a race between two first-time searches.
        let inserted = SearchedAddresses::insert(active_model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(
                    searched_addresses::Column::NormalizedAddress,
                )
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        Ok(inserted > 0)
    }

    pub async fn list(&self, limit: Option<u64>) -> Result<Vec<searched_addresses::Model>> {
        let rows = SearchedAddresses::find()
            .order_by_asc(searched_addresses::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?;

        Ok(rows)
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(SearchedAddresses::find().count(&self.conn).await?)
    }
}
