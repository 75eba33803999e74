use async_trait::async_trait;

use crate::db::Store;
use crate::models::SearchRecord;

/// Append-only record of every distinct address that was searched.
#[async_trait]
pub trait SearchHistoryStore: Send + Sync {
    /// Stores `address` unless an identical one is already recorded.
    /// Returns `true` when a new record was written.
    async fn record_if_absent(&self, address: &str) -> anyhow::Result<bool>;

    /// Recorded addresses, oldest first.
    async fn list(&self, limit: Option<u64>) -> anyhow::Result<Vec<SearchRecord>>;
}

pub struct SeaOrmHistoryStore {
    store: Store,
}

impl SeaOrmHistoryStore {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SearchHistoryStore for SeaOrmHistoryStore {
    async fn record_if_absent(&self, address: &str) -> anyhow::Result<bool> {
        self.store.record_searched_address(address).await
    }

    async fn list(&self, limit: Option<u64>) -> anyhow::Result<Vec<SearchRecord>> {
        self.store.list_searched_addresses(limit).await
    }
}
