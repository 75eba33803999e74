//! Address lookup orchestration.
//!
//! Validate → cache lookup → on a miss: geocode, format every match, record the
//! address in history, then store the results in the cache.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

use crate::clients::GeoClient;
use crate::models::{GeoResult, SearchQuery, SearchRecord};
use crate::services::formatter;
use crate::services::history_service::SearchHistoryStore;
use crate::services::normalizer;
use crate::services::search_cache::{SearchCache, get_or_compute};

/// Terminal failures of a lookup.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Invalid address: {0}")]
    Validation(String),

    #[error("No geocoder matches for '{0}'")]
    NotFound(String),

    #[error("Geocoder request failed: {0}")]
    Upstream(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl LookupError {
    /// Text safe to show to the person who submitted the address.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::NotFound(_) => "По указанному адресу данных не найдено.".to_string(),
            Self::Upstream(_) => {
                "Сервис геокодирования недоступен. Пожалуйста, попробуйте позже.".to_string()
            }
            Self::Unexpected(_) => "Что-то пошло не так. Пожалуйста, попробуйте позже.".to_string(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound(_) => "not_found",
            Self::Upstream(_) => "upstream",
            Self::Unexpected(_) => "unexpected",
        }
    }
}

impl From<sea_orm::DbErr> for LookupError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Unexpected(err.to_string())
    }
}

/// A successful lookup: the normalized address and one result per match.
#[derive(Debug, Clone)]
pub struct LookupResult {
    pub address: SearchQuery,
    pub results: Vec<GeoResult>,
}

pub struct LookupService {
    client: Arc<dyn GeoClient>,
    cache: Arc<dyn SearchCache>,
    history: Arc<dyn SearchHistoryStore>,
    cache_ttl: Duration,
}

impl LookupService {
    #[must_use]
    pub fn new(
        client: Arc<dyn GeoClient>,
        cache: Arc<dyn SearchCache>,
        history: Arc<dyn SearchHistoryStore>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            client,
            cache,
            history,
            cache_ttl,
        }
    }

    #[instrument(skip(self, raw_address))]
    pub async fn lookup(&self, raw_address: &str) -> Result<LookupResult, LookupError> {
        metrics::counter!("lookup_requests_total").increment(1);

        let outcome = self.run(raw_address).await;

        if let Err(e) = &outcome {
            metrics::counter!("lookup_failures_total", "kind" => e.kind()).increment(1);
            match e {
                LookupError::Validation(msg) => debug!("Rejected address input: {}", msg),
                LookupError::NotFound(address) => info!("No geocoder data for '{}'", address),
                LookupError::Upstream(msg) => error!("Geocoder request failed: {}", msg),
                LookupError::Unexpected(msg) => error!("Lookup failed unexpectedly: {}", msg),
            }
        }

        outcome
    }

    async fn run(&self, raw_address: &str) -> Result<LookupResult, LookupError> {
        let address = normalizer::normalize(raw_address)?;

        let results = get_or_compute(self.cache.as_ref(), address.as_str(), self.cache_ttl, || {
            self.resolve(&address)
        })
        .await?;

        Ok(LookupResult { address, results })
    }

    async fn resolve(&self, address: &SearchQuery) -> Result<Vec<GeoResult>, LookupError> {
        let objects = self.client.forward_geocode(address.as_str()).await?;
        debug!(address = %address, matches = objects.len(), "Formatting geocoder matches");

        let mut results = Vec::with_capacity(objects.len());
        for object in objects {
            results.push(formatter::format(self.client.as_ref(), object).await?);
        }

        match self.history.record_if_absent(address.as_str()).await {
            Ok(true) => info!(address = %address, "Recorded new searched address"),
            Ok(false) => {}
            Err(e) => warn!(address = %address, error = %e, "Failed to record searched address"),
        }

        Ok(results)
    }

    /// Live entries in whichever cache backend is configured.
    pub async fn cached_entry_count(&self) -> Result<u64, LookupError> {
        self.cache
            .entry_count()
            .await
            .map_err(|e| LookupError::Unexpected(e.to_string()))
    }

    pub async fn history(&self, limit: Option<u64>) -> Result<Vec<SearchRecord>, LookupError> {
        self.history
            .list(limit)
            .await
            .map_err(|e| LookupError::Unexpected(e.to_string()))
    }
}
