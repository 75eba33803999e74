//! Health checks and runtime status.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, SystemStatus};

#[derive(Debug, Serialize)]
pub struct HealthLiveResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthReadinessChecks {
    pub database: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthReadyResponse {
    pub ready: bool,
    pub checks: HealthReadinessChecks,
}

/// `GET /api/health/live`
pub async fn health_live() -> impl IntoResponse {
    Json(ApiResponse::success(HealthLiveResponse { status: "alive" }))
}

/// `GET /api/health/ready`
///
/// Ready once the database answers a ping.
pub async fn health_ready(State(state): State<Arc<AppState>>) -> Response {
    let db_ready = state.store().ping().await.is_ok();

    let status = if db_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ApiResponse::success(HealthReadyResponse {
            ready: db_ready,
            checks: HealthReadinessChecks { database: db_ready },
        })),
    )
        .into_response()
}

/// `GET /api/status`
pub async fn get_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<SystemStatus>>, ApiError> {
    let cache_backend = format!("{:?}", state.config().read().await.cache.backend).to_lowercase();
    let cached_lookups = state.lookup_service().cached_entry_count().await?;
    let searched_addresses = state.store().searched_address_count().await?;

    Ok(Json(ApiResponse::success(SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        cache_backend,
        cached_lookups,
        searched_addresses,
    })))
}
