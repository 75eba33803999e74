use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;

use super::{
    ApiError, ApiResponse, AppState, HistoryQuery, HistoryResponse, LookupQuery, LookupResponse,
};

const MAX_HISTORY_LIMIT: u64 = 1000;

/// `GET /api/lookup?address=...`
pub async fn lookup_address(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<ApiResponse<LookupResponse>>, ApiError> {
    let found = state.lookup_service().lookup(&query.address).await?;

    Ok(Json(ApiResponse::success(LookupResponse {
        address: found.address.into_inner(),
        results: found.results,
    })))
}

/// `GET /api/history?limit=...`
pub async fn list_history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ApiResponse<HistoryResponse>>, ApiError> {
    if let Some(limit) = query.limit.filter(|l| !(1..=MAX_HISTORY_LIMIT).contains(l)) {
        return Err(ApiError::validation(format!(
            "Invalid limit: {limit}. Limit must be between 1 and {MAX_HISTORY_LIMIT}"
        )));
    }

    let addresses = state.lookup_service().history(query.limit).await?;

    Ok(Json(ApiResponse::success(HistoryResponse {
        total: addresses.len(),
        addresses,
    })))
}
