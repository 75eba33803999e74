use serde::{Deserialize, Serialize};

use crate::models::{GeoResult, SearchRecord};

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    #[serde(default)]
    pub address: String,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<u64>,
}

/// HTML form body for `POST /get-info`.
#[derive(Debug, Deserialize)]
pub struct AddressForm {
    #[serde(default)]
    pub address: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LookupResponse {
    pub address: String,
    pub results: Vec<GeoResult>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub total: usize,
    pub addresses: Vec<SearchRecord>,
}

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: String,
    pub uptime_seconds: u64,
    pub cache_backend: String,
    pub cached_lookups: u64,
    pub searched_addresses: u64,
}
