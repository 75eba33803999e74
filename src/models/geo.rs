use serde::{Deserialize, Serialize};
use std::fmt;

/// A provider point, kept in the provider's own textual precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lon: String,
    pub lat: String,
}

impl Coordinates {
    /// Parses the provider's `"lon lat"` position string.
    ///
    /// Returns `None` unless there are exactly two numeric parts.
    #[must_use]
    pub fn from_pos(pos: &str) -> Option<Self> {
        let mut parts = pos.split_whitespace();
        let lon = parts.next()?;
        let lat = parts.next()?;

        if parts.next().is_some() || lon.parse::<f64>().is_err() || lat.parse::<f64>().is_err() {
            return None;
        }

        Some(Self {
            lon: lon.to_string(),
            lat: lat.to_string(),
        })
    }

    /// `"lon,lat"`, the form the geocoder accepts as a query.
    #[must_use]
    pub fn query_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lon, self.lat)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoResult {
    pub formatted_address: String,
    pub street: String,
    pub house: String,
    pub district: String,
    pub coordinates: Coordinates,
    pub nearby_stations: Vec<Station>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub id: i32,
    pub normalized_address: String,
    pub first_seen_at: String,
}

impl From<crate::entities::searched_addresses::Model> for SearchRecord {
    fn from(model: crate::entities::searched_addresses::Model) -> Self {
        Self {
            id: model.id,
            normalized_address: model.normalized_address,
            first_seen_at: model.first_seen_at,
        }
    }
}
