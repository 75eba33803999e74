//! Client for the Yandex Geocoder HTTP API (1.x).
//!
//! One endpoint serves both lookups: a free-text forward geocode, and a
//! `kind=metro` toponym search around a `"lon,lat"` point.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::GeocoderConfig;
use crate::constants;
use crate::models::{Coordinates, Station};
use crate::services::LookupError;

#[derive(Debug, Deserialize)]
struct GeocoderResponse {
    response: ResponseBody,
}

#[derive(Debug, Deserialize)]
struct ResponseBody {
    #[serde(rename = "GeoObjectCollection")]
    collection: GeoObjectCollection,
}

#[derive(Debug, Deserialize)]
struct GeoObjectCollection {
    #[serde(rename = "featureMember", default)]
    feature_member: Vec<FeatureMember>,
}

#[derive(Debug, Deserialize)]
struct FeatureMember {
    #[serde(rename = "GeoObject")]
    geo_object: GeoObject,
}

/// A single candidate match returned by the geocoder.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeoObject {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "metaDataProperty", default)]
    pub meta_data_property: MetaDataProperty,
    #[serde(rename = "Point", default)]
    pub point: Point,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetaDataProperty {
    #[serde(rename = "GeocoderMetaData", default)]
    pub geocoder_meta_data: GeocoderMetaData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocoderMetaData {
    #[serde(default)]
    pub text: String,
    #[serde(rename = "Address", default)]
    pub address: Address,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub formatted: String,
    #[serde(rename = "Components", default)]
    pub components: Vec<AddressComponent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddressComponent {
    pub kind: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Point {
    #[serde(default)]
    pub pos: String,
}

impl GeoObject {
    /// Name of the first address component of the given kind.
    #[must_use]
    pub fn component(&self, kind: &str) -> Option<&str> {
        self.meta_data_property
            .geocoder_meta_data
            .address
            .components
            .iter()
            .find(|c| c.kind == kind)
            .map(|c| c.name.as_str())
    }

    #[must_use]
    pub fn formatted_address(&self) -> &str {
        let meta = &self.meta_data_property.geocoder_meta_data;
        if meta.address.formatted.is_empty() {
            &meta.text
        } else {
            &meta.address.formatted
        }
    }
}

impl From<GeoObject> for Station {
    fn from(object: GeoObject) -> Self {
        Self {
            name: object.name,
            description: object.description,
        }
    }
}

/// Outbound geocoding operations the lookup pipeline depends on.
#[async_trait]
pub trait GeoClient: Send + Sync {
    /// Up to `max_results` matches for a free-text address.
    ///
    /// # Errors
    ///
    /// - [`LookupError::Upstream`] on transport, HTTP or decoding failure
    /// - [`LookupError::NotFound`] when the provider returns no matches
    async fn forward_geocode(&self, address: &str) -> Result<Vec<GeoObject>, LookupError>;

    /// Up to `max_results` metro stations near `coordinates`.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`GeoClient::forward_geocode`].
    async fn nearby_stations(&self, coordinates: &Coordinates)
    -> Result<Vec<Station>, LookupError>;
}

#[derive(Clone)]
pub struct YandexGeoClient {
    client: Client,
    endpoint: String,
    api_key: String,
    max_results: u32,
    station_kind: String,
}

impl std::fmt::Debug for YandexGeoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YandexGeoClient")
            .field("endpoint", &self.endpoint)
            .field("max_results", &self.max_results)
            .finish_non_exhaustive()
    }
}

impl YandexGeoClient {
    #[must_use]
    pub fn with_shared_client(client: Client, config: &GeocoderConfig) -> Self {
        let endpoint = format!(
            "{}{}",
            config.base_url.trim_end_matches('/'),
            constants::geocoder::API_PATH
        );

        Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
            max_results: config.max_results,
            station_kind: config.station_kind.clone(),
        }
    }

    async fn fetch(&self, geocode: &str, kind: Option<&str>) -> Result<Vec<GeoObject>, LookupError> {
        let results = self.max_results.to_string();
        let mut params = vec![
            ("geocode", geocode),
            ("format", "json"),
            ("apikey", self.api_key.as_str()),
        ];
        if let Some(kind) = kind {
            params.push(("kind", kind));
        }
        params.push(("results", results.as_str()));

        let request_kind = kind.unwrap_or("address");
        metrics::counter!("geocoder_requests_total", "kind" => request_kind.to_string())
            .increment(1);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                metrics::counter!("geocoder_errors_total", "kind" => request_kind.to_string())
                    .increment(1);
                LookupError::Upstream(format!("request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, body = %body, "Geocoder returned an error status");
            metrics::counter!("geocoder_errors_total", "kind" => request_kind.to_string())
                .increment(1);
            return Err(LookupError::Upstream(format!("HTTP {status}")));
        }

        let body: GeocoderResponse = response
            .json()
            .await
            .map_err(|e| LookupError::Upstream(format!("invalid response body: {e}")))?;

        let objects: Vec<GeoObject> = body
            .response
            .collection
            .feature_member
            .into_iter()
            .map(|m| m.geo_object)
            .collect();

        debug!(geocode, kind = request_kind, matches = objects.len(), "Geocoder responded");

        if objects.is_empty() {
            return Err(LookupError::NotFound(geocode.to_string()));
        }

        Ok(objects)
    }
}

#[async_trait]
impl GeoClient for YandexGeoClient {
    #[instrument(skip(self))]
    async fn forward_geocode(&self, address: &str) -> Result<Vec<GeoObject>, LookupError> {
        self.fetch(address, None).await
    }

    #[instrument(skip(self, coordinates), fields(coordinates = %coordinates))]
    async fn nearby_stations(
        &self,
        coordinates: &Coordinates,
    ) -> Result<Vec<Station>, LookupError> {
        let objects = self
            .fetch(&coordinates.query_key(), Some(self.station_kind.as_str()))
            .await?;

        Ok(objects.into_iter().map(Station::from).collect())
    }
}
