use tracing::debug;

use crate::clients::{GeoClient, GeoObject};
use crate::models::{Coordinates, GeoResult};
use crate::services::LookupError;

pub const STREET_KIND: &str = "street";
pub const HOUSE_KIND: &str = "house";
pub const DISTRICT_KIND: &str = "locality";

/// Builds the flat result for one geocoder match, resolving its nearby
/// stations through `client`.
///
/// Missing address components become empty strings. A match with no metro
/// nearby gets an empty station list; any other station lookup failure is
/// returned as is.
pub async fn format(client: &dyn GeoClient, object: GeoObject) -> Result<GeoResult, LookupError> {
    let coordinates = Coordinates::from_pos(&object.point.pos).ok_or_else(|| {
        LookupError::Unexpected(format!("malformed point position '{}'", object.point.pos))
    })?;

    let nearby_stations = match client.nearby_stations(&coordinates).await {
        Ok(stations) => stations,
        Err(LookupError::NotFound(_)) => {
            debug!(%coordinates, "No stations near match");
            Vec::new()
        }
        Err(e) => return Err(e),
    };

    let component = |kind: &str| object.component(kind).unwrap_or_default().to_string();

    Ok(GeoResult {
        formatted_address: object.formatted_address().to_string(),
        street: component(STREET_KIND),
        house: component(HOUSE_KIND),
        district: component(DISTRICT_KIND),
        coordinates,
        nearby_stations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::yandex::{Address, AddressComponent};
    use crate::models::Station;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StationStub {
        outcome: fn() -> Result<Vec<Station>, LookupError>,
        queries: Mutex<Vec<String>>,
    }

    impl StationStub {
        fn new(outcome: fn() -> Result<Vec<Station>, LookupError>) -> Self {
            Self {
                outcome,
                queries: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl GeoClient for StationStub {
        async fn forward_geocode(&self, _address: &str) -> Result<Vec<GeoObject>, LookupError> {
            unreachable!("formatter never geocodes forward")
        }

        async fn nearby_stations(
            &self,
            coordinates: &Coordinates,
        ) -> Result<Vec<Station>, LookupError> {
            self.queries.lock().unwrap().push(coordinates.query_key());
            (self.outcome)()
        }
    }

    fn object(pos: &str, components: &[(&str, &str)]) -> GeoObject {
        let mut object = GeoObject::default();
        object.point.pos = pos.to_string();
        object.meta_data_property.geocoder_meta_data.address = Address {
            formatted: "Россия, Москва, Тверская улица, 1".to_string(),
            components: components
                .iter()
                .map(|(kind, name)| AddressComponent {
                    kind: (*kind).to_string(),
                    name: (*name).to_string(),
                })
                .collect(),
        };
        object
    }

    fn one_station() -> Result<Vec<Station>, LookupError> {
        Ok(vec![Station {
            name: "метро Охотный Ряд".to_string(),
            description: "Сокольническая линия, Москва".to_string(),
        }])
    }

    #[tokio::test]
    async fn test_format_extracts_components_and_queries_stations() {
        let client = StationStub::new(one_station);
        let geo = object(
            "37.6 55.7",
            &[("street", "Тверская"), ("house", "1"), ("locality", "Москва")],
        );

        let result = format(&client, geo).await.unwrap();

        assert_eq!(result.street, "Тверская");
        assert_eq!(result.house, "1");
        assert_eq!(result.district, "Москва");
        assert_eq!(result.coordinates.to_string(), "37.6,55.7");
        assert_eq!(result.formatted_address, "Россия, Москва, Тверская улица, 1");
        assert_eq!(result.nearby_stations.len(), 1);
        assert_eq!(*client.queries.lock().unwrap(), vec!["37.6,55.7".to_string()]);
    }

    #[tokio::test]
    async fn test_format_takes_first_component_of_each_kind() {
        let client = StationStub::new(one_station);
        let geo = object(
            "37.6 55.7",
            &[
                ("locality", "Москва"),
                ("locality", "Зеленоград"),
                ("street", "Тверская"),
            ],
        );

        let result = format(&client, geo).await.unwrap();
        assert_eq!(result.district, "Москва");
        assert_eq!(result.house, "");
    }

    #[tokio::test]
    async fn test_format_defaults_missing_components() {
        let client = StationStub::new(one_station);
        let result = format(&client, object("37.6 55.7", &[])).await.unwrap();

        assert_eq!(result.street, "");
        assert_eq!(result.house, "");
        assert_eq!(result.district, "");
    }

    #[tokio::test]
    async fn test_format_without_nearby_stations() {
        let client = StationStub::new(|| Err(LookupError::NotFound("37.6,55.7".to_string())));
        let result = format(&client, object("37.6 55.7", &[])).await.unwrap();
        assert!(result.nearby_stations.is_empty());
    }

    #[tokio::test]
    async fn test_format_propagates_upstream_failure() {
        let client = StationStub::new(|| Err(LookupError::Upstream("HTTP 503".to_string())));
        let err = format(&client, object("37.6 55.7", &[])).await.unwrap_err();
        assert!(matches!(err, LookupError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_format_rejects_malformed_point() {
        let client = StationStub::new(one_station);
        let err = format(&client, object("nowhere", &[])).await.unwrap_err();
        assert!(matches!(err, LookupError::Unexpected(_)));
        assert!(client.queries.lock().unwrap().is_empty());
    }
}
