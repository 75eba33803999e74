//! YandexGeoClient against a mocked geocoder.

mod common;

use common::*;
use geolookup::clients::{GeoClient, YandexGeoClient};
use geolookup::config::GeocoderConfig;
use geolookup::models::Coordinates;
use geolookup::services::LookupError;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param, query_param_is_missing},
};

fn client_for(server: &MockServer) -> YandexGeoClient {
    let config = GeocoderConfig {
        base_url: server.uri(),
        api_key: API_KEY.to_string(),
        ..GeocoderConfig::default()
    };
    let http = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .unwrap();
    YandexGeoClient::with_shared_client(http, &config)
}

#[tokio::test]
async fn test_forward_geocode_sends_documented_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.x/"))
        .and(query_param("geocode", "Москва, Тверская 1"))
        .and(query_param("format", "json"))
        .and(query_param("apikey", API_KEY))
        .and(query_param("results", "5"))
        .and(query_param_is_missing("kind"))
        .respond_with(ResponseTemplate::new(200).set_body_json(geocoder_body(vec![
            address_member(
                "Россия, Москва, Тверская улица, 1",
                &[("street", "Тверская улица"), ("house", "1")],
                "37.6 55.7",
            ),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let objects = client_for(&server)
        .forward_geocode("Москва, Тверская 1")
        .await
        .unwrap();

    assert_eq!(objects.len(), 1);
    assert_eq!(objects[0].point.pos, "37.6 55.7");
    assert_eq!(objects[0].component("house"), Some("1"));
    assert_eq!(
        objects[0].formatted_address(),
        "Россия, Москва, Тверская улица, 1"
    );
}

#[tokio::test]
async fn test_nearby_stations_queries_metro_kind_at_point() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.x/"))
        .and(query_param("geocode", "37.6,55.7"))
        .and(query_param("kind", "metro"))
        .and(query_param("results", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(geocoder_body(vec![
            station_member("метро Охотный Ряд", "Сокольническая линия, Москва, Россия"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let coordinates = Coordinates::from_pos("37.6 55.7").unwrap();
    let stations = client_for(&server)
        .nearby_stations(&coordinates)
        .await
        .unwrap();

    assert_eq!(stations.len(), 1);
    assert_eq!(stations[0].name, "метро Охотный Ряд");
    assert_eq!(stations[0].description, "Сокольническая линия, Москва, Россия");
}

#[tokio::test]
async fn test_empty_collection_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.x/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(geocoder_body(vec![])))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .forward_geocode("Нигдеград")
        .await
        .unwrap_err();
    assert!(matches!(err, LookupError::NotFound(_)));
}

#[tokio::test]
async fn test_error_status_is_upstream_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.x/"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Invalid api key"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .forward_geocode("Москва, Тверская 1")
        .await
        .unwrap_err();
    assert!(matches!(err, LookupError::Upstream(_)));
}

#[tokio::test]
async fn test_malformed_body_is_upstream_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.x/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .forward_geocode("Москва, Тверская 1")
        .await
        .unwrap_err();
    assert!(matches!(err, LookupError::Upstream(_)));
}

#[tokio::test]
async fn test_unreachable_provider_is_upstream_failure() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    drop(server);

    let err = client.forward_geocode("Москва, Тверская 1").await.unwrap_err();
    assert!(matches!(err, LookupError::Upstream(_)));
}
