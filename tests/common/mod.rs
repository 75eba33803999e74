#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode},
};
use geolookup::config::Config;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::MockServer;

pub const API_KEY: &str = "test-api-key";

pub fn test_config(server: &MockServer) -> Config {
    let db_path =
        std::env::temp_dir().join(format!("geolookup-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.geocoder.base_url = server.uri();
    config.geocoder.api_key = API_KEY.to_string();
    config.geocoder.request_timeout_seconds = 5;
    config
}

pub async fn spawn_app_with(config: Config) -> Router {
    let state = geolookup::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    geolookup::api::router(state).await
}

pub async fn spawn_app(server: &MockServer) -> Router {
    spawn_app_with(test_config(server)).await
}

/// Geocoder envelope around the given feature members.
pub fn geocoder_body(members: Vec<Value>) -> Value {
    json!({
        "response": {
            "GeoObjectCollection": {
                "metaDataProperty": {
                    "GeocoderResponseMetaData": { "found": members.len().to_string() }
                },
                "featureMember": members
            }
        }
    })
}

pub fn address_member(formatted: &str, components: &[(&str, &str)], pos: &str) -> Value {
    let components: Vec<Value> = components
        .iter()
        .map(|(kind, name)| json!({ "kind": kind, "name": name }))
        .collect();

    json!({
        "GeoObject": {
            "metaDataProperty": {
                "GeocoderMetaData": {
                    "kind": "house",
                    "text": formatted,
                    "Address": {
                        "country_code": "RU",
                        "formatted": formatted,
                        "Components": components
                    }
                }
            },
            "name": "Тверская улица, 1",
            "description": "Москва, Россия",
            "Point": { "pos": pos }
        }
    })
}

pub fn station_member(name: &str, description: &str) -> Value {
    json!({
        "GeoObject": {
            "metaDataProperty": {
                "GeocoderMetaData": { "kind": "metro", "text": format!("{description}, {name}") }
            },
            "name": name,
            "description": description,
            "Point": { "pos": "37.615 55.757" }
        }
    })
}

pub fn form_body(address: &str) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .append_pair("address", address)
        .finish()
}

pub fn lookup_uri(address: &str) -> String {
    format!("/api/lookup?{}", form_body(address))
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_form(app: &Router, uri: &str, address: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from(form_body(address)))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = get(app, uri).await;
    let status = response.status();
    (status, body_json(response).await)
}
