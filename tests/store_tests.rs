use std::time::Duration;

use geolookup::db::Store;
use geolookup::models::{Coordinates, GeoResult, Station};
use sea_orm::ConnectionTrait;

async fn temp_store() -> Store {
    let db_path =
        std::env::temp_dir().join(format!("geolookup-store-test-{}.db", uuid::Uuid::new_v4()));
    Store::new(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("Failed to open store")
}

fn sample(house: &str) -> Vec<GeoResult> {
    vec![GeoResult {
        formatted_address: format!("Россия, Москва, Тверская улица, {house}"),
        street: "Тверская улица".to_string(),
        house: house.to_string(),
        district: "Москва".to_string(),
        coordinates: Coordinates::from_pos("37.6 55.7").unwrap(),
        nearby_stations: vec![Station {
            name: "метро Тверская".to_string(),
            description: "Замоскворецкая линия, Москва, Россия".to_string(),
        }],
    }]
}

#[tokio::test]
async fn test_cached_lookup_round_trips_within_ttl() {
    let store = temp_store().await;
    let day = Duration::from_secs(24 * 3600);

    assert!(store.get_cached_lookup("Москва, Тверская 1").await.unwrap().is_none());

    store
        .cache_lookup_results("Москва, Тверская 1", &sample("1"), day)
        .await
        .unwrap();

    let cached = store.get_cached_lookup("Москва, Тверская 1").await.unwrap();
    assert_eq!(cached, Some(sample("1")));
    assert_eq!(store.cached_lookup_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_cache_put_replaces_existing_entry() {
    let store = temp_store().await;
    let day = Duration::from_secs(24 * 3600);

    store.cache_lookup_results("key", &sample("1"), day).await.unwrap();
    store.cache_lookup_results("key", &sample("2"), day).await.unwrap();

    assert_eq!(store.get_cached_lookup("key").await.unwrap(), Some(sample("2")));
    assert_eq!(store.cached_lookup_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_search_cache_query_is_unique() {
    let store = temp_store().await;
    let day = Duration::from_secs(24 * 3600);

    store.cache_lookup_results("key", &sample("1"), day).await.unwrap();

    let duplicate = store
        .conn
        .execute_unprepared(
            "INSERT INTO search_cache (query, results_json, created_at, expires_at) \
             VALUES ('key', '[]', '2026-01-01T00:00:00Z', '2999-01-01T00:00:00Z')",
        )
        .await;
    assert!(duplicate.is_err());
    assert_eq!(store.cached_lookup_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_expired_cache_entry_is_a_miss() {
    let store = temp_store().await;

    store
        .cache_lookup_results("key", &sample("1"), Duration::from_millis(1))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(store.get_cached_lookup("key").await.unwrap().is_none());
    assert_eq!(store.cached_lookup_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_searched_address_is_recorded_once() {
    let store = temp_store().await;

    assert_eq!(store.searched_address_count().await.unwrap(), 0);
    assert!(store.record_searched_address("Москва, Тверская 1").await.unwrap());
    assert!(!store.record_searched_address("Москва, Тверская 1").await.unwrap());
    assert!(store.record_searched_address("Москва, Арбат 10").await.unwrap());

    assert_eq!(store.searched_address_count().await.unwrap(), 2);

    let records = store.list_searched_addresses(None).await.unwrap();
    let addresses: Vec<_> = records.iter().map(|r| r.normalized_address.as_str()).collect();
    assert_eq!(addresses, vec!["Москва, Тверская 1", "Москва, Арбат 10"]);
    assert!(!records[0].first_seen_at.is_empty());

    assert_eq!(store.list_searched_addresses(Some(1)).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_concurrent_first_searches_record_one_row() {
    let store = temp_store().await;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move { store.record_searched_address("Москва, Тверская 1").await })
        })
        .collect();

    let mut inserted = 0;
    for handle in handles {
        if handle.await.unwrap().unwrap() {
            inserted += 1;
        }
    }

    assert_eq!(inserted, 1);
    assert_eq!(store.searched_address_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_ping() {
    let store = temp_store().await;
    store.ping().await.unwrap();
}
