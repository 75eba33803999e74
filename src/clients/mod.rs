pub mod yandex;

pub use yandex::{GeoClient, GeoObject, YandexGeoClient};
