pub mod address;
pub mod geo;

pub use address::SearchQuery;
pub use geo::{Coordinates, GeoResult, SearchRecord, Station};
