pub mod prelude;

pub mod search_cache;
pub mod searched_addresses;
