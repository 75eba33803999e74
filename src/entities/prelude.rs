pub use super::search_cache::Entity as SearchCache;
pub use super::searched_addresses::Entity as SearchedAddresses;
