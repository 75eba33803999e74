pub mod formatter;
pub mod normalizer;

pub mod search_cache;
pub use search_cache::{MemorySearchCache, SeaOrmSearchCache, SearchCache};

pub mod history_service;
pub use history_service::{SeaOrmHistoryStore, SearchHistoryStore};

pub mod lookup_service;
pub use lookup_service::{LookupError, LookupResult, LookupService};
