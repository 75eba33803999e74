pub mod address {
    pub const MIN_LENGTH: usize = 5;

    pub const MAX_LENGTH: usize = 255;
}

pub mod cache {
    pub const RESULTS_TTL_HOURS: u64 = 24;

    pub const MAX_TTL_HOURS: u64 = 24 * 365;
}

pub mod geocoder {
    pub const MAX_RESULTS: u32 = 5;

    pub const STATION_KIND: &str = "metro";

    pub const API_PATH: &str = "/1.x/";
}

pub mod limits {
    pub const DEFAULT_HISTORY_LIMIT: u64 = 50;
}
