//! Process-wide configuration, built once at startup and shared by reference.

use std::time::Duration;

/// Default IMDb-compatible metadata API root.
pub const DEFAULT_IMDB_API_URL: &str = "https://api.imdbapi.dev";

/// Default Subsource API root.
pub const DEFAULT_SUBSOURCE_API_URL: &str = "https://api.subsource.net/api/v1";

/// Upstream endpoints, credentials, and tuning for the listing fan-out.
#[derive(Clone, Debug)]
pub struct Config {
    pub yts_api_url: String,
    pub imdb_api_url: String,
    pub subsource_api_url: String,
    /// Sent as `X-API-Key` on every Subsource request. Subtitle routes fail without it.
    pub subsource_api_key: Option<String>,
    /// Applies to each upstream request individually, including every fan-out branch.
    pub request_timeout: Duration,
    pub fanout: FanoutSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            yts_api_url: yts_api::DEFAULT_BASE_URL.to_string(),
            imdb_api_url: DEFAULT_IMDB_API_URL.to_string(),
            subsource_api_url: DEFAULT_SUBSOURCE_API_URL.to_string(),
            subsource_api_key: None,
            request_timeout: yts_api::DEFAULT_TIMEOUT,
            fanout: FanoutSettings::default(),
        }
    }
}

/// Tuning for the year-range listing.
///
/// `max_pages * page_size` bounds how much of the upstream catalogue a single
/// year-range request can see.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FanoutSettings {
    /// Upstream pages requested concurrently, numbered from 1.
    pub max_pages: u32,
    /// `limit` sent with every fan-out request. The upstream caps this at 50.
    pub page_size: u32,
    /// Entries with a release year above this are dropped.
    pub year_threshold: i64,
    /// Page size used when the caller sends no usable `limit`.
    pub default_limit: u32,
}

impl Default for FanoutSettings {
    fn default() -> Self {
        Self {
            max_pages: 20,
            page_size: 50,
            year_threshold: 2000,
            default_limit: 20,
        }
    }
}
