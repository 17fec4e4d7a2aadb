//! Error types for Subsource API operations.

use thiserror::Error;

/// Errors from Subsource API operations.
#[derive(Error, Debug)]
pub enum SubsourceError {
    #[error("Subsource API key is not configured")]
    MissingApiKey,
    #[error("Invalid API key (HTTP {0})")]
    InvalidApiKey(u16),
    #[error("Rate limited by Subsource API (HTTP 429)")]
    RateLimited,
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Failed to parse response: {0}")]
    ParseFailed(String),
    #[error("Network error")]
    Network(#[from] reqwest::Error),
}
