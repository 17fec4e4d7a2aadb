//! Error types for IMDb metadata API operations.

use thiserror::Error;

/// Errors from IMDb metadata API operations.
#[derive(Error, Debug)]
pub enum ImdbError {
    #[error("Title not found: {0}")]
    NotFound(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Failed to parse response: {0}")]
    ParseFailed(String),
    #[error("Network error")]
    Network(#[from] reqwest::Error),
}
