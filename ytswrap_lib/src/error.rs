//! Error types for the library layer.

use std::fmt;

use crate::imdb::ImdbError;
use crate::subsource::SubsourceError;

/// Errors produced by the library layer, wrapping the upstream client errors
/// and adding input validation failures.
#[derive(Debug)]
pub enum PortalError {
    /// An error from the YTS client.
    Yts(yts_api::Error),
    /// An error from the IMDb metadata client.
    Imdb(ImdbError),
    /// An error from the Subsource subtitle client.
    Subsource(SubsourceError),
    /// User-provided input failed validation.
    InvalidInput(String),
    /// The configuration could not be turned into working clients.
    Config(String),
}

impl fmt::Display for PortalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yts(e) => write!(f, "YTS API error: {}", e),
            Self::Imdb(e) => write!(f, "IMDb API error: {}", e),
            Self::Subsource(e) => write!(f, "Subsource API error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for PortalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Yts(e) => Some(e),
            Self::Imdb(e) => Some(e),
            Self::Subsource(e) => Some(e),
            Self::InvalidInput(_) | Self::Config(_) => None,
        }
    }
}

impl From<yts_api::Error> for PortalError {
    fn from(e: yts_api::Error) -> Self {
        Self::Yts(e)
    }
}

impl From<ImdbError> for PortalError {
    fn from(e: ImdbError) -> Self {
        Self::Imdb(e)
    }
}

impl From<SubsourceError> for PortalError {
    fn from(e: SubsourceError) -> Self {
        Self::Subsource(e)
    }
}
