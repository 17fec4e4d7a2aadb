use std::borrow::Cow;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use ytswrap_lib::subsource::SubsourceError;
use ytswrap_lib::PortalError;

pub const FETCH_MOVIES: &str = "Failed to fetch movies";
pub const FETCH_DETAILS: &str = "Failed to fetch movie details";
pub const FETCH_IMDB: &str = "Failed to fetch IMDB details";
pub const FETCH_SUGGESTIONS: &str = "Failed to fetch suggestions";
pub const FETCH_SUBTITLES: &str = "Failed to fetch subtitles";
pub const DOWNLOAD_SUBTITLE: &str = "Failed to download subtitle";
pub const UNHANDLED: &str = "Something went wrong!";

/// Handler failure, rendered as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("{0}")]
    MissingParameter(&'static str),
    /// `context` is the message clients see when the failure is on our side.
    #[error("{context}: {source}")]
    Portal {
        context: &'static str,
        source: PortalError,
    },
}

impl HttpError {
    /// Adapter for `map_err` that tags a library error with the endpoint's message.
    pub fn context(context: &'static str) -> impl FnOnce(PortalError) -> Self {
        move |source| HttpError::Portal { context, source }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message): (StatusCode, Cow<'static, str>) = match &self {
            HttpError::MissingParameter(message) => (StatusCode::BAD_REQUEST, Cow::from(*message)),
            HttpError::Portal {
                source: PortalError::InvalidInput(message),
                ..
            } => (StatusCode::BAD_REQUEST, Cow::from(message.clone())),
            HttpError::Portal {
                source: PortalError::Subsource(SubsourceError::MissingApiKey),
                ..
            } => (
                StatusCode::SERVICE_UNAVAILABLE,
                Cow::from("Subtitle service is not configured"),
            ),
            HttpError::Portal { context, .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, Cow::from(*context))
            }
        };

        if status.is_server_error() {
            tracing::error!("request failed: {self}");
        } else {
            tracing::warn!("request rejected: {self}");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}
