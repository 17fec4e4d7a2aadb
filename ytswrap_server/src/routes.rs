use std::any::Any;
use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use ytswrap_lib::filters::FilterCatalogue;
use ytswrap_lib::{validation, ListingRequest, MovieListing, PortalClient};

use crate::error::{
    HttpError, DOWNLOAD_SUBTITLE, FETCH_DETAILS, FETCH_IMDB, FETCH_MOVIES, FETCH_SUBTITLES,
    FETCH_SUGGESTIONS, UNHANDLED,
};

/// Shared by every handler. Built once in `main`.
pub struct AppState {
    pub client: PortalClient,
}

pub type SharedAppState = Arc<AppState>;

impl AppState {
    pub fn shared(client: PortalClient) -> SharedAppState {
        Arc::new(Self { client })
    }
}

pub fn router(state: SharedAppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/movies", get(list_movies))
        .route("/api/search", get(list_movies))
        .route("/api/movies/{id}", get(movie_details))
        .route("/api/imdb/{imdb_code}", get(imdb_details))
        .route("/api/suggestions/{id}", get(suggestions))
        .route("/api/subtitles", get(subtitles))
        .route("/api/subtitles/{id}/download", get(download_subtitle))
        .route("/api/filters", get(filters))
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn root() -> impl IntoResponse {
    Json(json!({ "message": "YTS Wrapper API is running" }))
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Serves both `/api/movies` and `/api/search`; they take the same parameters.
async fn list_movies(
    State(state): State<SharedAppState>,
    Query(params): Query<BTreeMap<String, String>>,
) -> Result<Json<MovieListing>, HttpError> {
    let request = ListingRequest::from_params(&params).map_err(HttpError::context(FETCH_MOVIES))?;
    let listing = state
        .client
        .list_movies(&request)
        .await
        .map_err(HttpError::context(FETCH_MOVIES))?;
    Ok(Json(listing))
}

async fn movie_details(
    State(state): State<SharedAppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, HttpError> {
    let movie_id = validation::validate_movie_id(&id).map_err(HttpError::context(FETCH_DETAILS))?;
    tracing::info!("Fetching movie details for ID: {}", movie_id);
    let details = state
        .client
        .movie_details(movie_id)
        .await
        .map_err(HttpError::context(FETCH_DETAILS))?;
    Ok(Json(details))
}

async fn imdb_details(
    State(state): State<SharedAppState>,
    Path(imdb_code): Path<String>,
) -> Result<Json<Value>, HttpError> {
    let code = validation::validate_imdb_code(&imdb_code).map_err(HttpError::context(FETCH_IMDB))?;
    let title = state
        .client
        .imdb_title(&code)
        .await
        .map_err(HttpError::context(FETCH_IMDB))?;
    Ok(Json(title))
}

async fn suggestions(
    State(state): State<SharedAppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, HttpError> {
    let movie_id =
        validation::validate_movie_id(&id).map_err(HttpError::context(FETCH_SUGGESTIONS))?;
    let body = state
        .client
        .suggestions(movie_id)
        .await
        .map_err(HttpError::context(FETCH_SUGGESTIONS))?;
    Ok(Json(body))
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SubtitleQuery {
    #[serde(rename = "imdbId")]
    imdb_id: Option<String>,
}

async fn subtitles(
    State(state): State<SharedAppState>,
    Query(query): Query<SubtitleQuery>,
) -> Result<Json<Value>, HttpError> {
    let raw = query
        .imdb_id
        .filter(|id| !id.trim().is_empty())
        .ok_or(HttpError::MissingParameter("IMDB ID is required"))?;
    let code = validation::validate_imdb_code(&raw).map_err(HttpError::context(FETCH_SUBTITLES))?;
    tracing::info!("Fetching subtitles for IMDB ID: {}", code);
    let body = state
        .client
        .subtitles(&code)
        .await
        .map_err(HttpError::context(FETCH_SUBTITLES))?;
    Ok(Json(body))
}

async fn download_subtitle(
    State(state): State<SharedAppState>,
    Path(id): Path<String>,
) -> Result<Response, HttpError> {
    let subtitle_id =
        validation::validate_subtitle_id(&id).map_err(HttpError::context(DOWNLOAD_SUBTITLE))?;
    tracing::info!("Downloading subtitle {}", subtitle_id);
    let download = state
        .client
        .download_subtitle(&subtitle_id)
        .await
        .map_err(HttpError::context(DOWNLOAD_SUBTITLE))?;

    let content_type = download
        .content_type
        .unwrap_or_else(|| "application/zip".to_string());
    let disposition = download
        .content_disposition
        .unwrap_or_else(|| format!("attachment; filename=\"subtitle-{}.zip\"", subtitle_id));

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        download.body,
    )
        .into_response())
}

async fn filters() -> impl IntoResponse {
    Json(FilterCatalogue::current())
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("handler panicked: {}", detail);

    (
        axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": UNHANDLED })),
    )
        .into_response()
}
