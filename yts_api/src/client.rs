//! HTTP client for the YTS v2 JSON API.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    query::{MovieDetailsQuery, MovieListQuery, Query, SuggestionsQuery},
    types::{MovieList, Response},
    Error,
};

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://yts.lt/api/v2";

/// Per-request timeout used when the caller does not supply its own `reqwest::Client`.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("ytswrap/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the YTS API.
///
/// Cloning is cheap: the inner `reqwest::Client` is reference counted and
/// every clone shares one connection pool, so many concurrent requests can
/// be in flight through clones of the same client.
#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
    /// Base URL for the API, without a trailing slash.
    base_api_url: String,
}

impl Client {
    /// Creates a client pointing at the production API.
    pub fn new() -> Result<Self, Error> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        Ok(Self::from_parts(http, base_url))
    }

    /// Creates a client around an existing `reqwest::Client`, sharing its pool and timeout.
    pub fn from_parts(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_api_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    fn get_url(&self, path: &str, query: Option<&impl Query>) -> Result<Url, Error> {
        let url = Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })?;
        Ok(match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        })
    }

    async fn get<T, Q>(&self, path: &str, query: Option<&Q>) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let url = self.get_url(path, query)?;
        let resp = self
            .http
            .get(url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    tracing::debug!("Request timed out: {}", e);
                    Error::Timeout
                } else {
                    tracing::debug!("Failed to get resource: {}", e);
                    Error::RequestFailed
                }
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::debug!("Failed to read response body: {}", e);
            if e.is_timeout() {
                Error::Timeout
            } else {
                Error::RequestFailed
            }
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::debug!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        serde_json::from_str::<T>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::debug!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::ParseFailed(e.to_string())
        })
    }

    /// Renders the full `list_movies.json` URL for a query, for logging.
    pub fn list_movies_url(&self, query: &MovieListQuery) -> Result<Url, Error> {
        self.get_url("/list_movies.json", Some(query))
    }

    /// Fetches one page of the movie listing, decoded into typed pagination fields.
    pub async fn list_movies(&self, query: &MovieListQuery) -> Result<Response<MovieList>, Error> {
        self.get::<Response<MovieList>, MovieListQuery>("/list_movies.json", Some(query))
            .await
    }

    /// Fetches one page of the movie listing and returns the body untouched.
    pub async fn list_movies_raw(
        &self,
        query: &MovieListQuery,
    ) -> Result<serde_json::Value, Error> {
        self.get::<serde_json::Value, MovieListQuery>("/list_movies.json", Some(query))
            .await
    }

    /// Fetches the details document for a single movie.
    pub async fn movie_details(
        &self,
        query: &MovieDetailsQuery,
    ) -> Result<serde_json::Value, Error> {
        self.get::<serde_json::Value, MovieDetailsQuery>("/movie_details.json", Some(query))
            .await
    }

    /// Fetches the suggestions related to a movie.
    pub async fn movie_suggestions(
        &self,
        query: &SuggestionsQuery,
    ) -> Result<serde_json::Value, Error> {
        self.get::<serde_json::Value, SuggestionsQuery>("/movie_suggestions.json", Some(query))
            .await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
