//! Subsource API client implementation.

use serde::de::DeserializeOwned;

use super::error::SubsourceError;
use super::types::{MovieSearchResponse, SubsourceId, SubtitleDownload};

const API_KEY_HEADER: &str = "X-API-Key";

/// Subsource API client. Every request carries the configured API key.
#[derive(Clone, Debug)]
pub struct SubsourceClient {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl SubsourceClient {
    /// Create a client sharing an existing `reqwest::Client`.
    pub fn new(client: reqwest::Client, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Sends a GET with the API key and maps error statuses.
    async fn send(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<reqwest::Response, SubsourceError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(SubsourceError::MissingApiKey)?;
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, api_key)
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(SubsourceError::InvalidApiKey(status.as_u16()));
        } else if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SubsourceError::RateLimited);
        } else if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SubsourceError::NotFound(path.to_string()));
        } else if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());
            let body_snippet = if body.len() > 200 {
                format!("{}...", body.chars().take(200).collect::<String>())
            } else {
                body
            };
            return Err(SubsourceError::InvalidRequest(format!(
                "HTTP {}: {}",
                status, body_snippet
            )));
        }

        Ok(response)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, SubsourceError> {
        self.send(path, params).await?.json::<T>().await.map_err(|e| {
            SubsourceError::ParseFailed(format!("Failed to deserialize response: {}", e))
        })
    }

    /// Look up Subsource movies by IMDb id.
    pub async fn search_by_imdb(
        &self,
        imdb_code: &str,
    ) -> Result<MovieSearchResponse, SubsourceError> {
        let params = [
            ("imdb", imdb_code.to_string()),
            ("searchType", "imdb".to_string()),
        ];
        self.get("/movies/search", &params).await
    }

    /// List every subtitle Subsource holds for one of its movie ids.
    pub async fn list_subtitles(
        &self,
        movie_id: &SubsourceId,
    ) -> Result<serde_json::Value, SubsourceError> {
        self.get("/subtitles", &[("movieId", movie_id.to_string())])
            .await
    }

    /// Download a subtitle archive.
    pub async fn download(&self, subtitle_id: &str) -> Result<SubtitleDownload, SubsourceError> {
        let path = format!("/subtitles/{}/download", subtitle_id);
        let response = self.send(&path, &[]).await?;

        let header = |name: reqwest::header::HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };
        let content_type = header(reqwest::header::CONTENT_TYPE);
        let content_disposition = header(reqwest::header::CONTENT_DISPOSITION);
        let body = response.bytes().await?.to_vec();

        Ok(SubtitleDownload {
            content_type,
            content_disposition,
            body,
        })
    }
}
