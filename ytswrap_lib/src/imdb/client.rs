//! IMDb metadata API client implementation.

use serde::de::DeserializeOwned;

use super::error::ImdbError;
use super::types::Title;

/// Client for an IMDb-compatible metadata API (`/titles/{id}`).
#[derive(Clone, Debug)]
pub struct ImdbClient {
    client: reqwest::Client,
    base_url: String,
}

impl ImdbClient {
    /// Create a client sharing an existing `reqwest::Client` (and its pool and timeout).
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ImdbError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ImdbError::NotFound(path.to_string()));
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
            return Err(ImdbError::InvalidRequest(format!(
                "HTTP {}: {}",
                status, body_snippet
            )));
        }

        response.json::<T>().await.map_err(|e| {
            ImdbError::ParseFailed(format!("Failed to deserialize response: {}", e))
        })
    }

    /// Fetch the enrichment fields of a title.
    pub async fn get_title(&self, imdb_code: &str) -> Result<Title, ImdbError> {
        self.get(&format!("/titles/{}", imdb_code)).await
    }

    /// Fetch a title document without interpreting it.
    pub async fn get_title_raw(&self, imdb_code: &str) -> Result<serde_json::Value, ImdbError> {
        self.get(&format!("/titles/{}", imdb_code)).await
    }
}
