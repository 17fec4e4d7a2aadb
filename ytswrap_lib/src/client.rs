//! Entry point for every operation the HTTP layer exposes.

use serde_json::Value;
use yts_api::{MovieDetailsQuery, SuggestionsQuery};

use crate::aggregate::aggregate_year_range;
use crate::config::{Config, FanoutSettings};
use crate::details;
use crate::error::PortalError;
use crate::imdb::ImdbClient;
use crate::listing::{ListingRequest, MovieListing};
use crate::subsource::types::SubtitleDownload;
use crate::subsource::SubsourceClient;
use crate::validation;

const USER_AGENT: &str = concat!("ytswrap/", env!("CARGO_PKG_VERSION"));

/// Bundles the three upstream clients around one shared connection pool.
///
/// Built once from [`Config`] at startup. Holds no per-request state, so a
/// single instance serves every request concurrently.
#[derive(Clone, Debug)]
pub struct PortalClient {
    yts: yts_api::Client,
    imdb: ImdbClient,
    subsource: SubsourceClient,
    fanout: FanoutSettings,
}

impl PortalClient {
    pub fn new(config: &Config) -> Result<Self, PortalError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| PortalError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            yts: yts_api::Client::from_parts(http.clone(), &config.yts_api_url),
            imdb: ImdbClient::new(http.clone(), &config.imdb_api_url),
            subsource: SubsourceClient::new(
                http,
                &config.subsource_api_url,
                config.subsource_api_key.clone(),
            ),
            fanout: config.fanout,
        })
    }

    /// Serves a listing request, aggregating pages when a year range was asked for.
    pub async fn list_movies(
        &self,
        request: &ListingRequest,
    ) -> Result<MovieListing, PortalError> {
        match self.yts.list_movies_url(&request.query) {
            Ok(url) => tracing::info!("YTS API Request: {}", url),
            Err(e) => tracing::warn!("Could not render listing URL: {}", e),
        }

        let listing = if request.is_year_range() {
            let envelope = aggregate_year_range(
                &self.yts,
                &request.query,
                request.page(),
                request.limit(self.fanout.default_limit),
                &self.fanout,
            )
            .await;
            MovieListing::Aggregated(envelope)
        } else {
            MovieListing::Upstream(self.yts.list_movies_raw(&request.query).await?)
        };

        tracing::info!(
            "YTS API Response: status=\"{}\", movie_count={}",
            listing.status(),
            listing.movie_count()
        );
        Ok(listing)
    }

    /// Movie details, enriched with IMDb crew and plot when the movie has an IMDb code.
    ///
    /// IMDb failures are logged and the unenriched document is returned.
    pub async fn movie_details(&self, movie_id: u64) -> Result<Value, PortalError> {
        let mut body = self
            .yts
            .movie_details(&MovieDetailsQuery::new(movie_id))
            .await?;

        let code = details::imdb_code(&body).map(str::to_string);
        if let Some(code) = code {
            match validation::validate_imdb_code(&code) {
                Ok(code) => match self.imdb.get_title(&code).await {
                    Ok(title) => details::enrich_with_title(&mut body, &title),
                    Err(e) => tracing::error!("Error fetching IMDB data for {}: {}", code, e),
                },
                Err(e) => {
                    tracing::warn!("Skipping IMDB enrichment for movie {}: {}", movie_id, e)
                }
            }
        }

        Ok(body)
    }

    /// Raw IMDb title document.
    pub async fn imdb_title(&self, imdb_code: &str) -> Result<Value, PortalError> {
        Ok(self.imdb.get_title_raw(imdb_code).await?)
    }

    pub async fn suggestions(&self, movie_id: u64) -> Result<Value, PortalError> {
        Ok(self
            .yts
            .movie_suggestions(&SuggestionsQuery::new(movie_id))
            .await?)
    }

    /// Subtitles for the first Subsource movie matching an IMDb code, or `{"data": []}`.
    pub async fn subtitles(&self, imdb_code: &str) -> Result<Value, PortalError> {
        let search = self.subsource.search_by_imdb(imdb_code).await?;
        let Some(hit) = search.data.first() else {
            tracing::debug!("No Subsource movie for {}", imdb_code);
            return Ok(serde_json::json!({ "data": [] }));
        };
        Ok(self.subsource.list_subtitles(&hit.movie_id).await?)
    }

    pub async fn download_subtitle(
        &self,
        subtitle_id: &str,
    ) -> Result<SubtitleDownload, PortalError> {
        Ok(self.subsource.download(subtitle_id).await?)
    }
}
