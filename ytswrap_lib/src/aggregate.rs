//! Year-range listing built from many upstream pages.
//!
//! The upstream listing cannot filter by a release-year range, so the range is
//! emulated here:
//! - fetch pages `1..=max_pages` concurrently with the caller's filters
//! - concatenate whatever came back, in page order
//! - drop entries released after the threshold (unknown years are kept)
//! - drop repeated identities, keeping the first occurrence
//! - slice out the caller's page and recompute the counts for the filtered set
//!
//! A failed page only ever costs its own entries. Nothing here returns an error.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use yts_api::types::{ListingItem, MovieList};
use yts_api::{Client, MovieListQuery, PagedQuery};

use crate::config::FanoutSettings;

/// Outcome of one fan-out branch. `payload` is `None` when the page failed.
#[derive(Debug, Clone, PartialEq)]
pub struct PageFetch {
    pub page: u32,
    pub payload: Option<MovieList>,
}

/// Response body for an aggregated listing, shaped like an upstream listing page.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ListingEnvelope {
    pub status: String,
    pub status_message: String,
    pub data: ListingPage,
}

/// Counts here describe the filtered, de-duplicated set, not the upstream catalogue.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ListingPage {
    pub movie_count: usize,
    pub limit: u32,
    pub page_number: u32,
    pub movies: Vec<ListingItem>,
    pub page_count: usize,
}

/// Runs the whole pipeline for one request.
pub async fn aggregate_year_range(
    client: &Client,
    query: &MovieListQuery,
    page: u32,
    limit: u32,
    settings: &FanoutSettings,
) -> ListingEnvelope {
    let pages = fetch_pages(client, query, settings).await;
    let fetched = pages.iter().filter(|p| p.payload.is_some()).count();

    let (candidates, catalogue_total) = merge_pages(pages);
    let candidate_count = candidates.len();
    let filtered = filter_by_year(candidates, settings.year_threshold);
    let unique = dedupe_by_id(filtered);

    tracing::debug!(
        pages_requested = settings.max_pages,
        pages_fetched = fetched,
        catalogue_total = ?catalogue_total,
        candidates = candidate_count,
        unique = unique.len(),
        "year-range listing merged"
    );

    paginate(unique, page, limit)
}

/// Requests every page concurrently and waits for all of them to settle.
///
/// Each branch gets the caller's filters with `page` and `limit` replaced.
/// Failed branches are logged and come back with an empty payload. The result
/// is ordered by page number regardless of completion order.
pub async fn fetch_pages(
    client: &Client,
    query: &MovieListQuery,
    settings: &FanoutSettings,
) -> Vec<PageFetch> {
    let mut join_set = JoinSet::new();

    for page in 1..=settings.max_pages {
        let client = client.clone();
        let page_query = query
            .clone()
            .with_page(page)
            .with_limit(settings.page_size);
        join_set.spawn(async move {
            let result = client.list_movies(&page_query).await;
            (page, result)
        });
    }

    let mut fetched = Vec::with_capacity(settings.max_pages as usize);
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((page, Ok(resp))) => {
                if resp.data.is_none() {
                    tracing::warn!(
                        "Listing page {} returned status '{}' without data",
                        page,
                        resp.status
                    );
                }
                fetched.push(PageFetch {
                    page,
                    payload: resp.data,
                });
            }
            Ok((page, Err(e))) => {
                tracing::warn!("Error fetching listing page {}: {}", page, e);
                fetched.push(PageFetch {
                    page,
                    payload: None,
                });
            }
            Err(e) => {
                tracing::error!("Listing page task did not complete: {}", e);
            }
        }
    }

    fetched.sort_by_key(|p| p.page);
    fetched
}

/// Concatenates page payloads in order. Also returns the first non-zero
/// catalogue-wide count any page reported; it is informational only.
pub fn merge_pages(pages: Vec<PageFetch>) -> (Vec<ListingItem>, Option<u64>) {
    let mut catalogue_total = None;
    let mut candidates = Vec::new();
    for payload in pages.into_iter().filter_map(|p| p.payload) {
        if catalogue_total.is_none() && payload.movie_count > 0 {
            catalogue_total = Some(payload.movie_count);
        }
        candidates.extend(payload.into_movies());
    }
    (candidates, catalogue_total)
}

/// Keeps entries whose year is at or below `threshold`. A missing year reads as 0 and is kept.
pub fn filter_by_year(items: Vec<ListingItem>, threshold: i64) -> Vec<ListingItem> {
    items
        .into_iter()
        .filter(|item| item.year() <= threshold)
        .collect()
}

/// Keeps the first entry per identity, preserving order. Entries without an id are all kept.
pub fn dedupe_by_id(items: Vec<ListingItem>) -> Vec<ListingItem> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| match item.id() {
            Some(id) => seen.insert(id),
            None => true,
        })
        .collect()
}

/// Slices out one 1-based page. Pages past the end yield an empty slice, not an error.
pub fn paginate(items: Vec<ListingItem>, page: u32, limit: u32) -> ListingEnvelope {
    let page = page.max(1);
    let limit = limit.max(1);
    let movie_count = items.len();
    let start = (page as usize - 1).saturating_mul(limit as usize);
    let movies: Vec<ListingItem> = items.into_iter().skip(start).take(limit as usize).collect();

    ListingEnvelope {
        status: "ok".to_string(),
        status_message: "Query was successful".to_string(),
        data: ListingPage {
            movie_count,
            limit,
            page_number: page,
            movies,
            page_count: movie_count.div_ceil(limit as usize),
        },
    }
}
