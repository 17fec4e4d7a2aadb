//! Inbound listing requests: parameter parsing and the choice between a single
//! pass-through call and the aggregated year-range listing.

use std::collections::BTreeMap;

use serde::Serialize;
use yts_api::{MovieListQuery, QueryCommon};

use crate::aggregate::ListingEnvelope;
use crate::error::PortalError;
use crate::validation;

/// `year` value selecting every release up to and including 2000.
pub const YEAR_RANGE_SENTINEL: &str = "2000_and_less";

/// Keys consumed by request parsing rather than forwarded verbatim.
const RESERVED_KEYS: &[&str] = &["page", "limit", "query_term", "year"];

/// What the caller asked for in the `year` parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YearFilter {
    /// Absent, empty, or `all`.
    Any,
    /// A specific year. The upstream ignores its own year filter, so this is
    /// also folded into the search term.
    Exact(String),
    /// The range sentinel; served by the aggregated listing.
    UpToThreshold,
}

impl YearFilter {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") | Some("all") => YearFilter::Any,
            Some(YEAR_RANGE_SENTINEL) => YearFilter::UpToThreshold,
            Some(year) => YearFilter::Exact(year.to_string()),
        }
    }
}

/// A parsed listing request.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingRequest {
    /// Query forwarded upstream: the caller's page and limit (when usable),
    /// the combined search term, and every other parameter untouched.
    pub query: MovieListQuery,
    pub year: YearFilter,
}

impl ListingRequest {
    /// Builds a request from the flat query-string map the caller sent.
    pub fn from_params(params: &BTreeMap<String, String>) -> Result<Self, PortalError> {
        let get = |key: &str| params.get(key).map(String::as_str);

        let title = match get("query_term") {
            Some(raw) if raw.chars().any(|c| !c.is_whitespace() && !c.is_control()) => {
                Some(validation::validate_search(raw)?)
            }
            _ => None,
        };
        let year = YearFilter::parse(get("year"));

        let mut combined = title.unwrap_or_default();
        if let YearFilter::Exact(y) = &year {
            if !combined.is_empty() {
                combined.push(' ');
            }
            combined.push_str(y);
        }
        let combined = combined.trim();

        let mut query = MovieListQuery {
            common: QueryCommon {
                page: validation::parse_positive(get("page")),
                limit: validation::parse_positive(get("limit")),
            },
            query_term: (!combined.is_empty()).then(|| combined.to_string()),
            filters: BTreeMap::new(),
        };
        for (key, value) in params {
            if !RESERVED_KEYS.contains(&key.as_str()) {
                query = query.with_filter(key, value);
            }
        }
        if let YearFilter::Exact(y) = &year {
            query = query.with_filter("year", y);
        }

        Ok(Self { query, year })
    }

    pub fn is_year_range(&self) -> bool {
        self.year == YearFilter::UpToThreshold
    }

    /// Requested page, defaulting to 1.
    pub fn page(&self) -> u32 {
        self.query.common.page.unwrap_or(1)
    }

    /// Requested page size, defaulting to `default_limit`.
    pub fn limit(&self, default_limit: u32) -> u32 {
        self.query.common.limit.unwrap_or(default_limit)
    }
}

/// A listing response: the upstream body as-is, or the aggregated envelope.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum MovieListing {
    Upstream(serde_json::Value),
    Aggregated(ListingEnvelope),
}

impl MovieListing {
    pub fn status(&self) -> &str {
        match self {
            MovieListing::Upstream(body) => body["status"].as_str().unwrap_or_default(),
            MovieListing::Aggregated(envelope) => &envelope.status,
        }
    }

    pub fn movie_count(&self) -> u64 {
        match self {
            MovieListing::Upstream(body) => body["data"]["movie_count"].as_u64().unwrap_or(0),
            MovieListing::Aggregated(envelope) => envelope.data.movie_count as u64,
        }
    }
}
