//! Library layer for the YTS wrapper: configuration, the aggregated year-range
//! listing, details enrichment, and the IMDb and Subsource clients.
//!
//! Wraps the `yts_api` crate with request parsing, input validation, and the
//! fan-out pipeline used when the caller asks for a year range the upstream
//! listing cannot filter on.

pub mod aggregate;
pub mod client;
pub mod config;
pub mod details;
pub mod error;
pub mod filters;
pub mod imdb;
pub mod listing;
pub mod subsource;
pub mod validation;

pub use yts_api;
pub use yts_api::types;
pub use yts_api::{MovieListQuery, PagedQuery, Quality, Query, SortBy, SortDirection};

pub use aggregate::{ListingEnvelope, ListingPage};
pub use client::PortalClient;
pub use config::{Config, FanoutSettings};
pub use error::PortalError;
pub use listing::{ListingRequest, MovieListing, YearFilter, YEAR_RANGE_SENTINEL};
