//! IMDb-compatible metadata API client, used to enrich movie details with crew and plot.

pub mod client;
pub mod error;
pub mod types;

pub use client::ImdbClient;
pub use error::ImdbError;
