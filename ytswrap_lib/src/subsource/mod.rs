//! Subsource subtitle API client.

pub mod client;
pub mod error;
pub mod types;

pub use client::SubsourceClient;
pub use error::SubsourceError;
