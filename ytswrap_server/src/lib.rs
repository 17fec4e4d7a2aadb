//! HTTP surface of the YTS wrapper: an axum router over [`ytswrap_lib::PortalClient`].

pub mod error;
pub mod routes;

pub use error::HttpError;
pub use routes::{router, AppState, SharedAppState};
