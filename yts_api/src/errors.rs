//! Error types for the API client.

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request could not be built or sent (bad URL, connection refused, TLS failure).
    #[error("Request failed")]
    RequestFailed,
    /// The request did not complete within the client timeout.
    #[error("Request timed out")]
    Timeout,
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The body was received but could not be decoded into the expected shape.
    #[error("Failed to parse response: {0}")]
    ParseFailed(String),
}
