//! Error types for the GitHub API client.
//!
//! # Design
//! Only the transport/decode boundary can fail. Decoding a JSON object into
//! a domain value never does: missing or mistyped fields fall back to
//! defaults. `NotFound` gets a dedicated variant because callers frequently
//! distinguish "the repository does not exist" from "the server returned an
//! unexpected status." All other non-2xx responses land in `HttpError` with
//! the raw status code and body.

use thiserror::Error;

/// Errors delivered through `Response::Failure` or returned by `parse_*`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The body was not JSON, or not the JSON shape the route expects.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The transport could not complete the round-trip (connection refused,
    /// TLS failure, timeout...). Carried through unchanged.
    #[error("transport failed: {0}")]
    Transport(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Deserialization(err.to_string())
    }
}
