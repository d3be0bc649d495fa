//! Error types for the API test client.
//!
//! # Design
//! Transport failures, HTTP error statuses and unparseable bodies are kept
//! apart so a test can tell "the server is down" from "the server answered
//! 500" from "the server answered 200 with HTML". The two mismatch variants
//! are produced only by the assertion helpers and carry both sides of the
//! comparison for the failure message.

use serde_json::Value;

/// Errors returned by `ApiClient` and the response assertion helpers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, I/O).
    #[error("transport error: {0}")]
    Transport(#[from] ureq::Error),

    /// The server answered with a 4xx or 5xx status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body is not valid JSON.
    #[error("response is not valid JSON ({reason}): {body}")]
    NotJson { reason: String, body: String },

    /// The method name is not one of GET, POST, PUT or DELETE.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("expected status code {expected}, but got {actual}: {body}")]
    StatusMismatch {
        expected: u16,
        actual: u16,
        body: String,
    },

    #[error("expected JSON response {expected}, but got {actual}")]
    JsonMismatch { expected: Value, actual: Value },
}
