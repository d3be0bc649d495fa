//! Small synchronous helper for testing JSON HTTP APIs.
//!
//! # Overview
//! `ApiClient` sends GET/POST/PUT/DELETE requests against a base URL and
//! hands back either the raw `HttpResponse` or the parsed JSON body.
//! `assert_response` checks a response against an expected status code and
//! JSON value inside a test.
//!
//! # Design
//! - `ClientConfig` is immutable; per-call headers are merged into a copy.
//! - Requests are built as plain data (`HttpRequest`) and executed by a
//!   `Transport`, so tests can swap the network for a scripted double.
//! - What happens on a 4xx/5xx status is an explicit `ErrorPolicy`: swallow
//!   (log and return `None`) or surface (return `ApiError::HttpError`).

pub mod assert;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;

pub use assert::{assert_response, check_response};
pub use client::{ApiClient, RequestOptions};
pub use config::{ClientConfig, ErrorPolicy};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
