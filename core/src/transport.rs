//! The seam between `ApiClient` and the network.
//!
//! # Design
//! `ApiClient` only ever talks to a `Transport`. Production code uses
//! `UreqTransport`; tests hand the client a scripted implementation and
//! inspect the `HttpRequest` values it receives.

use std::fmt;

use tracing::debug;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes one `HttpRequest` and returns the raw response.
///
/// Implementations must return 4xx/5xx responses as `Ok`; `Err` is reserved
/// for requests that produced no response at all.
pub trait Transport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).send(request)
    }
}

/// Blocking transport backed by a `ureq` agent.
///
/// The agent is configured with `http_status_as_error(false)` so error
/// statuses come back as data for the client to interpret.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let url = request.url.as_str();
        debug!(method = %request.method, url, "sending request");

        // GET never carries a body; DELETE only when one was supplied.
        let result = match (request.method, request.body.as_deref()) {
            (HttpMethod::Get, _) => with_parts(self.agent.get(url), request).call(),
            (HttpMethod::Delete, None) => with_parts(self.agent.delete(url), request).call(),
            (HttpMethod::Delete, Some(body)) => {
                with_parts(self.agent.delete(url).force_send_body(), request).send(body.as_bytes())
            }
            (HttpMethod::Post, Some(body)) => {
                with_parts(self.agent.post(url), request).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => with_parts(self.agent.post(url), request).send_empty(),
            (HttpMethod::Put, Some(body)) => {
                with_parts(self.agent.put(url), request).send(body.as_bytes())
            }
            (HttpMethod::Put, None) => with_parts(self.agent.put(url), request).send_empty(),
        };
        let mut response = result?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.body_mut().read_to_string()?;
        debug!(status, bytes = body.len(), "received response");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn with_parts<B>(
    mut builder: ureq::RequestBuilder<B>,
    request: &HttpRequest,
) -> ureq::RequestBuilder<B> {
    for (key, value) in &request.query {
        builder = builder.query(key, value);
    }
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
