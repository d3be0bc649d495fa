//! Request dispatch and response normalization.
//!
//! # Design
//! `ApiClient` pairs an immutable `ClientConfig` with a `Transport`. Every
//! call goes through `build_request`, which is pure: it concatenates the
//! base URL and endpoint, merges headers by value and serializes the body.
//! The result is sent through the transport and either returned raw
//! (`send_request`, `execute`) or normalized to parsed JSON (`get`, `post`,
//! `put`, `delete`) according to the configured `ErrorPolicy`.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{ClientConfig, ErrorPolicy};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};

/// Optional parts of a request: query parameters, JSON body, extra headers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub params: Vec<(String, String)>,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, key: &str, value: &str) -> Self {
        self.params.push((key.to_string(), value.to_string()));
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serialize any `Serialize` value into the JSON body.
    pub fn json<B: Serialize + ?Sized>(self, body: &B) -> Result<Self, ApiError> {
        let value =
            serde_json::to_value(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.body(value))
    }
}

/// Synchronous API client over a pluggable transport.
#[derive(Debug, Clone)]
pub struct ApiClient<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl ApiClient<UreqTransport> {
    /// Client with default configuration and the `ureq` transport.
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(ClientConfig::new(base_url), UreqTransport::new())
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Target URL for `endpoint`: the base URL followed by the endpoint,
    /// with no slash added or removed.
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url, endpoint)
    }

    pub fn build_request(
        &self,
        method: HttpMethod,
        endpoint: &str,
        options: &RequestOptions,
    ) -> Result<HttpRequest, ApiError> {
        let mut headers = self.config.merged_headers(&options.headers);
        let body = match &options.body {
            Some(_) if method == HttpMethod::Get => {
                debug!(url = %self.url(endpoint), "dropping body on GET request");
                None
            }
            Some(value) => {
                if !headers
                    .iter()
                    .any(|(k, _)| k.eq_ignore_ascii_case("content-type"))
                {
                    headers.push(("Content-Type".to_string(), "application/json".to_string()));
                }
                Some(
                    serde_json::to_string(value)
                        .map_err(|e| ApiError::Serialization(e.to_string()))?,
                )
            }
            None => None,
        };
        Ok(HttpRequest {
            method,
            url: self.url(endpoint),
            query: options.params.clone(),
            headers,
            body,
        })
    }

    /// Dispatch by method name, matched case-insensitively.
    ///
    /// The response is returned whatever its status; inspecting it is left
    /// to the caller.
    pub fn send_request(
        &self,
        method: &str,
        endpoint: &str,
        options: &RequestOptions,
    ) -> Result<HttpResponse, ApiError> {
        let method: HttpMethod = method.parse()?;
        self.execute(method, endpoint, options)
    }

    pub fn execute(
        &self,
        method: HttpMethod,
        endpoint: &str,
        options: &RequestOptions,
    ) -> Result<HttpResponse, ApiError> {
        let request = self.build_request(method, endpoint, options)?;
        self.transport.send(&request)
    }

    pub fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Option<Value>, ApiError> {
        let options = params
            .iter()
            .fold(RequestOptions::new(), |opts, (k, v)| opts.param(k, v));
        self.fetch(HttpMethod::Get, endpoint, &options)
    }

    pub fn post(&self, endpoint: &str, body: &Value) -> Result<Option<Value>, ApiError> {
        let options = RequestOptions::new().body(body.clone());
        self.fetch(HttpMethod::Post, endpoint, &options)
    }

    pub fn put(&self, endpoint: &str, body: &Value) -> Result<Option<Value>, ApiError> {
        let options = RequestOptions::new().body(body.clone());
        self.fetch(HttpMethod::Put, endpoint, &options)
    }

    pub fn delete(&self, endpoint: &str, body: Option<&Value>) -> Result<Option<Value>, ApiError> {
        let options = RequestOptions {
            body: body.cloned(),
            ..RequestOptions::default()
        };
        self.fetch(HttpMethod::Delete, endpoint, &options)
    }

    fn fetch(
        &self,
        method: HttpMethod,
        endpoint: &str,
        options: &RequestOptions,
    ) -> Result<Option<Value>, ApiError> {
        let response = self.execute(method, endpoint, options)?;
        self.normalize(response)
    }

    /// Turn a raw response into parsed JSON.
    ///
    /// Error statuses follow the configured `ErrorPolicy`. Success bodies go
    /// through `HttpResponse::json_body`, so only a 204 may be empty.
    pub fn normalize(&self, response: HttpResponse) -> Result<Option<Value>, ApiError> {
        if response.is_error() {
            return match self.config.error_policy {
                ErrorPolicy::Swallow => {
                    warn!(status = response.status, body = %response.body, "HTTP error occurred");
                    Ok(None)
                }
                ErrorPolicy::Surface => Err(ApiError::HttpError {
                    status: response.status,
                    body: response.body,
                }),
            };
        }
        response.json_body().map(Some)
    }
}
