//! Fixture server for the example API tests.
//!
//! Serves the `/example/*` routes the client tests run against: query echo,
//! create/update envelopes, a no-content delete, header echo and a plain-text
//! body.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query},
    http::{HeaderMap, StatusCode},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tokio::net::TcpListener;
use tracing::{debug, info};

/// Envelope returned by the write endpoints.
#[derive(Debug, Serialize)]
pub struct Success {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Success {
    fn with(data: Option<Value>) -> Json<Self> {
        Json(Success {
            status: "success",
            data,
        })
    }
}

pub fn app() -> Router {
    Router::new()
        .route("/example-endpoint", get(status))
        .route("/example/get_endpoint", get(echo_query))
        .route("/example/post_endpoint", post(create))
        .route("/example/put_endpoint/{id}", put(update))
        .route("/example/delete_endpoint/{id}", delete(remove))
        .route("/example/headers", get(echo_headers))
        .route("/example/plain", get(plain))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock server listening");
    }
    axum::serve(listener, app()).await
}

async fn status() -> Json<Success> {
    Success::with(None)
}

async fn echo_query(Query(params): Query<BTreeMap<String, String>>) -> Json<BTreeMap<String, String>> {
    Json(params)
}

async fn create(Json(body): Json<Value>) -> (StatusCode, Json<Success>) {
    debug!(%body, "create");
    (StatusCode::CREATED, Success::with(Some(body)))
}

async fn update(Path(id): Path<String>, Json(body): Json<Value>) -> Json<Success> {
    debug!(%id, %body, "update");
    Success::with(Some(body))
}

async fn remove(Path(id): Path<String>) -> StatusCode {
    debug!(%id, "delete");
    StatusCode::NO_CONTENT
}

/// Echo `authorization` and any `x-` prefixed request header.
async fn echo_headers(headers: HeaderMap) -> Json<BTreeMap<String, String>> {
    let echoed = headers
        .iter()
        .filter(|(name, _)| name.as_str() == "authorization" || name.as_str().starts_with("x-"))
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    Json(echoed)
}

async fn plain() -> &'static str {
    "plain text response"
}
