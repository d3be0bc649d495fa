use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::app;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

// --- get ---

#[tokio::test]
async fn example_endpoint_reports_success() {
    let resp = app().oneshot(empty_request("GET", "/example-endpoint")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({"status": "success"}));
}

#[tokio::test]
async fn get_endpoint_echoes_query() {
    let resp = app()
        .oneshot(empty_request("GET", "/example/get_endpoint?key=value&page=2"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({"key": "value", "page": "2"}));
}

#[tokio::test]
async fn get_endpoint_without_query_is_empty_object() {
    let resp = app()
        .oneshot(empty_request("GET", "/example/get_endpoint"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({}));
}

// --- post ---

#[tokio::test]
async fn post_endpoint_returns_201_with_envelope() {
    let resp = app()
        .oneshot(json_request("POST", "/example/post_endpoint", r#"{"name":"test","age":25}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(
        body_json(resp).await,
        json!({"status": "success", "data": {"name": "test", "age": 25}})
    );
}

#[tokio::test]
async fn post_endpoint_malformed_json_is_rejected() {
    let resp = app()
        .oneshot(json_request("POST", "/example/post_endpoint", "{not json"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- put ---

#[tokio::test]
async fn put_endpoint_returns_envelope() {
    let resp = app()
        .oneshot(json_request("PUT", "/example/put_endpoint/1", r#"{"name":"updated name"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await,
        json!({"status": "success", "data": {"name": "updated name"}})
    );
}

// --- delete ---

#[tokio::test]
async fn delete_endpoint_returns_204_without_body() {
    let resp = app()
        .oneshot(empty_request("DELETE", "/example/delete_endpoint/1"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());
}

// --- misc ---

#[tokio::test]
async fn headers_endpoint_echoes_auth_and_custom_headers() {
    let req = Request::builder()
        .uri("/example/headers")
        .header(http::header::AUTHORIZATION, "Bearer token")
        .header("X-Request-Id", "42")
        .header(http::header::ACCEPT, "*/*")
        .body(String::new())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await,
        json!({"authorization": "Bearer token", "x-request-id": "42"})
    );
}

#[tokio::test]
async fn plain_endpoint_is_not_json() {
    let resp = app().oneshot(empty_request("GET", "/example/plain")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = body_bytes(resp).await;
    assert!(serde_json::from_slice::<Value>(&bytes).is_err());
}

#[tokio::test]
async fn unknown_route_is_404() {
    let resp = app().oneshot(empty_request("GET", "/example/missing")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn wrong_method_is_405() {
    let resp = app()
        .oneshot(empty_request("DELETE", "/example/post_endpoint"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}
