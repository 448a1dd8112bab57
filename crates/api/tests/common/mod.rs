#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use petal_api::config::{default_request_timeout, DatabaseConfig, ServerConfig, StoreBackend};
use petal_api::router::build_app_router;
use petal_api::state::AppState;
use petal_db::store::MemoryConnector;

/// Build a test `ServerConfig` backed by the in-memory store.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: default_request_timeout(30),
        seed_sample_data: false,
        database: DatabaseConfig {
            backend: StoreBackend::Memory,
            uri: String::new(),
            name: "petal_test".to_string(),
            timeout_secs: 30,
        },
    }
}

/// Build the full application router over `connector`.
///
/// Clones of a `MemoryConnector` share their data, so the same connector
/// can back several apps within one test.
pub fn build_test_app(connector: MemoryConnector) -> Router {
    build_test_app_with_config(connector, test_config())
}

pub fn build_test_app_with_config(connector: MemoryConnector, config: ServerConfig) -> Router {
    let state = AppState::new(Arc::new(connector), config.clone());
    build_app_router(state, &config)
}

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(
        app,
        Request::builder().uri(uri).body(Body::empty()).unwrap(),
    )
    .await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(
        app,
        Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

async fn send_json(app: Router, method: Method, uri: &str, body: serde_json::Value) -> Response {
    send(
        app,
        Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_json(app, Method::PUT, uri, body).await
}

/// Send a raw (possibly malformed) JSON body.
pub async fn post_raw(app: Router, uri: &str, body: &'static str) -> Response {
    send(
        app,
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap(),
    )
    .await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
