//! Health endpoint tests against an in-process router.
//!
//! The pool is created lazily against a loopback port with no listener, so
//! these tests exercise the unhealthy path and the static endpoints without
//! any backing services.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use wander_api::config::ApiConfig;
use wander_api::http::ApiServer;
use wander_api::store::{CacheStore, PrimaryStore};

fn unreachable_config() -> ApiConfig {
    let mut config = ApiConfig::default();
    // Port 1 on loopback has no listener; keep the acquire window short so
    // the liveness probe fails fast.
    config.database.url = "postgres://postgres@127.0.0.1:1/wander".to_string();
    config.database.acquire_timeout_ms = 200;
    config.redis.url = "redis://127.0.0.1:1".to_string();
    config
}

fn test_router(config: &ApiConfig) -> axum::Router {
    let primary = Arc::new(PrimaryStore::new(&config.database).unwrap());
    let cache = Arc::new(CacheStore::disconnected());
    ApiServer::new(config, primary, cache).into_router()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_unhealthy_when_database_is_unreachable() {
    let config = unreachable_config();
    let router = test_router(&config);

    let response = router
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = body_json(response).await;
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["services"]["database"], "disconnected");
    // Short-circuited: the cache was never probed.
    assert_eq!(body["services"]["redis"], "unknown");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn status_endpoint_reports_service_information() {
    let config = unreachable_config();
    let router = test_router(&config);

    let response = router
        .oneshot(Request::get("/api/status").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Wander API is running");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["environment"], "development");
}

#[tokio::test]
async fn unknown_routes_return_404() {
    let config = unreachable_config();
    let router = test_router(&config);

    let response = router
        .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn read_endpoints_map_store_failures_to_500() {
    let config = unreachable_config();
    let router = test_router(&config);

    let response = router
        .oneshot(Request::get("/api/users").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "internal server error");
}

#[tokio::test]
async fn health_is_served_over_a_real_listener() {
    let config = unreachable_config();
    let primary = Arc::new(PrimaryStore::new(&config.database).unwrap());
    let cache = Arc::new(CacheStore::disconnected());
    let server = ApiServer::new(&config, primary, cache);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let response = client
        .get(format!("http://{addr}/health"))
        .send()
        .await
        .expect("server unreachable");

    assert_eq!(response.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "unhealthy");
}
