// Route table tests: /health-check and the /api mount
// Author: kelexine (https://github.com/kelexine)

mod common;

use axum::http::StatusCode;
use basic_api::server::{create_router, HealthResponse, HealthStatus, PipelineSettings};
use basic_api::utils::logging::Logger;
use common::{body_json, capturing_logger, get, unreachable_pool};
use tower::ServiceExt;

#[tokio::test]
async fn test_health_check_reports_healthy() {
    let app = create_router(&PipelineSettings::default(), unreachable_pool(), Logger::disabled());
    let resp = app.oneshot(get("/health-check")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let health: HealthResponse = serde_json::from_value(body_json(resp).await).unwrap();
    assert_eq!(health.status, HealthStatus::Healthy);
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
    assert_eq!(health.checks["database_pool"].status, "ok");
}

#[tokio::test]
async fn test_health_check_unhealthy_when_pool_closed() {
    let pool = unreachable_pool();
    pool.close().await;
    let app = create_router(&PipelineSettings::default(), pool, Logger::disabled());

    let resp = app.oneshot(get("/health-check")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = body_json(resp).await;
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["checks"]["database_pool"]["status"], "error");
}

#[tokio::test]
async fn test_api_status_is_mounted() {
    let app = create_router(&PipelineSettings::default(), unreachable_pool(), Logger::disabled());
    let resp = app.oneshot(get("/api/status")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["service"], env!("CARGO_PKG_NAME"));
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_api_routes_only_under_prefix() {
    let app = create_router(&PipelineSettings::default(), unreachable_pool(), Logger::disabled());
    let resp = app.oneshot(get("/status")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_db_ping_unavailable_database() {
    let (logger, capture) = capturing_logger();
    let app = create_router(&PipelineSettings::default(), unreachable_pool(), logger);

    let resp = app.oneshot(get("/api/db/ping")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = body_json(resp).await;
    assert_eq!(body["type"], "error");
    assert_eq!(body["error"]["type"], "database_error");

    let records = capture.records();
    assert!(records
        .iter()
        .any(|r| r["fields"]["message"] == "database ping failed"));
    let access = capture.access_records();
    assert_eq!(access.len(), 1);
    assert_eq!(access[0]["fields"]["path"], "/api/db/ping");
    assert_eq!(access[0]["fields"]["status"], 503);
}
