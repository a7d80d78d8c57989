mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use booking_service::services::SystemClock;
use common::{test_settings, TestApp};

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::new(test_settings(0), Arc::new(SystemClock));

    let (status, body) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "booking-service");
}

#[tokio::test]
async fn readiness_check_works() {
    let app = TestApp::new(test_settings(0), Arc::new(SystemClock));

    let (status, body) = app.get("/ready").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn metrics_endpoint_responds() {
    let app = TestApp::new(test_settings(0), Arc::new(SystemClock));

    // Plain text body, so only the status is checked
    let (status, _) = app.get("/metrics").await;

    assert_eq!(status, StatusCode::OK);
}
