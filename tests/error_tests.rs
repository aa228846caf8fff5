// Error handling tests
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use axum::response::IntoResponse;
use basic_api::error::ServiceError;
use http_body_util::BodyExt;

#[test]
fn test_error_display_messages() {
    let errors = vec![
        ServiceError::Config("bad port".to_string()),
        ServiceError::Internal("oops".to_string()),
        ServiceError::Database(sqlx::Error::PoolTimedOut),
        ServiceError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk")),
    ];

    for error in errors {
        let display = format!("{}", error);
        assert!(!display.is_empty(), "Error should have display message");
    }
}

#[test]
fn test_status_mapping() {
    assert_eq!(
        ServiceError::Database(sqlx::Error::PoolTimedOut).classify().0,
        StatusCode::SERVICE_UNAVAILABLE
    );
    assert_eq!(
        ServiceError::Config("x".to_string()).classify().0,
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        ServiceError::Internal("x".to_string()).classify().1,
        "internal_error"
    );
}

#[tokio::test]
async fn test_database_error_body_hides_details() {
    let resp = ServiceError::Database(sqlx::Error::Protocol("password for user admin".into()))
        .into_response();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["type"], "error");
    assert_eq!(body["error"]["type"], "database_error");
    assert_eq!(body["error"]["message"], "database unavailable");
}

#[tokio::test]
async fn test_internal_error_body() {
    let resp = ServiceError::Internal("state poisoned".to_string()).into_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("state poisoned"));
}
