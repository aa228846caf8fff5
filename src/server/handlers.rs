// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

use super::routes::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const HELLO_BODY: &str = "welcome";

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub checks: HashMap<String, HealthCheck>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
}

/// `GET /hello`. Status and body travel together in one response value.
pub async fn hello_handler() -> (StatusCode, &'static str) {
    (StatusCode::OK, HELLO_BODY)
}

/// `GET /health-check`. Liveness only: inspects the pool without checking out
/// a connection.
pub async fn health_check_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let mut checks = HashMap::new();
    let mut overall_status = HealthStatus::Healthy;

    let pool_check = if state.pool.is_closed() {
        overall_status = HealthStatus::Unhealthy;
        HealthCheck {
            status: "error".to_string(),
            message: "Connection pool is closed".to_string(),
        }
    } else {
        HealthCheck {
            status: "ok".to_string(),
            message: format!(
                "{} connections open, {} idle",
                state.pool.size(),
                state.pool.num_idle()
            ),
        }
    };
    checks.insert("database_pool".to_string(), pool_check);

    let code = match overall_status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (
        code,
        Json(HealthResponse {
            status: overall_status,
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: state.started_at.elapsed().as_secs(),
            checks,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }),
    )
}
