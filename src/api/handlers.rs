// /api handlers
// Author: kelexine (https://github.com/kelexine)

use super::ApiState;
use crate::error::{Result, ServiceError};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, error};

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub service: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DbPingResponse {
    pub database: String,
    pub latency_ms: u64,
}

pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Whole milliseconds, clamped to `u64::MAX`.
fn saturating_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// Round-trip `SELECT 1` through the pool.
pub async fn db_ping(State(state): State<ApiState>) -> Result<Json<DbPingResponse>> {
    let started = Instant::now();

    match sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.pool)
        .await
    {
        Ok(_) => {
            let latency_ms = saturating_millis(started.elapsed());
            state
                .logger
                .in_scope(|| debug!(latency_ms, "database ping succeeded"));
            Ok(Json(DbPingResponse {
                database: "ok".to_string(),
                latency_ms,
            }))
        }
        Err(e) => {
            state
                .logger
                .in_scope(|| error!(error = %e, "database ping failed"));
            Err(ServiceError::Database(e))
        }
    }
}
