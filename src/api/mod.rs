//! The `/api` sub-dispatcher.
//!
//! Mounted by [`crate::server::create_router`] under `/api`. It receives the
//! same pool and logger handles as the outer router, unmodified.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod handlers;

use crate::utils::logging::Logger;
use axum::{routing::get, Router};
use sqlx::PgPool;

pub use handlers::{DbPingResponse, StatusResponse};

#[derive(Clone)]
pub struct ApiState {
    pub pool: PgPool,
    pub logger: Logger,
}

/// Routes relative to the mount point.
pub fn routes(pool: PgPool, logger: Logger) -> Router {
    Router::new()
        .route("/status", get(handlers::status))
        .route("/db/ping", get(handlers::db_ping))
        .with_state(ApiState { pool, logger })
}
