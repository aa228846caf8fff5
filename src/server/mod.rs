//! Axum-based HTTP server implementation for basic-api.
//!
//! This module assembles the request pipeline: an ordered chain of tower
//! stages wrapped around a small route table and the mounted `/api` tree.
//!
//! # Components
//!
//! - `handlers`: `/hello` and `/health-check`.
//! - `middleware`: stage constructors (request ID, real IP, access log,
//!   panic recovery, CORS, timeout).
//! - `routes`: the router configuration that ties everything together.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod handlers;
mod middleware;
mod routes;

pub use handlers::{HealthResponse, HealthStatus, HELLO_BODY};
pub use middleware::{
    resolve_client_ip, ClientIp, PipelineSettings, REQUEST_TIMEOUT, SKIP_LOG_PATHS, X_REQUEST_ID,
};
pub use routes::{apply_pipeline, create_router, AppState};
