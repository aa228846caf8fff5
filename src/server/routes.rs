// HTTP routes configuration
// Author: kelexine (https://github.com/kelexine)

use super::handlers::{health_check_handler, hello_handler};
use super::middleware::{
    access_log, cors_layer, real_ip, recovery_layer, request_id_layers, timeout_layer, AccessLog,
    PipelineSettings,
};
use crate::api;
use crate::utils::logging::Logger;
use axum::{middleware, routing::get, Router};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub logger: Logger,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(pool: PgPool, logger: Logger) -> Self {
        Self {
            pool,
            logger,
            started_at: Instant::now(),
        }
    }
}

/// Build the dispatcher: route table, `/api` mount and the full stage chain.
pub fn create_router(settings: &PipelineSettings, pool: PgPool, logger: Logger) -> Router {
    let state = AppState::new(pool.clone(), logger.clone());

    let routes = Router::new()
        .route("/hello", get(hello_handler))
        .route("/health-check", get(health_check_handler))
        .with_state(state)
        .nest("/api", api::routes(pool, logger.clone()));

    apply_pipeline(routes, settings, logger)
}

/// Wrap `router` in the stage chain, outermost first:
/// request ID, real IP, access log, recovery, CORS, timeout.
pub fn apply_pipeline(router: Router, settings: &PipelineSettings, logger: Logger) -> Router {
    let (set_request_id, propagate_request_id) = request_id_layers();
    let access = Arc::new(AccessLog::new(logger, settings.skip_log_paths.clone()));

    router.layer(
        ServiceBuilder::new()
            .layer(set_request_id)
            .layer(propagate_request_id)
            .layer(middleware::from_fn(real_ip))
            .layer(middleware::from_fn_with_state(access, access_log))
            .layer(recovery_layer())
            .layer(cors_layer())
            .layer(timeout_layer(settings.request_timeout)),
    )
}
