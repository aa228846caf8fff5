// HTTP middleware
// Author: kelexine (https://github.com/kelexine)

use crate::config::HttpConfig;
use crate::error::error_body;
use crate::utils::logging::Logger;
use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderMap, HeaderName, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::any::Any;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tracing::{Instrument, Level};

/// Default per-request time budget.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Paths excluded from the access log unless configured otherwise.
pub const SKIP_LOG_PATHS: &[&str] = &["/ping"];

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

const TRUE_CLIENT_IP: HeaderName = HeaderName::from_static("true-client-ip");
const X_REAL_IP: HeaderName = HeaderName::from_static("x-real-ip");
const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");
const X_CSRF_TOKEN: HeaderName = HeaderName::from_static("x-csrf-token");

/// Tunables for the stage chain.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub request_timeout: Duration,
    pub skip_log_paths: Vec<String>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            request_timeout: REQUEST_TIMEOUT,
            skip_log_paths: SKIP_LOG_PATHS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl From<&HttpConfig> for PipelineSettings {
    fn from(config: &HttpConfig) -> Self {
        Self {
            request_timeout: Duration::from_secs(config.request_timeout_seconds),
            skip_log_paths: config.skip_log_paths.clone(),
        }
    }
}

/// Create request ID layers for the application
pub fn request_id_layers() -> (SetRequestIdLayer<MakeRequestUuid>, PropagateRequestIdLayer) {
    (
        SetRequestIdLayer::x_request_id(MakeRequestUuid),
        PropagateRequestIdLayer::x_request_id(),
    )
}

// ============================================================================
// REAL CLIENT IP
// ============================================================================

/// Originating client address, stored as a request extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientIp(pub IpAddr);

impl fmt::Display for ClientIp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Resolve the client IP from proxy headers, falling back to the socket peer.
///
/// Precedence: `True-Client-IP`, `X-Real-IP`, then the left-most entry of
/// `X-Forwarded-For`. Values that do not parse as an IP are skipped.
pub fn resolve_client_ip(headers: &HeaderMap, peer: Option<IpAddr>) -> Option<IpAddr> {
    let header_ip = |name: &HeaderName| -> Option<IpAddr> {
        headers.get(name)?.to_str().ok()?.trim().parse().ok()
    };

    header_ip(&TRUE_CLIENT_IP)
        .or_else(|| header_ip(&X_REAL_IP))
        .or_else(|| {
            headers
                .get(&X_FORWARDED_FOR)?
                .to_str()
                .ok()?
                .split(',')
                .next()?
                .trim()
                .parse()
                .ok()
        })
        .or(peer)
}

/// Stage: attach a [`ClientIp`] extension to the request.
pub async fn real_ip(mut req: Request, next: Next) -> Response {
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());

    if let Some(ip) = resolve_client_ip(req.headers(), peer) {
        req.extensions_mut().insert(ClientIp(ip));
    }

    next.run(req).await
}

// ============================================================================
// ACCESS LOG
// ============================================================================

/// Access log configuration: where records go and which paths stay silent.
#[derive(Debug, Clone)]
pub struct AccessLog {
    logger: Logger,
    skip_paths: Arc<[String]>,
}

impl AccessLog {
    pub fn new(logger: Logger, skip_paths: Vec<String>) -> Self {
        Self {
            logger,
            skip_paths: skip_paths.into(),
        }
    }

    /// Exact match only; `/ping/` and `/ping?x` paths are not `/ping`.
    pub fn skips(&self, path: &str) -> bool {
        self.skip_paths.iter().any(|p| p == path)
    }
}

/// Stage: run the rest of the chain on the injected logger and emit one
/// access record per request.
pub async fn access_log(State(log): State<Arc<AccessLog>>, req: Request, next: Next) -> Response {
    let logger = log.logger.clone();
    logger.attach(log_request(log, req, next)).await
}

async fn log_request(log: Arc<AccessLog>, req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let request_id = req
        .headers()
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_owned();
    let client_ip = req
        .extensions()
        .get::<ClientIp>()
        .map(ToString::to_string)
        .unwrap_or_else(|| "-".to_string());

    let span = tracing::info_span!("request", request_id = %request_id, method = %method, path = %path);
    let started = Instant::now();
    let response = next.run(req).instrument(span.clone()).await;

    if log.skips(&path) {
        return response;
    }

    let status = response.status().as_u16();
    let duration_ms = started.elapsed().as_secs_f64() * 1000.0;

    macro_rules! record {
        ($level:expr) => {
            tracing::event!(
                $level,
                method = %method,
                path = %path,
                status,
                duration_ms,
                request_id = %request_id,
                client_ip = %client_ip,
                "request completed"
            )
        };
    }

    span.in_scope(|| match status {
        500.. => record!(Level::ERROR),
        400..=499 => record!(Level::WARN),
        _ => record!(Level::INFO),
    });

    response
}

// ============================================================================
// RECOVERY, CORS, TIMEOUT
// ============================================================================

/// Stage: turn a panic anywhere below into a generic 500.
pub fn recovery_layer() -> CatchPanicLayer<fn(Box<dyn Any + Send + 'static>) -> Response> {
    CatchPanicLayer::custom(panic_response as fn(Box<dyn Any + Send + 'static>) -> Response)
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = %detail, "handler panicked; request recovered");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(error_body("internal_error", "internal server error")),
    )
        .into_response()
}

/// Stage: the default cross-origin policy.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ACCEPT,
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            X_CSRF_TOKEN,
        ])
        .expose_headers([header::LINK, X_REQUEST_ID])
        .max_age(Duration::from_secs(300))
}

/// Stage: abandon downstream work after `timeout` and answer 408.
pub fn timeout_layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::new(timeout)
}
