//! Structured logging and the injectable logger handle.
//!
//! This module configures the `tracing` ecosystem for the application and
//! exposes [`Logger`], a cloneable handle over a `tracing` dispatcher. The
//! request pipeline takes a `Logger` as a constructor argument instead of
//! reaching for the global subscriber, so tests can hand it a capturing one.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::LoggingConfig;
use crate::error::{Result, ServiceError};
use std::future::Future;
use tracing::instrument::{WithDispatch, WithSubscriber};
use tracing::{Dispatch, Subscriber};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// A cloneable logger handle backed by a `tracing` dispatcher.
///
/// Events emitted inside [`Logger::in_scope`] or inside a future wrapped with
/// [`Logger::attach`] are delivered to this logger's subscriber, regardless
/// of what the global default is.
#[derive(Clone)]
pub struct Logger {
    dispatch: Dispatch,
}

impl Logger {
    /// Wrap any subscriber as a logger handle.
    pub fn new<S>(subscriber: S) -> Self
    where
        S: Subscriber + Send + Sync + 'static,
    {
        Self {
            dispatch: Dispatch::new(subscriber),
        }
    }

    /// A logger that drops every event.
    pub fn disabled() -> Self {
        Self {
            dispatch: Dispatch::none(),
        }
    }

    /// Run `f` with this logger as the current subscriber.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }

    /// Route every event emitted while polling `fut` to this logger.
    pub fn attach<F: Future>(&self, fut: F) -> WithDispatch<F> {
        fut.with_subscriber(self.dispatch.clone())
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger").finish_non_exhaustive()
    }
}

/// Builds the logger from config and installs it as the global default.
///
/// Supports three output formats:
/// - `json`: Structured JSON logs for production ingestion.
/// - `compact`: Single-line human-readable output.
/// - `pretty` (default): Multi-line, colorized output for development.
///
/// Log levels are controlled via the `RUST_LOG` environment variable or
/// the provided `LoggingConfig`. The global default is set as well, together
/// with the `log` bridge, so that records from hyper, sqlx and `log`-based
/// dependencies land in the same sink.
pub fn init(config: &LoggingConfig) -> Result<Logger> {
    let logger = build(config);

    logger
        .dispatch
        .clone()
        .try_init()
        .map_err(|e| ServiceError::Internal(format!("failed to install logger: {}", e)))?;

    Ok(logger)
}

/// Builds the logger from config without touching the global default.
pub fn build(config: &LoggingConfig) -> Logger {
    // Configure filter from environment or config file
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => Logger::new(registry.with(tracing_subscriber::fmt::layer().json())),
        "compact" => Logger::new(registry.with(tracing_subscriber::fmt::layer().compact())),
        _ => Logger::new(registry.with(tracing_subscriber::fmt::layer().pretty())),
    }
}
