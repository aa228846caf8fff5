// basic-api - HTTP router bootstrap over axum, tower-http and sqlx
// Author: kelexine (https://github.com/kelexine)

use anyhow::{Context, Result};
use basic_api::cli::Args;
use basic_api::config::AppConfig;
use basic_api::db;
use basic_api::server::{create_router, PipelineSettings};
use basic_api::utils::logging;
use clap::Parser;
use std::net::SocketAddr;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration
    let mut config = AppConfig::load_from(args.config.as_deref())?;
    if let Some(port) = args.port {
        config.server.port = port;
    }

    // Phase 2: Initialize logging
    let logger = logging::init(&config.logging)?;
    info!("Starting basic-api v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Database pool (connects on first use)
    let pool = db::connect_lazy(&config.database)?;
    info!(
        max_connections = config.database.max_connections,
        "Database pool configured"
    );

    // Phase 4: Build router
    let settings = PipelineSettings::from(&config.http);
    info!(
        timeout_secs = settings.request_timeout.as_secs(),
        skip_log_paths = ?settings.skip_log_paths,
        "Request pipeline configured"
    );
    let app = create_router(&settings, pool.clone(), logger);

    let addr: SocketAddr = config
        .listen_addr()
        .parse()
        .with_context(|| format!("invalid listen address {}", config.listen_addr()))?;

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 5: Run server with graceful shutdown
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    pool.close().await;
    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
