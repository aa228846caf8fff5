// PostgreSQL pool construction
// Author: kelexine (https://github.com/kelexine)

use crate::config::DatabaseConfig;
use crate::error::Result;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Build the pool without opening a connection.
///
/// Connections are established on first use, so the service starts (and
/// answers `/health-check`) while the database is still coming up.
pub fn connect_lazy(config: &DatabaseConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
        .connect_lazy(&config.url)?;

    Ok(pool)
}
