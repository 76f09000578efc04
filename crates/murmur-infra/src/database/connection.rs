//! Database connection bootstrap.

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

/// Configuration for the database connection pool.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    /// Total connection attempts at startup before giving up. Bounded:
    /// exhausting it is a fatal startup error, never an infinite loop.
    pub connect_attempts: u32,
}

/// Connect to the database with bounded exponential-backoff retry.
pub async fn connect(config: &DatabaseConfig) -> Result<DbConn, DbErr> {
    let opts = ConnectOptions::new(&config.url)
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(false)
        .to_owned();

    let attempts = config.connect_attempts.max(1);
    let mut delay = Duration::from_secs(1);

    for attempt in 1..=attempts {
        match Database::connect(opts.clone()).await {
            Ok(conn) => {
                tracing::info!(pool_size = config.max_connections, "database connected");
                return Ok(conn);
            }
            Err(e) if attempt < attempts => {
                tracing::warn!(
                    attempt,
                    max_attempts = attempts,
                    error = %e,
                    "database connection failed, retrying in {delay:?}"
                );
                tokio::time::sleep(delay).await;
                delay = (delay * 2).min(Duration::from_secs(30));
            }
            Err(e) => {
                tracing::error!(attempts, error = %e, "database unreachable, giving up");
                return Err(e);
            }
        }
    }

    unreachable!("attempts is at least 1")
}
