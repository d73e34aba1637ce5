use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

const MAX_CONNECTIONS: u32 = 10;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens the Postgres pool shared by every handler.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    let target = redacted(database_url);
    info!("Connecting to PostgreSQL at {target}...");

    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await
        .with_context(|| format!("Failed to connect to PostgreSQL at {target}"))?;

    info!("PostgreSQL pool ready (max {MAX_CONNECTIONS} connections)");
    Ok(pool)
}

/// `host:port/database` of a connection URL. Credentials never reach the logs.
fn redacted(database_url: &str) -> String {
    match url::Url::parse(database_url) {
        Ok(url) => format!(
            "{}:{}{}",
            url.host_str().unwrap_or("localhost"),
            url.port().unwrap_or(5432),
            url.path()
        ),
        Err(_) => "<unparseable url>".to_string(),
    }
}
