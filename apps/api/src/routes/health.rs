use std::time::Duration;

use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::warn;

use crate::state::AppState;

const DB_PING_TIMEOUT: Duration = Duration::from_secs(2);

/// GET /health
///
/// Always 200 while the process is up; `database` reports whether a pooled
/// connection answered `SELECT 1` in time.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let ping = tokio::time::timeout(
        DB_PING_TIMEOUT,
        sqlx::query("SELECT 1").execute(&state.db),
    )
    .await;

    let database = match ping {
        Ok(Ok(_)) => "up",
        Ok(Err(e)) => {
            warn!("Health check: database unreachable: {e}");
            "down"
        }
        Err(_) => {
            warn!("Health check: database ping timed out");
            "down"
        }
    };

    Json(json!({
        "status": "ok",
        "service": "coach-api",
        "version": env!("CARGO_PKG_VERSION"),
        "database": database,
    }))
}
