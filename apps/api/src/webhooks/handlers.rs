//! Identity-provider webhook: keeps the local `users` table in sync.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

const ID_HEADER: &str = "svix-id";
const TIMESTAMP_HEADER: &str = "svix-timestamp";
const SIGNATURE_HEADER: &str = "svix-signature";

#[derive(Debug, Deserialize)]
struct WebhookEvent {
    #[serde(rename = "type")]
    event_type: String,
    data: Value,
}

#[derive(Debug, Deserialize)]
struct EmailAddress {
    email_address: String,
}

#[derive(Debug, Deserialize)]
struct IdentityUser {
    id: String,
    #[serde(default)]
    email_addresses: Vec<EmailAddress>,
    first_name: Option<String>,
    last_name: Option<String>,
}

impl IdentityUser {
    fn primary_email(&self) -> Option<&str> {
        self.email_addresses.first().map(|e| e.email_address.as_str())
    }

    fn display_name(&self) -> Option<String> {
        let name = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        );
        let name = name.trim();
        (!name.is_empty()).then(|| name.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct DeletedUser {
    id: String,
}

/// POST /api/v1/webhooks/identity
///
/// `user.created` provisions the local user (an existing one is left alone),
/// `user.deleted` removes it. Other events are acknowledged and ignored.
pub async fn handle_identity_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());
    let (Some(id), Some(timestamp), Some(signatures)) = (
        header(ID_HEADER),
        header(TIMESTAMP_HEADER),
        header(SIGNATURE_HEADER),
    ) else {
        return Err(AppError::Validation("Missing svix headers".to_string()));
    };

    if let Err(e) = state
        .webhook_verifier
        .verify(id, timestamp, signatures, &body, Utc::now().timestamp())
    {
        warn!("Rejected identity webhook {id}: {e}");
        return Err(AppError::Validation("Invalid signature".to_string()));
    }

    let event: WebhookEvent = serde_json::from_slice(&body)
        .map_err(|e| AppError::Validation(format!("Malformed webhook payload: {e}")))?;

    match event.event_type.as_str() {
        "user.created" => {
            let user: IdentityUser = serde_json::from_value(event.data)
                .map_err(|e| AppError::Validation(format!("Malformed user payload: {e}")))?;
            let inserted = sqlx::query(
                r#"
                INSERT INTO users (id, clerk_user_id, email, name)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (clerk_user_id) DO NOTHING
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(&user.id)
            .bind(user.primary_email())
            .bind(user.display_name())
            .execute(&state.db)
            .await?
            .rows_affected();

            if inserted == 0 {
                info!("User {} already exists, skipping", user.id);
            } else {
                info!("Provisioned user for identity {}", user.id);
            }
        }
        "user.deleted" => {
            let user: DeletedUser = serde_json::from_value(event.data)
                .map_err(|e| AppError::Validation(format!("Malformed user payload: {e}")))?;
            let deleted = sqlx::query("DELETE FROM users WHERE clerk_user_id = $1")
                .bind(&user.id)
                .execute(&state.db)
                .await?
                .rows_affected();
            info!("Deleted {deleted} user(s) for identity {}", user.id);
        }
        other => info!("Ignoring identity webhook event {other}"),
    }

    Ok((StatusCode::OK, Json(json!({ "received": true }))))
}
