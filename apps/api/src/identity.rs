//! Identity forwarded by the upstream auth gateway.
//!
//! Session verification happens before requests reach this service; the gateway
//! sets `x-user-id` (external identity id) and optionally `x-user-name`.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::user::User;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_NAME_HEADER: &str = "x-user-name";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub external_id: String,
    pub display_name: Option<String>,
}

#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let external_id = header(USER_ID_HEADER).ok_or(AppError::Unauthorized)?;
        Ok(Identity {
            external_id,
            display_name: header(USER_NAME_HEADER),
        })
    }
}

impl Identity {
    /// Looks up the local user row provisioned for this identity.
    pub async fn find_user(&self, pool: &PgPool) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE clerk_user_id = $1")
            .bind(&self.external_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn require_user(&self, pool: &PgPool) -> Result<User, AppError> {
        self.find_user(pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Name shown on the resume: the gateway-supplied display name, else the stored one.
    pub fn full_name(&self, user: &User) -> String {
        self.display_name
            .clone()
            .or_else(|| user.name.clone())
            .unwrap_or_default()
    }
}
