use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub clerk_user_id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    /// `{industry}-{sub-industry}`; set once onboarding completes.
    pub industry: Option<String>,
    pub experience: Option<i32>,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_onboarded(&self) -> bool {
        self.industry.as_deref().is_some_and(|i| !i.is_empty())
    }
}
