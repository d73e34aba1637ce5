use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AssessmentRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub quiz_score: f64,
    pub questions: Value,
    pub category: String,
    pub improvement_tip: Option<String>,
    pub created_at: DateTime<Utc>,
}
