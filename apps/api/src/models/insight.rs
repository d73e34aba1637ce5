use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct IndustryInsightRow {
    pub id: Uuid,
    pub industry: String,
    pub salary_ranges: Value,
    pub growth_rate: f64,
    pub demand_level: String,
    pub top_skills: Vec<String>,
    pub market_outlook: String,
    pub key_trends: Vec<String>,
    pub recommended_skills: Vec<String>,
    pub last_updated: DateTime<Utc>,
    pub next_update: DateTime<Utc>,
}
