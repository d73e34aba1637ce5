//! Industry insight generation and storage.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::insights::prompts::build_insights_prompt;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;
use crate::models::insight::IndustryInsightRow;

/// Insights are regenerated weekly.
pub const REFRESH_INTERVAL_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryRange {
    pub role: String,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub location: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DemandLevel {
    High,
    Medium,
    Low,
}

impl DemandLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            DemandLevel::High => "High",
            DemandLevel::Medium => "Medium",
            DemandLevel::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketOutlook {
    Positive,
    Neutral,
    Negative,
}

impl MarketOutlook {
    pub fn as_str(self) -> &'static str {
        match self {
            MarketOutlook::Positive => "Positive",
            MarketOutlook::Neutral => "Neutral",
            MarketOutlook::Negative => "Negative",
        }
    }
}

/// Insights as returned by the LLM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryInsights {
    pub salary_ranges: Vec<SalaryRange>,
    pub growth_rate: f64,
    pub demand_level: DemandLevel,
    pub top_skills: Vec<String>,
    pub market_outlook: MarketOutlook,
    pub key_trends: Vec<String>,
    #[serde(default)]
    pub recommended_skills: Vec<String>,
}

impl IndustryInsights {
    /// Drops salary ranges whose bounds are inverted or not finite.
    /// Fails when nothing usable is left.
    pub fn sanitized(mut self) -> Result<Self, String> {
        if !self.growth_rate.is_finite() {
            return Err("growthRate is not a number".to_string());
        }
        self.salary_ranges.retain(|r| {
            [r.min, r.max, r.median].iter().all(|v| v.is_finite())
                && r.min <= r.max
                && !r.role.trim().is_empty()
        });
        if self.salary_ranges.is_empty() {
            return Err("no valid salary ranges".to_string());
        }
        if self.top_skills.is_empty() {
            return Err("no top skills".to_string());
        }
        Ok(self)
    }
}

pub async fn generate_insights(llm: &LlmClient, industry: &str) -> Result<IndustryInsights, AppError> {
    info!("Generating industry insights for {industry}");
    let insights: IndustryInsights = llm
        .call_json(&build_insights_prompt(industry), JSON_ONLY_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Insight generation failed: {e}")))?;
    insights
        .sanitized()
        .map_err(|e| AppError::Llm(format!("Unusable insights for {industry}: {e}")))
}

pub async fn find_insight<'e, E: PgExecutor<'e>>(
    executor: E,
    industry: &str,
) -> Result<Option<IndustryInsightRow>, sqlx::Error> {
    sqlx::query_as::<_, IndustryInsightRow>("SELECT * FROM industry_insights WHERE industry = $1")
        .bind(industry)
        .fetch_optional(executor)
        .await
}

/// Stores freshly generated insights. If another request stored the same
/// industry first, that row is kept and returned.
pub async fn insert_insight<'e, E: PgExecutor<'e>>(
    executor: E,
    industry: &str,
    insights: &IndustryInsights,
) -> Result<IndustryInsightRow, AppError> {
    let salary_ranges =
        serde_json::to_value(&insights.salary_ranges).map_err(|e| AppError::Internal(e.into()))?;
    let next_update = Utc::now() + Duration::days(REFRESH_INTERVAL_DAYS);

    let row = sqlx::query_as::<_, IndustryInsightRow>(
        r#"
        INSERT INTO industry_insights
            (id, industry, salary_ranges, growth_rate, demand_level, top_skills,
             market_outlook, key_trends, recommended_skills, last_updated, next_update)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW(), $10)
        ON CONFLICT (industry) DO UPDATE SET industry = EXCLUDED.industry
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(industry)
    .bind(salary_ranges)
    .bind(insights.growth_rate)
    .bind(insights.demand_level.as_str())
    .bind(&insights.top_skills)
    .bind(insights.market_outlook.as_str())
    .bind(&insights.key_trends)
    .bind(&insights.recommended_skills)
    .bind(next_update)
    .fetch_one(executor)
    .await?;
    Ok(row)
}
