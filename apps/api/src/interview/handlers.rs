//! Axum route handlers for interview-preparation quiz results.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::identity::Identity;
use crate::interview::prompts::build_tip_prompt;
use crate::interview::scoring::{assessment_stats, score_quiz, AnsweredQuestion, AssessmentStats};
use crate::llm_client::prompts::PLAIN_TEXT_SYSTEM;
use crate::models::assessment::AssessmentRow;
use crate::state::AppState;

const DEFAULT_CATEGORY: &str = "Technical";

#[derive(Debug, Deserialize)]
pub struct SaveAssessmentRequest {
    pub questions: Vec<AnsweredQuestion>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AssessmentsResponse {
    pub assessments: Vec<AssessmentRow>,
    pub stats: AssessmentStats,
}

/// GET /api/v1/interview/assessments
pub async fn handle_list_assessments(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<AssessmentsResponse>, AppError> {
    let user = identity.require_user(&state.db).await?;
    let assessments = sqlx::query_as::<_, AssessmentRow>(
        "SELECT * FROM assessments WHERE user_id = $1 ORDER BY created_at ASC",
    )
    .bind(user.id)
    .fetch_all(&state.db)
    .await?;

    let stats = assessment_stats(&assessments);
    Ok(Json(AssessmentsResponse { assessments, stats }))
}

/// POST /api/v1/interview/assessments
///
/// Scores and stores a quiz. A tip is requested only when some answers were
/// wrong; if that request fails the assessment is still stored without one.
pub async fn handle_save_assessment(
    State(state): State<AppState>,
    identity: Identity,
    Json(request): Json<SaveAssessmentRequest>,
) -> Result<Json<AssessmentRow>, AppError> {
    let user = identity.require_user(&state.db).await?;
    let outcome = score_quiz(&request.questions);

    let improvement_tip = if outcome.wrong().next().is_some() {
        let industry = user.industry.as_deref().unwrap_or("general");
        let prompt = build_tip_prompt(industry, outcome.wrong());
        match state.llm.complete(&prompt, PLAIN_TEXT_SYSTEM).await {
            Ok(tip) => Some(tip),
            Err(e) => {
                warn!("Improvement tip failed for user {}: {e}", user.id);
                None
            }
        }
    } else {
        None
    };

    let questions =
        serde_json::to_value(&outcome.results).map_err(|e| AppError::Internal(e.into()))?;
    let category = request
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CATEGORY);

    let row = sqlx::query_as::<_, AssessmentRow>(
        r#"
        INSERT INTO assessments (id, user_id, quiz_score, questions, category, improvement_tip)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user.id)
    .bind(outcome.score)
    .bind(questions)
    .bind(category)
    .bind(&improvement_tip)
    .fetch_one(&state.db)
    .await?;

    info!(
        "Stored assessment {} for user {} (score {:.1})",
        row.id, user.id, row.quiz_score
    );
    Ok(Json(row))
}
