use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::identity::Identity;
use crate::insights::generator::{find_insight, generate_insights, insert_insight};
use crate::models::insight::IndustryInsightRow;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    pub insights: IndustryInsightRow,
}

/// GET /api/v1/dashboard/insights
///
/// Insights for the user's industry, generated on first request.
pub async fn handle_get_insights(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<InsightsResponse>, AppError> {
    let user = identity.require_user(&state.db).await?;
    let industry = match user.industry.as_deref() {
        Some(industry) if user.is_onboarded() => industry,
        _ => return Err(AppError::OnboardingRequired),
    };

    let insights = match find_insight(&state.db, industry).await? {
        Some(row) => row,
        None => {
            let generated = generate_insights(&state.llm, industry).await?;
            insert_insight(&state.db, industry, &generated).await?
        }
    };

    Ok(Json(InsightsResponse { insights }))
}
