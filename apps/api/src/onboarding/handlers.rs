//! Axum route handlers for onboarding.

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::identity::Identity;
use crate::insights::generator::{find_insight, generate_insights, insert_insight, IndustryInsights};
use crate::models::insight::IndustryInsightRow;
use crate::models::user::User;
use crate::onboarding::validation::OnboardingForm;
use crate::retry::poll_until_found;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingStatus {
    pub is_onboarded: bool,
}

#[derive(Debug, Serialize)]
pub struct OnboardingResponse {
    pub user: User,
    pub insights: IndustryInsightRow,
}

enum InsightSource {
    Stored(IndustryInsightRow),
    Generated(IndustryInsights),
}

/// GET /api/v1/onboarding/status
///
/// The user row is created by the identity webhook, which may land after the
/// first authenticated request. Waits for it with the provisioning retry policy
/// and answers `USER_NOT_PROVISIONED` if it never shows up.
pub async fn handle_status(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<OnboardingStatus>, AppError> {
    let pool = &state.db;
    let who = &identity;
    let user = poll_until_found(&state.provisioning, move || who.find_user(pool))
        .await?
        .ok_or(AppError::NotProvisioned)?;

    Ok(Json(OnboardingStatus {
        is_onboarded: user.is_onboarded(),
    }))
}

/// POST /api/v1/onboarding
///
/// Stores the profile and makes sure insights exist for the chosen industry.
/// The insight insert and the user update commit together.
pub async fn handle_submit(
    State(state): State<AppState>,
    identity: Identity,
    Json(form): Json<OnboardingForm>,
) -> Result<Json<OnboardingResponse>, AppError> {
    let user = identity.require_user(&state.db).await?;
    let profile = form.validate().map_err(AppError::InvalidFields)?;

    // The LLM call runs before the transaction opens so no connection is held across it.
    let source = match find_insight(&state.db, &profile.industry).await? {
        Some(row) => InsightSource::Stored(row),
        None => InsightSource::Generated(generate_insights(&state.llm, &profile.industry).await?),
    };

    let mut tx = state.db.begin().await?;

    let insights = match source {
        InsightSource::Stored(row) => row,
        InsightSource::Generated(generated) => {
            insert_insight(&mut *tx, &profile.industry, &generated).await?
        }
    };

    let user = sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET industry = $1, experience = $2, bio = $3, skills = $4, updated_at = NOW()
        WHERE id = $5
        RETURNING *
        "#,
    )
    .bind(&profile.industry)
    .bind(profile.experience)
    .bind(&profile.bio)
    .bind(&profile.skills)
    .bind(user.id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    info!("User {} onboarded into {}", user.id, profile.industry);

    Ok(Json(OnboardingResponse { user, insights }))
}
