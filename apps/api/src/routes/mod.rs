pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::insights::handlers as insights;
use crate::interview::handlers as interview;
use crate::onboarding::handlers as onboarding;
use crate::resume::handlers as resume;
use crate::state::AppState;
use crate::webhooks::handlers as webhooks;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Identity provider
        .route(
            "/api/v1/webhooks/identity",
            post(webhooks::handle_identity_webhook),
        )
        // Onboarding & dashboard
        .route("/api/v1/onboarding/status", get(onboarding::handle_status))
        .route("/api/v1/onboarding", post(onboarding::handle_submit))
        .route(
            "/api/v1/dashboard/insights",
            get(insights::handle_get_insights),
        )
        // Resume builder
        .route(
            "/api/v1/resume",
            get(resume::handle_get_resume).put(resume::handle_save_resume),
        )
        .route("/api/v1/resume/preview", post(resume::handle_preview))
        .route(
            "/api/v1/resume/sections/:section",
            post(resume::handle_section_action),
        )
        .route("/api/v1/resume/improve", post(resume::handle_improve))
        .route("/api/v1/resume/export", post(resume::handle_export))
        // Interview preparation
        .route(
            "/api/v1/interview/assessments",
            get(interview::handle_list_assessments).post(interview::handle_save_assessment),
        )
        .with_state(state)
}
