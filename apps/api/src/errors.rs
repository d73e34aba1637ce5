use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::resume::export::ExportError;

/// A single rejected form field, addressed by its dotted form path
/// (`contactInfo.email`, `experience[1].title`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Re-addresses the error under a parent path, e.g. `title` → `experience[2].title`.
    pub fn nested(self, parent: &str) -> Self {
        Self {
            field: format!("{parent}.{}", self.field),
            message: self.message,
        }
    }
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Validation failed for {} field(s)", .0.len())]
    InvalidFields(Vec<FieldError>),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("User has not been provisioned yet")]
    NotProvisioned,

    #[error("Onboarding required")]
    OnboardingRequired,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::InvalidFields(_) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "One or more fields are invalid".to_string(),
            ),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            AppError::NotProvisioned => (
                StatusCode::NOT_FOUND,
                "USER_NOT_PROVISIONED",
                "Your account is still being set up, please try again shortly".to_string(),
            ),
            AppError::OnboardingRequired => (
                StatusCode::CONFLICT,
                "ONBOARDING_REQUIRED",
                "Complete onboarding first".to_string(),
            ),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "AI_SERVICE_ERROR",
                    "The AI service is unavailable, please try again".to_string(),
                )
            }
            AppError::Export(e) => {
                tracing::warn!("Export failed: {e}");
                let (status, code) = match e {
                    ExportError::EmptyContent => {
                        (StatusCode::UNPROCESSABLE_ENTITY, "EXPORT_CONTENT_MISSING")
                    }
                    ExportError::Superseded => (StatusCode::CONFLICT, "EXPORT_SUPERSEDED"),
                    ExportError::FontLoad(_) | ExportError::Render(_) => {
                        (StatusCode::SERVICE_UNAVAILABLE, "EXPORT_FAILED")
                    }
                };
                (status, code, e.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let AppError::InvalidFields(fields) = &self {
            error["fields"] = json!(fields);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_invalid_fields_lists_every_field() {
        let err = AppError::InvalidFields(vec![
            FieldError::new("title", "Title / Position is required"),
            FieldError::new("link", "Must be a valid URL"),
        ]);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["fields"].as_array().unwrap().len(), 2);
        assert_eq!(body["error"]["fields"][1]["field"], "link");
    }

    #[tokio::test]
    async fn test_llm_error_is_masked() {
        let response = AppError::Llm("upstream 529: overloaded".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "AI_SERVICE_ERROR");
        assert!(!body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("overloaded"));
    }

    #[tokio::test]
    async fn test_export_errors_map_to_statuses() {
        let empty = AppError::from(ExportError::EmptyContent).into_response();
        assert_eq!(empty.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let stale = AppError::from(ExportError::Superseded).into_response();
        assert_eq!(stale.status(), StatusCode::CONFLICT);
        let fonts = AppError::from(ExportError::FontLoad("missing".into())).into_response();
        assert_eq!(fonts.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_nested_field_path() {
        let e = FieldError::new("title", "required").nested("experience[2]");
        assert_eq!(e.field, "experience[2].title");
    }
}
