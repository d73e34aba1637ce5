//! Axum route handlers for the resume editor.

use anyhow::anyhow;
use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::identity::Identity;
use crate::models::user::User;
use crate::resume::document::Document;
use crate::resume::editor::{EditorMode, SectionEditor};
use crate::resume::entry::{Entry, EntryDraft, SectionKind};
use crate::resume::export::{self, Artifact, ExportError};
use crate::resume::form::{validate, ResumeForm};
use crate::resume::improve::ImproveTarget;
use crate::resume::render::{self, markdown};
use crate::resume::store::{load_resume, save_resume};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Where the markdown to save or export comes from.
#[derive(Debug, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum ResumeSource {
    /// The editor form; rendered server-side.
    Form { form: ResumeForm },
    /// Markdown edited by hand in the preview.
    Markdown { content: String },
    /// The last saved resume.
    Saved,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedResume {
    pub content: String,
    pub html: String,
    pub form: Option<Value>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    pub resume: Option<SavedResume>,
}

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub form: ResumeForm,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub markdown: String,
    pub html: String,
    pub document: Document,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SectionAction {
    Add { draft: EntryDraft },
    Remove { index: usize },
    /// Leaves the add form without touching the entries.
    Cancel,
}

#[derive(Debug, Deserialize)]
pub struct SectionRequest {
    #[serde(default)]
    pub entries: Vec<Entry>,
    pub action: SectionAction,
}

#[derive(Debug, Serialize)]
pub struct SectionResponse {
    pub section: SectionKind,
    pub mode: EditorMode,
    pub entries: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
pub struct ImproveRequest {
    pub text: String,
    pub target: ImproveTarget,
}

#[derive(Debug, Serialize)]
pub struct ImproveResponse {
    pub improved: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/resume
///
/// The saved resume with a CommonMark preview of its markdown, or `null`.
pub async fn handle_get_resume(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<ResumeResponse>, AppError> {
    let user = identity.require_user(&state.db).await?;
    let resume = load_resume(&state.db, user.id).await?.map(|row| SavedResume {
        html: markdown::to_html(&row.content),
        content: row.content,
        form: row.form,
        updated_at: row.updated_at,
    });
    Ok(Json(ResumeResponse { resume }))
}

/// PUT /api/v1/resume
///
/// Saves the whole resume. A form is validated and rendered first; hand-edited
/// markdown is stored as is and drops the form snapshot.
pub async fn handle_save_resume(
    State(state): State<AppState>,
    identity: Identity,
    Json(source): Json<ResumeSource>,
) -> Result<Json<SavedResume>, AppError> {
    let user = identity.require_user(&state.db).await?;

    let (content, form) = match source {
        ResumeSource::Form { form } => {
            let doc = validate(&form, &identity.full_name(&user)).map_err(AppError::InvalidFields)?;
            let rendered = render::render(&doc);
            let snapshot = serde_json::to_value(&form).map_err(|e| AppError::Internal(e.into()))?;
            (rendered.markdown, Some(snapshot))
        }
        ResumeSource::Markdown { content } => {
            if content.trim().is_empty() {
                return Err(AppError::Validation(
                    "Resume content cannot be empty".to_string(),
                ));
            }
            (content, None)
        }
        ResumeSource::Saved => {
            return Err(AppError::Validation(
                "Nothing to save: provide a form or markdown content".to_string(),
            ))
        }
    };

    let row = save_resume(&state.db, user.id, &content, form).await?;
    info!("Saved resume for user {} ({} bytes)", user.id, row.content.len());

    Ok(Json(SavedResume {
        html: markdown::to_html(&row.content),
        content: row.content,
        form: row.form,
        updated_at: row.updated_at,
    }))
}

/// POST /api/v1/resume/preview
///
/// Validates the form and returns its markdown and HTML renderings. Pure; nothing is stored.
pub async fn handle_preview(
    State(state): State<AppState>,
    identity: Identity,
    Json(request): Json<PreviewRequest>,
) -> Result<Json<PreviewResponse>, AppError> {
    let user = identity.require_user(&state.db).await?;
    let document =
        validate(&request.form, &identity.full_name(&user)).map_err(AppError::InvalidFields)?;
    let rendered = render::render(&document);
    Ok(Json(PreviewResponse {
        markdown: rendered.markdown,
        html: rendered.html,
        document,
    }))
}

/// POST /api/v1/resume/sections/:section
///
/// Applies one editor action (add a draft, remove by index) to a section's entries.
/// Nothing is stored, so the caller only needs an identity, not a provisioned user.
pub async fn handle_section_action(
    Path(section): Path<SectionKind>,
    identity: Identity,
    Json(request): Json<SectionRequest>,
) -> Result<Json<SectionResponse>, AppError> {
    if let Some(index) = request.entries.iter().position(|e| e.kind() != section) {
        return Err(AppError::Validation(format!(
            "Entry {index} does not belong to {}",
            section.heading()
        )));
    }

    let mut editor = SectionEditor::new(section, request.entries);
    match request.action {
        SectionAction::Add { draft } => {
            editor.begin_add();
            editor.submit(&draft).map_err(AppError::InvalidFields)?;
        }
        SectionAction::Remove { index } => {
            editor.remove(index).ok_or_else(|| {
                AppError::Validation(format!("No {} entry at index {index}", section.heading()))
            })?;
        }
        SectionAction::Cancel => {
            editor.begin_add();
            editor.cancel();
        }
    }
    debug!(
        "Section {} for {} now holds {} entries",
        section.form_key(),
        identity.external_id,
        editor.entries().len()
    );

    Ok(Json(SectionResponse {
        section: editor.kind(),
        mode: editor.mode(),
        entries: editor.into_entries(),
    }))
}

/// POST /api/v1/resume/improve
///
/// Returns an AI-improved version of the text. The caller decides whether to keep it.
pub async fn handle_improve(
    State(state): State<AppState>,
    identity: Identity,
    Json(request): Json<ImproveRequest>,
) -> Result<Json<ImproveResponse>, AppError> {
    let user = identity.require_user(&state.db).await?;
    let improved = state
        .improver
        .improve(&request.text, request.target, user.industry.as_deref())
        .await?;
    Ok(Json(ImproveResponse { improved }))
}

/// POST /api/v1/resume/export
///
/// Renders the chosen source to an A4 PDF and returns it as a `resume.pdf` download.
pub async fn handle_export(
    State(state): State<AppState>,
    identity: Identity,
    Json(source): Json<ResumeSource>,
) -> Result<impl IntoResponse, AppError> {
    let user = identity.require_user(&state.db).await?;
    let markdown = resolve_markdown(&state, &identity, &user, source).await?;

    let ticket = state.exports.begin(user.id);
    let options = state.export_options.clone();
    let result = tokio::task::spawn_blocking(move || export::write_pdf(&markdown, &options))
        .await
        .map_err(|e| AppError::Internal(anyhow!("export task failed: {e}")))?;

    // Close the ticket even when rendering failed so the map does not keep it.
    let finished = state.exports.finish(&ticket);
    let bytes = result?;
    if let Err(e) = finished {
        warn!("Discarding stale export for user {}", user.id);
        return Err(e.into());
    }

    let artifact = Artifact {
        filename: export::FILENAME,
        bytes,
    };
    info!(
        "Exported {} for user {} ({} bytes)",
        artifact.filename,
        user.id,
        artifact.bytes.len()
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", artifact.filename),
            ),
        ],
        artifact.bytes,
    ))
}

async fn resolve_markdown(
    state: &AppState,
    identity: &Identity,
    user: &User,
    source: ResumeSource,
) -> Result<String, AppError> {
    match source {
        ResumeSource::Form { form } => {
            let doc = validate(&form, &identity.full_name(user)).map_err(AppError::InvalidFields)?;
            Ok(render::render(&doc).markdown)
        }
        ResumeSource::Markdown { content } => Ok(content),
        ResumeSource::Saved => load_resume(&state.db, user.id)
            .await?
            .map(|row| row.content)
            .ok_or(AppError::Export(ExportError::EmptyContent)),
    }
}
