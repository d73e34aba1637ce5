//! AI rewriting of entry descriptions and the summary.
//!
//! `AppState` holds an `Arc<dyn TextImprover>`. The improved text is returned
//! to the caller only; nothing stored is modified.

use async_trait::async_trait;
use serde::Deserialize;

use crate::errors::AppError;
use crate::llm_client::prompts::PLAIN_TEXT_SYSTEM;
use crate::llm_client::LlmClient;
use crate::resume::prompts::build_improve_prompt;

/// What the text being improved belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImproveTarget {
    Summary,
    Experience,
    Education,
    Project,
    Certificate,
}

impl ImproveTarget {
    pub fn describe(self) -> &'static str {
        match self {
            ImproveTarget::Summary => "professional summary",
            ImproveTarget::Experience => "work experience",
            ImproveTarget::Education => "education",
            ImproveTarget::Project => "project",
            ImproveTarget::Certificate => "certification",
        }
    }
}

#[async_trait]
pub trait TextImprover: Send + Sync {
    async fn improve(
        &self,
        text: &str,
        target: ImproveTarget,
        industry: Option<&str>,
    ) -> Result<String, AppError>;
}

/// Claude-backed improver.
pub struct LlmTextImprover {
    llm: LlmClient,
}

impl LlmTextImprover {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl TextImprover for LlmTextImprover {
    async fn improve(
        &self,
        text: &str,
        target: ImproveTarget,
        industry: Option<&str>,
    ) -> Result<String, AppError> {
        if text.trim().is_empty() {
            return Err(AppError::Validation(
                "Enter some text before asking for an improvement".to_string(),
            ));
        }

        let prompt = build_improve_prompt(text, target.describe(), industry);
        self.llm
            .complete(&prompt, PLAIN_TEXT_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Improve {} failed: {e}", target.describe())))
    }
}
