use std::sync::Arc;

use sqlx::PgPool;

use crate::llm_client::LlmClient;
use crate::resume::export::{ExportOptions, ExportTracker};
use crate::resume::improve::TextImprover;
use crate::retry::RetryPolicy;
use crate::webhooks::signature::WebhookVerifier;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    /// Pluggable description improver. Default: `LlmTextImprover`.
    pub improver: Arc<dyn TextImprover>,
    /// Latest export per user; older in-flight exports are discarded.
    pub exports: Arc<ExportTracker>,
    pub export_options: ExportOptions,
    /// How long the onboarding status check waits for the webhook-provisioned user.
    pub provisioning: RetryPolicy,
    pub webhook_verifier: WebhookVerifier,
}
