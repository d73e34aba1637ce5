mod config;
mod db;
mod errors;
mod identity;
mod insights;
mod interview;
mod llm_client;
mod models;
mod onboarding;
mod resume;
mod retry;
mod routes;
mod state;
mod webhooks;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::resume::export::{ExportOptions, ExportTracker};
use crate::resume::improve::LlmTextImprover;
use crate::retry::RetryPolicy;
use crate::routes::build_router;
use crate::state::AppState;
use crate::webhooks::signature::WebhookVerifier;

/// Upper bound for a single provisioning backoff step.
const PROVISION_MAX_DELAY: Duration = Duration::from_secs(1);

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting coach API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone())
        .context("Failed to build the LLM HTTP client")?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let webhook_verifier = WebhookVerifier::new(&config.webhook_secret)
        .context("IDENTITY_WEBHOOK_SECRET is not a valid signing secret")?;

    let base_delay = Duration::from_millis(config.provision_base_delay_ms);
    let provisioning = RetryPolicy::new(
        config.provision_max_attempts,
        base_delay,
        PROVISION_MAX_DELAY.max(base_delay),
    );
    info!(
        "Provisioning wait: {} attempts, {}ms base delay",
        provisioning.max_attempts,
        base_delay.as_millis()
    );

    let export_options = ExportOptions::from_config(&config);
    info!(
        "PDF export: font family {} from {}",
        export_options.font_family,
        export_options.font_dir.display()
    );

    // Build app state
    let state = AppState {
        db,
        improver: Arc::new(LlmTextImprover::new(llm.clone())),
        llm,
        exports: Arc::new(ExportTracker::new()),
        export_options,
        provisioning,
        webhook_verifier,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the web app's domain

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
