use std::str::FromStr;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub anthropic_api_key: String,
    /// `whsec_`-prefixed signing secret shared with the identity provider.
    pub webhook_secret: String,
    pub port: u16,
    pub rust_log: String,
    /// Directory holding `{family}-Regular.ttf`, `-Bold.ttf`, `-Italic.ttf`, `-BoldItalic.ttf`.
    pub pdf_font_dir: String,
    pub pdf_font_family: String,
    pub provision_max_attempts: u32,
    pub provision_base_delay_ms: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            webhook_secret: require_env("IDENTITY_WEBHOOK_SECRET")?,
            port: env_or("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            pdf_font_dir: std::env::var("PDF_FONT_DIR")
                .unwrap_or_else(|_| "assets/fonts".to_string()),
            pdf_font_family: std::env::var("PDF_FONT_FAMILY")
                .unwrap_or_else(|_| "Roboto".to_string()),
            provision_max_attempts: env_or("PROVISION_MAX_ATTEMPTS", 5)?,
            provision_base_delay_ms: env_or("PROVISION_BASE_DELAY_MS", 250)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}
