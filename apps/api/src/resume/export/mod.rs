//! A4 PDF export of a rendered resume.
//!
//! `layout` turns markdown into printable blocks, `pdf` typesets them with
//! genpdf, and `tracker` discards artifacts that a newer export superseded.

pub mod layout;
pub mod pdf;
pub mod tracker;

use std::path::PathBuf;

use thiserror::Error;

use crate::config::Config;

pub use pdf::write_pdf;
pub use tracker::ExportTracker;

pub const FILENAME: &str = "resume.pdf";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("There is no resume content to export")]
    EmptyContent,

    #[error("A newer export was started; this one was discarded")]
    Superseded,

    #[error("Failed to load font family: {0}")]
    FontLoad(String),

    #[error("Failed to render PDF: {0}")]
    Render(String),
}

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub font_dir: PathBuf,
    pub font_family: String,
    /// Top, right, bottom, left.
    pub margins_mm: (f64, f64, f64, f64),
    pub font_size: u8,
    pub title: String,
}

impl ExportOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            font_dir: PathBuf::from(&config.pdf_font_dir),
            font_family: config.pdf_font_family.clone(),
            ..Self::default()
        }
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            font_dir: PathBuf::from("assets/fonts"),
            font_family: "Roboto".to_string(),
            margins_mm: (10.0, 10.0, 10.0, 10.0),
            font_size: 11,
            title: "Resume".to_string(),
        }
    }
}

/// A finished PDF ready to be served as a download.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub filename: &'static str,
    pub bytes: Vec<u8>,
}
