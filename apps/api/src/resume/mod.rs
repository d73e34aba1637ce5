//! Resume builder: entry model, form validation, document assembly, rendering,
//! PDF export, AI improvement and persistence.

pub mod document;
pub mod editor;
pub mod entry;
pub mod export;
pub mod form;
pub mod handlers;
pub mod improve;
pub mod prompts;
pub mod render;
pub mod store;
