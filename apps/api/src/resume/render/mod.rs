//! Pure renderers from an assembled document to markdown or HTML.
//!
//! Every function here is a total function of its input and keeps no state, so
//! the editor can re-render on every keystroke.

pub mod html;
pub mod markdown;

use serde::Serialize;

use crate::resume::document::{assemble, Document};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rendered {
    pub markdown: String,
    pub html: String,
}

pub fn render(doc: &Document) -> Rendered {
    let blocks = assemble(doc);
    Rendered {
        markdown: markdown::render(&blocks),
        html: html::render(&blocks),
    }
}
