//! Per-section editor state: a list of entries plus an optional draft being added.

use serde::Serialize;

use crate::errors::FieldError;
use crate::resume::entry::{Entry, EntryDraft, SectionKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorMode {
    List,
    Add,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionEditor {
    kind: SectionKind,
    entries: Vec<Entry>,
    mode: EditorMode,
}

impl SectionEditor {
    pub fn new(kind: SectionKind, entries: Vec<Entry>) -> Self {
        Self {
            kind,
            entries,
            mode: EditorMode::List,
        }
    }

    pub fn kind(&self) -> SectionKind {
        self.kind
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }

    pub fn begin_add(&mut self) {
        self.mode = EditorMode::Add;
    }

    pub fn cancel(&mut self) {
        self.mode = EditorMode::List;
    }

    /// Accepts the draft into the section. On failure the editor stays in
    /// `Add` so the user can correct the draft.
    pub fn submit(&mut self, draft: &EntryDraft) -> Result<&Entry, Vec<FieldError>> {
        let entry = draft.accept(self.kind)?;
        self.entries.push(entry);
        self.mode = EditorMode::List;
        Ok(&self.entries[self.entries.len() - 1])
    }

    /// Removes exactly the entry at `index`, keeping the others in order.
    pub fn remove(&mut self, index: usize) -> Option<Entry> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }
}
