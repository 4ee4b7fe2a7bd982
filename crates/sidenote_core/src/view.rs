//! List-row display projections.
//!
//! # Responsibility
//! - Derive the title/preview fields a list pane renders per note, with
//!   the blank-note fallbacks, so UI shells do not re-implement them.
//!
//! # Invariants
//! - Projections never mutate the note.
//! - Preview text is whitespace-normalized and length-capped.

use crate::model::note::{Note, NoteId};
use once_cell::sync::Lazy;
use regex::Regex;

/// Title shown for a note whose title line is empty.
pub const DEFAULT_NOTE_TITLE: &str = "New Note";
/// Preview shown for a note whose content is empty.
pub const DEFAULT_NOTE_CONTENT: &str = "No additional content";

const PREVIEW_MAX_CHARS: usize = 100;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Render-ready row for the note list pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListRow {
    pub id: NoteId,
    /// Note title, or [`DEFAULT_NOTE_TITLE`] when empty.
    pub title: String,
    /// One-line content preview, or [`DEFAULT_NOTE_CONTENT`] when empty.
    pub preview: String,
    /// Unix epoch milliseconds of the last edit.
    pub last_edit: i64,
    /// Current filter-match flag.
    pub visible: bool,
}

/// Projects one note into its list row.
pub fn list_row(note: &Note) -> NoteListRow {
    let title = if note.title.is_empty() {
        DEFAULT_NOTE_TITLE.to_string()
    } else {
        note.title.clone()
    };

    NoteListRow {
        id: note.id,
        title,
        preview: preview_text(&note.content),
        last_edit: note.last_edit,
        visible: note.visible,
    }
}

/// Derives the one-line preview for a content body.
///
/// Rules:
/// - Runs of whitespace (including newlines) collapse to single spaces.
/// - The result keeps at most the first 100 characters.
/// - Empty content falls back to [`DEFAULT_NOTE_CONTENT`].
pub fn preview_text(content: &str) -> String {
    let normalized = WHITESPACE_RE.replace_all(content, " ");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        DEFAULT_NOTE_CONTENT.to_string()
    } else {
        trimmed.chars().take(PREVIEW_MAX_CHARS).collect()
    }
}
