//! Note domain model.
//!
//! # Responsibility
//! - Define the single domain record for the note collection.
//! - Provide helpers for edit-buffer derivation and filter matching.
//!
//! # Invariants
//! - `id` is stable for the lifetime of a note and never reused.
//! - `last_edit` is stamped by the store, never edited directly.
//! - `visible` is a transient filter flag; it is skipped on serialization
//!   and always `true` right after deserialization.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a note.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
/// Delete/select address notes by this id rather than by position, so the
/// operations stay valid across reordering and serialization boundaries.
pub type NoteId = Uuid;

fn default_visible() -> bool {
    true
}

/// A single short text note.
///
/// The persisted wire shape uses camelCase field names (`lastEdit`), the
/// format the stored payloads have always used. Payloads written before ids
/// existed load fine: a missing `id` is regenerated on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Stable identity used for delete/select addressing.
    #[serde(default = "Uuid::new_v4")]
    pub id: NoteId,
    /// First line of the edited text; may be empty.
    pub title: String,
    /// Remaining lines, newline-joined; may be empty.
    pub content: String,
    /// Unix epoch milliseconds of creation or last update.
    pub last_edit: i64,
    /// Filter-match flag recomputed on every filter change.
    #[serde(skip, default = "default_visible")]
    pub visible: bool,
}

impl Note {
    /// Creates a blank note stamped with the given timestamp.
    ///
    /// # Invariants
    /// - Title and content start empty.
    /// - The note starts visible (unfiltered).
    pub fn blank(now_epoch_ms: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: String::new(),
            content: String::new(),
            last_edit: now_epoch_ms,
            visible: true,
        }
    }

    /// Case-sensitive substring match over title OR content.
    ///
    /// An empty title or content never matches on that field, so a blank
    /// note is hidden by any non-empty query.
    pub fn matches(&self, query: &str) -> bool {
        let in_title = !self.title.is_empty() && self.title.contains(query);
        let in_content = !self.content.is_empty() && self.content.contains(query);
        in_title || in_content
    }

    /// Returns the text an editor pane shows for this note: the title,
    /// joined with the content by a newline when content is non-empty.
    pub fn editor_text(&self) -> String {
        let mut text = self.title.clone();
        if !self.content.is_empty() {
            text.push('\n');
            text.push_str(&self.content);
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::Note;

    #[test]
    fn blank_note_is_empty_and_visible() {
        let note = Note::blank(42);
        assert!(note.title.is_empty());
        assert!(note.content.is_empty());
        assert_eq!(note.last_edit, 42);
        assert!(note.visible);
    }

    #[test]
    fn blank_notes_get_distinct_ids() {
        assert_ne!(Note::blank(0).id, Note::blank(0).id);
    }

    #[test]
    fn matches_checks_title_and_content() {
        let mut note = Note::blank(0);
        note.title = "cat".to_string();
        note.content = "dogs are nice".to_string();

        assert!(note.matches("cat"));
        assert!(note.matches("dogs"));
        assert!(!note.matches("xyz"));
    }

    #[test]
    fn matches_is_case_sensitive() {
        let mut note = Note::blank(0);
        note.title = "Shopping".to_string();

        assert!(note.matches("Shop"));
        assert!(!note.matches("shop"));
    }

    #[test]
    fn empty_fields_never_match() {
        let note = Note::blank(0);
        assert!(!note.matches("anything"));
        // Even the empty query finds nothing to match in a blank note.
        assert!(!note.matches(""));
    }

    #[test]
    fn editor_text_joins_title_and_content() {
        let mut note = Note::blank(0);
        note.title = "Hello".to_string();
        note.content = "World".to_string();
        assert_eq!(note.editor_text(), "Hello\nWorld");

        note.content.clear();
        assert_eq!(note.editor_text(), "Hello");
    }
}
