//! Substring visibility filter over the note sequence.
//!
//! # Responsibility
//! - Recompute each note's `visible` flag for the current filter text.
//!
//! # Invariants
//! - Filtering never reorders or removes notes.
//! - The empty query marks every note visible and is idempotent.
//! - Matching is case-sensitive substring containment over title OR
//!   content.

use crate::model::note::Note;

/// Applies the filter text to the whole sequence in place.
///
/// Linear scan; expected collection sizes are tens to low hundreds of
/// notes, so no index is kept.
pub fn apply(notes: &mut [Note], query: &str) {
    if query.is_empty() {
        for note in notes.iter_mut() {
            note.visible = true;
        }
        return;
    }

    for note in notes.iter_mut() {
        note.visible = note.matches(query);
    }
}

/// Iterates the notes currently marked visible, in sequence order.
pub fn visible_notes<'a>(notes: &'a [Note]) -> impl Iterator<Item = &'a Note> {
    notes.iter().filter(|note| note.visible)
}
