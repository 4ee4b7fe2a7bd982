//! Note store: sequence ownership, selection and persistence.
//!
//! # Responsibility
//! - Single source of truth for the ordered note sequence and the active
//!   note.
//! - Persist the full sequence through the injected key-value store after
//!   every mutation.
//!
//! # Invariants
//! - The sequence is never empty after any public operation completes;
//!   deleting the last note immediately refills with a fresh blank note.
//! - Whenever the sequence is non-empty, the active id names a member.
//! - `last_edit` stamps come only from the injected clock.

use crate::clock::{Clock, SystemClock};
use crate::filter;
use crate::layout::{LayoutController, NoopLayout};
use crate::model::note::{Note, NoteId};
use crate::storage::{KeyValueStore, StorageError};
use crate::store::codec::{decode_notes, encode_notes, CodecError};
use log::{debug, error, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed key the serialized note sequence is stored under.
pub const NOTES_KEY: &str = "notes";

pub type StoreResult<T> = Result<T, StoreError>;

/// Error surfaced by mutating store operations.
///
/// Only persistence writes can fail; the in-memory sequence is already
/// updated when one does, so callers may keep the session alive and retry
/// on the next mutation.
#[derive(Debug)]
pub enum StoreError {
    Codec(CodecError),
    Storage(StorageError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Codec(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Codec(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<CodecError> for StoreError {
    fn from(value: CodecError) -> Self {
        Self::Codec(value)
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Splits trimmed edit text into `(title, content)`.
///
/// The first line becomes the title; the remaining lines are rejoined with
/// newlines as the content. Empty input yields an empty title and content.
pub fn split_edit_text(raw_text: &str) -> (String, String) {
    let trimmed = raw_text.trim();
    let mut lines = trimmed.split('\n');
    let title = lines.next().unwrap_or_default().to_string();
    let content = lines.collect::<Vec<_>>().join("\n");
    (title, content)
}

/// Owner of the note sequence, active selection and persistence flow.
///
/// Storage is a generic seam so tests run against [`MemoryStore`] and
/// desktop sessions against [`SqliteStore`]; clock and layout are trait
/// objects because only tests ever swap them.
///
/// [`MemoryStore`]: crate::storage::MemoryStore
/// [`SqliteStore`]: crate::storage::SqliteStore
pub struct NoteStore<S: KeyValueStore> {
    storage: S,
    clock: Box<dyn Clock>,
    layout: Box<dyn LayoutController>,
    notes: Vec<Note>,
    active_id: Option<NoteId>,
}

impl<S: KeyValueStore> NoteStore<S> {
    /// Creates a store with the system clock and a no-op layout controller.
    pub fn new(storage: S) -> Self {
        Self::with_collaborators(storage, Box::new(SystemClock), Box::new(NoopLayout))
    }

    /// Creates a store with explicit clock and layout collaborators.
    pub fn with_collaborators(
        storage: S,
        clock: Box<dyn Clock>,
        layout: Box<dyn LayoutController>,
    ) -> Self {
        Self {
            storage,
            clock,
            layout,
            notes: Vec::new(),
            active_id: None,
        }
    }

    /// Loads the persisted sequence, degrading to a fresh blank note when
    /// nothing usable is stored, and selects the first note.
    ///
    /// # Contract
    /// - Never fails and never yields an empty sequence.
    /// - Absent, unreadable or malformed payloads fall back to one blank
    ///   note which is immediately persisted (best effort; a failed
    ///   initial write is logged, not surfaced).
    pub fn load(&mut self) -> &[Note] {
        self.notes = self.read_persisted().unwrap_or_default();

        if self.notes.is_empty() {
            let note = self.create();
            self.notes.push(note);
            if let Err(err) = self.persist() {
                error!("event=notes_load module=store status=error stage=seed_write error={err}");
            }
        } else {
            debug!(
                "event=notes_load module=store status=ok count={}",
                self.notes.len()
            );
        }

        let first = self.notes[0].id;
        self.select(first);
        &self.notes
    }

    fn read_persisted(&self) -> Option<Vec<Note>> {
        let payload = match self.storage.get(NOTES_KEY) {
            Ok(Some(payload)) => payload,
            Ok(None) => return None,
            Err(err) => {
                warn!("event=notes_load module=store status=fallback reason=read_failed error={err}");
                return None;
            }
        };

        match decode_notes(&payload) {
            Ok(notes) => Some(notes),
            Err(err) => {
                warn!("event=notes_load module=store status=fallback reason=malformed error={err}");
                None
            }
        }
    }

    /// Produces a new blank note stamped from the clock.
    ///
    /// Pure constructor: does not touch the sequence or persistence.
    pub fn create(&self) -> Note {
        Note::blank(self.clock.epoch_millis())
    }

    /// Creates a blank note, prepends it, selects it and persists.
    pub fn add(&mut self) -> StoreResult<NoteId> {
        let note = self.create();
        let id = note.id;
        self.notes.insert(0, note);
        self.select(id);
        self.persist()?;
        Ok(id)
    }

    /// Applies edited text to the active note and persists.
    ///
    /// The text is trimmed, then split: first line to title, remaining
    /// lines to content; `last_edit` is stamped from the clock. Calling
    /// with no active note is a caller error and degrades to a logged
    /// no-op.
    pub fn update(&mut self, raw_text: &str) -> StoreResult<()> {
        let Some(active_id) = self.active_id else {
            debug!("event=note_update module=store status=skipped reason=no_active_note");
            return Ok(());
        };

        let (title, content) = split_edit_text(raw_text);
        let now = self.clock.epoch_millis();
        let Some(note) = self.notes.iter_mut().find(|note| note.id == active_id) else {
            debug!("event=note_update module=store status=skipped reason=active_not_in_sequence");
            return Ok(());
        };

        note.title = title;
        note.content = content;
        note.last_edit = now;
        self.persist()
    }

    /// Removes the note with the given id and persists.
    ///
    /// Unknown ids are a no-op. When the sequence empties, a fresh blank
    /// note is inserted. When the deleted note was the active one (or the
    /// active pointer is otherwise no longer a member), selection moves to
    /// the note now occupying the deleted index, or to the new last note
    /// when the deletion was at the tail.
    pub fn delete(&mut self, id: NoteId) -> StoreResult<()> {
        let Some(index) = self.notes.iter().position(|note| note.id == id) else {
            debug!("event=note_delete module=store status=skipped reason=not_found");
            return Ok(());
        };

        let was_active = self.active_id == Some(id);
        self.notes.remove(index);

        if self.notes.is_empty() {
            let note = self.create();
            self.notes.push(note);
        }

        let active_still_member = self
            .active_id
            .is_some_and(|active| self.notes.iter().any(|note| note.id == active));
        if was_active || !active_still_member {
            let next_index = index.min(self.notes.len() - 1);
            let next_id = self.notes[next_index].id;
            self.select(next_id);
        }

        self.persist()
    }

    /// Marks the note with the given id as active.
    ///
    /// Membership is not validated; callers pass an id from the current
    /// sequence. Notifies the layout controller so responsive shells can
    /// collapse the list pane after a selection.
    pub fn select(&mut self, id: NoteId) {
        self.active_id = Some(id);
        self.layout.collapse();
    }

    /// Recomputes every note's visibility for the given filter text.
    pub fn apply_filter(&mut self, query: &str) {
        filter::apply(&mut self.notes, query);
    }

    /// Serializes the full sequence and writes it under [`NOTES_KEY`].
    ///
    /// Always a full overwrite. The in-memory sequence stays authoritative
    /// whether or not the write succeeds.
    pub fn persist(&mut self) -> StoreResult<()> {
        let payload = match encode_notes(&self.notes) {
            Ok(payload) => payload,
            Err(err) => {
                error!("event=notes_persist module=store status=error stage=encode error={err}");
                return Err(err.into());
            }
        };

        if let Err(err) = self.storage.set(NOTES_KEY, &payload) {
            error!("event=notes_persist module=store status=error stage=write error={err}");
            return Err(err.into());
        }

        Ok(())
    }

    /// The ordered note sequence, newest-created first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Id of the active note, when one is selected.
    pub fn active_id(&self) -> Option<NoteId> {
        self.active_id
    }

    /// The active note, when the active id names a current member.
    pub fn active(&self) -> Option<&Note> {
        let active_id = self.active_id?;
        self.notes.iter().find(|note| note.id == active_id)
    }

    /// Editor buffer for the active note (title joined with content).
    pub fn active_editor_text(&self) -> Option<String> {
        self.active().map(Note::editor_text)
    }

    /// Read access to the underlying storage collaborator.
    pub fn storage(&self) -> &S {
        &self.storage
    }
}
