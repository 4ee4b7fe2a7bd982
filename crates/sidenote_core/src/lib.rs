//! Core domain logic for Sidenote.
//! This crate is the single source of truth for note lifecycle invariants.

pub mod clock;
pub mod filter;
pub mod layout;
pub mod logging;
pub mod model;
pub mod storage;
pub mod store;
pub mod view;

pub use clock::{Clock, ManualClock, SystemClock};
pub use layout::{
    CountingLayout, DeferredLayout, LayoutController, NoopLayout, DEFAULT_COLLAPSE_DELAY,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteId};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore, StorageError, StorageResult};
pub use store::codec::{decode_notes, encode_notes, CodecError, CodecResult};
pub use store::note_store::{split_edit_text, NoteStore, StoreError, StoreResult, NOTES_KEY};
pub use view::{list_row, preview_text, NoteListRow, DEFAULT_NOTE_CONTENT, DEFAULT_NOTE_TITLE};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
