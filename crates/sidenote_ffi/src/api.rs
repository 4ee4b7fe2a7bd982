//! FFI use-case API for UI-facing calls.
//!
//! # Responsibility
//! - Expose the note session as stable, use-case-level sync functions.
//! - Keep error semantics flat (ok/message envelopes) for UI integration.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - The process owns at most one note session.

use log::info;
use sidenote_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, list_row,
    ping as ping_inner, NoteId, NoteStore, SqliteStore,
};
use std::sync::{Mutex, OnceLock};

static SESSION: OnceLock<Mutex<NoteStore<SqliteStore>>> = OnceLock::new();

/// Minimal health-check API for bridge smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Exposes the core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes core logging once per process.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Idempotent for the same `level + log_dir`; reconfiguration fails.
/// - Never panics; returns empty string on success, error text on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Generic action response envelope for session mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Id of the note the operation produced or targeted, when relevant.
    pub note_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl SessionActionResponse {
    fn success(message: impl Into<String>, note_id: Option<String>) -> Self {
        Self {
            ok: true,
            note_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            note_id: None,
            message: message.into(),
        }
    }
}

/// One list-pane row in render-ready form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListItem {
    /// Stable note id in string form.
    pub id: String,
    /// Display title (fallback applied for blank notes).
    pub title: String,
    /// One-line preview (fallback applied for empty content).
    pub preview: String,
    /// Unix epoch milliseconds of the last edit.
    pub last_edit: i64,
    /// Current filter-match flag.
    pub visible: bool,
}

/// List response envelope for the note sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListResponse {
    pub ok: bool,
    /// Rows in display order, newest-created first.
    pub items: Vec<NoteListItem>,
    /// Id of the active note, when one is selected.
    pub active_id: Option<String>,
    pub message: String,
}

/// Editor-buffer response for the active note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorTextResponse {
    pub ok: bool,
    /// Title and content joined for the editor pane.
    pub text: Option<String>,
    pub message: String,
}

/// Opens the process-wide note session backed by a SQLite store file.
///
/// # FFI contract
/// - Sync call; opens storage and loads the persisted sequence.
/// - A second open attempt fails; the session lives for the process.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn session_open(db_path: String) -> SessionActionResponse {
    let path = db_path.trim();
    if path.is_empty() {
        return SessionActionResponse::failure("session_open failed: db_path is empty");
    }
    if SESSION.get().is_some() {
        return SessionActionResponse::failure("session_open failed: session already open");
    }

    let storage = match SqliteStore::open(path) {
        Ok(storage) => storage,
        Err(err) => {
            return SessionActionResponse::failure(format!("session_open failed: {err}"));
        }
    };

    let mut store = NoteStore::new(storage);
    store.load();
    let count = store.notes().len();

    match SESSION.set(Mutex::new(store)) {
        Ok(()) => {
            info!("event=session_open module=ffi status=ok count={count}");
            SessionActionResponse::success("Session opened.", None)
        }
        Err(_) => SessionActionResponse::failure("session_open failed: session already open"),
    }
}

/// Lists the current note sequence as render-ready rows.
///
/// # FFI contract
/// - Sync call over in-memory state; no storage access.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn session_notes() -> NoteListResponse {
    match with_session(list_response_of) {
        Ok(response) => response,
        Err(message) => NoteListResponse {
            ok: false,
            items: Vec::new(),
            active_id: None,
            message: format!("session_notes failed: {message}"),
        },
    }
}

/// Creates a blank note, prepends and selects it, and persists.
///
/// # FFI contract
/// - Sync call with a storage write.
/// - Never panics; returns the created note id on success.
#[flutter_rust_bridge::frb(sync)]
pub fn session_add() -> SessionActionResponse {
    match with_session(|store| store.add()) {
        Ok(Ok(id)) => SessionActionResponse::success("Note created.", Some(id.to_string())),
        Ok(Err(err)) => SessionActionResponse::failure(format!("session_add failed: {err}")),
        Err(message) => SessionActionResponse::failure(format!("session_add failed: {message}")),
    }
}

/// Applies edited text to the active note and persists.
///
/// # FFI contract
/// - Sync call with a storage write.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn session_update(text: String) -> SessionActionResponse {
    match with_session(|store| store.update(&text)) {
        Ok(Ok(())) => SessionActionResponse::success("Note updated.", None),
        Ok(Err(err)) => SessionActionResponse::failure(format!("session_update failed: {err}")),
        Err(message) => SessionActionResponse::failure(format!("session_update failed: {message}")),
    }
}

/// Selects the note with the given id.
///
/// # FFI contract
/// - Sync call over in-memory state; fires the layout signal.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn session_select(note_id: String) -> SessionActionResponse {
    let id = match parse_note_id(&note_id) {
        Ok(id) => id,
        Err(message) => {
            return SessionActionResponse::failure(format!("session_select failed: {message}"));
        }
    };

    match with_session(|store| store.select(id)) {
        Ok(()) => SessionActionResponse::success("Note selected.", Some(note_id)),
        Err(message) => SessionActionResponse::failure(format!("session_select failed: {message}")),
    }
}

/// Deletes the note with the given id and persists.
///
/// # FFI contract
/// - Sync call with a storage write.
/// - Unknown ids succeed as no-ops, matching core semantics.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn session_delete(note_id: String) -> SessionActionResponse {
    let id = match parse_note_id(&note_id) {
        Ok(id) => id,
        Err(message) => {
            return SessionActionResponse::failure(format!("session_delete failed: {message}"));
        }
    };

    match with_session(|store| store.delete(id)) {
        Ok(Ok(())) => SessionActionResponse::success("Note deleted.", Some(note_id)),
        Ok(Err(err)) => SessionActionResponse::failure(format!("session_delete failed: {err}")),
        Err(message) => SessionActionResponse::failure(format!("session_delete failed: {message}")),
    }
}

/// Recomputes note visibility for the filter text and returns the rows.
///
/// # FFI contract
/// - Sync call over in-memory state; no storage access.
/// - The empty string clears the filter.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn session_filter(query: String) -> NoteListResponse {
    let result = with_session(|store| {
        store.apply_filter(&query);
        list_response_of(store)
    });
    match result {
        Ok(response) => response,
        Err(message) => NoteListResponse {
            ok: false,
            items: Vec::new(),
            active_id: None,
            message: format!("session_filter failed: {message}"),
        },
    }
}

/// Returns the editor buffer for the active note.
///
/// # FFI contract
/// - Sync call over in-memory state.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn session_active_text() -> EditorTextResponse {
    match with_session(|store| store.active_editor_text()) {
        Ok(text) => EditorTextResponse {
            ok: true,
            text,
            message: String::new(),
        },
        Err(message) => EditorTextResponse {
            ok: false,
            text: None,
            message: format!("session_active_text failed: {message}"),
        },
    }
}

fn with_session<T>(op: impl FnOnce(&mut NoteStore<SqliteStore>) -> T) -> Result<T, String> {
    let session = SESSION.get().ok_or_else(|| "session not open".to_string())?;
    let mut store = session
        .lock()
        .map_err(|_| "session lock poisoned".to_string())?;
    Ok(op(&mut store))
}

fn list_response_of(store: &mut NoteStore<SqliteStore>) -> NoteListResponse {
    let items: Vec<NoteListItem> = store
        .notes()
        .iter()
        .map(|note| {
            let row = list_row(note);
            NoteListItem {
                id: row.id.to_string(),
                title: row.title,
                preview: row.preview,
                last_edit: row.last_edit,
                visible: row.visible,
            }
        })
        .collect();

    let message = if items.is_empty() {
        "No notes.".to_string()
    } else {
        format!("{} note(s).", items.len())
    };

    NoteListResponse {
        ok: true,
        items,
        active_id: store.active_id().map(|id| id.to_string()),
        message,
    }
}

fn parse_note_id(value: &str) -> Result<NoteId, String> {
    uuid::Uuid::parse_str(value.trim()).map_err(|_| format!("invalid note id `{value}`"))
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, ping, session_add, session_delete, session_filter, session_notes,
        session_open, session_select, session_update,
    };
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_db_path() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("sidenote-ffi-{}-{nanos}.sqlite3", std::process::id()))
    }

    #[test]
    fn ping_and_version_are_stable() {
        assert_eq!(ping(), "pong");
        assert!(!core_version().is_empty());
    }

    // The session is process-global, so the whole flow lives in one test.
    #[test]
    fn session_flow_end_to_end() {
        // Before open, every session call fails cleanly.
        let closed = session_notes();
        assert!(!closed.ok);
        assert!(closed.message.contains("session not open"));

        let db_path = unique_db_path();
        let opened = session_open(db_path.to_str().expect("utf-8 path").to_string());
        assert!(opened.ok, "{}", opened.message);

        // Opening twice is rejected.
        let reopened = session_open(db_path.to_str().expect("utf-8 path").to_string());
        assert!(!reopened.ok);

        // Load seeded one blank note.
        let listed = session_notes();
        assert!(listed.ok);
        assert_eq!(listed.items.len(), 1);
        assert!(listed.active_id.is_some());

        let added = session_add();
        assert!(added.ok, "{}", added.message);
        let added_id = added.note_id.expect("created note id");

        let updated = session_update("Groceries\nmilk".to_string());
        assert!(updated.ok, "{}", updated.message);

        let filtered = session_filter("milk".to_string());
        assert!(filtered.ok);
        let visible: Vec<_> = filtered.items.iter().filter(|item| item.visible).collect();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "Groceries");

        let cleared = session_filter(String::new());
        assert!(cleared.items.iter().all(|item| item.visible));

        let selected = session_select(added_id.clone());
        assert!(selected.ok);

        let bad_select = session_select("not-a-uuid".to_string());
        assert!(!bad_select.ok);

        let deleted = session_delete(added_id);
        assert!(deleted.ok, "{}", deleted.message);
        let after_delete = session_notes();
        assert_eq!(after_delete.items.len(), 1);

        let _ = std::fs::remove_file(&db_path);
    }
}
