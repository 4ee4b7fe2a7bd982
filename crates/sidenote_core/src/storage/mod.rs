//! Key-value persistence collaborators.
//!
//! # Responsibility
//! - Define the injected get/set string-store contract the note store
//!   persists through.
//! - Provide the in-memory and SQLite-backed implementations.
//!
//! # Invariants
//! - Stores hold opaque text; interpretation belongs to the codec layer.
//! - `get` of an unknown key is `Ok(None)`, never an error.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by a key-value store implementation.
#[derive(Debug)]
pub enum StorageError {
    Sqlite(rusqlite::Error),
    /// The backend rejected the operation or is not reachable.
    Unavailable(String),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "store schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Unavailable(_) => None,
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Injected persistence collaborator: a durable string-to-string map.
///
/// The note store writes the whole serialized sequence under one fixed key
/// on every mutation, so implementations only need last-writer-wins
/// semantics per key.
pub trait KeyValueStore {
    /// Reads the value stored under `key`, or `None` when absent.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    /// Writes `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
}
