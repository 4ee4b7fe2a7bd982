//! SQLite-backed key-value store.
//!
//! # Responsibility
//! - Provide the durable [`KeyValueStore`] used by desktop sessions.
//! - Bootstrap the single `kv` table before returning a usable store.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - A store created by a newer schema version is rejected, not migrated
//!   down.

use crate::storage::{KeyValueStore, StorageError, StorageResult};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::Instant;

const KV_SCHEMA_VERSION: u32 = 1;
const KV_INIT_SQL: &str = "CREATE TABLE IF NOT EXISTS kv (
    key   TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL
);";

/// Durable [`KeyValueStore`] over a single SQLite table.
pub struct SqliteStore {
    conn: Connection,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore").finish_non_exhaustive()
    }
}

impl SqliteStore {
    /// Opens (creating if needed) a store file and bootstraps its schema.
    ///
    /// # Side effects
    /// - Emits `store_open` logging events with duration and status.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let started_at = Instant::now();
        let conn = match Connection::open(path) {
            Ok(conn) => conn,
            Err(err) => {
                error!(
                    "event=store_open module=storage status=error mode=file duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err.into());
            }
        };

        match Self::bootstrap(conn) {
            Ok(store) => {
                info!(
                    "event=store_open module=storage status=ok mode=file duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(store)
            }
            Err(err) => {
                error!(
                    "event=store_open module=storage status=error mode=file duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Opens a private in-memory store. Useful for tests and dry runs.
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::bootstrap(conn)
    }

    fn bootstrap(mut conn: Connection) -> StorageResult<Self> {
        let current: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;

        if current > KV_SCHEMA_VERSION {
            return Err(StorageError::UnsupportedSchemaVersion {
                db_version: current,
                latest_supported: KV_SCHEMA_VERSION,
            });
        }

        if current < KV_SCHEMA_VERSION {
            let tx = conn.transaction()?;
            tx.execute_batch(KV_INIT_SQL)?;
            tx.execute_batch(&format!("PRAGMA user_version = {KV_SCHEMA_VERSION};"))?;
            tx.commit()?;
        }

        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1;", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteStore;
    use crate::storage::KeyValueStore;

    #[test]
    fn in_memory_store_roundtrips_values() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.get("notes").unwrap(), None);

        store.set("notes", "[1]").unwrap();
        assert_eq!(store.get("notes").unwrap().as_deref(), Some("[1]"));

        store.set("notes", "[2]").unwrap();
        assert_eq!(store.get("notes").unwrap().as_deref(), Some("[2]"));
    }
}
