//! On-device key/value persistence with volatile fallback.
//!
//! # Responsibility
//! - Raw load, save, delete of JSON values against the `kv` table.
//! - Probe storage availability once at startup; degrade to an in-memory
//!   map for the session when the probe fails.
//! - Clear keys whose stored value no longer parses as JSON.
//!
//! # Invariants
//! - The public API never propagates a storage fault; failures are logged
//!   and the operation degrades.
//! - A key that fails to parse is removed before `get_value` returns, so
//!   corrupt data is read at most once.

use crate::db::{open_db, DbResult};
use log::{error, info, warn};
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

const PROBE_KEY: &str = "__storage_probe__";

enum Backend {
    Sqlite(Connection),
    Memory(HashMap<String, String>),
}

/// Flat key/value store backing every persisted collection.
pub struct PersistentStore {
    backend: Backend,
}

impl PersistentStore {
    /// Opens the on-disk store, probing a throwaway write+delete before
    /// trusting it. Any failure (open, migration, probe) yields a volatile
    /// store instead; the condition is logged and never propagated.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let conn = match open_db(path) {
            Ok(conn) => conn,
            Err(err) => {
                warn!("event=storage_unavailable module=persist status=degraded stage=open error={err}");
                return Self::volatile();
            }
        };

        let mut store = Self {
            backend: Backend::Sqlite(conn),
        };
        match store.probe() {
            Ok(()) => {
                info!("event=storage_probe module=persist status=ok");
                store
            }
            Err(err) => {
                warn!("event=storage_unavailable module=persist status=degraded stage=probe error={err}");
                Self::volatile()
            }
        }
    }

    /// A store that never touches disk. Used as the degraded session mode
    /// and by tests.
    pub fn volatile() -> Self {
        Self {
            backend: Backend::Memory(HashMap::new()),
        }
    }

    /// Whether writes survive the process. `false` in degraded mode.
    pub fn is_persistent(&self) -> bool {
        matches!(self.backend, Backend::Sqlite(_))
    }

    /// Loads and parses the JSON value stored under `key`.
    ///
    /// Absent keys are a normal "not yet initialized" state. A value that
    /// fails to parse is treated as absent: the key is cleared and a
    /// `corrupt_record` event is logged.
    pub fn get_value(&mut self, key: &str) -> Option<Value> {
        let raw = match self.raw_get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                error!("event=kv_get module=persist status=error key={key} error={err}");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("event=corrupt_record module=persist key={key} action=cleared error={err}");
                self.remove(key);
                None
            }
        }
    }

    /// Serializes `value` and writes it under `key`, replacing any previous
    /// value.
    pub fn set_value(&mut self, key: &str, value: &impl Serialize) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(err) => {
                error!("event=kv_set module=persist status=error key={key} error={err}");
                return;
            }
        };
        if let Err(err) = self.raw_set(key, &raw) {
            error!("event=kv_set module=persist status=error key={key} error={err}");
        }
    }

    /// Deletes `key`. Removing an absent key is a no-op.
    pub fn remove(&mut self, key: &str) {
        if let Err(err) = self.raw_remove(key) {
            error!("event=kv_remove module=persist status=error key={key} error={err}");
        }
    }

    fn probe(&mut self) -> DbResult<()> {
        self.raw_set(PROBE_KEY, "\"probe\"")?;
        self.raw_remove(PROBE_KEY)?;
        Ok(())
    }

    fn raw_get(&self, key: &str) -> DbResult<Option<String>> {
        match &self.backend {
            Backend::Sqlite(conn) => {
                let value = conn
                    .query_row("SELECT value FROM kv WHERE key = ?1;", [key], |row| {
                        row.get::<_, String>(0)
                    })
                    .optional()?;
                Ok(value)
            }
            Backend::Memory(map) => Ok(map.get(key).cloned()),
        }
    }

    fn raw_set(&mut self, key: &str, value: &str) -> DbResult<()> {
        match &mut self.backend {
            Backend::Sqlite(conn) => {
                conn.execute(
                    "INSERT INTO kv (key, value) VALUES (?1, ?2)
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
                    params![key, value],
                )?;
                Ok(())
            }
            Backend::Memory(map) => {
                map.insert(key.to_string(), value.to_string());
                Ok(())
            }
        }
    }

    fn raw_remove(&mut self, key: &str) -> DbResult<()> {
        match &mut self.backend {
            Backend::Sqlite(conn) => {
                conn.execute("DELETE FROM kv WHERE key = ?1;", [key])?;
                Ok(())
            }
            Backend::Memory(map) => {
                map.remove(key);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn volatile_store_round_trips_values() {
        let mut store = PersistentStore::volatile();
        assert!(!store.is_persistent());
        assert!(store.get_value("userName").is_none());

        store.set_value("userName", &"Amina");
        assert_eq!(store.get_value("userName"), Some(json!("Amina")));

        store.remove("userName");
        assert!(store.get_value("userName").is_none());
    }

    #[test]
    fn removing_absent_key_is_noop() {
        let mut store = PersistentStore::volatile();
        store.remove("currentWeight");
        assert!(store.get_value("currentWeight").is_none());
    }
}
