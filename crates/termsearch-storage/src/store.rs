//! Async key-value store interface
//!
//! Mirrors the extension storage area: `get` returns only the keys that are
//! present, `set` overwrites every key it is given. Last write wins.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::database::{get_setting_on, set_setting_on};
use crate::{Database, Result};

#[async_trait]
pub trait Store: Send + Sync {
    /// Fetch the values stored under `keys`. Absent keys are left out of the map.
    async fn get(&self, keys: &[&str]) -> Result<HashMap<String, Value>>;

    /// Write every entry of `entries`.
    async fn set(&self, entries: HashMap<String, Value>) -> Result<()>;
}

/// [`Store`] backed by the SQLite `settings` table.
#[derive(Clone)]
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn get(&self, keys: &[&str]) -> Result<HashMap<String, Value>> {
        self.db.with_connection(|conn| {
            let mut values = HashMap::with_capacity(keys.len());
            for key in keys {
                let Some(raw) = get_setting_on(conn, key)? else {
                    continue;
                };
                match serde_json::from_str(&raw) {
                    Ok(value) => {
                        values.insert((*key).to_string(), value);
                    }
                    Err(e) => {
                        tracing::warn!(key = %key, error = %e, "Ignoring malformed stored value");
                    }
                }
            }
            Ok(values)
        })
    }

    async fn set(&self, entries: HashMap<String, Value>) -> Result<()> {
        let encoded = entries
            .iter()
            .map(|(key, value)| Ok((key.as_str(), serde_json::to_string(value)?)))
            .collect::<Result<Vec<_>>>()?;

        self.db.transaction(|conn| {
            for (key, value) in &encoded {
                set_setting_on(conn, key, value)?;
            }
            Ok(())
        })?;

        tracing::debug!(keys = encoded.len(), "Persisted settings");
        Ok(())
    }
}

/// In-memory [`Store`]; contents live as long as the last clone.
#[derive(Clone, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value for `key`, if any.
    pub fn value(&self, key: &str) -> Option<Value> {
        self.values.lock().get(key).cloned()
    }

    pub fn insert(&self, key: impl Into<String>, value: Value) {
        self.values.lock().insert(key.into(), value);
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get(&self, keys: &[&str]) -> Result<HashMap<String, Value>> {
        let values = self.values.lock();
        Ok(keys
            .iter()
            .filter_map(|key| values.get(*key).map(|v| ((*key).to_string(), v.clone())))
            .collect())
    }

    async fn set(&self, entries: HashMap<String, Value>) -> Result<()> {
        self.values.lock().extend(entries);
        Ok(())
    }
}
