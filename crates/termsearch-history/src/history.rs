//! Command history management

use std::collections::{HashMap, VecDeque};

use termsearch_storage::{StorageError, Store};

use crate::Result;

pub const COMMAND_HISTORY_KEY: &str = "commandHistory";
pub const DEFAULT_CAPACITY: usize = 500;

/// In-memory sliding window of submitted lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandHistory {
    entries: VecDeque<String>,
    capacity: usize,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// `capacity` is clamped to `1..=DEFAULT_CAPACITY`.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, DEFAULT_CAPACITY);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Build a window from stored lines, keeping the newest `capacity`.
    pub fn from_lines<I>(lines: I, capacity: usize) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut history = Self::with_capacity(capacity);
        for line in lines {
            history.push(line);
        }
        history
    }

    /// Append `line` unless it repeats the newest entry or is blank.
    ///
    /// Returns whether anything was stored.
    pub fn push(&mut self, line: impl Into<String>) -> bool {
        let line = line.into();
        if line.trim().is_empty() {
            return false;
        }
        if self.entries.back() == Some(&line) {
            return false;
        }

        self.entries.push_back(line);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        true
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Lines oldest first.
    pub fn to_vec(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new()
    }
}

/// [`CommandHistory`] that writes itself back to a [`Store`] on every change.
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    history: CommandHistory,
}

impl HistoryLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            history: CommandHistory::with_capacity(capacity),
        }
    }

    /// Restore the log from `store`; a malformed stored value yields an empty log.
    pub async fn load(store: &dyn Store, capacity: usize) -> Result<Self> {
        let values = store.get(&[COMMAND_HISTORY_KEY]).await?;

        let lines = match values.get(COMMAND_HISTORY_KEY) {
            Some(value) => match serde_json::from_value::<Vec<String>>(value.clone()) {
                Ok(lines) => lines,
                Err(e) => {
                    tracing::warn!(error = %e, "Ignoring malformed command history");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let history = CommandHistory::from_lines(lines, capacity);
        tracing::debug!(entries = history.len(), "Loaded command history");

        Ok(Self { history })
    }

    /// Record a submitted line and persist the window.
    ///
    /// Suppressed lines (blank, or a repeat of the newest entry) are not
    /// written back.
    pub async fn append(&mut self, line: &str, store: &dyn Store) -> Result<bool> {
        let mut next = self.history.clone();
        if !next.push(line) {
            return Ok(false);
        }

        Self::persist(&next, store).await?;
        self.history = next;
        Ok(true)
    }

    /// Drop every entry and persist the empty log.
    pub async fn clear(&mut self, store: &dyn Store) -> Result<()> {
        let cleared = CommandHistory::with_capacity(self.history.capacity());
        Self::persist(&cleared, store).await?;
        self.history = cleared;

        tracing::info!("Cleared command history");
        Ok(())
    }

    /// Every stored line, oldest first.
    pub fn all(&self) -> Vec<String> {
        self.history.to_vec()
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    async fn persist(history: &CommandHistory, store: &dyn Store) -> Result<()> {
        let value = serde_json::to_value(history.to_vec()).map_err(StorageError::from)?;
        store
            .set(HashMap::from([(COMMAND_HISTORY_KEY.to_string(), value)]))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use termsearch_storage::MemoryStore;

    #[test]
    fn test_adjacent_duplicates_suppressed() {
        let mut history = CommandHistory::new();
        assert!(history.push("rust"));
        assert!(!history.push("rust"));
        assert_eq!(history.len(), 1);

        assert!(history.push("$help"));
        assert!(history.push("rust"));
        assert_eq!(history.to_vec(), ["rust", "$help", "rust"]);
    }

    #[test]
    fn test_blank_lines_ignored() {
        let mut history = CommandHistory::new();
        assert!(!history.push(""));
        assert!(!history.push("   "));
        assert!(history.is_empty());
    }

    #[test]
    fn test_window_drops_oldest() {
        let mut history = CommandHistory::new();
        for i in 0..=DEFAULT_CAPACITY {
            history.push(format!("line {i}"));
        }

        assert_eq!(history.len(), DEFAULT_CAPACITY);
        assert_eq!(history.iter().next(), Some("line 1"));
        assert_eq!(history.iter().last(), Some("line 500"));
    }

    #[test]
    fn test_capacity_never_exceeds_default() {
        let mut history = CommandHistory::with_capacity(1000);
        assert_eq!(history.capacity(), DEFAULT_CAPACITY);

        for i in 0..600 {
            history.push(format!("line {i}"));
        }
        assert_eq!(history.len(), DEFAULT_CAPACITY);
        assert_eq!(CommandHistory::with_capacity(0).capacity(), 1);
    }

    #[test]
    fn test_from_lines_keeps_newest() {
        let lines = (0..10).map(|i| i.to_string());
        let history = CommandHistory::from_lines(lines, 3);
        assert_eq!(history.to_vec(), ["7", "8", "9"]);
    }

    #[tokio::test]
    async fn test_append_persists() {
        let store = MemoryStore::new();
        let mut log = HistoryLog::new(DEFAULT_CAPACITY);

        assert!(log.append("bing", &store).await.unwrap());
        assert!(!log.append("bing", &store).await.unwrap());
        assert!(log.append("hello world", &store).await.unwrap());

        assert_eq!(
            store.value(COMMAND_HISTORY_KEY),
            Some(json!(["bing", "hello world"]))
        );
    }

    #[tokio::test]
    async fn test_clear_persists_empty_log() {
        let store = MemoryStore::new();
        let mut log = HistoryLog::new(DEFAULT_CAPACITY);
        log.append("one", &store).await.unwrap();

        log.clear(&store).await.unwrap();

        assert!(log.all().is_empty());
        assert_eq!(store.value(COMMAND_HISTORY_KEY), Some(json!([])));
    }

    #[tokio::test]
    async fn test_load_restores_order() {
        let store = MemoryStore::new();
        store.insert(COMMAND_HISTORY_KEY, json!(["a", "b", "c"]));

        let log = HistoryLog::load(&store, DEFAULT_CAPACITY).await.unwrap();
        assert_eq!(log.all(), ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_load_caps_oversized_capacity() {
        let store = MemoryStore::new();
        let stored: Vec<String> = (0..600).map(|i| format!("q{i}")).collect();
        store.insert(COMMAND_HISTORY_KEY, json!(stored));

        let log = HistoryLog::load(&store, 1000).await.unwrap();
        let lines = log.all();
        assert_eq!(lines.len(), DEFAULT_CAPACITY);
        assert_eq!(lines[0], "q100");
    }

    #[tokio::test]
    async fn test_load_malformed_is_empty() {
        let store = MemoryStore::new();
        store.insert(COMMAND_HISTORY_KEY, json!("oops"));

        let log = HistoryLog::load(&store, DEFAULT_CAPACITY).await.unwrap();
        assert!(log.all().is_empty());
    }
}
