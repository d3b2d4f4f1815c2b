//! Interpreter configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use termsearch_engines::EngineRegistry;
use termsearch_history::DEFAULT_CAPACITY;

use crate::Result;

/// Upper bound on visits fetched by `$history <days>`.
pub const DEFAULT_HISTORY_LOOKUP_LIMIT: usize = 1000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the database file
    pub database_path: PathBuf,
    /// Search URL template used until the user picks an engine
    pub default_engine: String,
    /// Maximum number of command lines kept
    pub history_capacity: usize,
    /// Maximum number of visits listed by `$history`
    pub history_lookup_limit: usize,
    /// Log filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            database_path: data_dir.join("termsearch.db"),
            default_engine: EngineRegistry::default_template().to_string(),
            history_capacity: DEFAULT_CAPACITY,
            history_lookup_limit: DEFAULT_HISTORY_LOOKUP_LIMIT,
            log_filter: "info".to_string(),
        }
    }

    /// Read a JSON config file; a missing file yields the defaults.
    ///
    /// Keys absent from the file keep their default values.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_engine.trim().is_empty() {
            return Err(crate::CoreError::Config(
                "default_engine cannot be empty".to_string(),
            ));
        }
        if !(1..=DEFAULT_CAPACITY).contains(&self.history_capacity) {
            return Err(crate::CoreError::Config(format!(
                "history_capacity must be between 1 and {DEFAULT_CAPACITY}"
            )));
        }
        Ok(())
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("termsearch"))
            .unwrap_or_else(|| PathBuf::from(".termsearch"))
    }

    pub fn default_path() -> PathBuf {
        Self::data_dir().join("config.json")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

mod dirs {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new(PathBuf::from("/tmp/ts"));
        assert_eq!(config.database_path, PathBuf::from("/tmp/ts/termsearch.db"));
        assert_eq!(config.default_engine, "https://www.google.com/search?q=");
        assert_eq!(config.history_capacity, 500);
        assert_eq!(config.history_lookup_limit, 1000);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config.history_capacity, DEFAULT_CAPACITY);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"default_engine": "https://duckduckgo.com/?q=", "history_capacity": 50}"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.default_engine, "https://duckduckgo.com/?q=");
        assert_eq!(config.history_capacity, 50);
        assert_eq!(config.history_lookup_limit, DEFAULT_HISTORY_LOOKUP_LIMIT);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"history_capacity": 0}"#).unwrap();

        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_capacity_above_window_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"history_capacity": 1000}"#).unwrap();

        assert!(Config::load(&path).is_err());

        let mut config = Config::new(PathBuf::from("/tmp/ts"));
        config.history_capacity = DEFAULT_CAPACITY;
        assert!(config.validate().is_ok());
        config.history_capacity = DEFAULT_CAPACITY + 1;
        assert!(config.validate().is_err());
    }
}
