//! Core error types

use thiserror::Error;

use termsearch_tabs::TabId;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] termsearch_storage::StorageError),

    #[error("Engine error: {0}")]
    Engine(#[from] termsearch_engines::EngineError),

    #[error("History error: {0}")]
    History(#[from] termsearch_history::HistoryError),

    #[error("{0}")]
    Gateway(#[from] GatewayError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Failures reported by the browser services.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Tab service error: {0}")]
    Tabs(String),

    #[error("No tab with id {0}")]
    TabNotFound(TabId),

    #[error("History service error: {0}")]
    History(String),

    #[error("Bookmark service error: {0}")]
    Bookmarks(String),
}

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::Config(e.to_string())
    }
}
