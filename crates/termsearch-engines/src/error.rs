//! Engine registry error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Search engine name cannot be empty")]
    EmptyName,

    #[error("Search engine URL cannot be empty")]
    EmptyUrl,

    #[error("Storage error: {0}")]
    Storage(#[from] termsearch_storage::StorageError),
}
