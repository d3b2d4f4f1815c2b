//! Terminal Search Storage Layer
//!
//! Key-value persistence for the popup's configuration: command history,
//! custom search engines and the active engine. Values are JSON documents.
//!
//! [`Store`] is the async interface the interpreter talks to. [`SqliteStore`]
//! keeps values in the `settings` table of a SQLite [`Database`];
//! [`MemoryStore`] keeps them in memory.

mod database;
mod error;
mod migrations;
mod store;

pub use database::Database;
pub use error::StorageError;
pub use store::{MemoryStore, SqliteStore, Store};

pub type Result<T> = std::result::Result<T, StorageError>;
