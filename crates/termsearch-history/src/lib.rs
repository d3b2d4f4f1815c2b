//! Terminal Search Command History
//!
//! A sliding window over the lines the user submitted, oldest first:
//! - at most [`DEFAULT_CAPACITY`] lines, oldest evicted first
//! - a line equal to the one just before it is not stored again
//!
//! [`HistoryLog`] persists the window after every change so the popup can
//! replay it when reopened.

mod error;
mod history;

pub use error::HistoryError;
pub use history::{CommandHistory, HistoryLog, COMMAND_HISTORY_KEY, DEFAULT_CAPACITY};

pub type Result<T> = std::result::Result<T, HistoryError>;
