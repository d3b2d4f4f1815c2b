//! Terminal Search Core
//!
//! The interpreter behind the popup's single input line. It owns the
//! session state (the add-engine wizard), the engine registry and the
//! command history, and reaches the browser only through the traits in
//! [`gateway`].
//!
//! Resolution order for a line, once the wizard has not taken it:
//! 1. `$clear history`
//! 2. `$engine add`
//! 3. single-word commands
//! 4. `tabs list|close|open`
//! 5. predefined engine name
//! 6. custom engine name
//! 7. search with the active engine

mod command;
mod config;
mod error;
pub mod gateway;
mod input;
mod interpreter;
mod message;

pub use command::{Command, CommandKey, TabsCommand, HELP};
pub use config::{Config, DEFAULT_HISTORY_LOOKUP_LIMIT};
pub use error::{CoreError, GatewayError};
pub use gateway::{
    BookmarkRecord, BookmarkService, GatewayResult, HistoryService, Services, TabQuery,
    TabService, VisitRecord,
};
pub use input::normalize_url;
pub use interpreter::{Dispatch, Interpreter, Resolution};
pub use message::{escape_html, link, Effect, Message, MessageKind, NullSink, OutputSink};

// Re-export the component crates
pub use termsearch_engines::{build_search_url, EngineListing, EngineRegistry};
pub use termsearch_history::{CommandHistory, HistoryLog};
pub use termsearch_session::{SessionState, WizardEffect};
pub use termsearch_storage::{Database, MemoryStore, SqliteStore, StorageError, Store};
pub use termsearch_tabs::{resolve_tab_target, TabId, TabRecord, TabTarget};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
///
/// `RUST_LOG` wins over `default_filter`. Logs go to stderr so they never
/// mix with interpreter output.
pub fn init_logging(default_filter: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
