//! Console session state

use anyhow::{Context, Result};
use std::sync::Arc;

use termsearch_core::{
    Config, Database, Effect, Interpreter, Services, SessionState, SqliteStore,
};

use crate::services::{ConsoleSink, ConsoleTabs, EmptyBookmarks, EmptyHistory};

pub struct AppState {
    interpreter: Interpreter,
}

impl AppState {
    pub async fn open(config: Config) -> Result<Self> {
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let db = Database::open(&config.database_path).with_context(|| {
            format!("failed to open {}", config.database_path.display())
        })?;

        let services = Services::new(
            Arc::new(SqliteStore::new(db)),
            Arc::new(ConsoleTabs::new()),
            Arc::new(EmptyHistory),
            Arc::new(EmptyBookmarks),
        )
        .with_sink(Arc::new(ConsoleSink));

        let interpreter = Interpreter::open(config, services).await?;
        tracing::info!(session = %interpreter.id(), "Terminal Search started");

        Ok(Self { interpreter })
    }

    /// Print stored commands the way the popup redraws its log on open.
    pub fn replay_history(&self) {
        for line in self.interpreter.history() {
            println!("> {line}");
        }
    }

    pub fn prompt(&self) -> &'static str {
        match self.interpreter.state() {
            SessionState::Idle => "> ",
            SessionState::AwaitingEngineName | SessionState::AwaitingEngineUrl { .. } => "? ",
        }
    }

    pub async fn submit(&mut self, line: &str) {
        // Messages reach the console through the sink as they are produced.
        let dispatch = self.interpreter.dispatch(line).await;

        for effect in dispatch.effects {
            match effect {
                // A terminal has no font of its own to scale.
                Effect::SetFontScale(percent) => tracing::debug!(percent, "Font scale ignored"),
                Effect::ClearLog => print!("\x1b[2J\x1b[H"),
            }
        }
    }
}
