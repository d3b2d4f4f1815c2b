//! Terminal Search - console host
//!
//! Feeds stdin lines to the interpreter the way the popup feeds its input
//! box. Tabs are simulated in memory; browsing history and bookmarks are
//! empty.

mod services;
mod state;

use anyhow::{Context, Result};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = termsearch_core::Config::load(&termsearch_core::Config::default_path())
        .context("failed to load config")?;
    termsearch_core::init_logging(&config.log_filter);

    let mut state = AppState::open(config).await?;
    state.replay_history();

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("{}", state.prompt());
        std::io::stdout()
            .flush()
            .context("failed to flush stdout")?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        state.submit(&line).await;
    }

    tracing::info!("Terminal Search closed");
    Ok(())
}
