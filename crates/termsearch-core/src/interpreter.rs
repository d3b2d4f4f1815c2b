//! Command router
//!
//! One [`Interpreter`] lives as long as the popup. Lines are handled one at
//! a time through `&mut self`; every collaborator call is awaited before the
//! next one starts.

mod handlers;

use std::sync::Arc;
use uuid::Uuid;

use termsearch_engines::EngineRegistry;
use termsearch_history::HistoryLog;
use termsearch_session::{SessionState, WizardEffect, NAME_PROMPT, URL_PROMPT};

use crate::command::{Command, CommandKey, TabsCommand};
use crate::config::Config;
use crate::gateway::Services;
use crate::message::{Effect, Message, OutputSink};
use crate::Result;

/// Everything one line produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    /// Session state after the line
    pub state: SessionState,
    /// Messages in emission order
    pub messages: Vec<Message>,
    pub effects: Vec<Effect>,
}

impl Dispatch {
    pub fn texts(&self) -> Vec<&str> {
        self.messages.iter().map(|m| m.text.as_str()).collect()
    }
}

/// What a line resolved to outside the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Command(Command),
    /// Engine name as looked up in the registry
    SwitchEngine(String),
    /// Line as typed, searched with the active engine in the current tab
    Search(String),
}

/// Collects output for a [`Dispatch`] while forwarding it to the sink.
pub(crate) struct Transcript {
    sink: Arc<dyn OutputSink>,
    messages: Vec<Message>,
    effects: Vec<Effect>,
}

impl Transcript {
    fn new(sink: Arc<dyn OutputSink>) -> Self {
        Self {
            sink,
            messages: Vec::new(),
            effects: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, message: Message) {
        self.sink.emit(&message);
        self.messages.push(message);
    }

    pub(crate) fn effect(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    fn finish(self, state: SessionState) -> Dispatch {
        Dispatch {
            state,
            messages: self.messages,
            effects: self.effects,
        }
    }
}

pub struct Interpreter {
    /// Tags this popup's log lines
    id: Uuid,
    config: Config,
    services: Services,
    state: SessionState,
    engines: EngineRegistry,
    history: HistoryLog,
}

impl Interpreter {
    /// Restore engines and history from the store and start idle.
    pub async fn open(config: Config, services: Services) -> Result<Self> {
        config.validate()?;

        let store = services.store.as_ref();
        let engines = EngineRegistry::load(store, &config.default_engine).await?;
        let history = HistoryLog::load(store, config.history_capacity).await?;

        let id = Uuid::new_v4();
        tracing::info!(
            session = %id,
            active_engine = %engines.active(),
            history_len = history.history().len(),
            "Interpreter ready"
        );

        Ok(Self {
            id,
            config,
            services,
            state: SessionState::Idle,
            engines,
            history,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn engines(&self) -> &EngineRegistry {
        &self.engines
    }

    /// Stored command lines, oldest first, for replay when the popup opens.
    pub fn history(&self) -> Vec<String> {
        self.history.all()
    }

    /// Handle one submitted line.
    ///
    /// Never fails: every problem is reported as a message.
    #[tracing::instrument(skip_all, fields(session = %self.id))]
    pub async fn dispatch(&mut self, line: &str) -> Dispatch {
        let mut out = Transcript::new(Arc::clone(&self.services.sink));

        // The wizard sees blank lines too, so it can repeat its prompt.
        let advance = self.state.advance(line);
        if advance.consumed {
            self.state = advance.next;
            self.apply_wizard(advance.effect, &mut out).await;
            return out.finish(self.state.clone());
        }

        if line.trim().is_empty() {
            return out.finish(self.state.clone());
        }

        // Recorded before resolution, whatever the outcome.
        if let Err(e) = self
            .history
            .append(line, self.services.store.as_ref())
            .await
        {
            tracing::error!(error = %e, "Failed to record command");
            out.push(Message::error(format!("Failed to save command history: {e}")));
        }

        let resolution = self.resolve(line).await;
        tracing::debug!(?resolution, "Resolved line");
        self.execute(resolution, &mut out).await;

        out.finish(self.state.clone())
    }

    async fn resolve(&mut self, line: &str) -> Resolution {
        if let Some(command) = Command::parse(line) {
            return Resolution::Command(command);
        }

        let text = line.trim();

        let lowered = text.to_lowercase();
        if EngineRegistry::predefined(&lowered).is_some() {
            return Resolution::SwitchEngine(lowered);
        }

        if let Err(e) = self
            .engines
            .reload_custom(self.services.store.as_ref())
            .await
        {
            tracing::warn!(error = %e, "Using cached custom engines");
        }
        if self.engines.custom(text).is_some() {
            return Resolution::SwitchEngine(text.to_string());
        }

        Resolution::Search(line.to_string())
    }

    async fn execute(&mut self, resolution: Resolution, out: &mut Transcript) {
        match resolution {
            Resolution::Command(Command::ClearHistory) => self.clear_history(out).await,
            Resolution::Command(Command::StartAddEngine) => self.start_add_engine(out),
            Resolution::Command(Command::Builtin { key, args }) => {
                if key.requires_argument() && args.is_empty() {
                    out.push(Message::usage(key.usage()));
                    return;
                }
                match key {
                    CommandKey::Font => self.set_font(&args[0], out),
                    CommandKey::Help => self.show_help(out),
                    CommandKey::Engine if args.is_empty() => self.list_engines(out).await,
                    CommandKey::Engine => self.switch_engine(&args.join(" "), true, out).await,
                    CommandKey::BrowsingHistory => self.browsing_history(&args[0], out).await,
                    CommandKey::Open => self.open_url(&args.join(" "), out).await,
                    CommandKey::Search => self.search_in_new_tab(&args.join(" "), out).await,
                    CommandKey::History => self.list_history(out),
                    CommandKey::Bookmarks => self.bookmarks(&args.join(" "), out).await,
                }
            }
            Resolution::Command(Command::Tabs { sub, args }) => {
                if sub.requires_argument() && args.is_empty() {
                    out.push(Message::usage(sub.usage()));
                    return;
                }
                match sub {
                    TabsCommand::List => self.list_tabs(out).await,
                    TabsCommand::Close => self.close_tab(&args.join(" "), out).await,
                    TabsCommand::Open => self.open_url(&args.join(" "), out).await,
                }
            }
            Resolution::SwitchEngine(name) => self.switch_engine(&name, false, out).await,
            Resolution::Search(query) => self.search_in_current_tab(&query, out).await,
        }
    }

    fn start_add_engine(&mut self, out: &mut Transcript) {
        self.state = SessionState::start_add_engine();
        out.push(Message::info(NAME_PROMPT));
    }

    async fn apply_wizard(&mut self, effect: WizardEffect, out: &mut Transcript) {
        match effect {
            WizardEffect::Pass => {}
            WizardEffect::NameRequired => out.push(Message::info(NAME_PROMPT)),
            WizardEffect::NameAccepted { name } => {
                out.push(Message::info(format!("Name: {name}")));
                out.push(Message::info(URL_PROMPT));
            }
            WizardEffect::UrlRequired { .. } => out.push(Message::info(URL_PROMPT)),
            WizardEffect::Register { name, url } => {
                out.push(Message::info(format!("URL: {url}")));
                match self
                    .engines
                    .register(&name, &url, self.services.store.as_ref())
                    .await
                {
                    Ok(()) => {
                        out.push(Message::confirmation(format!(
                            "Added custom search engine {name}"
                        )));
                        out.push(Message::confirmation(format!(
                            "Search engine switched to {name}"
                        )));
                    }
                    Err(e) => {
                        tracing::error!(engine = %name, error = %e, "Failed to add search engine");
                        out.push(Message::error(format!(
                            "Failed to add search engine {name}: {e}"
                        )));
                    }
                }
            }
        }
    }
}
