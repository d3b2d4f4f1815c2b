//! Wizard state machine

use serde::{Deserialize, Serialize};

pub const NAME_PROMPT: &str = "Enter the name of the search engine:";
pub const URL_PROMPT: &str = "Enter the search URL of the engine:";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    /// Lines go through normal command resolution
    #[default]
    Idle,
    /// Next line is the new engine's name
    AwaitingEngineName,
    /// Next line is the URL template for `name`
    AwaitingEngineUrl { name: String },
}

/// What the wizard wants done with a line it consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEffect {
    /// The line was not the wizard's
    Pass,
    NameAccepted { name: String },
    /// Blank name; the prompt is repeated
    NameRequired,
    /// Blank URL; the prompt is repeated
    UrlRequired { name: String },
    /// Store `url` under `name` and make it the active engine
    Register { name: String, url: String },
}

/// Outcome of feeding one line to [`SessionState::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advance {
    pub next: SessionState,
    /// When true the router must not resolve the line itself
    pub consumed: bool,
    pub effect: WizardEffect,
}

impl SessionState {
    /// State entered by `$engine add`.
    pub fn start_add_engine() -> Self {
        tracing::debug!(from = "idle", to = "awaiting_engine_name", "Wizard transition");
        SessionState::AwaitingEngineName
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, SessionState::Idle)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::AwaitingEngineName => "awaiting_engine_name",
            SessionState::AwaitingEngineUrl { .. } => "awaiting_engine_url",
        }
    }

    /// Feed one submitted line to the wizard.
    ///
    /// There is no cancel word: whatever is typed becomes the name, then the
    /// URL.
    pub fn advance(&self, line: &str) -> Advance {
        let text = line.trim();

        let (next, effect) = match self {
            SessionState::Idle => {
                return Advance {
                    next: SessionState::Idle,
                    consumed: false,
                    effect: WizardEffect::Pass,
                };
            }
            SessionState::AwaitingEngineName if text.is_empty() => {
                (SessionState::AwaitingEngineName, WizardEffect::NameRequired)
            }
            SessionState::AwaitingEngineName => (
                SessionState::AwaitingEngineUrl {
                    name: text.to_string(),
                },
                WizardEffect::NameAccepted {
                    name: text.to_string(),
                },
            ),
            SessionState::AwaitingEngineUrl { name } if text.is_empty() => (
                self.clone(),
                WizardEffect::UrlRequired { name: name.clone() },
            ),
            SessionState::AwaitingEngineUrl { name } => (
                SessionState::Idle,
                WizardEffect::Register {
                    name: name.clone(),
                    url: text.to_string(),
                },
            ),
        };

        tracing::debug!(from = %self, to = %next, "Wizard transition");

        Advance {
            next,
            consumed: true,
            effect,
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
