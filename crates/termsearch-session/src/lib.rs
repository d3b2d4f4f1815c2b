//! Terminal Search Session State
//!
//! The popup is either idle or in the middle of the two-step "add search
//! engine" wizard:
//! ```text
//! Idle
//!   ↓ $engine add
//! AwaitingEngineName
//!   ↓ any text (the name)
//! AwaitingEngineUrl
//!   ↓ any text (the URL template; engine registered and activated)
//! Idle
//! ```
//! While the wizard runs it owns every line typed.

mod state;

pub use state::{Advance, SessionState, WizardEffect, NAME_PROMPT, URL_PROMPT};
