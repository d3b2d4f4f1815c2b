//! Terminal Search Tabs
//!
//! Tabs belong to the browser; the popup only ever sees a snapshot of them.
//! [`resolve_tab_target`] decides which of those tabs a user-typed
//! identifier refers to.

mod resolver;
mod tab;

pub use resolver::{resolve_tab_target, TabTarget};
pub use tab::{TabId, TabRecord};
