//! Tab target resolution
//!
//! An identifier that parses as an integer only ever names a tab id.
//! Anything else is a keyword matched case-insensitively against titles and
//! urls; several hits are reported back rather than guessed between.

use crate::tab::{TabId, TabRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabTarget {
    Exact(TabRecord),
    /// More than one tab matched the keyword, in snapshot order
    Ambiguous(Vec<TabRecord>),
    NotFound,
}

pub fn resolve_tab_target(identifier: &str, open_tabs: &[TabRecord]) -> TabTarget {
    let identifier = identifier.trim();

    if let Ok(id) = identifier.parse::<TabId>() {
        tracing::debug!(tab_id = id, "Resolving tab by id");
        return open_tabs
            .iter()
            .find(|tab| tab.id == id)
            .cloned()
            .map_or(TabTarget::NotFound, TabTarget::Exact);
    }

    if identifier.is_empty() {
        return TabTarget::NotFound;
    }

    let needle = identifier.to_lowercase();
    let mut matches: Vec<TabRecord> = open_tabs
        .iter()
        .filter(|tab| tab.matches_lowercase(&needle))
        .cloned()
        .collect();

    tracing::debug!(keyword = %identifier, matches = matches.len(), "Resolving tab by keyword");

    match matches.len() {
        0 => TabTarget::NotFound,
        1 => TabTarget::Exact(matches.remove(0)),
        _ => TabTarget::Ambiguous(matches),
    }
}
