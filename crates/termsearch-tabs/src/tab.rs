//! Tab snapshot
//!
//! One row of a tab query: identifier, optional title, url.

use serde::{Deserialize, Serialize};

/// Browser-assigned tab handle.
pub type TabId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabRecord {
    pub id: TabId,
    /// Page title; absent while the page has not reported one
    #[serde(default)]
    pub title: Option<String>,
    pub url: String,
}

impl TabRecord {
    pub fn new(id: TabId, title: Option<String>, url: impl Into<String>) -> Self {
        Self {
            id,
            title,
            url: url.into(),
        }
    }

    /// Get display title (with fallback to URL)
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => &self.url,
        }
    }

    /// Case-insensitive substring match on title or url.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.title
            .as_deref()
            .is_some_and(|t| t.to_lowercase().contains(needle))
            || self.url.to_lowercase().contains(needle)
    }
}
