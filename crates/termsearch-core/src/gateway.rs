//! Browser services the interpreter calls out to
//!
//! Each trait is one browser API surface. Implementations live with the
//! host; the interpreter awaits every call before making the next one, so
//! output always follows call order.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use termsearch_storage::Store;
use termsearch_tabs::{TabId, TabRecord};

use crate::error::GatewayError;
use crate::message::{NullSink, OutputSink};

pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

/// Which tabs a query returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TabQuery {
    /// Only tabs of the window the popup belongs to
    pub current_window: bool,
}

#[async_trait]
pub trait TabService: Send + Sync {
    async fn query_open_tabs(&self, filter: TabQuery) -> GatewayResult<Vec<TabRecord>>;

    async fn create_tab(&self, url: &str) -> GatewayResult<()>;

    /// Navigate the active tab of the current window.
    async fn update_active_tab(&self, url: &str) -> GatewayResult<()>;

    async fn close_tab(&self, id: TabId) -> GatewayResult<()>;
}

/// One entry of the browser's visit history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRecord {
    #[serde(default)]
    pub title: Option<String>,
    pub url: String,
    #[serde(default)]
    pub last_visit_time: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait HistoryService: Send + Sync {
    async fn search_browsing_history(
        &self,
        text: &str,
        start_time: DateTime<Utc>,
        max_results: usize,
    ) -> GatewayResult<Vec<VisitRecord>>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkRecord {
    pub title: String,
    /// Empty for folders
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub is_folder: bool,
}

#[async_trait]
pub trait BookmarkService: Send + Sync {
    async fn search_bookmarks(&self, term: &str) -> GatewayResult<Vec<BookmarkRecord>>;
}

/// Everything the interpreter talks to.
#[derive(Clone)]
pub struct Services {
    pub store: Arc<dyn Store>,
    pub tabs: Arc<dyn TabService>,
    pub history: Arc<dyn HistoryService>,
    pub bookmarks: Arc<dyn BookmarkService>,
    pub sink: Arc<dyn OutputSink>,
}

impl Services {
    pub fn new(
        store: Arc<dyn Store>,
        tabs: Arc<dyn TabService>,
        history: Arc<dyn HistoryService>,
        bookmarks: Arc<dyn BookmarkService>,
    ) -> Self {
        Self {
            store,
            tabs,
            history,
            bookmarks,
            sink: Arc::new(NullSink),
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn OutputSink>) -> Self {
        self.sink = sink;
        self
    }
}
