//! In-memory browser services for interpreter tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use termsearch_core::{
    BookmarkRecord, BookmarkService, Config, GatewayError, GatewayResult, HistoryService,
    Interpreter, MemoryStore, Message, OutputSink, Services, StorageError, Store, TabId,
    TabQuery, TabRecord, TabService, VisitRecord,
};

#[derive(Default)]
pub struct FakeTabs {
    pub open: Mutex<Vec<TabRecord>>,
    pub created: Mutex<Vec<String>>,
    pub navigated: Mutex<Vec<String>>,
    pub closed: Mutex<Vec<TabId>>,
    pub fail_with: Mutex<Option<String>>,
}

impl FakeTabs {
    fn check(&self) -> GatewayResult<()> {
        match self.fail_with.lock().clone() {
            Some(reason) => Err(GatewayError::Tabs(reason)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl TabService for FakeTabs {
    async fn query_open_tabs(&self, _filter: TabQuery) -> GatewayResult<Vec<TabRecord>> {
        self.check()?;
        Ok(self.open.lock().clone())
    }

    async fn create_tab(&self, url: &str) -> GatewayResult<()> {
        self.check()?;
        self.created.lock().push(url.to_string());
        Ok(())
    }

    async fn update_active_tab(&self, url: &str) -> GatewayResult<()> {
        self.check()?;
        self.navigated.lock().push(url.to_string());
        Ok(())
    }

    async fn close_tab(&self, id: TabId) -> GatewayResult<()> {
        self.check()?;
        let mut open = self.open.lock();
        let before = open.len();
        open.retain(|t| t.id != id);
        if open.len() == before {
            return Err(GatewayError::TabNotFound(id));
        }
        self.closed.lock().push(id);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeHistory {
    pub visits: Mutex<Vec<VisitRecord>>,
    pub queries: Mutex<Vec<(String, DateTime<Utc>, usize)>>,
    pub fail_with: Mutex<Option<String>>,
}

#[async_trait]
impl HistoryService for FakeHistory {
    async fn search_browsing_history(
        &self,
        text: &str,
        start_time: DateTime<Utc>,
        max_results: usize,
    ) -> GatewayResult<Vec<VisitRecord>> {
        self.queries
            .lock()
            .push((text.to_string(), start_time, max_results));
        if let Some(reason) = self.fail_with.lock().clone() {
            return Err(GatewayError::History(reason));
        }
        Ok(self.visits.lock().clone())
    }
}

#[derive(Default)]
pub struct FakeBookmarks {
    pub bookmarks: Mutex<Vec<BookmarkRecord>>,
    pub fail_with: Mutex<Option<String>>,
}

#[async_trait]
impl BookmarkService for FakeBookmarks {
    async fn search_bookmarks(&self, term: &str) -> GatewayResult<Vec<BookmarkRecord>> {
        if let Some(reason) = self.fail_with.lock().clone() {
            return Err(GatewayError::Bookmarks(reason));
        }
        let term = term.to_lowercase();
        Ok(self
            .bookmarks
            .lock()
            .iter()
            .filter(|b| b.title.to_lowercase().contains(&term) || b.url.contains(&term))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub messages: Mutex<Vec<Message>>,
}

impl OutputSink for RecordingSink {
    fn emit(&self, message: &Message) {
        self.messages.lock().push(message.clone());
    }
}

/// Store whose writes fail once `broken` is set.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    pub broken: Mutex<bool>,
}

#[async_trait]
impl Store for FlakyStore {
    async fn get(
        &self,
        keys: &[&str],
    ) -> std::result::Result<HashMap<String, serde_json::Value>, StorageError> {
        self.inner.get(keys).await
    }

    async fn set(
        &self,
        entries: HashMap<String, serde_json::Value>,
    ) -> std::result::Result<(), StorageError> {
        if *self.broken.lock() {
            return Err(StorageError::Backend("quota exceeded".to_string()));
        }
        self.inner.set(entries).await
    }
}

pub struct Harness {
    pub store: Arc<FlakyStore>,
    pub tabs: Arc<FakeTabs>,
    pub history: Arc<FakeHistory>,
    pub bookmarks: Arc<FakeBookmarks>,
    pub sink: Arc<RecordingSink>,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            store: Arc::new(FlakyStore::default()),
            tabs: Arc::new(FakeTabs::default()),
            history: Arc::new(FakeHistory::default()),
            bookmarks: Arc::new(FakeBookmarks::default()),
            sink: Arc::new(RecordingSink::default()),
        }
    }

    pub fn services(&self) -> Services {
        Services::new(
            self.store.clone(),
            self.tabs.clone(),
            self.history.clone(),
            self.bookmarks.clone(),
        )
        .with_sink(self.sink.clone())
    }

    pub fn config(&self) -> Config {
        Config::new(std::path::PathBuf::from("/nonexistent"))
    }

    pub async fn interpreter(&self) -> Interpreter {
        Interpreter::open(self.config(), self.services()).await.unwrap()
    }
}
