//! Stand-in browser services for the console

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use termsearch_core::{
    BookmarkRecord, BookmarkService, GatewayError, GatewayResult, HistoryService, Message,
    MessageKind, OutputSink, TabId, TabQuery, TabRecord, TabService, VisitRecord,
};

/// Tabs kept in memory. Navigations are printed instead of loaded.
pub struct ConsoleTabs {
    inner: Mutex<TabTable>,
}

struct TabTable {
    tabs: Vec<TabRecord>,
    active: Option<TabId>,
    next_id: TabId,
}

impl ConsoleTabs {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(TabTable {
                tabs: Vec::new(),
                active: None,
                next_id: 1,
            }),
        }
    }
}

#[async_trait]
impl TabService for ConsoleTabs {
    async fn query_open_tabs(&self, _filter: TabQuery) -> GatewayResult<Vec<TabRecord>> {
        Ok(self.inner.lock().tabs.clone())
    }

    async fn create_tab(&self, url: &str) -> GatewayResult<()> {
        let mut table = self.inner.lock();
        let id = table.next_id;
        table.next_id += 1;
        table.tabs.push(TabRecord::new(id, None, url));
        table.active = Some(id);
        println!("  -> [{id}] new tab: {url}");
        Ok(())
    }

    async fn update_active_tab(&self, url: &str) -> GatewayResult<()> {
        let navigated = {
            let mut table = self.inner.lock();
            let active = table.active;
            match table.tabs.iter_mut().find(|t| Some(t.id) == active) {
                Some(tab) => {
                    tab.url = url.to_string();
                    Some(tab.id)
                }
                None => None,
            }
        };

        match navigated {
            Some(id) => {
                println!("  -> [{id}] {url}");
                Ok(())
            }
            None => self.create_tab(url).await,
        }
    }

    async fn close_tab(&self, id: TabId) -> GatewayResult<()> {
        let mut table = self.inner.lock();
        let before = table.tabs.len();
        table.tabs.retain(|t| t.id != id);
        if table.tabs.len() == before {
            return Err(GatewayError::TabNotFound(id));
        }
        if table.active == Some(id) {
            table.active = table.tabs.last().map(|t| t.id);
        }
        Ok(())
    }
}

pub struct EmptyHistory;

#[async_trait]
impl HistoryService for EmptyHistory {
    async fn search_browsing_history(
        &self,
        _text: &str,
        _start_time: DateTime<Utc>,
        _max_results: usize,
    ) -> GatewayResult<Vec<VisitRecord>> {
        Ok(Vec::new())
    }
}

pub struct EmptyBookmarks;

#[async_trait]
impl BookmarkService for EmptyBookmarks {
    async fn search_bookmarks(&self, _term: &str) -> GatewayResult<Vec<BookmarkRecord>> {
        Ok(Vec::new())
    }
}

/// Prints each message on its own line, tagged unless it is plain info.
pub struct ConsoleSink;

impl OutputSink for ConsoleSink {
    fn emit(&self, message: &Message) {
        match message.kind {
            MessageKind::Info => println!("{}", message.text),
            kind => println!("[{kind}] {}", message.text),
        }
    }
}
