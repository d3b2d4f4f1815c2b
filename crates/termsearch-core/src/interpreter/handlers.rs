//! Handlers for resolved lines

use chrono::{DateTime, TimeDelta, Utc};

use termsearch_engines::EngineRegistry;
use termsearch_tabs::{resolve_tab_target, TabId, TabRecord, TabTarget};

use super::{Interpreter, Transcript};
use crate::command::{CommandKey, HELP};
use crate::gateway::TabQuery;
use crate::input::normalize_url;
use crate::message::{escape_html, link, Effect, Message, MessageKind};

const MIN_FONT_PERCENT: u16 = 1;
const MAX_FONT_PERCENT: u16 = 1000;

impl Interpreter {
    pub(super) async fn clear_history(&mut self, out: &mut Transcript) {
        match self.history.clear(self.services.store.as_ref()).await {
            Ok(()) => {
                out.effect(Effect::ClearLog);
                out.push(Message::confirmation("Command history cleared."));
            }
            Err(e) => out.push(Message::error(format!("Failed to clear history: {e}"))),
        }
    }

    pub(super) fn set_font(&self, value: &str, out: &mut Transcript) {
        let percent = value
            .strip_suffix('%')
            .unwrap_or(value)
            .parse::<u16>()
            .ok()
            .filter(|p| (MIN_FONT_PERCENT..=MAX_FONT_PERCENT).contains(p));

        match percent {
            Some(percent) => {
                out.effect(Effect::SetFontScale(percent));
                out.push(Message::confirmation(format!("Font size set to {percent}%.")));
            }
            None => out.push(Message::usage(format!(
                "Invalid font size '{value}'. {}",
                CommandKey::Font.usage()
            ))),
        }
    }

    pub(super) fn show_help(&self, out: &mut Transcript) {
        out.push(Message::info("Available commands:"));
        for (usage, description) in HELP {
            out.push(Message::info(format!("{usage} - {description}")));
        }
    }

    pub(super) async fn list_engines(&mut self, out: &mut Transcript) {
        if let Err(e) = self
            .engines
            .reload_custom(self.services.store.as_ref())
            .await
        {
            tracing::warn!(error = %e, "Using cached custom engines");
        }

        out.push(Message::info("Available search engines:"));
        for engine in self.engines.list_all() {
            let marker = if engine.is_active { "*" } else { " " };
            out.push(Message::info(format!(
                "{marker} {} - {}",
                engine.name, engine.url
            )));
        }
        out.push(Message::info(
            "Enter the name of the search engine to switch to it.",
        ));
    }

    /// `reload` re-reads custom engines first; the router has already done
    /// so for bare engine names.
    ///
    /// Predefined names match in any case, custom names only exactly.
    pub(super) async fn switch_engine(&mut self, name: &str, reload: bool, out: &mut Transcript) {
        let store = self.services.store.as_ref();

        let lowered = name.to_lowercase();
        let name = if EngineRegistry::predefined(&lowered).is_some() {
            lowered.as_str()
        } else {
            name
        };

        if reload {
            if let Err(e) = self.engines.reload_custom(store).await {
                tracing::warn!(error = %e, "Using cached custom engines");
            }
        }

        match self.engines.resolve_as_engine_switch(name, store).await {
            Ok(Some(_)) => out.push(Message::confirmation(format!(
                "Search engine switched to {name}"
            ))),
            Ok(None) => out.push(Message::info(format!(
                "Unknown search engine: {name}. Type $engine to list engines."
            ))),
            Err(e) => {
                tracing::error!(engine = %name, error = %e, "Failed to switch search engine");
                out.push(Message::error(format!("Failed to switch search engine: {e}")));
            }
        }
    }

    pub(super) async fn browsing_history(&mut self, value: &str, out: &mut Transcript) {
        let Ok(days) = value.parse::<u32>() else {
            out.push(Message::usage("Invalid number of days for history."));
            return;
        };

        let start = TimeDelta::try_days(i64::from(days))
            .and_then(|span| Utc::now().checked_sub_signed(span))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);

        out.push(Message::info(format!("SHOWING HISTORY FOR PAST {days} DAYS")));

        let visits = match self
            .services
            .history
            .search_browsing_history("", start, self.config.history_lookup_limit)
            .await
        {
            Ok(visits) => visits,
            Err(e) => {
                out.push(Message::error(e.to_string()));
                return;
            }
        };

        if visits.is_empty() {
            out.push(Message::info("No history found for the specified period."));
            return;
        }

        for visit in visits {
            let title = visit.title.as_deref().unwrap_or_default();
            out.push(Message::html(
                MessageKind::Info,
                format!(
                    "Title: {}, URL: {}",
                    escape_html(title),
                    link(&visit.url, &visit.url)
                ),
            ));
        }
    }

    pub(super) async fn open_url(&mut self, target: &str, out: &mut Transcript) {
        let Some(url) = normalize_url(target) else {
            out.push(Message::usage(format!("Invalid URL: {target}")));
            return;
        };

        match self.services.tabs.create_tab(&url).await {
            Ok(()) => {
                tracing::info!(url = %url, "Opened tab");
                out.push(Message::confirmation(format!("Opened {url}")));
            }
            Err(e) => out.push(Message::error(e.to_string())),
        }
    }

    pub(super) async fn search_in_new_tab(&mut self, query: &str, out: &mut Transcript) {
        let url = self.engines.search_url(query);
        match self.services.tabs.create_tab(&url).await {
            Ok(()) => out.push(Message::confirmation(format!("Searching for \"{query}\""))),
            Err(e) => out.push(Message::error(e.to_string())),
        }
    }

    pub(super) async fn search_in_current_tab(&mut self, query: &str, out: &mut Transcript) {
        let url = self.engines.search_url(query);
        match self.services.tabs.update_active_tab(&url).await {
            Ok(()) => tracing::info!(url = %url, "Searching in current tab"),
            Err(e) => out.push(Message::error(e.to_string())),
        }
    }

    pub(super) fn list_history(&self, out: &mut Transcript) {
        let lines = self.history.all();
        if lines.is_empty() {
            out.push(Message::info("No commands in history."));
            return;
        }

        for (index, line) in lines.iter().enumerate() {
            out.push(Message::info(format!("{:>4}  {}", index + 1, line)));
        }
    }

    pub(super) async fn bookmarks(&mut self, term: &str, out: &mut Transcript) {
        let found = match self.services.bookmarks.search_bookmarks(term).await {
            Ok(found) => found,
            Err(e) => {
                out.push(Message::error(e.to_string()));
                return;
            }
        };

        let found: Vec<_> = found
            .into_iter()
            .filter(|b| !b.is_folder && !b.url.is_empty())
            .collect();

        if found.is_empty() {
            out.push(Message::info(format!("No bookmarks found for '{term}'.")));
            return;
        }

        out.push(Message::info(format!("Bookmarks matching '{term}':")));
        for bookmark in found {
            let label = if bookmark.title.is_empty() {
                &bookmark.url
            } else {
                &bookmark.title
            };
            out.push(Message::html(
                MessageKind::Info,
                format!("{} - {}", link(&bookmark.url, label), escape_html(&bookmark.url)),
            ));
        }
    }

    pub(super) async fn list_tabs(&mut self, out: &mut Transcript) {
        let Some(tabs) = self.open_tabs(out).await else {
            return;
        };

        if tabs.is_empty() {
            out.push(Message::info("No open tabs."));
            return;
        }

        for tab in &tabs {
            out.push(Message::info(describe_tab(tab)));
        }
    }

    pub(super) async fn close_tab(&mut self, identifier: &str, out: &mut Transcript) {
        let Some(tabs) = self.open_tabs(out).await else {
            return;
        };

        match resolve_tab_target(identifier, &tabs) {
            TabTarget::Exact(tab) => match self.services.tabs.close_tab(tab.id).await {
                Ok(()) => {
                    tracing::info!(tab_id = tab.id, "Closed tab");
                    out.push(Message::confirmation(format!("Closed {}", describe_tab(&tab))));
                }
                Err(e) => out.push(Message::error(e.to_string())),
            },
            TabTarget::Ambiguous(matches) => {
                out.push(Message::info(format!(
                    "{} tabs match '{identifier}'. Close one by id:",
                    matches.len()
                )));
                for tab in &matches {
                    out.push(Message::info(describe_tab(tab)));
                }
            }
            TabTarget::NotFound if identifier.parse::<TabId>().is_ok() => {
                out.push(Message::info(format!("No tab with id {identifier}.")));
            }
            TabTarget::NotFound => {
                out.push(Message::info(format!("No tab found matching '{identifier}'.")));
            }
        }
    }

    async fn open_tabs(&self, out: &mut Transcript) -> Option<Vec<TabRecord>> {
        match self.services.tabs.query_open_tabs(TabQuery::default()).await {
            Ok(tabs) => Some(tabs),
            Err(e) => {
                out.push(Message::error(e.to_string()));
                None
            }
        }
    }
}

fn describe_tab(tab: &TabRecord) -> String {
    format!("[{}] {} - {}", tab.id, tab.display_title(), tab.url)
}
