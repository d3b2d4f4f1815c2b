//! Engine registry and its persistence

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use termsearch_storage::Store;

use crate::encode::build_search_url;
use crate::error::EngineError;
use crate::Result;

pub const CUSTOM_ENGINES_KEY: &str = "customEngines";
pub const ACTIVE_ENGINE_KEY: &str = "activeEngine";

/// Name of the engine selected when nothing has been stored yet.
pub const DEFAULT_ENGINE: &str = "google";

/// Built-in engines, in the order they are listed to the user.
pub const PREDEFINED_ENGINES: [(&str, &str); 6] = [
    ("google", "https://www.google.com/search?q="),
    ("bing", "https://www.bing.com/search?q="),
    ("yahoo", "https://search.yahoo.com/search?p="),
    ("perplexity", "https://www.perplexity.ai/search?q="),
    ("yandex", "https://yandex.com/search/?text="),
    ("duckduckgo", "https://duckduckgo.com/?q="),
];

/// A user-registered engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engine {
    pub name: String,
    pub url: String,
}

/// One row of [`EngineRegistry::list_all`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineListing {
    pub name: String,
    pub url: String,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct EngineRegistry {
    /// Custom engines in registration order; names are unique.
    custom: Vec<Engine>,
    /// Active URL template
    active: String,
}

impl EngineRegistry {
    pub fn new() -> Self {
        Self::with_active(Self::default_template().to_string())
    }

    pub fn with_active(template: String) -> Self {
        Self {
            custom: Vec::new(),
            active: template,
        }
    }

    pub fn default_template() -> &'static str {
        Self::predefined(DEFAULT_ENGINE).unwrap_or(PREDEFINED_ENGINES[0].1)
    }

    /// Restore custom engines and the active template from `store`.
    ///
    /// Missing or malformed values fall back to `default_active` and an
    /// empty custom table.
    pub async fn load(store: &dyn Store, default_active: &str) -> Result<Self> {
        let values = store.get(&[CUSTOM_ENGINES_KEY, ACTIVE_ENGINE_KEY]).await?;

        let active = match values.get(ACTIVE_ENGINE_KEY) {
            Some(Value::String(url)) if !url.is_empty() => url.clone(),
            Some(other) => {
                tracing::warn!(value = %other, "Ignoring malformed active engine");
                default_active.to_string()
            }
            None => default_active.to_string(),
        };

        let registry = Self {
            custom: decode_custom(values.get(CUSTOM_ENGINES_KEY)),
            active,
        };

        tracing::info!(
            active = %registry.active,
            custom_count = registry.custom.len(),
            "Loaded search engines"
        );

        Ok(registry)
    }

    /// Re-read the custom table so engines added by another popup are seen.
    pub async fn reload_custom(&mut self, store: &dyn Store) -> Result<()> {
        let values = store.get(&[CUSTOM_ENGINES_KEY]).await?;
        self.custom = decode_custom(values.get(CUSTOM_ENGINES_KEY));
        Ok(())
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    pub fn custom_engines(&self) -> &[Engine] {
        &self.custom
    }

    /// Exact, case-sensitive lookup among the predefined engines.
    pub fn predefined(name: &str) -> Option<&'static str> {
        PREDEFINED_ENGINES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, url)| *url)
    }

    /// Exact, case-sensitive lookup among the custom engines.
    pub fn custom(&self, name: &str) -> Option<&str> {
        self.custom
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.url.as_str())
    }

    /// Predefined engines shadow custom ones of the same name.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        Self::predefined(name).or_else(|| self.custom(name))
    }

    /// Switch to the engine called `name`, if there is one.
    ///
    /// Returns the new active template.
    pub async fn resolve_as_engine_switch(
        &mut self,
        name: &str,
        store: &dyn Store,
    ) -> Result<Option<String>> {
        let Some(url) = self.lookup(name).map(str::to_string) else {
            return Ok(None);
        };

        self.set_active(url.clone(), store).await?;
        tracing::info!(engine = %name, url = %url, "Switched search engine");
        Ok(Some(url))
    }

    pub async fn set_active(&mut self, url: String, store: &dyn Store) -> Result<()> {
        store
            .set(HashMap::from([(
                ACTIVE_ENGINE_KEY.to_string(),
                Value::String(url.clone()),
            )]))
            .await?;
        self.active = url;
        Ok(())
    }

    /// Add (or replace) a custom engine and make it active.
    ///
    /// Both keys are written in one `set`; on failure nothing changes.
    pub async fn register(&mut self, name: &str, url: &str, store: &dyn Store) -> Result<()> {
        if name.is_empty() {
            return Err(EngineError::EmptyName);
        }
        if url.is_empty() {
            return Err(EngineError::EmptyUrl);
        }

        let mut custom = self.custom.clone();
        match custom.iter_mut().find(|e| e.name == name) {
            Some(existing) => existing.url = url.to_string(),
            None => custom.push(Engine {
                name: name.to_string(),
                url: url.to_string(),
            }),
        }

        let encoded = serde_json::to_value(&custom)
            .map_err(termsearch_storage::StorageError::from)?;
        store
            .set(HashMap::from([
                (CUSTOM_ENGINES_KEY.to_string(), encoded),
                (ACTIVE_ENGINE_KEY.to_string(), Value::String(url.to_string())),
            ]))
            .await?;

        self.custom = custom;
        self.active = url.to_string();

        tracing::info!(engine = %name, url = %url, "Registered custom search engine");
        Ok(())
    }

    /// Predefined engines in declaration order, then custom ones in
    /// registration order.
    pub fn list_all(&self) -> Vec<EngineListing> {
        PREDEFINED_ENGINES
            .iter()
            .map(|(name, url)| (*name, *url))
            .chain(self.custom.iter().map(|e| (e.name.as_str(), e.url.as_str())))
            .map(|(name, url)| EngineListing {
                name: name.to_string(),
                url: url.to_string(),
                is_active: url == self.active,
            })
            .collect()
    }

    /// Search URL for `query` using the active template.
    pub fn search_url(&self, query: &str) -> String {
        build_search_url(&self.active, query)
    }
}

impl Default for EngineRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_custom(value: Option<&Value>) -> Vec<Engine> {
    let Some(value) = value else {
        return Vec::new();
    };

    match serde_json::from_value::<Vec<Engine>>(value.clone()) {
        Ok(mut engines) => {
            // Keep the first occurrence of each name.
            let mut seen = std::collections::HashSet::new();
            engines.retain(|e| !e.name.is_empty() && seen.insert(e.name.clone()));
            engines
        }
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring malformed custom engine table");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use termsearch_storage::MemoryStore;

    #[test]
    fn test_defaults_to_google() {
        let registry = EngineRegistry::new();
        assert_eq!(registry.active(), "https://www.google.com/search?q=");
        assert_eq!(
            registry.search_url("rust programming"),
            "https://www.google.com/search?q=rust%20programming"
        );
    }

    #[test]
    fn test_predefined_lookup_is_case_sensitive() {
        assert_eq!(
            EngineRegistry::predefined("bing"),
            Some("https://www.bing.com/search?q=")
        );
        assert!(EngineRegistry::predefined("Bing").is_none());
    }

    #[tokio::test]
    async fn test_switch_to_predefined_persists() {
        let store = MemoryStore::new();
        let mut registry = EngineRegistry::new();

        let url = registry
            .resolve_as_engine_switch("duckduckgo", &store)
            .await
            .unwrap();

        assert_eq!(url.as_deref(), Some("https://duckduckgo.com/?q="));
        assert_eq!(registry.active(), "https://duckduckgo.com/?q=");
        assert_eq!(
            store.value(ACTIVE_ENGINE_KEY),
            Some(json!("https://duckduckgo.com/?q="))
        );
    }

    #[tokio::test]
    async fn test_unknown_engine_leaves_active_alone() {
        let store = MemoryStore::new();
        let mut registry = EngineRegistry::new();

        let url = registry
            .resolve_as_engine_switch("altavista", &store)
            .await
            .unwrap();

        assert!(url.is_none());
        assert_eq!(registry.active(), EngineRegistry::default_template());
        assert!(store.value(ACTIVE_ENGINE_KEY).is_none());
    }

    #[tokio::test]
    async fn test_register_then_resolve() {
        let store = MemoryStore::new();
        let mut registry = EngineRegistry::new();

        registry
            .register("MyEngine", "https://x.test/?q=%s", &store)
            .await
            .unwrap();
        assert_eq!(registry.active(), "https://x.test/?q=%s");

        registry.resolve_as_engine_switch("bing", &store).await.unwrap();
        let url = registry
            .resolve_as_engine_switch("MyEngine", &store)
            .await
            .unwrap();

        assert_eq!(url.as_deref(), Some("https://x.test/?q=%s"));
        assert!(registry.custom("myengine").is_none());
    }

    #[tokio::test]
    async fn test_register_replaces_in_place() {
        let store = MemoryStore::new();
        let mut registry = EngineRegistry::new();

        registry.register("a", "https://a.test/?q=", &store).await.unwrap();
        registry.register("b", "https://b.test/?q=", &store).await.unwrap();
        registry.register("a", "https://a2.test/?q=", &store).await.unwrap();

        let names: Vec<_> = registry.custom_engines().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(registry.custom("a"), Some("https://a2.test/?q="));
    }

    #[tokio::test]
    async fn test_predefined_shadows_custom() {
        let store = MemoryStore::new();
        let mut registry = EngineRegistry::new();
        registry.register("google", "https://evil.test/?q=", &store).await.unwrap();

        assert_eq!(registry.lookup("google"), Some("https://www.google.com/search?q="));
    }

    #[tokio::test]
    async fn test_list_all_order_and_active_flag() {
        let store = MemoryStore::new();
        let mut registry = EngineRegistry::new();
        registry.register("zeta", "https://z.test/?q=", &store).await.unwrap();
        registry.register("alpha", "https://a.test/?q=", &store).await.unwrap();

        let listing = registry.list_all();
        let names: Vec<_> = listing.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(
            names,
            ["google", "bing", "yahoo", "perplexity", "yandex", "duckduckgo", "zeta", "alpha"]
        );

        let active: Vec<_> = listing.iter().filter(|l| l.is_active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "alpha");
    }

    #[tokio::test]
    async fn test_load_round_trip() {
        let store = MemoryStore::new();
        let mut registry = EngineRegistry::new();
        registry.register("MyEngine", "https://x.test/?q=%s", &store).await.unwrap();

        let restored = EngineRegistry::load(&store, EngineRegistry::default_template())
            .await
            .unwrap();
        assert_eq!(restored.active(), "https://x.test/?q=%s");
        assert_eq!(restored.custom("MyEngine"), Some("https://x.test/?q=%s"));
    }

    #[tokio::test]
    async fn test_load_tolerates_malformed_values() {
        let store = MemoryStore::new();
        store.insert(CUSTOM_ENGINES_KEY, json!({"not": "a list"}));
        store.insert(ACTIVE_ENGINE_KEY, json!(42));

        let registry = EngineRegistry::load(&store, "https://duckduckgo.com/?q=")
            .await
            .unwrap();
        assert!(registry.custom_engines().is_empty());
        assert_eq!(registry.active(), "https://duckduckgo.com/?q=");
    }

    #[tokio::test]
    async fn test_reload_custom_sees_external_writes() {
        let store = MemoryStore::new();
        let mut registry = EngineRegistry::new();
        store.insert(
            CUSTOM_ENGINES_KEY,
            json!([{"name": "wiki", "url": "https://en.wikipedia.org/w/index.php?search="}]),
        );

        assert!(registry.custom("wiki").is_none());
        registry.reload_custom(&store).await.unwrap();
        assert!(registry.custom("wiki").is_some());
    }
}
