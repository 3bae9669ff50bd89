//! User display preferences and recent catalog searches.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use exohab_logic::catalog::CatalogQuery;

use crate::error::Result;
use crate::persistence::{load_json, store_json, KeyValueStore, PREFERENCES_SLOT, RECENT_SEARCHES_SLOT};

/// Maximum number of remembered searches.
pub const RECENT_SEARCH_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultView {
    #[default]
    Grid,
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPreferences {
    pub theme: Theme,
    pub units: Units,
    pub default_view: DefaultView,
    pub auto_save: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            units: Units::Metric,
            default_view: DefaultView::Grid,
            auto_save: true,
        }
    }
}

/// Fields to change; `None` keeps the stored value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreferencesUpdate {
    pub theme: Option<Theme>,
    pub units: Option<Units>,
    pub default_view: Option<DefaultView>,
    pub auto_save: Option<bool>,
}

impl UserPreferences {
    pub fn merged(mut self, update: PreferencesUpdate) -> Self {
        if let Some(v) = update.theme {
            self.theme = v;
        }
        if let Some(v) = update.units {
            self.units = v;
        }
        if let Some(v) = update.default_view {
            self.default_view = v;
        }
        if let Some(v) = update.auto_save {
            self.auto_save = v;
        }
        self
    }

    pub fn load<S: KeyValueStore + ?Sized>(backend: &S) -> Result<Self> {
        load_json(backend, PREFERENCES_SLOT)
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, backend: &mut S) -> Result<()> {
        store_json(backend, PREFERENCES_SLOT, self)
    }

    /// Load, merge `update`, store, and return the result.
    pub fn update<S: KeyValueStore + ?Sized>(
        backend: &mut S,
        update: PreferencesUpdate,
    ) -> Result<Self> {
        let prefs = Self::load(backend)?.merged(update);
        prefs.save(backend)?;
        log::info!("Updated preferences: {:?}", prefs);
        Ok(prefs)
    }
}

/// One remembered catalog search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentSearch {
    pub query: String,
    #[serde(default)]
    pub filters: CatalogQuery,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub results: usize,
}

/// Newest-first search history, unique by query text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentSearches {
    entries: Vec<RecentSearch>,
}

impl RecentSearches {
    pub fn entries(&self) -> &[RecentSearch] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Put `search` at the front, dropping an older entry with the same
    /// query and anything past the limit.
    pub fn record(&mut self, search: RecentSearch) {
        self.entries.retain(|s| s.query != search.query);
        self.entries.insert(0, search);
        self.entries.truncate(RECENT_SEARCH_LIMIT);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn load<S: KeyValueStore + ?Sized>(backend: &S) -> Result<Self> {
        let mut loaded: Self = load_json(backend, RECENT_SEARCHES_SLOT)?;
        loaded.entries.truncate(RECENT_SEARCH_LIMIT);
        Ok(loaded)
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, backend: &mut S) -> Result<()> {
        store_json(backend, RECENT_SEARCHES_SLOT, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    fn search(query: &str, results: usize) -> RecentSearch {
        RecentSearch {
            query: query.into(),
            filters: CatalogQuery::default().text(query),
            timestamp: Utc::now(),
            results,
        }
    }

    #[test]
    fn test_preferences_defaults_and_wire_names() {
        let json = serde_json::to_value(UserPreferences::default()).unwrap();
        assert_eq!(json["theme"], "dark");
        assert_eq!(json["units"], "metric");
        assert_eq!(json["defaultView"], "grid");
        assert_eq!(json["autoSave"], true);
    }

    #[test]
    fn test_partial_stored_preferences_fill_defaults() {
        let prefs: UserPreferences = serde_json::from_str(r#"{"theme":"light"}"#).unwrap();
        assert_eq!(prefs.theme, Theme::Light);
        assert_eq!(prefs.units, Units::Metric);
        assert!(prefs.auto_save);
    }

    #[test]
    fn test_preferences_update_persists() {
        let mut backend = MemoryStore::new();
        assert_eq!(UserPreferences::load(&backend).unwrap(), UserPreferences::default());

        let updated = UserPreferences::update(
            &mut backend,
            PreferencesUpdate {
                units: Some(Units::Imperial),
                ..PreferencesUpdate::default()
            },
        )
        .unwrap();
        assert_eq!(updated.units, Units::Imperial);
        assert_eq!(updated.theme, Theme::Dark);
        assert_eq!(UserPreferences::load(&backend).unwrap(), updated);
    }

    #[test]
    fn test_recent_searches_dedupe_and_order() {
        let mut recent = RecentSearches::default();
        recent.record(search("kepler", 2));
        recent.record(search("toi", 1));
        recent.record(search("kepler", 2));
        let queries: Vec<&str> = recent.entries().iter().map(|s| s.query.as_str()).collect();
        assert_eq!(queries, vec!["kepler", "toi"]);
    }

    #[test]
    fn test_recent_searches_capped() {
        let mut recent = RecentSearches::default();
        for i in 0..15 {
            recent.record(search(&format!("q{}", i), 0));
        }
        assert_eq!(recent.len(), RECENT_SEARCH_LIMIT);
        assert_eq!(recent.entries()[0].query, "q14");
        assert_eq!(recent.entries()[9].query, "q5");
    }

    #[test]
    fn test_recent_searches_persist_and_clear() {
        let mut backend = MemoryStore::new();
        let mut recent = RecentSearches::load(&backend).unwrap();
        assert!(recent.is_empty());
        recent.record(search("kepler", 2));
        recent.save(&mut backend).unwrap();

        let loaded = RecentSearches::load(&backend).unwrap();
        assert_eq!(loaded, recent);

        let mut loaded = loaded;
        loaded.clear();
        loaded.save(&mut backend).unwrap();
        assert!(RecentSearches::load(&backend).unwrap().is_empty());
    }
}
