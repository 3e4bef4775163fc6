//! Persisted user preferences: theme, favorite titles and recently opened titles.
//!
//! All access is best-effort. Reads that fail or hit malformed data fall back to the
//! empty value, writes that fail are logged and dropped. Nothing here ever returns an
//! error to the caller.
//!
//! ```rust
//! use devtoolbox::preferences::{Preferences, Theme};
//! use devtoolbox::storage::MemoryStorage;
//! use devtoolbox::ToolboxConfig;
//! use std::sync::Arc;
//!
//! let prefs = Preferences::new(Arc::new(MemoryStorage::new()), &ToolboxConfig::default());
//! assert_eq!(prefs.init_theme(true), Theme::Dark);
//!
//! prefs.mark_recent("UUID Generator");
//! prefs.mark_recent("Hash Calculator");
//! assert_eq!(prefs.recent_titles(), vec!["Hash Calculator", "UUID Generator"]);
//! ```

use crate::toolbox::config::{StorageKeys, ToolboxConfig};
use crate::toolbox::storage::KeyValueStorage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Colour scheme of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Parse a stored mode. Only `"light"` selects the light theme; any other value is dark.
    pub fn from_stored(value: &str) -> Self {
        if value.trim().trim_matches('"') == "light" {
            Theme::Light
        } else {
            Theme::Dark
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Icon shown on the theme toggle button.
    pub fn icon(&self) -> &'static str {
        match self {
            Theme::Light => "🌞",
            Theme::Dark => "🌙",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Best-effort view over the three preference keys in a [`KeyValueStorage`].
pub struct Preferences {
    storage: Arc<dyn KeyValueStorage>,
    keys: StorageKeys,
    recent_limit: usize,
}

impl Preferences {
    pub fn new(storage: Arc<dyn KeyValueStorage>, config: &ToolboxConfig) -> Self {
        Self {
            storage,
            keys: config.storage_keys.clone(),
            recent_limit: config.recent_limit,
        }
    }

    /// Theme previously persisted, `None` when absent, empty or unreadable.
    pub fn saved_theme(&self) -> Option<Theme> {
        self.read(&self.keys.theme)
            .filter(|raw| !raw.is_empty())
            .map(|raw| Theme::from_stored(&raw))
    }

    /// Persist `theme` and return it.
    pub fn set_theme(&self, theme: Theme) -> Theme {
        self.write(&self.keys.theme, theme.as_str());
        theme
    }

    /// Resolve the initial theme: the persisted one if present, else the OS
    /// colour-scheme preference. The result is persisted either way.
    pub fn init_theme(&self, prefers_dark: bool) -> Theme {
        let theme = self.saved_theme().unwrap_or(if prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        });
        self.set_theme(theme)
    }

    /// Persisted favorite titles in insertion order, without duplicates.
    pub fn favorite_titles(&self) -> Vec<String> {
        dedup(self.read_list(&self.keys.favorites))
    }

    pub fn save_favorite_titles(&self, titles: &[String]) {
        self.write_list(&self.keys.favorites, titles);
    }

    pub fn is_favorite(&self, title: &str) -> bool {
        self.favorite_titles().iter().any(|t| t == title)
    }

    /// Add or remove `title` from the favorite set, persist the full set and return it.
    pub fn set_favorite(&self, title: &str, active: bool) -> Vec<String> {
        let mut titles = self.favorite_titles();
        let present = titles.iter().any(|t| t == title);
        if active && !present {
            titles.push(title.to_string());
        } else if !active {
            titles.retain(|t| t != title);
        }
        self.save_favorite_titles(&titles);
        titles
    }

    /// Recently opened titles, most recent first, without duplicates and capped.
    pub fn recent_titles(&self) -> Vec<String> {
        let mut recent = dedup(self.read_list(&self.keys.recent));
        recent.truncate(self.recent_limit);
        recent
    }

    /// Move `title` to the front of the recent list, cap it and persist it.
    pub fn mark_recent(&self, title: &str) -> Vec<String> {
        let mut recent: Vec<String> = self
            .recent_titles()
            .into_iter()
            .filter(|t| t != title)
            .collect();
        recent.insert(0, title.to_string());
        recent.truncate(self.recent_limit);
        self.write_list(&self.keys.recent, &recent);
        recent
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.storage.get_item(key) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("preferences: reading '{}' failed: {}", key, err);
                None
            }
        }
    }

    fn read_list(&self, key: &str) -> Vec<String> {
        let raw = match self.read(key) {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Vec::new(),
        };
        serde_json::from_str(&raw).unwrap_or_else(|err| {
            log::warn!("preferences: '{}' is not a list of strings: {}", key, err);
            Vec::new()
        })
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(err) = self.storage.set_item(key, value) {
            log::warn!("preferences: writing '{}' failed: {}", key, err);
        }
    }

    fn write_list(&self, key: &str, values: &[String]) {
        match serde_json::to_string(values) {
            Ok(json) => self.write(key, &json),
            Err(err) => log::warn!("preferences: serializing '{}' failed: {}", key, err),
        }
    }
}

fn dedup(titles: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(titles.len());
    for title in titles {
        if !out.contains(&title) {
            out.push(title);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolbox::storage::{DisabledStorage, MemoryStorage};

    fn prefs_with(storage: Arc<dyn KeyValueStorage>) -> Preferences {
        Preferences::new(storage, &ToolboxConfig::default())
    }

    #[test]
    fn test_theme_parsing() {
        assert_eq!(Theme::from_stored("light"), Theme::Light);
        assert_eq!(Theme::from_stored("\"light\""), Theme::Light);
        assert_eq!(Theme::from_stored("dark"), Theme::Dark);
        assert_eq!(Theme::from_stored("sepia"), Theme::Dark);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }

    #[test]
    fn test_init_theme_prefers_saved_value() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item("it_tools_theme", "light").unwrap();
        let prefs = prefs_with(storage);
        assert_eq!(prefs.init_theme(true), Theme::Light);
    }

    #[test]
    fn test_init_theme_falls_back_to_os_preference_and_persists() {
        let storage = Arc::new(MemoryStorage::new());
        let prefs = prefs_with(storage.clone());
        assert_eq!(prefs.init_theme(false), Theme::Light);
        assert_eq!(
            storage.get_item("it_tools_theme").unwrap(),
            Some("light".to_string())
        );

        storage.set_item("it_tools_theme", "").unwrap();
        assert_eq!(prefs.init_theme(true), Theme::Dark);
    }

    #[test]
    fn test_corrupt_lists_read_as_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item("it_tools_favorites", "{not json").unwrap();
        storage.set_item("it_tools_recent", "{\"a\": 1}").unwrap();
        let prefs = prefs_with(storage);
        assert!(prefs.favorite_titles().is_empty());
        assert!(prefs.recent_titles().is_empty());
    }

    #[test]
    fn test_favorites_deduplicated_on_read() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set_item("it_tools_favorites", r#"["A","B","A"]"#)
            .unwrap();
        let prefs = prefs_with(storage);
        assert_eq!(prefs.favorite_titles(), vec!["A", "B"]);
    }

    #[test]
    fn test_disabled_storage_is_silent() {
        let prefs = prefs_with(Arc::new(DisabledStorage));
        assert_eq!(prefs.init_theme(true), Theme::Dark);
        assert_eq!(prefs.set_favorite("A", true), vec!["A"]);
        assert!(prefs.favorite_titles().is_empty());
        assert_eq!(prefs.mark_recent("A"), vec!["A"]);
        assert!(prefs.recent_titles().is_empty());
    }
}
