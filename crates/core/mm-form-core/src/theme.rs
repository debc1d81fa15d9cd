//! Theme preference service
//!
//! The user picks `light`, `dark` or `auto`; `auto` follows the system
//! color-scheme preference. The chosen mode is persisted through an injected
//! [`PreferenceStore`] so the browser's local storage can be swapped for an
//! in-memory store in tests or when storage is disabled.

use crate::error::{FormError, FormResult};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Storage key holding the theme mode
pub const THEME_STORAGE_KEY: &str = "mm_theme";

/// Mode selected by the user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    Auto,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::Auto => "auto",
        }
    }

    /// Effective theme for this mode given the system preference
    pub fn resolve(self, system_prefers_dark: bool) -> Theme {
        match self {
            ThemeMode::Light => Theme::Light,
            ThemeMode::Dark => Theme::Dark,
            ThemeMode::Auto if system_prefers_dark => Theme::Dark,
            ThemeMode::Auto => Theme::Light,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = FormError;

    fn from_str(s: &str) -> FormResult<Self> {
        match s.trim() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            "auto" => Ok(ThemeMode::Auto),
            other => Err(FormError::UnknownThemeMode(other.to_string())),
        }
    }
}

/// Theme actually applied to the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Value for the root element's `data-theme` attribute
    pub fn attr_value(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Material Symbols ligature for the navigation toggle
    pub fn icon(self) -> &'static str {
        match self {
            Theme::Light => "light_mode",
            Theme::Dark => "dark_mode",
        }
    }
}

/// Key/value preference storage
pub trait PreferenceStore {
    fn get(&self, key: &str) -> FormResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> FormResult<()>;
}

/// Process-local store used in tests and when browser storage is unavailable
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> FormResult<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> FormResult<()> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for Box<S> {
    fn get(&self, key: &str) -> FormResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> FormResult<()> {
        (**self).set(key, value)
    }
}

/// Reads and writes the theme mode; storage failures never escape
pub struct ThemePreferences<S> {
    store: S,
    key: String,
}

impl<S: PreferenceStore> ThemePreferences<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, THEME_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stored mode, `auto` when missing, unreadable or unrecognized
    pub fn load(&self) -> ThemeMode {
        match self.store.get(&self.key) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|e| {
                debug!(error = %e, "Ignoring stored theme preference");
                ThemeMode::Auto
            }),
            Ok(None) => ThemeMode::Auto,
            Err(e) => {
                debug!(error = %e, "Theme preference storage unavailable");
                ThemeMode::Auto
            }
        }
    }

    pub fn save(&self, mode: ThemeMode) {
        if let Err(e) = self.store.set(&self.key, mode.as_str()) {
            debug!(error = %e, mode = %mode, "Failed to persist theme preference");
        }
    }

    /// Persist `mode` and return the theme to apply
    pub fn apply(&self, mode: ThemeMode, system_prefers_dark: bool) -> Theme {
        self.save(mode);
        mode.resolve(system_prefers_dark)
    }

    /// Theme to apply on page load
    pub fn initial_theme(&self, system_prefers_dark: bool) -> Theme {
        self.load().resolve(system_prefers_dark)
    }

    /// Re-resolve after the system preference flipped; `None` unless in `auto`
    pub fn on_system_change(&self, system_prefers_dark: bool) -> Option<Theme> {
        match self.load() {
            ThemeMode::Auto => Some(ThemeMode::Auto.resolve(system_prefers_dark)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl PreferenceStore for BrokenStore {
        fn get(&self, _key: &str) -> FormResult<Option<String>> {
            Err(FormError::storage("SecurityError"))
        }

        fn set(&self, _key: &str, _value: &str) -> FormResult<()> {
            Err(FormError::storage("SecurityError"))
        }
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("dark".parse::<ThemeMode>().unwrap(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Light.to_string(), "light");
        assert!("sepia".parse::<ThemeMode>().is_err());
    }

    #[test]
    fn test_auto_follows_system() {
        assert_eq!(ThemeMode::Auto.resolve(true), Theme::Dark);
        assert_eq!(ThemeMode::Auto.resolve(false), Theme::Light);
        assert_eq!(ThemeMode::Light.resolve(true), Theme::Light);
    }

    #[test]
    fn test_apply_persists_mode() {
        let prefs = ThemePreferences::new(MemoryStore::new());
        assert_eq!(prefs.load(), ThemeMode::Auto);

        assert_eq!(prefs.apply(ThemeMode::Dark, false), Theme::Dark);
        assert_eq!(prefs.store().get(THEME_STORAGE_KEY).unwrap().as_deref(), Some("dark"));
        assert_eq!(prefs.initial_theme(false), Theme::Dark);
    }

    #[test]
    fn test_system_change_only_matters_in_auto() {
        let prefs = ThemePreferences::new(MemoryStore::new());
        assert_eq!(prefs.on_system_change(true), Some(Theme::Dark));

        prefs.save(ThemeMode::Light);
        assert_eq!(prefs.on_system_change(true), None);
    }

    #[test]
    fn test_garbage_in_storage_reads_as_auto() {
        let store = MemoryStore::new();
        store.set(THEME_STORAGE_KEY, "purple").unwrap();
        let prefs = ThemePreferences::new(store);
        assert_eq!(prefs.load(), ThemeMode::Auto);
    }

    #[test]
    fn test_broken_storage_is_swallowed() {
        let prefs = ThemePreferences::new(BrokenStore);
        assert_eq!(prefs.load(), ThemeMode::Auto);
        assert_eq!(prefs.apply(ThemeMode::Dark, false), Theme::Dark);
    }
}
