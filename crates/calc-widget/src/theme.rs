//! Theme persistence
//!
//! The widget remembers one preference: the theme identifier. It is kept
//! in a key/value store (`localStorage` in the browser) under a fixed key
//! and falls back to `light` when nothing has been saved.

use std::collections::HashMap;
use std::fmt;

/// Key/value storage backing the theme store
pub trait ThemeStorage {
    /// Read a stored value
    fn get_item(&self, key: &str) -> Option<String>;
    /// Write a value
    fn set_item(&mut self, key: &str, value: &str);
}

/// In-memory storage, used natively and in tests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    /// Create empty storage
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when nothing is stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ThemeStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_string(), value.to_string());
    }
}

/// Themes offered by the theme switcher
pub const KNOWN_THEMES: [&str; 2] = ["light", "dark"];

/// Persists and resolves the active theme
pub struct ThemeStore<S: ThemeStorage> {
    storage: S,
    key: String,
    default_theme: String,
}

impl<S: ThemeStorage> fmt::Debug for ThemeStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeStore")
            .field("key", &self.key)
            .field("default_theme", &self.default_theme)
            .finish_non_exhaustive()
    }
}

impl<S: ThemeStorage> ThemeStore<S> {
    /// Storage key used by the widget
    pub const DEFAULT_KEY: &'static str = "calculator_theme";
    /// Theme used when nothing is stored
    pub const DEFAULT_THEME: &'static str = "light";

    /// Create a store with the default key and fallback theme
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, Self::DEFAULT_KEY, Self::DEFAULT_THEME)
    }

    /// Create a store with a custom key and fallback theme
    pub fn with_key(storage: S, key: impl Into<String>, default_theme: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            default_theme: default_theme.into(),
        }
    }

    /// The saved theme, or the default when unset or empty
    pub fn load(&self) -> String {
        self.storage
            .get_item(&self.key)
            .filter(|theme| !theme.is_empty())
            .unwrap_or_else(|| self.default_theme.clone())
    }

    /// Persist a theme identifier
    pub fn save(&mut self, theme: &str) {
        tracing::debug!(theme, key = %self.key, "theme saved");
        self.storage.set_item(&self.key, theme);
    }

    /// Storage key in use
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the underlying storage
    pub fn storage(&self) -> &S {
        &self.storage
    }
}
