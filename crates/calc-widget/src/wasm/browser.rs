//! Browser bindings
//!
//! `BrowserCalculator` is what the page's script talks to: it forwards
//! button and key presses, exposes the display lines and the history as
//! JSON, and persists the theme in `localStorage`. Painting the DOM stays
//! on the JavaScript side.

use wasm_bindgen::prelude::*;

use crate::config::WidgetConfig;
use crate::core::{CalculatorEngine, Operation};
use crate::theme::{MemoryStorage, ThemeStorage, ThemeStore};
use crate::wasm::keypad::{Keypad, KeypadAction};

/// Theme storage backed by `window.localStorage` when the page has one
#[derive(Debug)]
pub enum BrowserStorage {
    /// The page's `localStorage`
    Local(web_sys::Storage),
    /// Fallback when storage is unavailable (private mode, native builds)
    Memory(MemoryStorage),
}

impl BrowserStorage {
    /// Picks `localStorage` when reachable, in-memory storage otherwise
    #[must_use]
    pub fn detect() -> Self {
        Self::local().map_or_else(|| Self::Memory(MemoryStorage::new()), Self::Local)
    }

    #[cfg(target_arch = "wasm32")]
    fn local() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn local() -> Option<web_sys::Storage> {
        None
    }
}

impl ThemeStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        match self {
            Self::Local(storage) => storage.get_item(key).ok().flatten(),
            Self::Memory(storage) => storage.get_item(key),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) {
        match self {
            Self::Local(storage) => {
                if storage.set_item(key, value).is_err() {
                    web_sys::console::warn_1(&"calc-widget: could not persist theme".into());
                }
            }
            Self::Memory(storage) => storage.set_item(key, value),
        }
    }
}

/// Browser calculator - the main WASM entry point
#[wasm_bindgen]
#[derive(Debug)]
pub struct BrowserCalculator {
    engine: CalculatorEngine,
    themes: ThemeStore<BrowserStorage>,
}

#[wasm_bindgen]
impl BrowserCalculator {
    /// Creates a calculator with default settings
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::build(WidgetConfig::default())
    }

    /// Creates a calculator from a JSON `WidgetConfig`
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(json: &str) -> Result<BrowserCalculator, JsError> {
        let config = WidgetConfig::from_json(json)?;
        Ok(Self::build(config))
    }

    /// Digit or decimal point button (`data-number`)
    pub fn press_number(&mut self, token: &str) -> bool {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => self.press(KeypadAction::Number(ch)),
            _ => false,
        }
    }

    /// Operator button (`data-operator`: add, subtract, multiply, divide)
    pub fn press_operator(&mut self, name: &str) -> bool {
        match name.parse::<Operation>() {
            Ok(op) => self.press(KeypadAction::Operator(op)),
            Err(_) => false,
        }
    }

    /// Action button (`data-action`: equals, clear, delete) or `clear-history`
    pub fn press_action(&mut self, name: &str) -> bool {
        match name {
            "equals" => self.press(KeypadAction::Equals),
            "clear" => self.press(KeypadAction::Clear),
            "delete" => self.press(KeypadAction::Delete),
            "clear-history" => {
                self.engine.clear_history();
                true
            }
            _ => false,
        }
    }

    /// Keyboard key (`KeyboardEvent.key`)
    pub fn press_key(&mut self, key: &str) -> bool {
        Keypad::key_to_action(key).is_some_and(|action| self.press(action))
    }

    /// Fires due timers; returns true when the page must repaint
    pub fn tick(&mut self) -> bool {
        self.engine.poll_timers()
    }

    /// Milliseconds until the next scheduled clear
    pub fn next_timer_ms(&self) -> Option<f64> {
        self.engine.next_timer_in_ms().map(|ms| ms as f64)
    }

    /// Main display line
    pub fn display(&self) -> String {
        self.engine.snapshot().current_display
    }

    /// Secondary display line
    pub fn previous_display(&self) -> String {
        self.engine.snapshot().previous_display_with_operator
    }

    /// CSS `font-size` for the main line
    pub fn font_size(&self) -> String {
        self.engine.snapshot().font_size.css().to_string()
    }

    /// History as a JSON array, newest first
    pub fn history_json(&self) -> String {
        self.engine
            .history()
            .to_json()
            .unwrap_or_else(|_| "[]".to_string())
    }

    /// Number of history entries
    pub fn history_count(&self) -> usize {
        self.engine.history().len()
    }

    /// Saved theme, or the default
    pub fn theme(&self) -> String {
        self.themes.load()
    }

    /// Persists a theme
    pub fn set_theme(&mut self, theme: &str) {
        self.themes.save(theme);
    }
}

impl Default for BrowserCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowserCalculator {
    fn build(config: WidgetConfig) -> Self {
        console_error_panic_hook::set_once();
        let themes = ThemeStore::with_key(
            BrowserStorage::detect(),
            config.theme_storage_key.clone(),
            config.default_theme.clone(),
        );
        Self {
            engine: CalculatorEngine::with_config(config),
            themes,
        }
    }

    /// Due clears run before the press so late input survives them
    fn press(&mut self, action: KeypadAction) -> bool {
        self.engine.poll_timers();
        let accepted = action.dispatch(&mut self.engine).is_ok();
        self.engine.poll_timers();
        accepted
    }
}

/// Initialize the calculator module in the browser
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&"calc-widget initialized".into());
}
