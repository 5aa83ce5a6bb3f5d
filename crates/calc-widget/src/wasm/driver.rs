//! WASM driver: input dispatcher and renderers over the mock DOM
//!
//! Clicks and key presses are recorded on the [`MockDom`], routed to the
//! engine or the theme store, and the DOM is repainted from the engine's
//! snapshot afterwards, just like the widget does in a browser.

use super::dom::{
    theme_option_id, DomElement, DomEvent, MockDom, BODY_ID, CLEAR_HISTORY_ID,
    CURRENT_OPERAND_ID, HISTORY_LIST_ID, PREVIOUS_OPERAND_ID,
};
use super::keypad::{Keypad, KeypadAction, MockDomKeypadExt};
use crate::clock::SharedClock;
use crate::config::WidgetConfig;
use crate::core::history::HistoryEntry;
use crate::core::{CalculatorEngine, Operation};
use crate::driver::CalculatorDriver;
use crate::render::{DisplayRenderer, DisplaySnapshot, FontSize, HistoryRenderer};
use crate::theme::{MemoryStorage, ThemeStorage, ThemeStore};

/// Mock-DOM widget wiring the engine to its collaborators
#[derive(Debug)]
pub struct WasmDriver<S: ThemeStorage = MemoryStorage> {
    engine: CalculatorEngine,
    dom: MockDom,
    keypad: Keypad,
    themes: ThemeStore<S>,
    /// History revision last painted, `None` before the first paint
    rendered_history: Option<u64>,
}

impl Default for WasmDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl WasmDriver {
    /// Creates a widget with default settings and in-memory theme storage
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(WidgetConfig::default())
    }

    /// Creates a widget with custom settings and in-memory theme storage
    #[must_use]
    pub fn with_config(config: WidgetConfig) -> Self {
        Self::with_storage(config, MemoryStorage::new())
    }
}

impl<S: ThemeStorage> WasmDriver<S> {
    /// Creates a widget whose theme is persisted in `storage`.
    ///
    /// The saved theme is applied and the display painted immediately.
    pub fn with_storage(config: WidgetConfig, storage: S) -> Self {
        let themes = ThemeStore::with_key(
            storage,
            config.theme_storage_key.clone(),
            config.default_theme.clone(),
        );
        Self::assemble(CalculatorEngine::with_config(config), themes)
    }

    /// Replaces the engine's time source
    #[must_use]
    pub fn with_clock(mut self, clock: SharedClock) -> Self {
        self.engine = self.engine.with_clock(clock);
        self
    }

    fn assemble(engine: CalculatorEngine, themes: ThemeStore<S>) -> Self {
        let keypad = Keypad::new();
        let mut dom = MockDom::calculator();
        dom.add_keypad(&keypad);

        let mut driver = Self {
            engine,
            dom,
            keypad,
            themes,
            rendered_history: None,
        };
        let theme = driver.themes.load();
        driver.apply_theme(&theme);
        driver.sync_dom();
        driver
    }

    // ===== Accessors =====

    /// Returns a reference to the engine
    #[must_use]
    pub fn engine(&self) -> &CalculatorEngine {
        &self.engine
    }

    /// Returns a reference to the DOM
    #[must_use]
    pub fn dom(&self) -> &MockDom {
        &self.dom
    }

    /// Returns a reference to the keypad layout
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Returns a reference to the theme store
    #[must_use]
    pub fn theme_store(&self) -> &ThemeStore<S> {
        &self.themes
    }

    /// Theme currently applied to the body
    #[must_use]
    pub fn active_theme(&self) -> Option<&str> {
        self.dom
            .get_element(BODY_ID)
            .and_then(|body| body.get_attr("data-theme"))
    }

    // ===== Input dispatch =====

    /// Simulates a click on the element with `element_id`.
    ///
    /// Returns false when the element does not exist or does nothing.
    /// Clears that fell due before the click run first.
    pub fn click(&mut self, element_id: &str) -> bool {
        self.dom.dispatch_event(DomEvent::click(element_id));
        self.engine.poll_timers();

        let handled = if element_id == CLEAR_HISTORY_ID {
            self.engine.clear_history();
            true
        } else if let Some(theme) = self.theme_for(element_id) {
            self.set_theme(&theme);
            true
        } else if let Some(action) = self
            .dom
            .get_element(element_id)
            .and_then(KeypadAction::from_element)
        {
            self.dispatch(action);
            true
        } else {
            tracing::trace!(element_id, "click on inert element");
            false
        };

        self.engine.poll_timers();
        self.sync_dom();
        handled
    }

    /// Simulates a keyboard key press
    pub fn press_key(&mut self, key: &str) -> bool {
        self.dom.dispatch_event(DomEvent::key_press(key));
        self.engine.poll_timers();
        let action = Keypad::key_to_action(key);
        if let Some(action) = action {
            self.dispatch(action);
        }
        self.engine.poll_timers();
        self.sync_dom();
        action.is_some()
    }

    /// Clicks the keypad button performing `action`
    pub fn click_action(&mut self, action: KeypadAction) -> bool {
        match self.keypad.find_button(action).map(|b| b.id.clone()) {
            Some(id) => self.click(&id),
            None => false,
        }
    }

    /// Fires due timers and repaints; the browser calls this every frame
    pub fn tick(&mut self) -> bool {
        let fired = self.engine.poll_timers();
        if fired {
            self.sync_dom();
        }
        fired
    }

    /// Persists and applies a theme
    pub fn set_theme(&mut self, theme: &str) {
        self.themes.save(theme);
        self.apply_theme(theme);
    }

    fn dispatch(&mut self, action: KeypadAction) {
        if let Err(err) = action.dispatch(&mut self.engine) {
            tracing::warn!(error = %err, "keypad press rejected");
        }
    }

    fn theme_for(&self, element_id: &str) -> Option<String> {
        let element = self.dom.get_element(element_id)?;
        if !element.has_class("theme-option") {
            return None;
        }
        element.get_attr("data-theme").map(str::to_string)
    }

    /// Sets `data-theme` on the body and marks only the matching option active
    fn apply_theme(&mut self, theme: &str) {
        if let Some(body) = self.dom.get_element_mut(BODY_ID) {
            body.set_attr("data-theme", theme);
        }
        let option_ids: Vec<String> = self
            .dom
            .elements_with_class("theme-option")
            .map(|e| e.id.clone())
            .collect();
        let active_id = theme_option_id(theme);
        for id in option_ids {
            if let Some(option) = self.dom.get_element_mut(&id) {
                if id == active_id {
                    option.add_class("active");
                } else {
                    option.remove_class("active");
                }
            }
        }
        tracing::debug!(theme, "theme applied");
    }

    // ===== Rendering =====

    /// Repaints the display and, when it changed, the history list
    fn sync_dom(&mut self) {
        let snapshot = self.engine.snapshot();
        self.render_display(&snapshot);

        let revision = self.engine.history_revision();
        if self.rendered_history != Some(revision) {
            let entries: Vec<HistoryEntry> = self.engine.history().iter().cloned().collect();
            self.render_history(&entries);
            self.rendered_history = Some(revision);
        }
    }

    /// Main display text
    #[must_use]
    pub fn current_element_text(&self) -> Option<&str> {
        self.dom.get_element_text(CURRENT_OPERAND_ID)
    }

    /// Secondary display text
    #[must_use]
    pub fn previous_element_text(&self) -> Option<&str> {
        self.dom.get_element_text(PREVIOUS_OPERAND_ID)
    }

    /// Inline `font-size` of the main display
    #[must_use]
    pub fn current_font_css(&self) -> Option<&str> {
        self.dom
            .get_element(CURRENT_OPERAND_ID)
            .and_then(|e| e.get_style("font-size"))
    }

    /// Rendered history list items, newest first
    #[must_use]
    pub fn history_list_items(&self) -> Vec<String> {
        self.dom.child_texts(HISTORY_LIST_ID)
    }
}

impl<S: ThemeStorage> DisplayRenderer for WasmDriver<S> {
    fn render_display(&mut self, snapshot: &DisplaySnapshot) {
        self.dom
            .set_element_text(PREVIOUS_OPERAND_ID, &snapshot.previous_display_with_operator);
        if let Some(current) = self.dom.get_element_mut(CURRENT_OPERAND_ID) {
            current.set_text(&snapshot.current_display);
            current.set_style("font-size", snapshot.font_size.css());
        }
    }
}

impl<S: ThemeStorage> HistoryRenderer for WasmDriver<S> {
    fn render_history(&mut self, entries: &[HistoryEntry]) {
        let items = entries
            .iter()
            .map(|entry| {
                DomElement::new("li")
                    .with_class("history-item")
                    .with_text(&entry.display())
            })
            .collect();
        self.dom.replace_children(HISTORY_LIST_ID, items);
    }
}

impl<S: ThemeStorage> CalculatorDriver for WasmDriver<S> {
    fn press_number(&mut self, token: char) {
        self.click_action(KeypadAction::Number(token));
    }

    fn press_operator(&mut self, op: Operation) {
        self.click_action(KeypadAction::Operator(op));
    }

    fn press_equals(&mut self) {
        self.click_action(KeypadAction::Equals);
    }

    fn press_clear(&mut self) {
        self.click_action(KeypadAction::Clear);
    }

    fn press_delete(&mut self) {
        self.click_action(KeypadAction::Delete);
    }

    fn press_clear_history(&mut self) {
        self.click(CLEAR_HISTORY_ID);
    }

    fn tick(&mut self) {
        WasmDriver::<S>::tick(self);
    }

    fn display(&self) -> String {
        self.current_element_text().unwrap_or_default().to_string()
    }

    fn previous_display(&self) -> String {
        self.previous_element_text().unwrap_or_default().to_string()
    }

    fn font_size(&self) -> FontSize {
        self.engine.snapshot().font_size
    }

    fn history(&self) -> Vec<String> {
        self.history_list_items()
    }
}
