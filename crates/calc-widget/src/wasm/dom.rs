//! Mock DOM for widget testing
//!
//! Mirrors the widget's markup closely enough to drive it without a
//! browser: the two display lines, the history list, the theme switcher
//! and the keypad buttons with their `data-*` attributes.

use std::collections::HashMap;

/// Element ID of the document body
pub const BODY_ID: &str = "body";
/// Element ID of the secondary display line
pub const PREVIOUS_OPERAND_ID: &str = "previous-operand";
/// Element ID of the main display line
pub const CURRENT_OPERAND_ID: &str = "current-operand";
/// Element ID of the history list
pub const HISTORY_LIST_ID: &str = "history-list";
/// Element ID of the clear-history button
pub const CLEAR_HISTORY_ID: &str = "clear-history-btn";
/// Element ID of the theme switcher container
pub const THEME_SWITCHER_ID: &str = "theme-switcher";

/// Represents a DOM element for testing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomElement {
    /// Element ID
    pub id: String,
    /// Element tag name
    pub tag: String,
    /// Text content
    pub text_content: String,
    /// Element attributes
    pub attributes: HashMap<String, String>,
    /// Inline style properties
    pub styles: HashMap<String, String>,
    /// CSS classes
    pub classes: Vec<String>,
    /// Child elements
    pub children: Vec<DomElement>,
}

impl Default for DomElement {
    fn default() -> Self {
        Self::new("div")
    }
}

impl DomElement {
    /// Creates a new DOM element with the given tag
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            id: String::new(),
            tag: tag.to_string(),
            text_content: String::new(),
            attributes: HashMap::new(),
            styles: HashMap::new(),
            classes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates an element with an ID
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Sets the text content
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text_content = text.to_string();
        self
    }

    /// Adds a class
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Sets an attribute
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// Sets text content
    pub fn set_text(&mut self, text: &str) {
        self.text_content = text.to_string();
    }

    /// Sets an attribute
    pub fn set_attr(&mut self, key: &str, value: &str) {
        self.attributes.insert(key.to_string(), value.to_string());
    }

    /// Gets an attribute value
    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Sets an inline style property
    pub fn set_style(&mut self, property: &str, value: &str) {
        self.styles.insert(property.to_string(), value.to_string());
    }

    /// Gets an inline style property
    #[must_use]
    pub fn get_style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }

    /// Adds a class
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Removes a class
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Checks if element has a class
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// DOM events that can be dispatched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// Click event on an element
    Click {
        /// The ID of the clicked element
        element_id: String,
    },
    /// Key press event
    KeyPress {
        /// The key that was pressed
        key: String,
    },
}

impl DomEvent {
    /// Creates a click event
    #[must_use]
    pub fn click(element_id: &str) -> Self {
        Self::Click {
            element_id: element_id.to_string(),
        }
    }

    /// Creates a key press event
    #[must_use]
    pub fn key_press(key: &str) -> Self {
        Self::KeyPress {
            key: key.to_string(),
        }
    }
}

/// Mock DOM for testing the widget without a browser
#[derive(Debug)]
pub struct MockDom {
    /// Elements by ID for quick lookup
    elements: HashMap<String, DomElement>,
    /// Event history for verification
    event_history: Vec<DomEvent>,
}

impl Default for MockDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDom {
    /// Creates an empty mock DOM with only a body
    #[must_use]
    pub fn new() -> Self {
        let mut dom = Self {
            elements: HashMap::new(),
            event_history: Vec::new(),
        };
        dom.register_element(DomElement::new("body").with_id(BODY_ID));
        dom
    }

    /// Creates the widget's static markup (keypad buttons are added by the keypad)
    #[must_use]
    pub fn calculator() -> Self {
        let mut dom = Self::new();

        dom.register_element(
            DomElement::new("div")
                .with_id(PREVIOUS_OPERAND_ID)
                .with_class("previous-operand"),
        );
        dom.register_element(
            DomElement::new("div")
                .with_id(CURRENT_OPERAND_ID)
                .with_class("current-operand"),
        );
        dom.register_element(
            DomElement::new("ul")
                .with_id(HISTORY_LIST_ID)
                .with_class("history-list"),
        );
        dom.register_element(
            DomElement::new("button")
                .with_id(CLEAR_HISTORY_ID)
                .with_class("clear-history-btn")
                .with_text("Clear History"),
        );
        dom.register_element(
            DomElement::new("div")
                .with_id(THEME_SWITCHER_ID)
                .with_class("theme-switcher"),
        );
        for theme in crate::theme::KNOWN_THEMES {
            dom.register_element(
                DomElement::new("button")
                    .with_id(&theme_option_id(theme))
                    .with_class("theme-option")
                    .with_attr("data-theme", theme)
                    .with_text(theme),
            );
        }

        dom
    }

    /// Registers an element for ID lookup
    pub fn register_element(&mut self, element: DomElement) {
        if !element.id.is_empty() {
            self.elements.insert(element.id.clone(), element);
        }
    }

    /// Gets an element by ID
    #[must_use]
    pub fn get_element(&self, id: &str) -> Option<&DomElement> {
        self.elements.get(id)
    }

    /// Gets a mutable element by ID
    pub fn get_element_mut(&mut self, id: &str) -> Option<&mut DomElement> {
        self.elements.get_mut(id)
    }

    /// All elements carrying `class`
    pub fn elements_with_class<'a>(
        &'a self,
        class: &'a str,
    ) -> impl Iterator<Item = &'a DomElement> + 'a {
        self.elements.values().filter(move |e| e.has_class(class))
    }

    /// Records an event
    pub fn dispatch_event(&mut self, event: DomEvent) {
        self.event_history.push(event);
    }

    /// Gets the event history
    #[must_use]
    pub fn event_history(&self) -> &[DomEvent] {
        &self.event_history
    }

    /// Clears event history
    pub fn clear_event_history(&mut self) {
        self.event_history.clear();
    }

    /// Updates element text by ID
    pub fn set_element_text(&mut self, id: &str, text: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.set_text(text);
        }
    }

    /// Gets element text by ID
    #[must_use]
    pub fn get_element_text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|e| e.text_content.as_str())
    }

    /// Replaces the children of an element
    pub fn replace_children(&mut self, id: &str, children: Vec<DomElement>) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.children = children;
        }
    }

    /// Text of each child of an element, in order
    #[must_use]
    pub fn child_texts(&self, id: &str) -> Vec<String> {
        self.elements
            .get(id)
            .map(|e| e.children.iter().map(|c| c.text_content.clone()).collect())
            .unwrap_or_default()
    }
}

/// Element ID of the switcher option for `theme`
#[must_use]
pub fn theme_option_id(theme: &str) -> String {
    format!("theme-{theme}")
}
