//! Keypad layout and button decoding
//!
//! Buttons carry their meaning in `data-*` attributes the same way the
//! widget markup does: `data-number` for digits and the point,
//! `data-operator` for the four operators and `data-action` for equals,
//! clear and delete.

use super::dom::{DomElement, MockDom};
use crate::core::{CalcResult, CalculatorEngine, Operation};

/// What a keypad button does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadAction {
    /// Digit `0-9` or the decimal point
    Number(char),
    /// One of the four operators
    Operator(Operation),
    /// Compute the pending operation
    Equals,
    /// Clear operands and history
    Clear,
    /// Delete the last character
    Delete,
}

impl KeypadAction {
    /// Returns the button label for this action
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Number(ch) => ch.to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Equals => "=".to_string(),
            Self::Clear => "AC".to_string(),
            Self::Delete => "DEL".to_string(),
        }
    }

    /// Returns the `data-action` name for action buttons
    #[must_use]
    pub const fn action_name(&self) -> Option<&'static str> {
        match self {
            Self::Equals => Some("equals"),
            Self::Clear => Some("clear"),
            Self::Delete => Some("delete"),
            Self::Number(_) | Self::Operator(_) => None,
        }
    }

    /// True for digit/point presses, the only ones that reset a result
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Decodes a button element from its `data-*` attributes
    #[must_use]
    pub fn from_element(element: &DomElement) -> Option<Self> {
        if element.get_attr("data-number").is_some() {
            let mut chars = element.text_content.chars();
            return match (chars.next(), chars.next()) {
                (Some(ch), None) if ch.is_ascii_digit() || ch == '.' => Some(Self::Number(ch)),
                _ => None,
            };
        }
        if let Some(name) = element.get_attr("data-operator") {
            return name.parse().ok().map(Self::Operator);
        }
        match element.get_attr("data-action")? {
            "equals" => Some(Self::Equals),
            "clear" => Some(Self::Clear),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }

    /// Forwards the press to the engine.
    ///
    /// Plain digit/point presses consume the ready-to-reset flag first so
    /// typing after a result starts a new number. `Clear` also empties the
    /// history.
    pub fn dispatch(self, engine: &mut CalculatorEngine) -> CalcResult<()> {
        tracing::trace!(action = ?self, "keypad press");
        match self {
            Self::Number(token) => {
                engine.consume_ready_to_reset();
                engine.append_digit(token)?;
            }
            Self::Operator(op) => engine.choose_operator(op),
            Self::Equals => {
                engine.compute();
            }
            Self::Clear => {
                engine.clear();
                engine.clear_history();
            }
            Self::Delete => engine.delete_last_char(),
        }
        Ok(())
    }

    /// Renders the action as a keypad button element
    #[must_use]
    pub fn to_element(&self, id: &str) -> DomElement {
        let button = DomElement::new("button")
            .with_id(id)
            .with_text(&self.label())
            .with_class("keypad-btn");
        match self {
            Self::Number(_) => button.with_attr("data-number", ""),
            Self::Operator(op) => button.with_attr("data-operator", op.name()),
            Self::Equals | Self::Clear | Self::Delete => {
                button.with_attr("data-action", self.action_name().unwrap_or_default())
            }
        }
    }
}

/// A single keypad button definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButtonDef {
    /// The action this button performs
    pub action: KeypadAction,
    /// The DOM element ID for this button
    pub id: String,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
}

impl KeypadButtonDef {
    /// Creates a new button definition
    #[must_use]
    pub fn new(action: KeypadAction, row: usize, col: usize) -> Self {
        let id = match action {
            KeypadAction::Number('.') => "btn-decimal".to_string(),
            KeypadAction::Number(d) => format!("btn-{d}"),
            KeypadAction::Operator(op) => format!("btn-{}", op.name()),
            KeypadAction::Equals => "btn-equals".to_string(),
            KeypadAction::Clear => "btn-clear".to_string(),
            KeypadAction::Delete => "btn-delete".to_string(),
        };
        Self {
            action,
            id,
            row,
            col,
        }
    }
}

/// Keypad layout definition
///
/// ```text
/// [ AC ] [DEL ] [ ÷ ] [ × ]
/// [ 7  ] [ 8  ] [ 9 ] [ - ]
/// [ 4  ] [ 5  ] [ 6 ] [ + ]
/// [ 1  ] [ 2  ] [ 3 ] [ = ]
/// [ 0  ] [ .  ]
/// ```
#[derive(Debug, Clone)]
pub struct Keypad {
    /// Button definitions
    buttons: Vec<KeypadButtonDef>,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Number of grid columns
    pub const COLS: usize = 4;
    /// Number of grid rows
    pub const ROWS: usize = 5;

    /// Creates the standard keypad
    #[must_use]
    pub fn new() -> Self {
        use KeypadAction::{Clear, Delete, Equals, Number, Operator};
        let layout = [
            [Some(Clear), Some(Delete), Some(Operator(Operation::Divide)), Some(Operator(Operation::Multiply))],
            [Some(Number('7')), Some(Number('8')), Some(Number('9')), Some(Operator(Operation::Subtract))],
            [Some(Number('4')), Some(Number('5')), Some(Number('6')), Some(Operator(Operation::Add))],
            [Some(Number('1')), Some(Number('2')), Some(Number('3')), Some(Equals)],
            [Some(Number('0')), Some(Number('.')), None, None],
        ];

        let buttons = layout
            .iter()
            .enumerate()
            .flat_map(|(row, cells)| {
                cells.iter().enumerate().filter_map(move |(col, cell)| {
                    cell.map(|action| KeypadButtonDef::new(action, row, col))
                })
            })
            .collect();

        Self { buttons }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Gets all button definitions
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButtonDef] {
        &self.buttons
    }

    /// Gets a button by row and column
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.row == row && b.col == col)
    }

    /// Finds a button by element ID
    #[must_use]
    pub fn find_button_by_id(&self, id: &str) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Finds the button performing `action`
    #[must_use]
    pub fn find_button(&self, action: KeypadAction) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.action == action)
    }

    /// Creates a keypad container element with all buttons
    #[must_use]
    pub fn create_keypad_element(&self) -> DomElement {
        let mut keypad = DomElement::new("div").with_id("buttons").with_class("buttons");
        keypad.children = self
            .buttons
            .iter()
            .map(|btn| btn.action.to_element(&btn.id))
            .collect();
        keypad
    }

    /// Maps a keyboard key to a keypad action
    #[must_use]
    pub fn key_to_action(key: &str) -> Option<KeypadAction> {
        let mut chars = key.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            if ch.is_ascii_digit() || ch == '.' {
                return Some(KeypadAction::Number(ch));
            }
        }
        match key {
            "+" => Some(KeypadAction::Operator(Operation::Add)),
            "-" => Some(KeypadAction::Operator(Operation::Subtract)),
            "*" => Some(KeypadAction::Operator(Operation::Multiply)),
            "/" => Some(KeypadAction::Operator(Operation::Divide)),
            "Enter" | "=" => Some(KeypadAction::Equals),
            "Escape" => Some(KeypadAction::Clear),
            "Backspace" | "Delete" => Some(KeypadAction::Delete),
            _ => None,
        }
    }
}

/// Extension trait for MockDom to add keypad
pub trait MockDomKeypadExt {
    /// Adds the keypad container and registers every button
    fn add_keypad(&mut self, keypad: &Keypad);
}

impl MockDomKeypadExt for MockDom {
    fn add_keypad(&mut self, keypad: &Keypad) {
        let container = keypad.create_keypad_element();
        for button in &container.children {
            self.register_element(button.clone());
        }
        self.register_element(container);
    }
}
