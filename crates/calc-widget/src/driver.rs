//! Unified calculator driver
//!
//! Every front end (the headless engine, the mock-DOM widget) implements
//! [`CalculatorDriver`], so the `verify_*` checks below are written
//! once and run against all of them.

use crate::clock::FakeClock;
use crate::core::{CalculatorEngine, Operation};
use crate::render::FontSize;
use crate::wasm::KeypadAction;

/// Abstract driver for calculator interactions
///
/// # Example
///
/// ```rust
/// use calc_widget::driver::{verify_basic_arithmetic, EngineDriver};
/// use calc_widget::wasm::WasmDriver;
///
/// verify_basic_arithmetic(&mut EngineDriver::new());
/// verify_basic_arithmetic(&mut WasmDriver::new());
/// ```
pub trait CalculatorDriver {
    /// Presses a digit or the decimal point
    fn press_number(&mut self, token: char);

    /// Presses an operator button
    fn press_operator(&mut self, op: Operation);

    /// Presses `=`
    fn press_equals(&mut self);

    /// Presses `AC` (operands and history)
    fn press_clear(&mut self);

    /// Presses `DEL`
    fn press_delete(&mut self);

    /// Presses the clear-history button
    fn press_clear_history(&mut self);

    /// Lets pending timers fire
    fn tick(&mut self);

    /// Main display line
    fn display(&self) -> String;

    /// Secondary display line (left operand and operator)
    fn previous_display(&self) -> String;

    /// Font size hint of the main line
    fn font_size(&self) -> FontSize;

    /// Rendered history lines, newest first
    fn history(&self) -> Vec<String>;

    /// Presses each character of `digits` in turn
    fn enter_number(&mut self, digits: &str) {
        for token in digits.chars() {
            self.press_number(token);
        }
    }

    /// Enters `lhs op rhs =`
    fn calculate(&mut self, lhs: &str, op: Operation, rhs: &str) {
        self.enter_number(lhs);
        self.press_operator(op);
        self.enter_number(rhs);
        self.press_equals();
    }
}

/// Headless driver talking straight to the engine
#[derive(Debug, Default)]
pub struct EngineDriver {
    engine: CalculatorEngine,
}

impl EngineDriver {
    /// Creates a driver around a default engine
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a driver around an existing engine
    #[must_use]
    pub fn with_engine(engine: CalculatorEngine) -> Self {
        Self { engine }
    }

    /// Returns a reference to the engine
    #[must_use]
    pub fn engine(&self) -> &CalculatorEngine {
        &self.engine
    }

    fn press(&mut self, action: KeypadAction) {
        self.engine.poll_timers();
        if let Err(err) = action.dispatch(&mut self.engine) {
            tracing::warn!(error = %err, "press ignored");
        }
        self.engine.poll_timers();
    }
}

impl CalculatorDriver for EngineDriver {
    fn press_number(&mut self, token: char) {
        self.press(KeypadAction::Number(token));
    }

    fn press_operator(&mut self, op: Operation) {
        self.press(KeypadAction::Operator(op));
    }

    fn press_equals(&mut self) {
        self.press(KeypadAction::Equals);
    }

    fn press_clear(&mut self) {
        self.press(KeypadAction::Clear);
    }

    fn press_delete(&mut self) {
        self.press(KeypadAction::Delete);
    }

    fn press_clear_history(&mut self) {
        self.engine.clear_history();
    }

    fn tick(&mut self) {
        self.engine.poll_timers();
    }

    fn display(&self) -> String {
        self.engine.snapshot().current_display
    }

    fn previous_display(&self) -> String {
        self.engine.snapshot().previous_display_with_operator
    }

    fn font_size(&self) -> FontSize {
        self.engine.snapshot().font_size
    }

    fn history(&self) -> Vec<String> {
        self.engine.history().lines()
    }
}

// ===== Shared behaviour checks =====
// These work with ANY CalculatorDriver implementation

/// Verifies the four operations
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) {
    driver.press_clear();

    driver.calculate("5", Operation::Add, "3");
    assert_eq!(driver.display(), "8");
    driver.press_clear();

    driver.calculate("10", Operation::Subtract, "4");
    assert_eq!(driver.display(), "6");
    driver.press_clear();

    driver.calculate("6", Operation::Multiply, "7");
    assert_eq!(driver.display(), "42");
    driver.press_clear();

    driver.calculate("20", Operation::Divide, "4");
    assert_eq!(driver.display(), "5");
    driver.press_clear();

    driver.calculate("0.1", Operation::Add, "0.2");
    assert_eq!(driver.display(), "0.3");
    driver.press_clear();
}

/// Verifies digit entry: leading zero, single point, delete
pub fn verify_entry_rules<D: CalculatorDriver>(driver: &mut D) {
    driver.press_clear();
    assert_eq!(driver.display(), "0");

    driver.enter_number("007");
    assert_eq!(driver.display(), "7");
    driver.press_clear();

    driver.enter_number("1..");
    assert_eq!(driver.display(), "1.");
    driver.press_clear();

    driver.enter_number(".5");
    assert_eq!(driver.display(), "0.5");
    driver.press_clear();

    driver.enter_number("123");
    driver.press_delete();
    assert_eq!(driver.display(), "12");
    driver.press_delete();
    driver.press_delete();
    assert_eq!(driver.display(), "0");
    driver.press_clear();
}

/// Verifies operator staging, replacement and folding
pub fn verify_operator_chaining<D: CalculatorDriver>(driver: &mut D) {
    driver.press_clear();

    driver.enter_number("12");
    driver.press_operator(Operation::Multiply);
    assert_eq!(driver.previous_display(), "12 ×");
    assert_eq!(driver.display(), "");

    driver.press_operator(Operation::Divide);
    assert_eq!(driver.previous_display(), "12 ÷");

    driver.enter_number("4");
    driver.press_operator(Operation::Add);
    assert_eq!(driver.previous_display(), "3 +");
    assert_eq!(driver.history().first().map(String::as_str), Some("12 ÷ 4 = 3"));

    driver.enter_number("2");
    driver.press_equals();
    assert_eq!(driver.display(), "5");
    assert_eq!(driver.previous_display(), "");
    driver.press_clear();
}

/// Verifies that typing after a result starts a new number while an
/// operator continues from it
pub fn verify_result_reset<D: CalculatorDriver>(driver: &mut D) {
    driver.press_clear();

    driver.calculate("5", Operation::Add, "3");
    driver.press_number('9');
    assert_eq!(driver.display(), "9");
    driver.press_clear();

    driver.calculate("5", Operation::Add, "3");
    driver.press_operator(Operation::Multiply);
    assert_eq!(driver.previous_display(), "8 ×");
    driver.enter_number("2");
    driver.press_equals();
    assert_eq!(driver.display(), "16");

    // a second equals has nothing to compute
    driver.press_equals();
    assert_eq!(driver.display(), "16");
    assert_eq!(driver.history().len(), 2);
    driver.press_clear();
}

/// Verifies grouping and the font size hint
pub fn verify_display_formatting<D: CalculatorDriver>(driver: &mut D) {
    driver.press_clear();

    driver.enter_number("1234567");
    assert_eq!(driver.display(), "1,234,567");
    assert_eq!(driver.font_size(), FontSize::Large);

    driver.enter_number("890.25");
    assert_eq!(driver.display(), "1,234,567,890.25");
    assert_eq!(driver.font_size(), FontSize::Medium);

    driver.enter_number("1234");
    assert_eq!(driver.font_size(), FontSize::Small);
    driver.press_clear();

    driver.calculate("3", Operation::Subtract, "5000");
    assert_eq!(driver.display(), "-4,997");
    driver.press_clear();
}

/// Verifies history order, the 20-entry bound and both clear paths
pub fn verify_history<D: CalculatorDriver>(driver: &mut D) {
    driver.press_clear();
    assert!(driver.history().is_empty());

    for n in 1..=21u32 {
        driver.calculate(&n.to_string(), Operation::Add, "0");
    }
    let history = driver.history();
    assert_eq!(history.len(), 20);
    assert_eq!(history[0], "21 + 0 = 21");
    assert_eq!(history[19], "2 + 0 = 2");

    driver.press_clear_history();
    assert!(driver.history().is_empty());
    assert_eq!(driver.display(), "21");

    driver.calculate("1", Operation::Add, "1");
    driver.press_clear();
    assert!(driver.history().is_empty());
}

/// Verifies the divide-by-zero presentation and its automatic clear
///
/// `clock` must be the clock the driver's engine reads.
pub fn verify_divide_by_zero<D: CalculatorDriver>(driver: &mut D, clock: &FakeClock) {
    driver.press_clear();

    driver.calculate("7", Operation::Divide, "0");
    assert_eq!(driver.display(), "Error");
    assert_eq!(driver.previous_display(), "7 ÷");
    assert!(driver.history().is_empty());

    clock.advance_ms(1_499);
    driver.tick();
    assert_eq!(driver.previous_display(), "7 ÷");

    clock.advance_ms(1);
    driver.tick();
    assert_eq!(driver.display(), "0");
    assert_eq!(driver.previous_display(), "");
}

/// Runs every clock-independent check
pub fn run_full_suite<D: CalculatorDriver>(driver: &mut D) {
    verify_basic_arithmetic(driver);
    verify_entry_rules(driver);
    verify_operator_chaining(driver);
    verify_result_reset(driver);
    verify_display_formatting(driver);
    verify_history(driver);
}
