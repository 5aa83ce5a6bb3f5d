//! Operand-entry engine
//!
//! A small state machine over three strings-and-flags: the operand being
//! typed, the staged left operand and the pending operator. Operands stay
//! text while the user types and are parsed only when a computation runs.
//!
//! ```text
//! Entry ──operator──▶ PendingOperator ──equals──▶ Result
//!   ▲                    │      ▲                   │
//!   └──────clear─────────┘      └─────operator──────┘
//!                        │
//!                  divide by zero
//!                        ▼
//!                  ErrorPending ──deadline──▶ clear()
//! ```

use crate::clock::{SharedClock, SystemClock};
use crate::config::WidgetConfig;
use crate::core::format::{display_number, format_number, parse_numeral, round_significant};
use crate::core::history::{History, HistoryEntry};
use crate::core::{CalcError, CalcResult, Operation};
use crate::render::DisplaySnapshot;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// What happens to a scheduled error clear when the user keeps typing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorTimerPolicy {
    /// The clear fires on schedule, wiping anything typed meanwhile
    #[default]
    Preserve,
    /// Any input cancels the scheduled clear
    CancelOnInput,
}

/// Logical mode of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngineMode {
    /// Typing the first operand
    Entry,
    /// Operator chosen, typing the right operand
    PendingOperator,
    /// A result was just computed
    Result,
    /// Divide-by-zero raised, automatic clear scheduled
    ErrorPending,
}

/// Outcome of [`CalculatorEngine::compute`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComputeOutcome {
    /// Result stored and recorded in history
    Computed(HistoryEntry),
    /// Operands or operator missing; nothing changed
    NotReady,
    /// Right operand was zero under divide; error presentation started
    DivisionByZero,
    /// Result was not finite; error presentation started
    Overflow,
}

/// The calculator's input/compute engine
pub struct CalculatorEngine {
    current_operand: String,
    previous_operand: String,
    operation: Option<Operation>,
    ready_to_reset: bool,
    history: History,
    /// Bumped whenever the history log changes
    history_revision: u64,
    /// Main line shows `Error` until the next input or clear
    showing_error: bool,
    /// Deadlines (clock ms) of scheduled automatic clears
    pending_clears: Vec<u64>,
    config: WidgetConfig,
    clock: SharedClock,
}

impl fmt::Debug for CalculatorEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalculatorEngine")
            .field("current_operand", &self.current_operand)
            .field("previous_operand", &self.previous_operand)
            .field("operation", &self.operation)
            .field("ready_to_reset", &self.ready_to_reset)
            .field("history_len", &self.history.len())
            .field("showing_error", &self.showing_error)
            .field("pending_clears", &self.pending_clears)
            .finish_non_exhaustive()
    }
}

impl Default for CalculatorEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorEngine {
    /// Creates an engine with default settings and the system clock
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(WidgetConfig::default())
    }

    /// Creates an engine with custom settings and the system clock
    #[must_use]
    pub fn with_config(config: WidgetConfig) -> Self {
        Self {
            current_operand: "0".to_string(),
            previous_operand: String::new(),
            operation: None,
            ready_to_reset: false,
            history: History::with_capacity(config.history_capacity),
            history_revision: 0,
            showing_error: false,
            pending_clears: Vec::new(),
            config,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the time source used for the error timer
    #[must_use]
    pub fn with_clock(mut self, clock: SharedClock) -> Self {
        self.clock = clock;
        self
    }

    // ===== Accessors =====

    /// Operand currently being entered or just computed
    #[must_use]
    pub fn current_operand(&self) -> &str {
        &self.current_operand
    }

    /// Staged left operand; empty when none is pending
    #[must_use]
    pub fn previous_operand(&self) -> &str {
        &self.previous_operand
    }

    /// Pending operator
    #[must_use]
    pub fn operation(&self) -> Option<Operation> {
        self.operation
    }

    /// True right after a computation completes
    #[must_use]
    pub fn is_ready_to_reset(&self) -> bool {
        self.ready_to_reset
    }

    /// Completed computations, newest first
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Changes every time the history log changes
    #[must_use]
    pub fn history_revision(&self) -> u64 {
        self.history_revision
    }

    /// True while the main line shows the error text
    #[must_use]
    pub fn is_showing_error(&self) -> bool {
        self.showing_error
    }

    /// Number of automatic clears still scheduled
    #[must_use]
    pub fn pending_error_clears(&self) -> usize {
        self.pending_clears.len()
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Current logical mode
    #[must_use]
    pub fn mode(&self) -> EngineMode {
        if !self.pending_clears.is_empty() {
            EngineMode::ErrorPending
        } else if self.operation.is_some() {
            EngineMode::PendingOperator
        } else if self.ready_to_reset {
            EngineMode::Result
        } else {
            EngineMode::Entry
        }
    }

    /// Read-only view for the display renderer
    #[must_use]
    pub fn snapshot(&self) -> DisplaySnapshot {
        let current_display = if self.showing_error {
            DisplaySnapshot::ERROR_TEXT.to_string()
        } else {
            display_number(&self.current_operand)
        };
        let previous = match self.operation {
            Some(op) => format!("{} {}", display_number(&self.previous_operand), op.symbol()),
            None => String::new(),
        };
        DisplaySnapshot::new(
            current_display,
            previous,
            self.config.font_medium_threshold,
            self.config.font_small_threshold,
        )
    }

    // ===== Entry =====

    /// Appends a digit or the decimal point to the current operand.
    ///
    /// A second point is ignored and a lone `"0"` is replaced rather than
    /// extended. Any other token is rejected without touching state.
    pub fn append_digit(&mut self, token: char) -> CalcResult<()> {
        if !(token.is_ascii_digit() || token == '.') {
            return Err(CalcError::InvalidToken(token.to_string()));
        }
        self.note_input();

        if token == '.' && self.current_operand.contains('.') {
            return Ok(());
        }
        if self.current_operand == "0" && token != '.' {
            self.current_operand.clear();
        }
        self.current_operand.push(token);
        Ok(())
    }

    /// Stages `op`, folding a pending operation first when a right operand
    /// has been typed.
    pub fn choose_operator(&mut self, op: Operation) {
        self.note_input();

        if self.current_operand.is_empty() {
            if !self.previous_operand.is_empty() {
                tracing::trace!(operator = op.name(), "pending operator replaced");
                self.operation = Some(op);
            }
            return;
        }

        if !self.previous_operand.is_empty() {
            match self.compute() {
                ComputeOutcome::Computed(entry) => {
                    tracing::debug!(entry = %entry, "pending operation folded");
                }
                ComputeOutcome::NotReady => {
                    tracing::trace!("pending operation not ready, staging over it");
                }
                outcome @ (ComputeOutcome::DivisionByZero | ComputeOutcome::Overflow) => {
                    tracing::debug!(?outcome, "fold raised an error, right operand staged");
                }
            }
        }

        self.operation = Some(op);
        self.previous_operand = std::mem::take(&mut self.current_operand);
        tracing::debug!(
            left = %self.previous_operand,
            operator = op.name(),
            "operator staged"
        );
    }

    /// Applies the pending operation.
    ///
    /// Missing or unparseable operands make this a silent no-op. A zero
    /// divisor leaves all operands untouched and starts the error
    /// presentation instead of recording anything.
    pub fn compute(&mut self) -> ComputeOutcome {
        self.note_input();

        let (Some(lhs), Some(rhs)) = (
            parse_numeral(&self.previous_operand),
            parse_numeral(&self.current_operand),
        ) else {
            return ComputeOutcome::NotReady;
        };
        let Some(op) = self.operation else {
            return ComputeOutcome::NotReady;
        };

        let raw = match op.apply(lhs, rhs) {
            Ok(value) => value,
            Err(CalcError::DivisionByZero) => {
                tracing::warn!(left = lhs, "division by zero");
                self.raise_error();
                return ComputeOutcome::DivisionByZero;
            }
            Err(err) => {
                tracing::warn!(error = %err, "computation rejected");
                return ComputeOutcome::NotReady;
            }
        };

        let rounded = round_significant(raw, self.config.significant_digits);
        if !rounded.is_finite() {
            tracing::warn!(left = lhs, right = rhs, operator = op.name(), "result overflowed");
            self.raise_error();
            return ComputeOutcome::Overflow;
        }

        let result = format_number(rounded);
        let entry = HistoryEntry::new(
            display_number(&format_number(lhs)),
            op.symbol(),
            display_number(&format_number(rhs)),
            display_number(&result),
        );
        tracing::debug!(entry = %entry, "computation recorded");
        self.history.push(entry.clone());
        self.history_revision += 1;

        self.current_operand = result;
        self.operation = None;
        self.previous_operand.clear();
        self.ready_to_reset = true;
        ComputeOutcome::Computed(entry)
    }

    // ===== Editing =====

    /// Drops the last character, falling back to `"0"`
    pub fn delete_last_char(&mut self) {
        self.note_input();
        if self.current_operand.chars().count() <= 1 {
            self.current_operand = "0".to_string();
        } else {
            self.current_operand.pop();
        }
    }

    /// Resets the operands and the pending operator; history is kept
    pub fn clear(&mut self) {
        self.note_input();
        self.reset_operands();
    }

    /// Empties the history log
    pub fn clear_history(&mut self) {
        if !self.history.is_empty() {
            self.history.clear();
            self.history_revision += 1;
        }
        tracing::debug!("history cleared");
    }

    /// Pre-step for plain digit/point presses.
    ///
    /// After a result, typing must start a fresh number: the current
    /// operand is reset to `"0"` and the flag is cleared. Operator and
    /// action presses must not call this.
    pub fn consume_ready_to_reset(&mut self) -> bool {
        if !self.ready_to_reset {
            return false;
        }
        self.current_operand = "0".to_string();
        self.ready_to_reset = false;
        true
    }

    // ===== Error timer =====

    /// Fires every automatic clear whose deadline has passed.
    ///
    /// Returns true if a clear ran. Hosts call this from their event loop
    /// or animation frame.
    pub fn poll_timers(&mut self) -> bool {
        if self.pending_clears.is_empty() {
            return false;
        }
        let now = self.clock.now_ms();
        let before = self.pending_clears.len();
        self.pending_clears.retain(|deadline| *deadline > now);
        let fired = before - self.pending_clears.len();
        if fired == 0 {
            return false;
        }
        tracing::debug!(fired, "error display elapsed, clearing");
        self.showing_error = false;
        self.reset_operands();
        true
    }

    /// Milliseconds until the next automatic clear, if one is scheduled
    #[must_use]
    pub fn next_timer_in_ms(&self) -> Option<u64> {
        let now = self.clock.now_ms();
        self.pending_clears
            .iter()
            .min()
            .map(|deadline| deadline.saturating_sub(now))
    }

    fn raise_error(&mut self) {
        let deadline = self
            .clock
            .now_ms()
            .saturating_add(self.config.error_display_ms);
        self.showing_error = true;
        self.pending_clears.push(deadline);
        tracing::debug!(deadline, "automatic clear scheduled");
    }

    /// Common bookkeeping for every user-driven call
    fn note_input(&mut self) {
        self.showing_error = false;
        if self.config.timer_policy == ErrorTimerPolicy::CancelOnInput
            && !self.pending_clears.is_empty()
        {
            tracing::debug!(
                cancelled = self.pending_clears.len(),
                "automatic clear cancelled by input"
            );
            self.pending_clears.clear();
        }
    }

    fn reset_operands(&mut self) {
        self.current_operand = "0".to_string();
        self.previous_operand.clear();
        self.operation = None;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::clock::FakeClock;
    use pretty_assertions::assert_eq;

    fn engine_with_clock(policy: ErrorTimerPolicy) -> (CalculatorEngine, Arc<FakeClock>) {
        let clock = FakeClock::shared();
        let engine =
            CalculatorEngine::with_config(WidgetConfig::new().with_timer_policy(policy))
                .with_clock(clock.clone());
        (engine, clock)
    }

    fn type_digits(engine: &mut CalculatorEngine, digits: &str) {
        for ch in digits.chars() {
            engine.append_digit(ch).unwrap();
        }
    }

    // ===== Initial state =====

    #[test]
    fn test_engine_new() {
        let engine = CalculatorEngine::new();
        assert_eq!(engine.current_operand(), "0");
        assert_eq!(engine.previous_operand(), "");
        assert_eq!(engine.operation(), None);
        assert!(!engine.is_ready_to_reset());
        assert!(engine.history().is_empty());
        assert_eq!(engine.mode(), EngineMode::Entry);
    }

    #[test]
    fn test_engine_debug() {
        let debug = format!("{:?}", CalculatorEngine::new());
        assert!(debug.contains("CalculatorEngine"));
    }

    // ===== append_digit =====

    #[test]
    fn test_append_replaces_leading_zero() {
        let mut engine = CalculatorEngine::new();
        engine.append_digit('5').unwrap();
        assert_eq!(engine.current_operand(), "5");
    }

    #[test]
    fn test_append_zero_on_zero_stays_zero() {
        let mut engine = CalculatorEngine::new();
        engine.append_digit('0').unwrap();
        engine.append_digit('0').unwrap();
        assert_eq!(engine.current_operand(), "0");
    }

    #[test]
    fn test_append_point_after_zero() {
        let mut engine = CalculatorEngine::new();
        type_digits(&mut engine, ".5");
        assert_eq!(engine.current_operand(), "0.5");
    }

    #[test]
    fn test_append_second_point_rejected() {
        let mut engine = CalculatorEngine::new();
        type_digits(&mut engine, "1..");
        assert_eq!(engine.current_operand(), "1.");
    }

    #[test]
    fn test_append_invalid_token() {
        let mut engine = CalculatorEngine::new();
        let err = engine.append_digit('x').unwrap_err();
        assert!(matches!(err, CalcError::InvalidToken(t) if t == "x"));
        assert_eq!(engine.current_operand(), "0");
    }

    #[test]
    fn test_append_does_not_touch_pending_operator() {
        let mut engine = CalculatorEngine::new();
        type_digits(&mut engine, "9");
        engine.choose_operator(Operation::Subtract);
        type_digits(&mut engine, "42");
        assert_eq!(engine.previous_operand(), "9");
        assert_eq!(engine.operation(), Some(Operation::Subtract));
        assert_eq!(engine.current_operand(), "42");
    }

    // ===== choose_operator =====

    #[test]
    fn test_choose_operator_stages_left_operand() {
        let mut engine = CalculatorEngine::new();
        type_digits(&mut engine, "12");
        engine.choose_operator(Operation::Multiply);
        assert_eq!(engine.previous_operand(), "12");
        assert_eq!(engine.current_operand(), "");
        assert_eq!(engine.mode(), EngineMode::PendingOperator);
    }

    #[test]
    fn test_choose_operator_replaces_pending_operator() {
        let mut engine = CalculatorEngine::new();
        type_digits(&mut engine, "12");
        engine.choose_operator(Operation::Multiply);
        engine.choose_operator(Operation::Divide);
        assert_eq!(engine.previous_operand(), "12");
        assert_eq!(engine.operation(), Some(Operation::Divide));
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_choose_operator_noop_when_nothing_to_operate_on() {
        let mut engine = CalculatorEngine::new();
        engine.current_operand.clear();
        engine.choose_operator(Operation::Add);
        assert_eq!(engine.operation(), None);
        assert_eq!(engine.previous_operand(), "");
        assert_eq!(engine.current_operand(), "");
    }

    #[test]
    fn test_choose_operator_folds_pending_operation() {
        let mut engine = CalculatorEngine::new();
        type_digits(&mut engine, "2");
        engine.choose_operator(Operation::Add);
        type_digits(&mut engine, "3");
        engine.choose_operator(Operation::Multiply);

        assert_eq!(engine.previous_operand(), "5");
        assert_eq!(engine.current_operand(), "");
        assert_eq!(engine.operation(), Some(Operation::Multiply));
        assert_eq!(engine.history().lines(), vec!["2 + 3 = 5"]);
    }

    #[test]
    fn test_choose_operator_after_result_chains() {
        let mut engine = CalculatorEngine::new();
        type_digits(&mut engine, "4");
        engine.choose_operator(Operation::Add);
        type_digits(&mut engine, "4");
        engine.compute();
        engine.choose_operator(Operation::Divide);
        engine.consume_ready_to_reset();
        type_digits(&mut engine, "2");
        engine.compute();
        assert_eq!(engine.current_operand(), "4");
    }

    // ===== compute =====

    #[test]
    fn test_compute_simple_addition() {
        let mut engine = CalculatorEngine::new();
        type_digits(&mut engine, "5");
        engine.choose_operator(Operation::Add);
        type_digits(&mut engine, "3");
        let outcome = engine.compute();

        assert!(matches!(outcome, ComputeOutcome::Computed(_)));
        assert_eq!(engine.current_operand(), "8");
        assert_eq!(engine.previous_operand(), "");
        assert_eq!(engine.operation(), None);
        assert!(engine.is_ready_to_reset());
        assert_eq!(engine.mode(), EngineMode::Result);
        assert_eq!(engine.history().lines(), vec!["5 + 3 = 8"]);
    }

    #[test]
    fn test_compute_rounds_to_twelve_significant_digits() {
        let mut engine = CalculatorEngine::new();
        type_digits(&mut engine, "0.1");
        engine.choose_operator(Operation::Add);
        type_digits(&mut engine, "0.2");
        engine.compute();
        assert_eq!(engine.current_operand(), "0.3");
        assert_eq!(engine.history().lines(), vec!["0.1 + 0.2 = 0.3"]);
    }

    #[test]
    fn test_compute_repeating_division() {
        let mut engine = CalculatorEngine::new();
        type_digits(&mut engine, "2");
        engine.choose_operator(Operation::Divide);
        type_digits(&mut engine, "3");
        engine.compute();
        assert_eq!(engine.current_operand(), "0.666666666667");
    }

    #[test]
    fn test_compute_history_uses_grouped_operands() {
        let mut engine = CalculatorEngine::new();
        type_digits(&mut engine, "1500");
        engine.choose_operator(Operation::Multiply);
        type_digits(&mut engine, "1000.");
        engine.compute();
        assert_eq!(engine.current_operand(), "1500000");
        assert_eq!(engine.history().lines(), vec!["1,500 × 1,000 = 1,500,000"]);
        assert_eq!(engine.snapshot().current_display, "1,500,000");
    }

    #[test]
    fn test_compute_negative_result() {
        let mut engine = CalculatorEngine::new();
        type_digits(&mut engine, "3");
        engine.choose_operator(Operation::Subtract);
        type_digits(&mut engine, "5000");
        engine.compute();
        assert_eq!(engine.current_operand(), "-4997");
        assert_eq!(engine.snapshot().current_display, "-4,997");
    }

    #[test]
    fn test_compute_without_operator_is_noop() {
        let mut engine = CalculatorEngine::new();
        type_digits(&mut engine, "7");
        assert_eq!(engine.compute(), ComputeOutcome::NotReady);
        assert_eq!(engine.current_operand(), "7");
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_compute_without_right_operand_is_noop() {
        let mut engine = CalculatorEngine::new();
        type_digits(&mut engine, "7");
        engine.choose_operator(Operation::Add);
        assert_eq!(engine.compute(), ComputeOutcome::NotReady);
        assert_eq!(engine.previous_operand(), "7");
        assert_eq!(engine.operation(), Some(Operation::Add));
    }

    #[test]
    fn test_compute_twice_second_is_noop() {
        let mut engine = CalculatorEngine::new();
        type_digits(&mut engine, "6");
        engine.choose_operator(Operation::Multiply);
        type_digits(&mut engine, "7");
        engine.compute();
        assert_eq!(engine.compute(), ComputeOutcome::NotReady);
        assert_eq!(engine.current_operand(), "42");
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_compute_overflow_raises_error() {
        let (mut engine, _clock) = engine_with_clock(ErrorTimerPolicy::Preserve);
        engine.current_operand = "1".to_string() + &"0".repeat(300);
        engine.choose_operator(Operation::Multiply);
        engine.current_operand = "1".to_string() + &"0".repeat(300);
        assert_eq!(engine.compute(), ComputeOutcome::Overflow);
        assert!(engine.is_showing_error());
        assert!(engine.history().is_empty());
    }

    // ===== Divide by zero =====

    #[test]
    fn test_divide_by_zero_leaves_state() {
        let (mut engine, _clock) = engine_with_clock(ErrorTimerPolicy::Preserve);
        type_digits(&mut engine, "7");
        engine.choose_operator(Operation::Divide);
        type_digits(&mut engine, "0");

        assert_eq!(engine.compute(), ComputeOutcome::DivisionByZero);
        assert_eq!(engine.current_operand(), "0");
        assert_eq!(engine.previous_operand(), "7");
        assert_eq!(engine.operation(), Some(Operation::Divide));
        assert!(engine.history().is_empty());
        assert!(engine.snapshot().is_error());
        assert_eq!(engine.mode(), EngineMode::ErrorPending);
    }

    #[test]
    fn test_divide_by_zero_point_zero() {
        let (mut engine, _clock) = engine_with_clock(ErrorTimerPolicy::Preserve);
        type_digits(&mut engine, "7");
        engine.choose_operator(Operation::Divide);
        type_digits(&mut engine, "0.00");
        assert_eq!(engine.compute(), ComputeOutcome::DivisionByZero);
    }

    #[test]
    fn test_error_clears_after_delay() {
        let (mut engine, clock) = engine_with_clock(ErrorTimerPolicy::Preserve);
        type_digits(&mut engine, "7");
        engine.choose_operator(Operation::Divide);
        type_digits(&mut engine, "0");
        engine.compute();

        clock.advance_ms(1_499);
        assert!(!engine.poll_timers());
        assert_eq!(engine.next_timer_in_ms(), Some(1));
        assert_eq!(engine.previous_operand(), "7");

        clock.advance_ms(1);
        assert!(engine.poll_timers());
        assert_eq!(engine.current_operand(), "0");
        assert_eq!(engine.previous_operand(), "");
        assert_eq!(engine.operation(), None);
        assert!(!engine.is_showing_error());
        assert_eq!(engine.mode(), EngineMode::Entry);
        assert_eq!(engine.next_timer_in_ms(), None);
    }

    #[test]
    fn test_preserve_policy_wipes_later_input() {
        let (mut engine, clock) = engine_with_clock(ErrorTimerPolicy::Preserve);
        type_digits(&mut engine, "7");
        engine.choose_operator(Operation::Divide);
        type_digits(&mut engine, "0");
        engine.compute();

        clock.advance_ms(500);
        engine.clear();
        type_digits(&mut engine, "123");
        assert!(!engine.is_showing_error());

        clock.advance_ms(1_000);
        assert!(engine.poll_timers());
        assert_eq!(engine.current_operand(), "0");
    }

    #[test]
    fn test_cancel_policy_keeps_later_input() {
        let (mut engine, clock) = engine_with_clock(ErrorTimerPolicy::CancelOnInput);
        type_digits(&mut engine, "7");
        engine.choose_operator(Operation::Divide);
        type_digits(&mut engine, "0");
        engine.compute();
        assert_eq!(engine.pending_error_clears(), 1);

        engine.delete_last_char();
        type_digits(&mut engine, "4");
        assert_eq!(engine.pending_error_clears(), 0);

        clock.advance_ms(5_000);
        assert!(!engine.poll_timers());
        engine.compute();
        assert_eq!(engine.current_operand(), "1.75");
    }

    #[test]
    fn test_repeated_errors_schedule_each_clear() {
        let (mut engine, clock) = engine_with_clock(ErrorTimerPolicy::Preserve);
        type_digits(&mut engine, "1");
        engine.choose_operator(Operation::Divide);
        type_digits(&mut engine, "0");
        engine.compute();
        clock.advance_ms(1_000);
        engine.compute();
        assert_eq!(engine.pending_error_clears(), 2);

        clock.advance_ms(500);
        assert!(engine.poll_timers());
        assert_eq!(engine.pending_error_clears(), 1);
    }

    #[test]
    fn test_error_deadline_saturates() {
        let (mut engine, clock) = engine_with_clock(ErrorTimerPolicy::Preserve);
        engine.config.error_display_ms = u64::MAX;
        clock.advance_ms(10);
        type_digits(&mut engine, "7");
        engine.choose_operator(Operation::Divide);
        type_digits(&mut engine, "0");
        assert_eq!(engine.compute(), ComputeOutcome::DivisionByZero);

        clock.advance_ms(60_000);
        assert!(!engine.poll_timers());
        assert!(engine.is_showing_error());
        assert_eq!(engine.next_timer_in_ms(), Some(u64::MAX - 60_010));
    }

    #[test]
    fn test_fold_division_by_zero_stages_right_operand() {
        let (mut engine, _clock) = engine_with_clock(ErrorTimerPolicy::Preserve);
        type_digits(&mut engine, "8");
        engine.choose_operator(Operation::Divide);
        type_digits(&mut engine, "0");
        engine.choose_operator(Operation::Add);

        assert!(engine.is_showing_error());
        assert_eq!(engine.previous_operand(), "0");
        assert_eq!(engine.operation(), Some(Operation::Add));
        assert!(engine.history().is_empty());
    }

    // ===== delete / clear =====

    #[test]
    fn test_delete_last_char() {
        let mut engine = CalculatorEngine::new();
        type_digits(&mut engine, "123");
        engine.delete_last_char();
        assert_eq!(engine.current_operand(), "12");
    }

    #[test]
    fn test_delete_single_char_resets_to_zero() {
        let mut engine = CalculatorEngine::new();
        type_digits(&mut engine, "8");
        engine.delete_last_char();
        assert_eq!(engine.current_operand(), "0");
        engine.delete_last_char();
        assert_eq!(engine.current_operand(), "0");
    }

    #[test]
    fn test_delete_keeps_pending_operation() {
        let mut engine = CalculatorEngine::new();
        type_digits(&mut engine, "8");
        engine.choose_operator(Operation::Add);
        engine.delete_last_char();
        assert_eq!(engine.current_operand(), "0");
        assert_eq!(engine.previous_operand(), "8");
        assert_eq!(engine.operation(), Some(Operation::Add));
    }

    #[test]
    fn test_clear_keeps_history() {
        let mut engine = CalculatorEngine::new();
        type_digits(&mut engine, "1");
        engine.choose_operator(Operation::Add);
        type_digits(&mut engine, "1");
        engine.compute();
        engine.clear();
        assert_eq!(engine.current_operand(), "0");
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_clear_history_bumps_revision() {
        let mut engine = CalculatorEngine::new();
        type_digits(&mut engine, "1");
        engine.choose_operator(Operation::Add);
        type_digits(&mut engine, "1");
        engine.compute();
        let revision = engine.history_revision();
        engine.clear_history();
        assert!(engine.history().is_empty());
        assert!(engine.history_revision() > revision);

        let revision = engine.history_revision();
        engine.clear_history();
        assert_eq!(engine.history_revision(), revision);
    }

    // ===== ready-to-reset =====

    #[test]
    fn test_consume_ready_to_reset() {
        let mut engine = CalculatorEngine::new();
        type_digits(&mut engine, "5");
        engine.choose_operator(Operation::Add);
        type_digits(&mut engine, "3");
        engine.compute();

        assert!(engine.consume_ready_to_reset());
        assert_eq!(engine.current_operand(), "0");
        assert!(!engine.is_ready_to_reset());
        type_digits(&mut engine, "9");
        assert_eq!(engine.current_operand(), "9");

        assert!(!engine.consume_ready_to_reset());
    }

    #[test]
    fn test_append_without_consume_extends_result() {
        let mut engine = CalculatorEngine::new();
        type_digits(&mut engine, "5");
        engine.choose_operator(Operation::Add);
        type_digits(&mut engine, "3");
        engine.compute();
        type_digits(&mut engine, "1");
        assert_eq!(engine.current_operand(), "81");
    }

    // ===== History bound =====

    #[test]
    fn test_history_bounded_to_twenty() {
        let mut engine = CalculatorEngine::new();
        for n in 1..=21u32 {
            engine.clear();
            type_digits(&mut engine, &n.to_string());
            engine.choose_operator(Operation::Add);
            type_digits(&mut engine, "0");
            engine.compute();
        }
        assert_eq!(engine.history().len(), 20);
        assert_eq!(engine.history().latest().unwrap().display(), "21 + 0 = 21");
        assert_eq!(engine.history().oldest().unwrap().display(), "2 + 0 = 2");
    }

    #[test]
    fn test_custom_history_capacity() {
        let mut engine = CalculatorEngine::with_config(WidgetConfig::new().with_history_capacity(2));
        for _ in 0..3 {
            engine.clear();
            type_digits(&mut engine, "2");
            engine.choose_operator(Operation::Multiply);
            type_digits(&mut engine, "2");
            engine.compute();
        }
        assert_eq!(engine.history().len(), 2);
    }

    // ===== Snapshot =====

    #[test]
    fn test_snapshot_pending_operator_line() {
        let mut engine = CalculatorEngine::new();
        type_digits(&mut engine, "12345");
        engine.choose_operator(Operation::Divide);
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.previous_display_with_operator, "12,345 ÷");
        assert_eq!(snapshot.current_display, "");
    }

    #[test]
    fn test_snapshot_font_size_grows_smaller() {
        use crate::render::FontSize;
        let mut engine = CalculatorEngine::new();
        type_digits(&mut engine, "1234567");
        assert_eq!(engine.snapshot().font_size, FontSize::Large);
        type_digits(&mut engine, "890");
        assert_eq!(engine.snapshot().font_size, FontSize::Medium);
        type_digits(&mut engine, "1234567890");
        assert_eq!(engine.snapshot().font_size, FontSize::Small);
    }
}
