//! Calculator widget engine
//!
//! The headless core of a browser calculator: operand entry, the four
//! binary operations with 12-significant-digit rounding, a bounded
//! most-recent-first history, a timed divide-by-zero error, display
//! formatting with thousands grouping, and theme persistence.
//!
//! The engine holds no UI handles. Hosts drive it through the input
//! dispatcher ([`wasm::KeypadAction::dispatch`]) and paint from
//! [`render::DisplaySnapshot`].
//!
//! # Example
//!
//! ```rust
//! use calc_widget::prelude::*;
//!
//! let mut engine = CalculatorEngine::new();
//! engine.append_digit('5').unwrap();
//! engine.choose_operator(Operation::Add);
//! engine.append_digit('3').unwrap();
//! engine.compute();
//!
//! assert_eq!(engine.snapshot().current_display, "8");
//! assert_eq!(engine.history().lines(), vec!["5 + 3 = 8"]);
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod clock;
pub mod config;
pub mod core;
pub mod driver;
#[cfg(not(target_arch = "wasm32"))]
pub mod logging;
pub mod render;
pub mod theme;

/// Widget front end - the mock DOM needs no browser
pub mod wasm;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::clock::{Clock, FakeClock, SharedClock, SystemClock};
    pub use crate::config::WidgetConfig;
    pub use crate::core::format::{display_number, format_number, parse_numeral};
    pub use crate::core::history::{History, HistoryEntry};
    pub use crate::core::{
        CalcError, CalcResult, CalculatorEngine, ComputeOutcome, EngineMode, ErrorTimerPolicy,
        Operation,
    };
    pub use crate::driver::{CalculatorDriver, EngineDriver};
    pub use crate::render::{DisplayRenderer, DisplaySnapshot, FontSize, HistoryRenderer};
    pub use crate::theme::{MemoryStorage, ThemeStorage, ThemeStore};
    pub use crate::wasm::{DomElement, DomEvent, KeypadAction, MockDom, WasmDriver};
}
