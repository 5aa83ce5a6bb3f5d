//! Widget front end
//!
//! The mock DOM, keypad and [`WasmDriver`] run anywhere and back the test
//! suites; [`BrowserCalculator`] is the `wasm-bindgen` entry point and is
//! only built with the `wasm` feature.

#[cfg(feature = "wasm")]
mod browser;
pub mod dom;
mod driver;
mod keypad;

#[cfg(feature = "wasm")]
pub use browser::{BrowserCalculator, BrowserStorage};
pub use dom::{DomElement, DomEvent, MockDom};
pub use driver::WasmDriver;
pub use keypad::{Keypad, KeypadAction, KeypadButtonDef, MockDomKeypadExt};
