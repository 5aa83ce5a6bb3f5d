//! Calculator Widget Demo
//!
//! Drives the mock-DOM widget through a short session: button clicks,
//! keyboard input, the divide-by-zero timer and a theme switch.
//!
//! Run with: RUST_LOG=calc_widget=debug cargo run --example calculator_widget_demo

use calc_widget::driver::run_full_suite;
use calc_widget::logging::{init_tracing, DEFAULT_FILTER};
use calc_widget::prelude::*;

fn print_display(widget: &WasmDriver) {
    println!(
        "   │ {:>24} │",
        widget.previous_element_text().unwrap_or_default()
    );
    println!(
        "   │ {:>24} │  font-size: {}",
        widget.current_element_text().unwrap_or_default(),
        widget.current_font_css().unwrap_or_default()
    );
}

fn main() {
    init_tracing(DEFAULT_FILTER);

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║              Calculator Widget Demo - Mock DOM               ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    let clock = FakeClock::shared();
    let mut widget = WasmDriver::new().with_clock(clock.clone());

    println!("1️⃣  Clicking 1 5 0 0 × 3 =");
    for id in ["btn-1", "btn-5", "btn-0", "btn-0", "btn-multiply", "btn-3", "btn-equals"] {
        widget.click(id);
    }
    print_display(&widget);

    println!("\n2️⃣  Typing 0.1 + 0.2 Enter on the keyboard");
    for key in ["0", ".", "1", "+", "0", ".", "2", "Enter"] {
        widget.press_key(key);
    }
    print_display(&widget);

    println!("\n3️⃣  7 ÷ 0 =");
    widget.calculate("7", Operation::Divide, "0");
    print_display(&widget);
    clock.advance_ms(1_500);
    widget.tick();
    println!("   ... 1.5 s later");
    print_display(&widget);

    println!("\n4️⃣  History (newest first):");
    for line in widget.history_list_items() {
        println!("   • {line}");
    }

    println!("\n5️⃣  Switching to the dark theme");
    widget.click("theme-dark");
    println!(
        "   body data-theme = {:?}, stored = {:?}",
        widget.active_theme(),
        widget.theme_store().load()
    );

    println!("\n6️⃣  DOM events recorded: {}", widget.dom().event_history().len());

    println!("\n7️⃣  Running the shared suite on a fresh widget...");
    run_full_suite(&mut WasmDriver::new());
    println!("   ✓ all checks passed");
}
