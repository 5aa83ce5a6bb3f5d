//! Time sources for the error-dismissal timer
//!
//! The engine never sleeps. It records a deadline and compares it with an
//! injected clock whenever the host polls, so tests can swap in a
//! [`FakeClock`] and step time deterministically.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Millisecond time source
pub trait Clock: fmt::Debug + Send + Sync {
    /// Current time in milliseconds since an arbitrary fixed origin
    fn now_ms(&self) -> u64;
}

/// Shared clock handle, as held by the engine
pub type SharedClock = Arc<dyn Clock>;

/// Wall-clock time (`Date.now()` in the browser)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        system_now_ms()
    }
}

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
fn system_now_ms() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(all(target_arch = "wasm32", feature = "wasm")))]
fn system_now_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Manually driven clock for deterministic tests
#[derive(Debug, Default)]
pub struct FakeClock {
    /// Current time in milliseconds
    current_ms: AtomicU64,
}

impl FakeClock {
    /// Create a fake clock frozen at `start_ms`
    #[must_use]
    pub fn new(start_ms: u64) -> Self {
        Self {
            current_ms: AtomicU64::new(start_ms),
        }
    }

    /// Create a shared fake clock starting at zero
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new(0))
    }

    /// Set the clock to a fixed time
    pub fn set_ms(&self, time_ms: u64) {
        self.current_ms.store(time_ms, Ordering::SeqCst);
    }

    /// Fast-forward time by duration
    pub fn advance(&self, duration: Duration) {
        self.advance_ms(duration.as_millis() as u64);
    }

    /// Fast-forward time by milliseconds
    pub fn advance_ms(&self, ms: u64) {
        self.current_ms.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for FakeClock {
    fn now_ms(&self) -> u64 {
        self.current_ms.load(Ordering::SeqCst)
    }
}
