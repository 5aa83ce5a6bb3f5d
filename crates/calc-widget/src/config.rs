//! Widget configuration

use crate::core::{CalcError, CalcResult, ErrorTimerPolicy};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Longest accepted error display delay (one minute)
pub const MAX_ERROR_DISPLAY_MS: u64 = 60_000;

/// Widget configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Maximum number of history entries kept
    pub history_capacity: usize,
    /// How long "Error" stays up before the automatic clear
    pub error_display_ms: u64,
    /// Significant digits kept after each computation
    pub significant_digits: u32,
    /// Display lengths above this use the medium font
    pub font_medium_threshold: usize,
    /// Display lengths above this use the small font
    pub font_small_threshold: usize,
    /// Whether later input cancels the pending automatic clear
    pub timer_policy: ErrorTimerPolicy,
    /// Storage key for the persisted theme
    pub theme_storage_key: String,
    /// Theme applied when nothing is stored
    pub default_theme: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            history_capacity: 20,
            error_display_ms: 1_500,
            significant_digits: 12,
            font_medium_threshold: 9,
            font_small_threshold: 18,
            timer_policy: ErrorTimerPolicy::Preserve,
            theme_storage_key: "calculator_theme".to_string(),
            default_theme: "light".to_string(),
        }
    }
}

impl WidgetConfig {
    /// Create the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) JSON configuration and validate it
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check field ranges
    pub fn validate(&self) -> CalcResult<()> {
        if self.history_capacity == 0 {
            return Err(CalcError::config("history_capacity must be at least 1"));
        }
        if self.error_display_ms > MAX_ERROR_DISPLAY_MS {
            return Err(CalcError::config(format!(
                "error_display_ms must not exceed {MAX_ERROR_DISPLAY_MS}, got {}",
                self.error_display_ms
            )));
        }
        if !(1..=17).contains(&self.significant_digits) {
            return Err(CalcError::config(format!(
                "significant_digits must be within 1..=17, got {}",
                self.significant_digits
            )));
        }
        if self.font_medium_threshold > self.font_small_threshold {
            return Err(CalcError::config(
                "font_medium_threshold must not exceed font_small_threshold",
            ));
        }
        if self.theme_storage_key.is_empty() {
            return Err(CalcError::config("theme_storage_key must not be empty"));
        }
        Ok(())
    }

    /// Error display delay as a duration
    #[must_use]
    pub fn error_display(&self) -> Duration {
        Duration::from_millis(self.error_display_ms)
    }

    /// Set history capacity
    #[must_use]
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Set the error display delay
    #[must_use]
    pub fn with_error_display_ms(mut self, ms: u64) -> Self {
        self.error_display_ms = ms;
        self
    }

    /// Set significant digits
    #[must_use]
    pub fn with_significant_digits(mut self, digits: u32) -> Self {
        self.significant_digits = digits;
        self
    }

    /// Set the error timer policy
    #[must_use]
    pub fn with_timer_policy(mut self, policy: ErrorTimerPolicy) -> Self {
        self.timer_policy = policy;
        self
    }

    /// Set the theme used when storage is empty
    #[must_use]
    pub fn with_default_theme(mut self, theme: impl Into<String>) -> Self {
        self.default_theme = theme.into();
        self
    }
}
