//! Read-only views handed to renderers
//!
//! The engine never holds UI handles. After each call the host polls a
//! [`DisplaySnapshot`] and the history, then passes them to whatever
//! implements [`DisplayRenderer`] / [`HistoryRenderer`].

use crate::core::history::HistoryEntry;
use serde::{Deserialize, Serialize};

/// Font size hint derived from the length of the current display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    /// Short numbers
    #[default]
    Large,
    /// Longer than the medium threshold
    Medium,
    /// Longer than the small threshold
    Small,
}

impl FontSize {
    /// Pick the size for a display string of `len` characters
    #[must_use]
    pub fn for_length(len: usize, medium_threshold: usize, small_threshold: usize) -> Self {
        if len > small_threshold {
            Self::Small
        } else if len > medium_threshold {
            Self::Medium
        } else {
            Self::Large
        }
    }

    /// CSS `font-size` value
    #[must_use]
    pub const fn css(&self) -> &'static str {
        match self {
            Self::Large => "3rem",
            Self::Medium => "2.25rem",
            Self::Small => "1.5rem",
        }
    }
}

/// Everything the display renderer needs for one paint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySnapshot {
    /// Main line: formatted current operand, or `Error`
    pub current_display: String,
    /// Secondary line: formatted previous operand plus operator symbol
    pub previous_display_with_operator: String,
    /// Font size hint for the main line
    pub font_size: FontSize,
}

impl DisplaySnapshot {
    /// Text shown while the divide-by-zero error is up
    pub const ERROR_TEXT: &'static str = "Error";

    /// Build a snapshot, deriving the font size from the main line
    #[must_use]
    pub fn new(
        current_display: String,
        previous_display_with_operator: String,
        medium_threshold: usize,
        small_threshold: usize,
    ) -> Self {
        let font_size = FontSize::for_length(
            current_display.chars().count(),
            medium_threshold,
            small_threshold,
        );
        Self {
            current_display,
            previous_display_with_operator,
            font_size,
        }
    }

    /// True when the main line shows the error text
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.current_display == Self::ERROR_TEXT
    }
}

/// Paints the two display lines
pub trait DisplayRenderer {
    /// Render one snapshot
    fn render_display(&mut self, snapshot: &DisplaySnapshot);
}

/// Paints the history list, replacing whatever was shown before
pub trait HistoryRenderer {
    /// Render the whole log, newest first
    fn render_history(&mut self, entries: &[HistoryEntry]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_size_thresholds() {
        assert_eq!(FontSize::for_length(0, 9, 18), FontSize::Large);
        assert_eq!(FontSize::for_length(9, 9, 18), FontSize::Large);
        assert_eq!(FontSize::for_length(10, 9, 18), FontSize::Medium);
        assert_eq!(FontSize::for_length(18, 9, 18), FontSize::Medium);
        assert_eq!(FontSize::for_length(19, 9, 18), FontSize::Small);
    }

    #[test]
    fn test_font_size_css() {
        assert_eq!(FontSize::Large.css(), "3rem");
        assert_eq!(FontSize::Medium.css(), "2.25rem");
        assert_eq!(FontSize::Small.css(), "1.5rem");
    }

    #[test]
    fn test_snapshot_counts_grouped_characters() {
        // "123,456,789" is eleven characters once grouped
        let snapshot = DisplaySnapshot::new("123,456,789".into(), String::new(), 9, 18);
        assert_eq!(snapshot.font_size, FontSize::Medium);
    }

    #[test]
    fn test_snapshot_error_flag() {
        let snapshot = DisplaySnapshot::new("Error".into(), String::new(), 9, 18);
        assert!(snapshot.is_error());
        assert_eq!(snapshot.font_size, FontSize::Large);
    }

    #[test]
    fn test_snapshot_serializes_lowercase_font() {
        let snapshot = DisplaySnapshot::new("8".into(), "5 +".into(), 9, 18);
        let json = serde_json::to_string(&snapshot).unwrap_or_default();
        assert!(json.contains("\"font_size\":\"large\""));
    }

    #[derive(Default)]
    struct Recorder {
        painted: Vec<String>,
        lists: Vec<usize>,
    }

    impl DisplayRenderer for Recorder {
        fn render_display(&mut self, snapshot: &DisplaySnapshot) {
            self.painted.push(snapshot.current_display.clone());
        }
    }

    impl HistoryRenderer for Recorder {
        fn render_history(&mut self, entries: &[HistoryEntry]) {
            self.lists.push(entries.len());
        }
    }

    #[test]
    fn test_renderer_traits_are_object_safe() {
        let mut recorder = Recorder::default();
        {
            let display: &mut dyn DisplayRenderer = &mut recorder;
            display.render_display(&DisplaySnapshot::new("1".into(), String::new(), 9, 18));
        }
        {
            let history: &mut dyn HistoryRenderer = &mut recorder;
            history.render_history(&[HistoryEntry::new("1", "+", "1", "2")]);
        }
        assert_eq!(recorder.painted, vec!["1"]);
        assert_eq!(recorder.lists, vec![1]);
    }
}
