//! Terminal styling and color utilities.
//!
//! This module provides ANSI escape code definitions and color detection
//! for text output, plus small helpers that format durations for humans.

/// ANSI escape codes for text styling and colors.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";

    // Verdict badges (bold reverse video)
    /// Bold reverse green for a loading or trip that may fly.
    pub const TAG_GO: &str = "\x1b[1;7;32m";
    /// Bold reverse red for a loading or trip that must not fly.
    pub const TAG_NO_GO: &str = "\x1b[1;7;31m";

    /// Bright bold white for emphasis (callsigns, headings).
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Gray for secondary elements (units, separators).
    pub const GRAY: &str = "\x1b[90m";
    /// Yellow for fuel adjustments.
    pub const YELLOW: &str = "\x1b[33m";
    /// Red for violated limits.
    pub const RED: &str = "\x1b[31m";
}

/// A collection of resolved color codes, either actual ANSI sequences
/// or empty strings when color is disabled.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub tag_go: &'static str,
    pub tag_no_go: &'static str,
    pub white_bold: &'static str,
    pub gray: &'static str,
    pub yellow: &'static str,
    pub red: &'static str,
}

impl ColorPalette {
    /// Create a palette with actual ANSI color codes.
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            tag_go: colors::TAG_GO,
            tag_no_go: colors::TAG_NO_GO,
            white_bold: colors::WHITE_BOLD,
            gray: colors::GRAY,
            yellow: colors::YELLOW,
            red: colors::RED,
        }
    }

    /// Create a palette with no colors (empty strings).
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            tag_go: "",
            tag_no_go: "",
            white_bold: "",
            gray: "",
            yellow: "",
            red: "",
        }
    }

    /// Create a palette based on terminal capabilities.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    /// Verdict badge: ` GO ` or ` NO GO `.
    #[must_use]
    pub fn verdict(&self, go: bool) -> String {
        if go {
            format!("{} GO {}", self.tag_go, self.reset)
        } else {
            format!("{} NO GO {}", self.tag_no_go, self.reset)
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// Check if the terminal supports ANSI color codes.
///
/// This function respects:
/// - The `NO_COLOR` environment variable (https://no-color.org/)
/// - The `TERM=dumb` convention for non-capable terminals
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}

/// Format a duration given in minutes as `H:MM`, rounding to the minute.
///
/// # Examples
///
/// ```
/// # use prepavol_cli::terminal::format_minutes;
/// assert_eq!(format_minutes(0.0), "0:00");
/// assert_eq!(format_minutes(85.0), "1:25");
/// assert_eq!(format_minutes(472.4), "7:52");
/// ```
#[must_use]
pub fn format_minutes(minutes: f64) -> String {
    let total = minutes.max(0.0).round() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Format a duration given in hours as `H:MM`.
#[must_use]
pub fn format_hours(hours: f64) -> String {
    format_minutes(hours * 60.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_minutes_rounds_and_pads() {
        assert_eq!(format_minutes(5.0), "0:05");
        assert_eq!(format_minutes(59.6), "1:00");
        assert_eq!(format_minutes(245.0), "4:05");
    }

    #[test]
    fn test_format_minutes_clamps_negative() {
        assert_eq!(format_minutes(-12.0), "0:00");
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(370.0 / 60.0), "6:10");
        assert_eq!(format_hours(0.5), "0:30");
    }

    #[test]
    fn test_plain_palette_has_no_escapes() {
        let palette = ColorPalette::plain();
        assert_eq!(palette.verdict(true), " GO ");
        assert_eq!(palette.verdict(false), " NO GO ");
    }

    #[test]
    fn test_colored_palette_wraps_verdict() {
        let palette = ColorPalette::colored();
        let badge = palette.verdict(false);
        assert!(badge.starts_with(colors::TAG_NO_GO));
        assert!(badge.ends_with(colors::RESET));
    }
}
