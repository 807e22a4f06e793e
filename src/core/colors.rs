//! Terminal styling for report values.
//!
//! Color application is a pure function of the value, the requested styles and whether
//! styling is enabled: [`Painter::paint`] wraps the value in a single escape sequence whose
//! numeric codes are joined with `;`, followed by a reset. A disabled painter (plain output or
//! file output) returns the value unchanged.
//!
//! # Public API
//! - [`Style`]: Bold plus the eight standard foreground colors
//! - [`Painter`]: Applies styles when enabled
//! - [`strip_ansi_codes`]: Removes escape sequences (used by tests and plain comparisons)

use colored::{Color, ColoredString, Colorize};

/// Named styles a report value can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Bold,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Style {
    /// SGR parameter for the style.
    pub fn ansi_code(&self) -> u8 {
        match self {
            Style::Bold => 1,
            Style::Black => 30,
            Style::Red => 31,
            Style::Green => 32,
            Style::Yellow => 33,
            Style::Blue => 34,
            Style::Magenta => 35,
            Style::Cyan => 36,
            Style::White => 37,
        }
    }

    fn color(&self) -> Option<Color> {
        match self {
            Style::Bold => None,
            Style::Black => Some(Color::Black),
            Style::Red => Some(Color::Red),
            Style::Green => Some(Color::Green),
            Style::Yellow => Some(Color::Yellow),
            Style::Blue => Some(Color::Blue),
            Style::Magenta => Some(Color::Magenta),
            Style::Cyan => Some(Color::Cyan),
            Style::White => Some(Color::White),
        }
    }

    fn apply(&self, text: ColoredString) -> ColoredString {
        match self.color() {
            Some(color) => text.color(color),
            None => text.bold(),
        }
    }
}

/// Applies [`Style`]s to values, or passes them through untouched when disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Wrap `value` in the escape sequence for `styles`.
    ///
    /// With no styles, or when the painter is disabled, the value is returned as-is.
    pub fn paint(&self, value: impl ToString, styles: &[Style]) -> String {
        let text = value.to_string();
        if !self.enabled || styles.is_empty() {
            return text;
        }

        let colored = styles
            .iter()
            .fold(text.normal(), |acc, style| style.apply(acc));
        colored.to_string()
    }
}

impl Default for Painter {
    fn default() -> Self {
        Self::plain()
    }
}

/// Strip ANSI color codes
pub fn strip_ansi_codes(text: &str) -> String {
    // Simple state machine to remove ANSI escape sequences
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next(); // consume '['
            for ch in chars.by_ref() {
                if ch.is_ascii_alphabetic() {
                    break; // End of escape sequence
                }
            }
        } else {
            result.push(ch);
        }
    }

    result
}
