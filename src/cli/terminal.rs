//! Terminal capability detection and colour helpers

use owo_colors::{OwoColorize, colors::css};
use planner::{Color, CreditLoad};

/// Detects whether colored output should be enabled
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Detects terminal width, returning None if not available
pub fn terminal_width() -> Option<u16> {
    terminal_size::terminal_size().map(|(w, _)| w.0)
}

/// Check if terminal is narrow (< 60 columns)
pub fn is_narrow() -> bool {
    terminal_width().is_some_and(|w| w < 60)
}

/// Extension trait for colorizing output
pub trait Colorize {
    /// Color as success (green)
    fn success(&self) -> String;
    /// Color as warning (amber)
    fn warning(&self) -> String;
    /// Color as info (blue)
    fn info(&self) -> String;
    /// Dim the text
    fn dim(&self) -> String;
    /// Paint with a plan colour tag
    fn tagged(&self, color: Color) -> String;
}

impl Colorize for str {
    fn success(&self) -> String {
        if supports_color() {
            self.fg::<css::Green>().to_string()
        } else {
            self.to_string()
        }
    }

    fn warning(&self) -> String {
        if supports_color() {
            self.fg::<css::Orange>().to_string()
        } else {
            self.to_string()
        }
    }

    fn info(&self) -> String {
        if supports_color() {
            self.fg::<css::LightBlue>().to_string()
        } else {
            self.to_string()
        }
    }

    fn dim(&self) -> String {
        if supports_color() {
            self.dimmed().to_string()
        } else {
            self.to_string()
        }
    }

    fn tagged(&self, color: Color) -> String {
        if !supports_color() {
            return self.to_string();
        }
        match color {
            Color::Plain => self.to_string(),
            Color::Red => self.fg::<css::Crimson>().to_string(),
            Color::Orange => self.fg::<css::DarkOrange>().to_string(),
            Color::Yellow => self.fg::<css::Gold>().to_string(),
            Color::Green => self.fg::<css::SeaGreen>().to_string(),
            Color::Blue => self.fg::<css::RoyalBlue>().to_string(),
            Color::Purple => self.fg::<css::MediumPurple>().to_string(),
            Color::Pink => self.fg::<css::HotPink>().to_string(),
        }
    }
}

impl Colorize for String {
    fn success(&self) -> String {
        self.as_str().success()
    }

    fn warning(&self) -> String {
        self.as_str().warning()
    }

    fn info(&self) -> String {
        self.as_str().info()
    }

    fn dim(&self) -> String {
        self.as_str().dim()
    }

    fn tagged(&self, color: Color) -> String {
        self.as_str().tagged(color)
    }
}

/// Short label for a load classification, coloured by severity.
pub fn load_label(load: CreditLoad) -> String {
    match load {
        CreditLoad::Empty => "empty".dim(),
        CreditLoad::Normal => "ok".success(),
        CreditLoad::Underload => "⚠ underload".warning(),
        CreditLoad::Overload => "⚠ overload".warning(),
    }
}
