//! Design tokens for the clusteraudit CLI.
//!
//! Constraints:
//! - Only the semantic colors in `colors::*`
//! - All icons sourced from this module (unicode with ascii fallback)

use crossterm::style::{style, Color, Stylize};

use crate::models::Status;

pub mod colors {
    use super::Color;

    pub const SUCCESS: Color = Color::Green;
    pub const ERROR: Color = Color::Red;
    pub const WARNING: Color = Color::Yellow;
    pub const INFO: Color = Color::Cyan;
    pub const DIM: Color = Color::DarkGrey;
}

pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const ERROR: &str = "✗";
    pub const WARNING: &str = "⚠";
    pub const UNKNOWN: &str = "?";
    pub const SKIP: &str = "-";
    pub const ARROW: &str = "↳";
}

#[allow(dead_code)] // kept for terminals without unicode fonts
pub mod icons_ascii {
    pub const SUCCESS: &str = "[OK]";
    pub const ERROR: &str = "[FAIL]";
    pub const WARNING: &str = "[WARN]";
    pub const UNKNOWN: &str = "[?]";
    pub const SKIP: &str = "[-]";
    pub const ARROW: &str = "[>]";
}

/// Semantic color for a status.
pub fn status_color(status: Status) -> Color {
    match status {
        Status::Ok => colors::SUCCESS,
        Status::Warning => colors::WARNING,
        Status::Critical => colors::ERROR,
        Status::Unknown => colors::INFO,
        Status::NotApplicable => colors::DIM,
    }
}

/// Icon for a status.
pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Ok => icons::SUCCESS,
        Status::Warning => icons::WARNING,
        Status::Critical => icons::ERROR,
        Status::Unknown => icons::UNKNOWN,
        Status::NotApplicable => icons::SKIP,
    }
}

/// Apply a color when styling is enabled, pass text through otherwise.
pub fn paint(text: &str, color: Color, enabled: bool) -> String {
    if enabled {
        style(text).with(color).to_string()
    } else {
        text.to_string()
    }
}
