//! Accent color themes.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Accent color used for particles, links and UI highlights.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    #[default]
    Cyan,
    Green,
    Magenta,
    Amber,
    White,
}

impl ColorTheme {
    /// Cycle to the next color theme.
    pub fn next(&self) -> Self {
        match self {
            ColorTheme::Cyan => ColorTheme::Green,
            ColorTheme::Green => ColorTheme::Magenta,
            ColorTheme::Magenta => ColorTheme::Amber,
            ColorTheme::Amber => ColorTheme::White,
            ColorTheme::White => ColorTheme::Cyan,
        }
    }

    /// Full-intensity accent as an RGB triple.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            ColorTheme::Cyan => (0, 243, 255),
            ColorTheme::Green => (57, 255, 20),
            ColorTheme::Magenta => (255, 0, 200),
            ColorTheme::Amber => (255, 191, 0),
            ColorTheme::White => (230, 230, 230),
        }
    }

    /// Convert theme to Ratatui Color.
    pub fn color(self) -> Color {
        let (r, g, b) = self.rgb();
        Color::Rgb(r, g, b)
    }

    /// Display name shown in the help line.
    pub fn name(self) -> &'static str {
        match self {
            ColorTheme::Cyan => "cyan",
            ColorTheme::Green => "green",
            ColorTheme::Magenta => "magenta",
            ColorTheme::Amber => "amber",
            ColorTheme::White => "white",
        }
    }
}
