//! Color utility functions for translucent drawing.
//!
//! Terminal cells have no alpha channel, so opacity is emulated by mixing
//! the accent with the background color.

use ratatui::style::Color;

/// Mix `fg` over `bg` with the given opacity (0.0-1.0).
pub fn blend(fg: (u8, u8, u8), bg: (u8, u8, u8), alpha: f64) -> Color {
    let alpha = alpha.clamp(0.0, 1.0);
    let mix = |f: u8, b: u8| (b as f64 + (f as f64 - b as f64) * alpha).round() as u8;
    Color::Rgb(mix(fg.0, bg.0), mix(fg.1, bg.1), mix(fg.2, bg.2))
}

/// Mix `fg` over black.
pub fn fade(fg: (u8, u8, u8), alpha: f64) -> Color {
    blend(fg, (0, 0, 0), alpha)
}
