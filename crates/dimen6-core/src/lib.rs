//! Core types shared by the dimen6 crates.

mod settings;
mod surface;
mod theme;

pub use settings::{Bounds, FieldSettings};
pub use surface::SurfaceSize;
pub use theme::ColorTheme;
