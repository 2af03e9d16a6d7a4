//! Drawing surface dimensions.

/// Surface dimensions in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Derive the surface from terminal metrics.
    ///
    /// Uses the reported pixel size when the terminal provides one and falls
    /// back to `columns * cell_width` by `rows * cell_height` otherwise.
    pub fn from_terminal(
        columns: u16,
        rows: u16,
        pixel_width: u16,
        pixel_height: u16,
        cell_width: f64,
        cell_height: f64,
    ) -> Self {
        if pixel_width > 0 && pixel_height > 0 {
            Self::new(pixel_width as f64, pixel_height as f64)
        } else {
            Self::new(columns as f64 * cell_width, rows as f64 * cell_height)
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// A surface with no area cannot be drawn on.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_terminal_prefers_pixels() {
        let size = SurfaceSize::from_terminal(80, 24, 800, 600, 9.0, 18.0);
        assert_eq!(size, SurfaceSize::new(800.0, 600.0));
    }

    #[test]
    fn test_from_terminal_estimates_without_pixels() {
        let size = SurfaceSize::from_terminal(80, 24, 0, 0, 9.0, 18.0);
        assert_eq!(size, SurfaceSize::new(720.0, 432.0));
        assert_eq!(size.area(), 311_040.0);
    }

    #[test]
    fn test_is_empty() {
        assert!(SurfaceSize::new(0.0, 600.0).is_empty());
        assert!(!SurfaceSize::new(1.0, 1.0).is_empty());
    }
}
