//! Glyphs for particles too large for a single braille dot.

/// Radius from which a particle is drawn as a glyph instead of a dot.
pub const GLYPH_RADIUS: f64 = 1.2;

/// Particle glyphs, smallest first.
pub const PARTICLE_GLYPHS: &[&str] = &["·", "•"];

/// Glyph for a particle of the given radius, if it needs one.
pub fn glyph_for_radius(radius: f64) -> Option<&'static str> {
    if radius < GLYPH_RADIUS {
        None
    } else if radius < 1.6 {
        Some(PARTICLE_GLYPHS[0])
    } else {
        Some(PARTICLE_GLYPHS[1])
    }
}
