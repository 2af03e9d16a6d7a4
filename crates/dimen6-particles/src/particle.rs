//! A single drifting particle.

use dimen6_core::{Bounds, FieldSettings, SurfaceSize};
use rand::Rng;

/// Point particle with constant velocity.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Horizontal position in surface units.
    pub x: f64,
    /// Vertical position, growing downwards.
    pub y: f64,
    /// Horizontal velocity in units per frame.
    pub vx: f64,
    /// Vertical velocity in units per frame.
    pub vy: f64,
    pub radius: f64,
    pub opacity: f64,
}

impl Particle {
    /// Create a particle at a uniformly random position on the surface.
    ///
    /// The surface must have a non-zero area.
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        size: SurfaceSize,
        settings: &FieldSettings,
    ) -> Self {
        let velocity = settings.velocity();
        Self {
            x: rng.gen_range(0.0..size.width),
            y: rng.gen_range(0.0..size.height),
            vx: sample(rng, velocity),
            vy: sample(rng, velocity),
            radius: sample(rng, settings.radius),
            opacity: sample(rng, settings.opacity),
        }
    }

    /// Move by one frame of velocity, wrapping to the opposite edge.
    pub fn advance(&mut self, size: SurfaceSize) {
        self.x = wrap(self.x + self.vx, size.width);
        self.y = wrap(self.y + self.vy, size.height);
    }

    pub fn distance_to(&self, other: &Particle) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

fn wrap(value: f64, extent: f64) -> f64 {
    if value < 0.0 {
        extent
    } else if value > extent {
        0.0
    } else {
        value
    }
}

fn sample<R: Rng + ?Sized>(rng: &mut R, bounds: Bounds) -> f64 {
    if bounds.min >= bounds.max {
        return bounds.min;
    }
    rng.gen_range(bounds.min..=bounds.max)
}
