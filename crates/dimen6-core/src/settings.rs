//! Particle field tunables.

use serde::{Deserialize, Serialize};

/// Closed range of `f64` values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `value` lies inside the range, ends included.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Whether `min <= max`.
    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }
}

/// Tunables for particle generation, linking and frame pacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSettings {
    /// Surface area (in square units) per particle.
    pub density: f64,
    /// Pairs closer than this are linked.
    pub link_distance: f64,
    /// Link opacity at distance zero.
    pub link_opacity: f64,
    /// Particle radius range.
    pub radius: Bounds,
    /// Maximum per-axis speed in units per frame.
    pub speed: f64,
    /// Particle opacity range.
    pub opacity: Bounds,
    /// Frames per second while running.
    pub fps: u32,
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self {
            density: 15_000.0,
            link_distance: 120.0,
            link_opacity: 0.15,
            radius: Bounds::new(0.3, 1.8),
            speed: 0.2,
            opacity: Bounds::new(0.1, 0.6),
            fps: 60,
        }
    }
}

impl FieldSettings {
    /// Per-axis velocity range, symmetric around zero.
    pub fn velocity(&self) -> Bounds {
        Bounds::new(-self.speed, self.speed)
    }
}
