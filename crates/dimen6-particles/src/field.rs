//! Particle set and proximity links.

use dimen6_core::{FieldSettings, SurfaceSize};
use rand::Rng;

use crate::particle::Particle;

/// Upper limit on the particle set, whatever the surface and density.
pub const MAX_PARTICLES: usize = 10_000;

/// Number of particles for a surface: one per `density` square units.
pub fn particle_count(size: SurfaceSize, density: f64) -> usize {
    if size.is_empty() || density <= 0.0 {
        return 0;
    }
    let count = (size.area() / density).floor();
    if !count.is_finite() {
        return 0;
    }
    (count as usize).min(MAX_PARTICLES)
}

/// Opacity of a link between two particles `distance` apart.
///
/// Falls linearly from `max_opacity` at distance zero to zero at
/// `threshold`; pairs at or beyond the threshold are not linked.
pub fn link_opacity(distance: f64, threshold: f64, max_opacity: f64) -> f64 {
    if threshold <= 0.0 || distance >= threshold {
        return 0.0;
    }
    (1.0 - distance / threshold) * max_opacity
}

/// Connection between two nearby particles, by index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub from: usize,
    pub to: usize,
    pub distance: f64,
    pub opacity: f64,
}

/// All particles on one surface.
///
/// Links are recomputed whenever particles move or are replaced, so
/// repainting an unchanged field does not redo the pairwise scan.
#[derive(Debug, Clone)]
pub struct ParticleField {
    size: SurfaceSize,
    settings: FieldSettings,
    particles: Vec<Particle>,
    links: Vec<Link>,
}

impl ParticleField {
    /// Create a field for `size` and fill it with particles.
    pub fn new<R: Rng + ?Sized>(size: SurfaceSize, settings: FieldSettings, rng: &mut R) -> Self {
        let mut field = Self {
            size,
            settings,
            particles: Vec::new(),
            links: Vec::new(),
        };
        field.regenerate(rng);
        field
    }

    /// Set new surface dimensions and rebuild the particle set.
    pub fn resize<R: Rng + ?Sized>(&mut self, size: SurfaceSize, rng: &mut R) {
        self.size = size;
        self.regenerate(rng);
    }

    /// Replace the whole particle set with a fresh one.
    pub fn regenerate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let count = particle_count(self.size, self.settings.density);
        self.particles = (0..count)
            .map(|_| Particle::random(rng, self.size, &self.settings))
            .collect();
        self.update_links();
    }

    /// Advance every particle by one frame.
    pub fn step(&mut self) {
        let size = self.size;
        for particle in &mut self.particles {
            particle.advance(size);
        }
        self.update_links();
    }

    /// Every unordered pair closer than the link distance, as of the last
    /// change to the particles.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    fn update_links(&mut self) {
        let threshold = self.settings.link_distance;
        let max_opacity = self.settings.link_opacity;
        self.links.clear();

        for (i, a) in self.particles.iter().enumerate() {
            for (j, b) in self.particles.iter().enumerate().skip(i + 1) {
                let distance = a.distance_to(b);
                if distance < threshold {
                    self.links.push(Link {
                        from: i,
                        to: j,
                        distance,
                        opacity: link_opacity(distance, threshold, max_opacity),
                    });
                }
            }
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn from_particles(
        size: SurfaceSize,
        settings: FieldSettings,
        particles: Vec<Particle>,
    ) -> Self {
        let mut field = Self {
            size,
            settings,
            particles,
            links: Vec::new(),
        };
        field.update_links();
        field
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn still(x: f64, y: f64) -> Particle {
        Particle {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            radius: 1.0,
            opacity: 0.3,
        }
    }

    #[test]
    fn test_particle_count() {
        assert_eq!(particle_count(SurfaceSize::new(800.0, 600.0), 15_000.0), 32);
        assert_eq!(particle_count(SurfaceSize::new(400.0, 300.0), 15_000.0), 8);
        assert_eq!(particle_count(SurfaceSize::new(1920.0, 1080.0), 15_000.0), 138);
        assert_eq!(particle_count(SurfaceSize::new(100.0, 100.0), 15_000.0), 0);
        assert_eq!(particle_count(SurfaceSize::new(0.0, 600.0), 15_000.0), 0);
    }

    #[test]
    fn test_particle_count_is_bounded() {
        let huge = SurfaceSize::new(80.0 * 1e12, 24.0 * 1e12);
        assert_eq!(particle_count(huge, 15_000.0), MAX_PARTICLES);
        assert_eq!(particle_count(SurfaceSize::new(f64::INFINITY, 600.0), 15_000.0), 0);
        assert_eq!(particle_count(SurfaceSize::new(800.0, 600.0), f64::NAN), 0);
    }

    #[test]
    fn test_links_follow_step() {
        let mut field = ParticleField::from_particles(
            SurfaceSize::new(800.0, 600.0),
            FieldSettings::default(),
            vec![still(100.0, 100.0), Particle { vx: 0.2, ..still(219.9, 100.0) }],
        );
        assert_eq!(field.links().len(), 1);

        field.step();
        assert!(field.links().is_empty());
    }

    #[test]
    fn test_regenerate_fills_surface() {
        let mut rng = StdRng::seed_from_u64(42);
        for (w, h) in [(800.0, 600.0), (1280.0, 720.0), (333.0, 777.0), (150.0, 100.0)] {
            let size = SurfaceSize::new(w, h);
            let field = ParticleField::new(size, FieldSettings::default(), &mut rng);
            assert_eq!(field.len(), (w * h / 15_000.0_f64).floor() as usize);
            for p in field.particles() {
                assert!(p.x >= 0.0 && p.x < w);
                assert!(p.y >= 0.0 && p.y < h);
            }
        }
    }

    #[test]
    fn test_step_only_moves_positions() {
        let mut rng = StdRng::seed_from_u64(3);
        let size = SurfaceSize::new(800.0, 600.0);
        let mut field = ParticleField::new(size, FieldSettings::default(), &mut rng);
        let before = field.particles().to_vec();

        for _ in 0..5_000 {
            field.step();
        }

        for (old, new) in before.iter().zip(field.particles()) {
            assert_eq!(old.vx, new.vx);
            assert_eq!(old.vy, new.vy);
            assert_eq!(old.radius, new.radius);
            assert_eq!(old.opacity, new.opacity);
            assert!(new.x >= 0.0 && new.x <= 800.0);
            assert!(new.y >= 0.0 && new.y <= 600.0);
        }
    }

    #[test]
    fn test_step_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(9);
        let size = SurfaceSize::new(640.0, 480.0);
        let mut a = ParticleField::new(size, FieldSettings::default(), &mut rng);
        let mut b = a.clone();
        a.step();
        b.step();
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn test_link_opacity_falls_linearly() {
        assert!((link_opacity(0.0, 120.0, 0.15) - 0.15).abs() < 1e-12);
        assert!((link_opacity(60.0, 120.0, 0.15) - 0.075).abs() < 1e-12);
        assert!((link_opacity(90.0, 120.0, 0.15) - 0.0375).abs() < 1e-12);
        assert_eq!(link_opacity(120.0, 120.0, 0.15), 0.0);
        assert_eq!(link_opacity(500.0, 120.0, 0.15), 0.0);
    }

    #[test]
    fn test_links_between_near_pairs_only() {
        let field = ParticleField::from_particles(
            SurfaceSize::new(800.0, 600.0),
            FieldSettings::default(),
            vec![still(100.0, 100.0), still(160.0, 100.0), still(400.0, 400.0)],
        );

        let links = field.links();
        assert_eq!(links.len(), 1);
        assert_eq!((links[0].from, links[0].to), (0, 1));
        assert_eq!(links[0].distance, 60.0);
        assert!((links[0].opacity - 0.075).abs() < 1e-12);
    }

    #[test]
    fn test_pair_at_threshold_is_not_linked() {
        let field = ParticleField::from_particles(
            SurfaceSize::new(800.0, 600.0),
            FieldSettings::default(),
            vec![still(0.0, 0.0), still(120.0, 0.0), still(0.0, 0.0)],
        );

        let links = field.links();
        // Only the coincident pair (0, 2) is linked, at full link opacity.
        assert_eq!(links.len(), 1);
        assert_eq!((links[0].from, links[0].to), (0, 2));
        assert!((links[0].opacity - 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_resize_replaces_particles() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut field =
            ParticleField::new(SurfaceSize::new(800.0, 600.0), FieldSettings::default(), &mut rng);
        let old = field.particles().to_vec();
        assert_eq!(old.len(), 32);

        field.resize(SurfaceSize::new(400.0, 300.0), &mut rng);
        assert_eq!(field.len(), 8);
        assert_eq!(field.size(), SurfaceSize::new(400.0, 300.0));
        for p in field.particles() {
            assert!(!old.contains(p));
        }
    }
}
