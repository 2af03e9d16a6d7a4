//! Frame scheduling for the particle field.

use std::time::{Duration, Instant};

use dimen6_core::{ColorTheme, FieldSettings, SurfaceSize};
use rand::{SeedableRng, rngs::StdRng};

use crate::canvas::ParticleCanvas;
use crate::field::ParticleField;

/// Owns the particle field and decides when the next frame is due.
///
/// While running, one frame is scheduled per frame interval; each due
/// frame advances the field by one step. Stopping drops the pending frame.
#[derive(Debug)]
pub struct Animator {
    field: ParticleField,
    rng: StdRng,
    frame_interval: Duration,
    running: bool,
    next_frame: Option<Instant>,
}

impl Animator {
    /// Create an animator for a surface, or `None` when there is nothing to
    /// draw on.
    pub fn new(size: SurfaceSize, settings: FieldSettings) -> Option<Self> {
        Self::with_rng(size, settings, StdRng::from_entropy())
    }

    /// Like [`Animator::new`] with a fixed random seed.
    pub fn with_seed(size: SurfaceSize, settings: FieldSettings, seed: u64) -> Option<Self> {
        Self::with_rng(size, settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(size: SurfaceSize, settings: FieldSettings, mut rng: StdRng) -> Option<Self> {
        if size.is_empty() {
            return None;
        }
        let frame_interval = Duration::from_secs(1) / settings.fps.max(1);
        let field = ParticleField::new(size, settings, &mut rng);
        Some(Self {
            field,
            rng,
            frame_interval,
            running: false,
            next_frame: None,
        })
    }

    /// Adopt new surface dimensions, replacing every particle.
    pub fn resize(&mut self, size: SurfaceSize) {
        self.field.resize(size, &mut self.rng);
    }

    /// Throw away the current particles and create a fresh set.
    pub fn regenerate_particles(&mut self) {
        self.field.regenerate(&mut self.rng);
    }

    /// Advance the field by one frame.
    pub fn step(&mut self) {
        self.field.step();
    }

    /// Schedule frames from `now` on. Does nothing if already running.
    pub fn start(&mut self, now: Instant) {
        if self.running {
            return;
        }
        self.running = true;
        self.next_frame = Some(now);
    }

    /// Cancel the pending frame. Safe to call when already stopped.
    pub fn stop(&mut self) {
        self.running = false;
        self.next_frame = None;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Run the frame due at `now`, if any. Returns whether a step happened.
    ///
    /// Frames missed while the loop was busy are skipped, not replayed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_frame else {
            return false;
        };
        if now < due {
            return false;
        }

        self.step();
        let next = due + self.frame_interval;
        self.next_frame = Some(if next <= now {
            now + self.frame_interval
        } else {
            next
        });
        true
    }

    /// Time left until the pending frame, `None` when stopped.
    pub fn time_until_next_frame(&self, now: Instant) -> Option<Duration> {
        self.next_frame.map(|due| due.saturating_duration_since(now))
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    /// Widget painting the current frame.
    pub fn canvas(&self, theme: ColorTheme) -> ParticleCanvas<'_> {
        ParticleCanvas::new(&self.field, theme)
    }
}
