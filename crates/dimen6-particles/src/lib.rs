//! Particle field background for the dimen6 showcase.
//!
//! A fixed set of point particles drifts across the surface, wrapping at
//! the edges, and every pair of particles closer than the link distance is
//! joined by a line that fades out with distance. The field is rebuilt
//! from scratch whenever the surface is resized.
//!
//! [`Animator`] owns the field and the frame schedule, and
//! [`ParticleCanvas`] paints the current state onto a ratatui buffer.

mod animator;
mod canvas;
mod chars;
mod color;
mod field;
mod particle;

pub use animator::Animator;
pub use canvas::ParticleCanvas;
pub use color::{blend, fade};
pub use field::{Link, MAX_PARTICLES, ParticleField, link_opacity, particle_count};
pub use particle::Particle;
