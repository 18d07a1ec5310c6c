//! Drifting point particles ("data points") and their pulsing opacity.

use std::f64::consts::TAU;

use rand::Rng;

use super::config::BackgroundConfig;
use super::types::{Viewport, wrap_coordinate};

/// A single floating particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	/// Horizontal position in px.
	pub x: f64,
	/// Vertical position in px.
	pub y: f64,
	/// Radius in px, 0.5 to 2.5.
	pub radius: f64,
	/// Velocity in px per frame, each axis within ±0.15.
	pub vx: f64,
	/// Vertical velocity in px per frame.
	pub vy: f64,
	/// Opacity before pulsing, 0.2 to 0.7.
	pub base_opacity: f64,
	/// Pulse phase in radians.
	pub phase: f64,
	/// Phase advance per frame.
	pub phase_speed: f64,
}

impl Particle {
	/// Draws a particle uniformly inside `viewport`.
	pub fn random(rng: &mut impl Rng, viewport: Viewport) -> Self {
		Self {
			x: rng.random::<f64>() * viewport.w(),
			y: rng.random::<f64>() * viewport.h(),
			radius: rng.random::<f64>() * 2.0 + 0.5,
			vx: (rng.random::<f64>() - 0.5) * 0.3,
			vy: (rng.random::<f64>() - 0.5) * 0.3,
			base_opacity: rng.random::<f64>() * 0.5 + 0.2,
			phase: rng.random::<f64>() * TAU,
			phase_speed: rng.random::<f64>() * 0.02 + 0.01,
		}
	}

	/// Current opacity: `base · (0.7 + 0.3 · sin(phase))`.
	pub fn pulse_opacity(&self) -> f64 {
		self.base_opacity * (0.7 + self.phase.sin() * 0.3)
	}
}

/// The particle population for one viewport size.
#[derive(Clone, Debug, Default)]
pub struct ParticleField {
	/// Live particles, in draw order.
	pub particles: Vec<Particle>,
	viewport: Viewport,
}

impl ParticleField {
	/// Wraps an existing population for `viewport`.
	pub fn new(particles: Vec<Particle>, viewport: Viewport) -> Self {
		Self {
			particles,
			viewport,
		}
	}

	/// Populates `floor(W·H / particle_area)` particles.
	pub fn generate(config: &BackgroundConfig, viewport: Viewport, rng: &mut impl Rng) -> Self {
		let count = config.particle_count(viewport.w(), viewport.h());
		let particles = (0..count).map(|_| Particle::random(rng, viewport)).collect();
		Self {
			particles,
			viewport,
		}
	}

	/// Number of particles.
	pub fn len(&self) -> usize {
		self.particles.len()
	}

	/// Whether the field has no particles.
	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	/// Advance one frame: integrate, advance phase, wrap to the opposite edge.
	pub fn update(&mut self) {
		let (w, h) = (self.viewport.w(), self.viewport.h());
		for p in &mut self.particles {
			p.x = wrap_coordinate(p.x + p.vx, w);
			p.y = wrap_coordinate(p.y + p.vy, h);
			p.phase += p.phase_speed;
		}
	}
}
