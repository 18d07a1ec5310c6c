//! Per-frame background state and the layered render pass.

use rand::rngs::SmallRng;

use super::config::BackgroundConfig;
use super::mountain::MountainProfile;
use super::particles::ParticleField;
use super::render;
use super::surface::Surface2d;
use super::symbols::SymbolField;
use super::theme::BackgroundTheme;
use super::types::{PointerState, Viewport};

/// Everything a frame reads or mutates.
///
/// Entity populations and the mountain are rebuilt together whenever the
/// viewport changes; the pointer is replaced by input events.
pub struct Scene {
	config: BackgroundConfig,
	theme: BackgroundTheme,
	viewport: Viewport,
	particles: ParticleField,
	symbols: SymbolField,
	mountain: MountainProfile,
	pointer: PointerState,
	rng: SmallRng,
	generation: u64,
}

impl Scene {
	/// Builds a scene with every population generated for `viewport`.
	pub fn new(
		config: BackgroundConfig,
		theme: BackgroundTheme,
		viewport: Viewport,
		rng: SmallRng,
	) -> Self {
		let mut scene = Self {
			config,
			theme,
			viewport,
			particles: ParticleField::default(),
			symbols: SymbolField::default(),
			mountain: MountainProfile::default(),
			pointer: PointerState::Absent,
			rng,
			generation: 0,
		};
		scene.regenerate(viewport);
		scene
	}

	/// Discards all entities and builds fresh ones for `viewport`.
	pub fn regenerate(&mut self, viewport: Viewport) {
		self.viewport = viewport;
		self.particles = ParticleField::generate(&self.config, viewport, &mut self.rng);
		self.symbols = SymbolField::generate(&self.config, viewport, &mut self.rng);
		self.mountain = MountainProfile::generate(viewport, self.config.mountain_segment_count());
		self.generation += 1;
	}

	/// One frame, back to front. Particles and symbols advance as they are drawn.
	pub fn render_pass<S: Surface2d>(&mut self, surface: &S, now_ms: f64) {
		let vp = self.viewport;
		surface.clear_rect(0.0, 0.0, vp.w(), vp.h());

		render::draw_orbs(surface, vp, &self.theme);
		render::draw_grid(surface, vp, &self.config, &self.theme, now_ms);
		render::draw_mountain(surface, vp, &self.mountain, &self.theme);
		render::draw_connections(
			surface,
			&self.particles,
			self.pointer,
			&self.config,
			&self.theme,
		);

		self.particles.update();
		render::draw_particles(surface, &self.particles, &self.theme);

		self.symbols.update();
		render::draw_symbols(surface, &self.symbols, &self.config, &self.theme);
	}

	/// Replaces the pointer used by the connection layer.
	pub fn set_pointer(&mut self, pointer: PointerState) {
		self.pointer = pointer;
	}

	/// Pointer used by the connection layer.
	pub fn pointer(&self) -> PointerState {
		self.pointer
	}

	/// Viewport the populations were built for.
	pub fn viewport(&self) -> Viewport {
		self.viewport
	}

	/// Current particles.
	pub fn particles(&self) -> &ParticleField {
		&self.particles
	}

	/// Current symbols.
	pub fn symbols(&self) -> &SymbolField {
		&self.symbols
	}

	/// Current ridge profile.
	pub fn mountain(&self) -> &MountainProfile {
		&self.mountain
	}

	/// Tunables the scene was built with.
	pub fn config(&self) -> &BackgroundConfig {
		&self.config
	}

	/// How many times populations have been (re)built.
	pub fn generation(&self) -> u64 {
		self.generation
	}
}
