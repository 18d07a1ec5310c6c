//! Lifecycle of the animated background.
//!
//! The engine owns the [`Scene`], the frame loop and the resize debounce, and
//! talks to the page only through its [`Host`]. External events (resize,
//! pointer) mutate state that the next frame reads; all of it happens on the
//! host's single event loop, so no locking is involved.

use rand::rngs::SmallRng;

use super::config::BackgroundConfig;
use super::host::Host;
use super::scene::Scene;
use super::scheduler::{Debouncer, FrameScheduler};
use super::theme::BackgroundTheme;
use super::types::PointerState;

/// Animated background bound to one host surface.
pub struct AnimationEngine<H: Host> {
	host: H,
	scene: Scene,
	frames: FrameScheduler,
	resize: Debouncer<H::Timer>,
	motion_enabled: bool,
}

impl<H: Host> AnimationEngine<H> {
	/// Sizes the surface to the viewport, builds the scene and starts the
	/// render loop.
	///
	/// With `reduced_motion` the surface is hidden and no frame is ever
	/// requested; the preference is only read here.
	pub fn initialize(
		host: H,
		config: BackgroundConfig,
		rng: SmallRng,
		reduced_motion: bool,
	) -> Self {
		let viewport = host.viewport();
		host.resize_surface(viewport);
		let theme: BackgroundTheme = config.theme();
		let resize = Debouncer::new(config.resize_debounce_ms);
		let scene = Scene::new(config, theme, viewport, rng);

		log::info!(
			"ambient-backdrop: {}x{} viewport, {} particles, {} symbols",
			viewport.width,
			viewport.height,
			scene.particles().len(),
			scene.symbols().len()
		);

		let mut engine = Self {
			host,
			scene,
			frames: FrameScheduler::default(),
			resize,
			motion_enabled: true,
		};
		if reduced_motion {
			log::info!("ambient-backdrop: reduced motion preferred, background disabled");
			engine.set_motion_enabled(false);
		} else {
			engine.frames.start(&engine.host);
		}
		engine
	}

	/// Window resize signal. Only the last one in a quiet period regenerates.
	pub fn handle_resize(&mut self) {
		let host = &self.host;
		self.resize.arm(|delay| host.schedule_resize_settle(delay));
	}

	/// The debounce timer fired: rebuild everything at the new size.
	pub fn resize_settled(&mut self) {
		if !self.resize.settle() {
			return;
		}
		let viewport = self.host.viewport();
		self.host.resize_surface(viewport);
		self.scene.regenerate(viewport);
		log::debug!(
			"ambient-backdrop: regenerated for {}x{} ({} particles)",
			viewport.width,
			viewport.height,
			self.scene.particles().len()
		);
	}

	/// Records the pointer position for the next frame's pointer lines.
	pub fn handle_pointer_move(&mut self, x: f64, y: f64) {
		self.scene.set_pointer(PointerState::At { x, y });
	}

	/// Forgets the pointer; pointer lines stop until it returns.
	pub fn handle_pointer_leave(&mut self) {
		self.scene.set_pointer(PointerState::Absent);
	}

	/// Disabling hides the surface and stops scheduling frames.
	///
	/// Enabling first applies any resize missed while disabled.
	pub fn set_motion_enabled(&mut self, enabled: bool) {
		self.motion_enabled = enabled;
		if enabled {
			let viewport = self.host.viewport();
			if viewport != self.scene.viewport() {
				self.host.resize_surface(viewport);
				self.scene.regenerate(viewport);
			}
		}
		self.host.set_surface_visible(enabled);
		if enabled {
			self.frames.start(&self.host);
		} else {
			self.frames.stop(&self.host);
			self.resize.cancel();
		}
	}

	/// Whether frames are being scheduled.
	pub fn motion_enabled(&self) -> bool {
		self.motion_enabled
	}

	/// Host refresh callback: render one frame and ask for the next.
	pub fn on_frame(&mut self) {
		if !self.frames.begin_frame() {
			return;
		}
		let now = self.host.now_ms();
		self.scene.render_pass(self.host.surface(), now);
		self.frames.end_frame(&self.host);
	}

	/// Current scene.
	pub fn scene(&self) -> &Scene {
		&self.scene
	}

	/// The host the engine draws through.
	pub fn host(&self) -> &H {
		&self.host
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;

	use super::super::host::testing::FakeHost;
	use super::super::surface::recording::Op;
	use super::super::types::Viewport;
	use super::*;

	fn engine(host: FakeHost, reduced_motion: bool) -> AnimationEngine<FakeHost> {
		AnimationEngine::initialize(
			host,
			BackgroundConfig::default(),
			SmallRng::seed_from_u64(1),
			reduced_motion,
		)
	}

	/// Fires due debounce timers the way the browser would.
	fn advance(engine: &mut AnimationEngine<FakeHost>, now_ms: f64) {
		for _ in 0..engine.host().advance_to(now_ms) {
			engine.resize_settled();
		}
	}

	#[test]
	fn initialize_sizes_surface_and_starts_loop() {
		let engine = engine(FakeHost::new(1600, 900), false);
		assert_eq!(engine.host().last_surface_size(), Some(Viewport::new(1600, 900)));
		assert_eq!(engine.scene().particles().len(), 57);
		assert_eq!(engine.host().frame_requests(), 1);
		assert!(engine.host().is_visible());
	}

	#[test]
	fn frames_render_and_reschedule() {
		let mut engine = engine(FakeHost::new(800, 600), false);
		for _ in 0..3 {
			engine.on_frame();
		}
		assert_eq!(engine.host().frame_requests(), 4);
		let clears = engine
			.host()
			.recorder()
			.take()
			.into_iter()
			.filter(|op| matches!(op, Op::Clear { .. }))
			.count();
		assert_eq!(clears, 3);
	}

	#[test]
	fn reduced_motion_never_schedules_and_hides() {
		let mut engine = engine(FakeHost::new(1600, 900), true);
		assert_eq!(engine.host().frame_requests(), 0);
		assert!(!engine.host().is_visible());
		assert!(!engine.motion_enabled());
		// a stray frame callback still draws nothing
		engine.on_frame();
		assert!(engine.host().recorder().take().is_empty());
		assert_eq!(engine.host().frame_requests(), 0);
	}

	#[test]
	fn disabling_motion_stops_the_loop() {
		let mut engine = engine(FakeHost::new(400, 400), false);
		engine.set_motion_enabled(false);
		assert_eq!(engine.host().frame_cancels(), 1);
		engine.on_frame();
		assert_eq!(engine.host().frame_requests(), 1);
		assert!(!engine.host().is_visible());

		engine.set_motion_enabled(true);
		assert!(engine.host().is_visible());
		assert_eq!(engine.host().frame_requests(), 2);
	}

	#[test]
	fn burst_of_resizes_regenerates_once() {
		let mut engine = engine(FakeHost::new(1600, 900), false);
		engine.host().set_viewport(800, 500);
		for t in [0.0, 50.0, 100.0, 200.0, 249.0] {
			engine.host().set_clock(t);
			engine.handle_resize();
		}
		advance(&mut engine, 300.0);
		assert_eq!(engine.scene().generation(), 1, "still inside quiet period");
		advance(&mut engine, 499.0);
		assert_eq!(engine.scene().generation(), 2);
		assert_eq!(engine.scene().viewport(), Viewport::new(800, 500));
		assert_eq!(engine.host().last_surface_size(), Some(Viewport::new(800, 500)));
		assert_eq!(engine.scene().particles().len(), 16);

		advance(&mut engine, 5_000.0);
		assert_eq!(engine.scene().generation(), 2);
	}

	#[test]
	fn separated_resizes_each_regenerate() {
		let mut engine = engine(FakeHost::new(1600, 900), false);
		engine.handle_resize();
		advance(&mut engine, 250.0);
		engine.handle_resize();
		advance(&mut engine, 500.0);
		assert_eq!(engine.scene().generation(), 3);
	}

	#[test]
	fn resize_pending_across_disable_is_applied_on_enable() {
		let mut engine = engine(FakeHost::new(1600, 900), false);
		engine.host().set_viewport(800, 500);
		engine.handle_resize();

		engine.host().set_clock(100.0);
		engine.set_motion_enabled(false);
		engine.host().set_clock(150.0);
		engine.set_motion_enabled(true);
		advance(&mut engine, 10_000.0);

		assert_eq!(engine.scene().viewport(), Viewport::new(800, 500));
		assert_eq!(engine.host().last_surface_size(), Some(Viewport::new(800, 500)));
		assert_eq!(engine.scene().generation(), 2);
	}

	#[test]
	fn enabling_at_unchanged_size_keeps_the_scene() {
		let mut engine = engine(FakeHost::new(1600, 900), false);
		engine.set_motion_enabled(false);
		engine.set_motion_enabled(true);
		assert_eq!(engine.scene().generation(), 1);
	}

	#[test]
	fn stray_settle_is_ignored() {
		let mut engine = engine(FakeHost::new(1600, 900), false);
		engine.resize_settled();
		assert_eq!(engine.scene().generation(), 1);
	}

	#[test]
	fn pointer_is_tracked_immediately() {
		let mut engine = engine(FakeHost::new(1600, 900), false);
		engine.handle_pointer_move(12.0, 34.0);
		assert_eq!(engine.scene().pointer(), PointerState::At { x: 12.0, y: 34.0 });
		engine.handle_pointer_leave();
		assert_eq!(engine.scene().pointer(), PointerState::Absent);
	}
}
