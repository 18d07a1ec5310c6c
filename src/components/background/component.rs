//! Leptos component and browser wiring for the animated background.
//!
//! The component renders a fixed, pointer-transparent canvas and binds an
//! [`AnimationEngine`] to it once mounted. Window `resize`, `mousemove` and
//! `mouseout` listeners feed the engine; `requestAnimationFrame` drives it.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent, Window};

use super::config::BackgroundConfig;
use super::engine::AnimationEngine;
use super::host::{AttachError, HostCallbacks, WebHost};

type EngineSlot = Rc<RefCell<Option<AnimationEngine<WebHost>>>>;

/// Media query for the user's reduced-motion preference.
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Keeps a mounted background alive and lets callers toggle it.
///
/// Dropping the handle removes the window listeners, stops the loop and
/// releases the engine.
pub struct BackgroundHandle {
	window: Window,
	engine: EngineSlot,
	callbacks: HostCallbacks,
	on_resize: Closure<dyn FnMut()>,
	on_pointer_move: Closure<dyn FnMut(MouseEvent)>,
	on_pointer_out: Closure<dyn FnMut(MouseEvent)>,
}

impl BackgroundHandle {
	/// Pauses or resumes the animation, hiding the canvas while paused.
	pub fn set_motion_enabled(&self, enabled: bool) {
		if let Some(ref mut engine) = *self.engine.borrow_mut() {
			engine.set_motion_enabled(enabled);
		}
	}
}

impl Drop for BackgroundHandle {
	fn drop(&mut self) {
		let listeners: [(&str, &js_sys::Function); 3] = [
			("resize", self.on_resize.as_ref().unchecked_ref()),
			("mousemove", self.on_pointer_move.as_ref().unchecked_ref()),
			("mouseout", self.on_pointer_out.as_ref().unchecked_ref()),
		];
		for (event, cb) in listeners {
			let _ = self.window.remove_event_listener_with_callback(event, cb);
		}
		// The host callbacks hold the engine slot; empty both to break the cycle.
		let engine = self.engine.borrow_mut().take();
		if let Some(mut engine) = engine {
			engine.set_motion_enabled(false);
		}
		self.callbacks.clear();
	}
}

/// Whether the page asked for reduced motion. Read once, at startup.
pub fn prefers_reduced_motion(window: &Window) -> bool {
	window
		.match_media(REDUCED_MOTION_QUERY)
		.ok()
		.flatten()
		.map(|mql| mql.matches())
		.unwrap_or(false)
}

/// Random source seeded from the browser, no OS entropy needed.
fn browser_rng() -> SmallRng {
	let seed = (js_sys::Math::random() * u64::MAX as f64) as u64 ^ js_sys::Date::now() as u64;
	SmallRng::seed_from_u64(seed)
}

/// Binds a background engine to `canvas` and starts it.
///
/// A missing canvas or 2D context is reported as an error for the caller to
/// log; the page keeps working without a background.
pub fn mount_background(
	canvas: Option<HtmlCanvasElement>,
	config: BackgroundConfig,
) -> Result<BackgroundHandle, AttachError> {
	let canvas = canvas.ok_or(AttachError::MissingCanvas)?;
	let host = WebHost::attach(canvas)?;
	let window = host.window().clone();
	let reduced_motion = prefers_reduced_motion(&window);

	// Callbacks are installed before the engine exists so the first frame
	// request already has somewhere to land.
	let engine: EngineSlot = Rc::new(RefCell::new(None));
	let (engine_frame, engine_settle) = (engine.clone(), engine.clone());
	let callbacks = host.callbacks();
	callbacks.install(
		Closure::new(move |_timestamp: f64| {
			if let Some(ref mut e) = *engine_frame.borrow_mut() {
				e.on_frame();
			}
		}),
		move || {
			if let Some(ref mut e) = *engine_settle.borrow_mut() {
				e.resize_settled();
			}
		},
	);

	*engine.borrow_mut() = Some(AnimationEngine::initialize(
		host,
		config,
		browser_rng(),
		reduced_motion,
	));

	let engine_resize = engine.clone();
	let on_resize: Closure<dyn FnMut()> = Closure::new(move || {
		if let Some(ref mut e) = *engine_resize.borrow_mut() {
			e.handle_resize();
		}
	});

	let engine_move = engine.clone();
	let on_pointer_move: Closure<dyn FnMut(MouseEvent)> = Closure::new(move |ev: MouseEvent| {
		if let Some(ref mut e) = *engine_move.borrow_mut() {
			e.handle_pointer_move(ev.client_x() as f64, ev.client_y() as f64);
		}
	});

	let engine_out = engine.clone();
	let on_pointer_out: Closure<dyn FnMut(MouseEvent)> = Closure::new(move |ev: MouseEvent| {
		// mouseout also fires between elements; only a null target means the window was left
		if ev.related_target().is_some() {
			return;
		}
		if let Some(ref mut e) = *engine_out.borrow_mut() {
			e.handle_pointer_leave();
		}
	});

	let _ = window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
	let _ = window
		.add_event_listener_with_callback("mousemove", on_pointer_move.as_ref().unchecked_ref());
	let _ = window
		.add_event_listener_with_callback("mouseout", on_pointer_out.as_ref().unchecked_ref());

	Ok(BackgroundHandle {
		window,
		engine,
		callbacks,
		on_resize,
		on_pointer_move,
		on_pointer_out,
	})
}

/// Full-viewport animated background canvas.
///
/// Renders behind page content with `pointer-events: none`. The canvas keeps
/// the given `id` so other page scripts can find it.
#[component]
pub fn AmbientBackground(
	#[prop(optional)] config: Option<BackgroundConfig>,
	#[prop(default = "bg-canvas")] id: &'static str,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let handle = StoredValue::new_local(None::<BackgroundHandle>);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if handle.with_value(Option::is_some) {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		match mount_background(Some(canvas), config.clone().unwrap_or_default()) {
			Ok(h) => handle.set_value(Some(h)),
			Err(e) => log::warn!("ambient-backdrop: background disabled: {e}"),
		}
	});

	on_cleanup(move || {
		let _ = handle.try_update_value(Option::take);
	});

	view! {
		<canvas
			node_ref=canvas_ref
			id=id
			class="ambient-backdrop"
			aria-hidden="true"
			style="position: fixed; inset: 0; z-index: 0; pointer-events: none; display: block;"
		/>
	}
}
