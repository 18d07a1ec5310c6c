//! The environment the engine runs in.
//!
//! [`Host`] bundles what the engine needs from the page: a drawing surface,
//! the viewport size, a refresh-paced frame callback, a one-shot timer and a
//! wall clock. [`WebHost`] provides them from `web_sys`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use thiserror::Error;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::scheduler::PendingTimer;
use super::surface::Surface2d;
use super::types::Viewport;

/// Services the engine consumes from its environment.
pub trait Host {
	/// Drawing target.
	type Surface: Surface2d;
	/// Handle returned by `schedule_resize_settle`.
	type Timer: PendingTimer;

	/// Current window size.
	fn viewport(&self) -> Viewport;
	/// The surface frames are drawn on.
	fn surface(&self) -> &Self::Surface;
	/// Resizes the backing store to match the viewport.
	fn resize_surface(&self, viewport: Viewport);
	/// Shows or hides the surface.
	fn set_surface_visible(&self, visible: bool);
	/// Asks for one call to the engine's `on_frame` at the next display refresh.
	fn request_frame(&self);
	/// Withdraws an outstanding frame request.
	fn cancel_frame(&self);
	/// Arms a one-shot timer that calls the engine's `resize_settled`.
	fn schedule_resize_settle(&self, delay_ms: u32) -> Self::Timer;
	/// Wall-clock milliseconds.
	fn now_ms(&self) -> f64;
}

/// Why the background could not bind to the page.
#[derive(Debug, Error)]
pub enum AttachError {
	/// `window` is not available.
	#[error("no global window")]
	NoWindow,
	/// No canvas was supplied.
	#[error("background canvas element not found")]
	MissingCanvas,
	/// `getContext("2d")` failed or returned something else.
	#[error("2D context unavailable: {0}")]
	NoContext(String),
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;
type SettleCallback = Rc<RefCell<Option<Rc<dyn Fn()>>>>;

/// Browser host backed by a canvas element and the global window.
pub struct WebHost {
	window: Window,
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
	on_frame: FrameCallback,
	on_settle: SettleCallback,
	frame_handle: Cell<Option<i32>>,
}

impl WebHost {
	/// Binds to `canvas` and its 2D context.
	pub fn attach(canvas: HtmlCanvasElement) -> Result<Self, AttachError> {
		let window = web_sys::window().ok_or(AttachError::NoWindow)?;
		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.map_err(|e| AttachError::NoContext(format!("{e:?}")))?
			.ok_or_else(|| AttachError::NoContext("getContext returned null".into()))?
			.dyn_into()
			.map_err(|_| AttachError::NoContext("not a CanvasRenderingContext2d".into()))?;

		Ok(Self {
			window,
			canvas,
			ctx,
			on_frame: Rc::new(RefCell::new(None)),
			on_settle: Rc::new(RefCell::new(None)),
			frame_handle: Cell::new(None),
		})
	}

	/// Slots for the JS callbacks, filled once the engine is shared.
	pub fn callbacks(&self) -> HostCallbacks {
		HostCallbacks {
			on_frame: self.on_frame.clone(),
			on_settle: self.on_settle.clone(),
		}
	}

	/// The window the host listens on.
	pub fn window(&self) -> &Window {
		&self.window
	}
}

/// Late-bound callbacks for the frame loop and the resize-settle timer.
///
/// The callbacks usually capture the engine that owns the host, so the slots
/// must be cleared to release it.
pub struct HostCallbacks {
	on_frame: FrameCallback,
	on_settle: SettleCallback,
}

impl HostCallbacks {
	/// Stores the frame and resize-settle callbacks the host hands to the browser.
	pub fn install(&self, on_frame: Closure<dyn FnMut(f64)>, on_settle: impl Fn() + 'static) {
		*self.on_frame.borrow_mut() = Some(on_frame);
		*self.on_settle.borrow_mut() = Some(Rc::new(on_settle));
	}

	/// Drops both callbacks. Later frame and timer requests become no-ops.
	pub fn clear(&self) {
		self.on_frame.borrow_mut().take();
		self.on_settle.borrow_mut().take();
	}
}

/// A pending resize-settle timeout. Dropping it also cancels it.
pub struct WebTimeout(Option<Timeout>);

impl PendingTimer for WebTimeout {
	fn cancel(self) {
		if let Some(timeout) = self.0 {
			let _ = timeout.cancel();
		}
	}
}

impl Host for WebHost {
	type Surface = CanvasRenderingContext2d;
	type Timer = WebTimeout;

	fn viewport(&self) -> Viewport {
		let size = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
		Viewport::from_css_size(
			size(self.window.inner_width()),
			size(self.window.inner_height()),
		)
	}

	fn surface(&self) -> &Self::Surface {
		&self.ctx
	}

	fn resize_surface(&self, viewport: Viewport) {
		self.canvas.set_width(viewport.width);
		self.canvas.set_height(viewport.height);
	}

	fn set_surface_visible(&self, visible: bool) {
		let display = if visible { "block" } else { "none" };
		let _ = self.canvas.style().set_property("display", display);
	}

	fn request_frame(&self) {
		let slot = self.on_frame.borrow();
		let Some(cb) = slot.as_ref() else {
			return;
		};
		match self
			.window
			.request_animation_frame(cb.as_ref().unchecked_ref())
		{
			Ok(id) => self.frame_handle.set(Some(id)),
			Err(e) => log::warn!("ambient-backdrop: requestAnimationFrame failed: {e:?}"),
		}
	}

	fn cancel_frame(&self) {
		if let Some(id) = self.frame_handle.take() {
			let _ = self.window.cancel_animation_frame(id);
		}
	}

	fn schedule_resize_settle(&self, delay_ms: u32) -> Self::Timer {
		let Some(on_settle) = self.on_settle.borrow().clone() else {
			return WebTimeout(None);
		};
		WebTimeout(Some(Timeout::new(delay_ms, move || on_settle())))
	}

	fn now_ms(&self) -> f64 {
		js_sys::Date::now()
	}
}
