//! Viewport and pointer state shared by the engine and its generators.

/// Current drawing surface dimensions in device pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
	/// Width in CSS px.
	pub width: u32,
	/// Height in CSS px.
	pub height: u32,
}

impl Viewport {
	/// A viewport of `width` by `height` CSS pixels.
	pub const fn new(width: u32, height: u32) -> Self {
		Self { width, height }
	}

	/// Builds a viewport from host-reported floating point sizes.
	///
	/// Negative, NaN and fractional sizes are truncated towards zero.
	pub fn from_css_size(width: f64, height: f64) -> Self {
		let clamp = |v: f64| if v.is_finite() && v > 0.0 { v as u32 } else { 0 };
		Self::new(clamp(width), clamp(height))
	}

	/// Width as `f64`.
	pub fn w(self) -> f64 {
		self.width as f64
	}

	/// Height as `f64`.
	pub fn h(self) -> f64 {
		self.height as f64
	}

	/// Area in px².
	pub fn area(self) -> f64 {
		self.w() * self.h()
	}

	/// True when either dimension is zero and nothing can be drawn.
	pub fn is_degenerate(self) -> bool {
		self.width == 0 || self.height == 0
	}

	/// Same viewport with each side clamped to at least one pixel.
	/// Used for gradient geometry so degenerate sizes never produce zero spans.
	pub fn clamped(self) -> Self {
		Self::new(self.width.max(1), self.height.max(1))
	}
}

/// Last known pointer position in viewport coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PointerState {
	/// Pointer has left the window or never moved.
	#[default]
	Absent,
	/// Last pointer position, in viewport px.
	At { x: f64, y: f64 },
}

impl PointerState {
	/// Pointer coordinates, if the pointer is over the page.
	pub fn position(self) -> Option<(f64, f64)> {
		match self {
			PointerState::Absent => None,
			PointerState::At { x, y } => Some((x, y)),
		}
	}
}

/// Wraps `value` into `[0, extent)`.
///
/// Used for particles, which must never sit on or beyond the far edge.
pub fn wrap_coordinate(value: f64, extent: f64) -> f64 {
	if extent <= 0.0 || !value.is_finite() {
		return 0.0;
	}
	let wrapped = value.rem_euclid(extent);
	// rem_euclid can round up to `extent` for tiny negative inputs
	if wrapped >= extent { 0.0 } else { wrapped }
}

/// Wraps `value` once it passes `margin` beyond either edge of `[0, extent]`,
/// reappearing just outside the opposite edge.
pub fn wrap_with_margin(value: f64, extent: f64, margin: f64) -> f64 {
	if value < -margin {
		extent + margin
	} else if value > extent + margin {
		-margin
	} else {
		value
	}
}
