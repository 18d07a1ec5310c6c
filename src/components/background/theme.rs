//! Visual theming for the ambient background.
//!
//! Every layer is drawn in a single "ink" colour at a different opacity, so a
//! theme is just that colour plus the per-layer alphas.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha, `0.0` to `1.0`.
	pub a: f64,
}

impl Color {
	/// Opaque white, the default ink.
	pub const WHITE: Color = Color::rgb(255, 255, 255);

	/// An opaque colour.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// A colour with alpha `a`.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same colour with alpha `a`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Always emits `rgba(...)`, even for opaque colours, since layer alphas
	/// change every frame and a stable format keeps the output predictable.
	pub fn to_css(self) -> String {
		format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}

	/// Parses a CSS color string.
	/// Supports hex (`#RRGGBB`) and `rgb()`/`rgba()` functional notation.
	pub fn parse(color_str: &str) -> Option<Color> {
		let color_str = color_str.trim();
		if color_str.starts_with('#') && color_str.len() == 7 {
			let channel = |range: std::ops::Range<usize>| {
				color_str
					.get(range)
					.and_then(|hex| u8::from_str_radix(hex, 16).ok())
			};
			Some(Color::rgb(channel(1..3)?, channel(3..5)?, channel(5..7)?))
		} else if color_str.starts_with("rgb") {
			let nums: Vec<&str> = color_str
				.trim_start_matches("rgba(")
				.trim_start_matches("rgb(")
				.trim_end_matches(')')
				.split(',')
				.collect();
			let r = nums.first()?.trim().parse().ok()?;
			let g = nums.get(1)?.trim().parse().ok()?;
			let b = nums.get(2)?.trim().parse().ok()?;
			let a = nums
				.get(3)
				.and_then(|s| s.trim().parse().ok())
				.unwrap_or(1.0);
			Some(Color::rgba(r, g, b, a))
		} else {
			None
		}
	}
}

/// Per-layer opacity and colour for the background.
#[derive(Clone, Debug)]
pub struct BackgroundTheme {
	/// Colour every layer is drawn with.
	pub ink: Color,
	/// Centre alpha of the soft orbs (fades to 0 at the rim).
	pub orb_alpha: f64,
	/// Grid line alpha
	pub grid_alpha: f64,
	/// Grid line width
	pub grid_line_width: f64,
	/// Alpha at the top of the mountain fill gradient.
	pub mountain_fill_alpha: f64,
	/// Mountain ridge stroke alpha
	pub mountain_outline_alpha: f64,
	/// Mountain ridge stroke width
	pub mountain_line_width: f64,
}

impl BackgroundTheme {
	/// Faint white-on-dark look (default).
	pub fn monochrome() -> Self {
		Self {
			ink: Color::WHITE,
			orb_alpha: 0.03,
			grid_alpha: 0.02,
			grid_line_width: 0.5,
			mountain_fill_alpha: 0.03,
			mountain_outline_alpha: 0.1,
			mountain_line_width: 1.0,
		}
	}

	/// Same alphas, different ink.
	pub fn with_ink(self, ink: Color) -> Self {
		Self { ink, ..self }
	}

	/// Ink at the given opacity, as a CSS colour string.
	pub fn ink_css(&self, alpha: f64) -> String {
		self.ink.with_alpha(alpha).to_css()
	}
}

impl Default for BackgroundTheme {
	fn default() -> Self {
		Self::monochrome()
	}
}
