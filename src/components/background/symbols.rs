//! Slowly drifting code glyphs.

use rand::Rng;

use super::config::BackgroundConfig;
use super::types::{Viewport, wrap_with_margin};

/// A floating glyph such as `{ }` or `&&`.
#[derive(Clone, Debug, PartialEq)]
pub struct Symbol {
	/// Horizontal position in px.
	pub x: f64,
	/// Vertical position in px.
	pub y: f64,
	/// Index into the configured glyph vocabulary.
	pub glyph: usize,
	/// Font size in px, 10 to 22.
	pub size: f64,
	/// Horizontal velocity in px per frame, within ±0.05.
	pub vx: f64,
	/// Vertical velocity in px per frame, within ±0.075.
	pub vy: f64,
	/// Fixed opacity, 0.05 to 0.2.
	pub opacity: f64,
	/// Fixed rotation in radians, within ±0.05.
	pub rotation: f64,
}

impl Symbol {
	/// Draws a symbol uniformly inside `viewport`, picking from `glyph_count` glyphs.
	pub fn random(rng: &mut impl Rng, viewport: Viewport, glyph_count: usize) -> Self {
		Self {
			x: rng.random::<f64>() * viewport.w(),
			y: rng.random::<f64>() * viewport.h(),
			glyph: rng.random_range(0..glyph_count.max(1)),
			size: rng.random::<f64>() * 12.0 + 10.0,
			vy: (rng.random::<f64>() - 0.5) * 0.15,
			vx: (rng.random::<f64>() - 0.5) * 0.1,
			opacity: rng.random::<f64>() * 0.15 + 0.05,
			rotation: rng.random::<f64>() * 0.1 - 0.05,
		}
	}
}

/// The symbol population for one viewport size.
#[derive(Clone, Debug, Default)]
pub struct SymbolField {
	/// Live symbols, in draw order.
	pub symbols: Vec<Symbol>,
	viewport: Viewport,
	margin: f64,
}

impl SymbolField {
	/// Wraps an existing population; symbols wrap `margin` px outside `viewport`.
	pub fn new(symbols: Vec<Symbol>, viewport: Viewport, margin: f64) -> Self {
		Self {
			symbols,
			viewport,
			margin,
		}
	}

	/// Populates `floor(W / symbol_spacing)` symbols.
	///
	/// An empty glyph vocabulary yields no symbols.
	pub fn generate(config: &BackgroundConfig, viewport: Viewport, rng: &mut impl Rng) -> Self {
		let count = if config.glyphs.is_empty() {
			0
		} else {
			config.symbol_count(viewport.w(), viewport.h())
		};
		let symbols = (0..count)
			.map(|_| Symbol::random(rng, viewport, config.glyphs.len()))
			.collect();
		Self {
			symbols,
			viewport,
			margin: config.symbol_wrap_margin,
		}
	}

	/// Number of symbols.
	pub fn len(&self) -> usize {
		self.symbols.len()
	}

	/// Whether the field has no symbols.
	pub fn is_empty(&self) -> bool {
		self.symbols.is_empty()
	}

	/// Advance one frame. Symbols leave the viewport by `margin` before wrapping.
	pub fn update(&mut self) {
		let (w, h) = (self.viewport.w(), self.viewport.h());
		for s in &mut self.symbols {
			s.x = wrap_with_margin(s.x + s.vx, w, self.margin);
			s.y = wrap_with_margin(s.y + s.vy, h, self.margin);
		}
	}
}
