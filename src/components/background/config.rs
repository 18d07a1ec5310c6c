//! Tunable constants for the background, optionally overridden from the page.
//!
//! The host page may embed a JSON object in
//! `<script id="background-config" type="application/json">`; any field it
//! omits keeps its default.

use serde::Deserialize;

use super::theme::{BackgroundTheme, Color};

/// Glyphs drawn by the symbol layer.
pub const DEFAULT_GLYPHS: [&str; 10] = [
	"{ }", "< />", "( )", "[ ]", "= >", "&&", "||", "++", "::", "//",
];

/// Smallest honoured `particle_area`; smaller values are raised to it.
const MIN_PARTICLE_AREA: f64 = 5_000.0;
/// Smallest honoured `symbol_spacing`.
const MIN_SYMBOL_SPACING: f64 = 20.0;
/// Hard ceilings on population sizes.
const MAX_PARTICLES: usize = 2_000;
const MAX_SYMBOLS: usize = 500;
const MAX_MOUNTAIN_SEGMENTS: usize = 1_000;

/// Every constant the engine, generators and renderer read.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct BackgroundConfig {
	/// Viewport area (px²) per particle.
	pub particle_area: f64,
	/// Viewport width (px) per symbol.
	pub symbol_spacing: f64,
	/// Particle pairs closer than this are joined by a line.
	pub connection_distance: f64,
	/// Line opacity for two coincident particles.
	pub connection_max_opacity: f64,
	/// Stroke width of particle-to-particle lines.
	pub connection_line_width: f64,
	/// Particles closer than this to the pointer are joined to it.
	pub pointer_distance: f64,
	/// Line opacity for a particle under the pointer.
	pub pointer_max_opacity: f64,
	/// Stroke width of pointer lines.
	pub pointer_line_width: f64,
	/// Grid cell size in px.
	pub grid_cell: f64,
	/// Grid drift in px per wall-clock millisecond.
	pub grid_drift_per_ms: f64,
	/// Quiet period before a resize regenerates the scene.
	pub resize_debounce_ms: u32,
	/// How far past an edge a symbol travels before it wraps.
	pub symbol_wrap_margin: f64,
	/// Horizontal segments in the mountain ridge.
	pub mountain_segments: usize,
	/// Glyph vocabulary for the symbol layer.
	pub glyphs: Vec<String>,
	/// CSS font family for glyphs.
	pub font_family: String,
	/// Optional CSS colour replacing the default white ink.
	pub ink: Option<String>,
}

impl Default for BackgroundConfig {
	fn default() -> Self {
		Self {
			particle_area: 25_000.0,
			symbol_spacing: 200.0,
			connection_distance: 150.0,
			connection_max_opacity: 0.15,
			connection_line_width: 0.5,
			pointer_distance: 200.0,
			pointer_max_opacity: 0.3,
			pointer_line_width: 1.0,
			grid_cell: 80.0,
			grid_drift_per_ms: 0.01,
			resize_debounce_ms: 250,
			symbol_wrap_margin: 50.0,
			mountain_segments: 50,
			glyphs: DEFAULT_GLYPHS.iter().map(|g| g.to_string()).collect(),
			font_family: "\"Space Grotesk\", monospace".to_string(),
			ink: None,
		}
	}
}

impl BackgroundConfig {
	/// Parses a JSON override document.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}

	/// Number of particles for a viewport area, `floor(area / particle_area)`.
	pub fn particle_count(&self, width: f64, height: f64) -> usize {
		count_for(width * height, self.particle_area.max(MIN_PARTICLE_AREA)).min(MAX_PARTICLES)
	}

	/// Number of symbols for a viewport, `floor(width / symbol_spacing)`.
	///
	/// Zero when either dimension is zero.
	pub fn symbol_count(&self, width: f64, height: f64) -> usize {
		if height <= 0.0 {
			return 0;
		}
		count_for(width, self.symbol_spacing.max(MIN_SYMBOL_SPACING)).min(MAX_SYMBOLS)
	}

	/// Ridge segment count, capped.
	pub fn mountain_segment_count(&self) -> usize {
		self.mountain_segments.min(MAX_MOUNTAIN_SEGMENTS)
	}

	/// Theme with the configured ink applied, if it parses.
	pub fn theme(&self) -> BackgroundTheme {
		let theme = BackgroundTheme::default();
		match self.ink.as_deref().map(|css| (css, Color::parse(css))) {
			Some((_, Some(ink))) => theme.with_ink(ink),
			Some((css, None)) => {
				log::warn!("ambient-backdrop: ignoring unparseable ink colour {css:?}");
				theme
			}
			None => theme,
		}
	}
}

fn count_for(amount: f64, per_unit: f64) -> usize {
	if amount.is_nan() || per_unit.is_nan() || amount <= 0.0 || per_unit <= 0.0 {
		return 0;
	}
	(amount / per_unit).floor() as usize
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn counts_follow_viewport_size() {
		let config = BackgroundConfig::default();
		assert_eq!(config.particle_count(1600.0, 900.0), 57);
		assert_eq!(config.symbol_count(1600.0, 900.0), 8);
		assert_eq!(config.particle_count(199.0, 100.0), 0);
		assert_eq!(config.symbol_count(399.0, 10.0), 1);
	}

	#[test]
	fn degenerate_viewports_get_no_entities() {
		let config = BackgroundConfig::default();
		for (w, h) in [(0.0, 900.0), (1600.0, 0.0), (0.0, 0.0)] {
			assert_eq!(config.particle_count(w, h), 0);
			assert_eq!(config.symbol_count(w, h), 0);
		}
	}

	#[test]
	fn partial_json_keeps_defaults() {
		let config = BackgroundConfig::from_json(r##"{ "gridCell": 40, "ink": "#ff8800" }"##)
			.unwrap();
		assert_eq!(config.grid_cell, 40.0);
		assert_eq!(config.resize_debounce_ms, 250);
		assert_eq!(config.glyphs.len(), DEFAULT_GLYPHS.len());
		assert_eq!(config.theme().ink, Color::rgb(0xff, 0x88, 0x00));
	}

	#[test]
	fn bad_ink_falls_back_to_white() {
		let config = BackgroundConfig {
			ink: Some("not a colour".into()),
			..Default::default()
		};
		assert_eq!(config.theme().ink, Color::WHITE);
	}

	#[test]
	fn hostile_overrides_stay_bounded() {
		let config = BackgroundConfig::from_json(
			r#"{ "particleArea": 0.001, "symbolSpacing": 0.5, "mountainSegments": 50000000 }"#,
		)
		.unwrap();
		assert_eq!(config.particle_count(1600.0, 900.0), 288);
		assert_eq!(config.particle_count(20_000.0, 20_000.0), MAX_PARTICLES);
		assert_eq!(config.symbol_count(1600.0, 900.0), 80);
		assert_eq!(config.symbol_count(100_000.0, 900.0), MAX_SYMBOLS);
		assert_eq!(config.mountain_segment_count(), MAX_MOUNTAIN_SEGMENTS);
		assert_eq!(BackgroundConfig::default().mountain_segment_count(), 50);
	}

	#[test]
	fn malformed_json_is_an_error() {
		assert!(BackgroundConfig::from_json("{ gridCell: }").is_err());
	}
}
