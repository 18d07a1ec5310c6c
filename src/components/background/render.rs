//! Drawing for each background layer.
//!
//! Layers are drawn back to front by [`Scene::render_pass`](super::scene::Scene::render_pass):
//! 1. Orbs (static soft radial gradients)
//! 2. Grid (drifting with wall-clock time)
//! 3. Mountain silhouette
//! 4. Particle connections and pointer lines
//! 5. Particles
//! 6. Code symbols

use super::config::BackgroundConfig;
use super::mountain::MountainProfile;
use super::particles::ParticleField;
use super::surface::{ColorStop, Gradient, Surface2d};
use super::symbols::SymbolField;
use super::theme::BackgroundTheme;
use super::types::{PointerState, Viewport};

/// Orbs as (relative x, relative y, radius px).
const ORBS: [(f64, f64, f64); 3] = [(0.2, 0.3, 300.0), (0.8, 0.7, 250.0), (0.5, 0.5, 400.0)];

/// The mountain fill gradient starts at this fraction of the height.
const MOUNTAIN_FADE_TOP: f64 = 0.6;

/// Linear falloff used by connection lines.
///
/// `max_opacity` at distance 0, reaching exactly 0 at `max_distance` and beyond.
pub fn connection_opacity(distance: f64, max_distance: f64, max_opacity: f64) -> f64 {
	if max_distance <= 0.0 || distance >= max_distance {
		return 0.0;
	}
	(1.0 - distance / max_distance) * max_opacity
}

/// Grid drift offset for a wall-clock timestamp, in `[0, cell)`.
pub fn grid_offset(now_ms: f64, drift_per_ms: f64, cell: f64) -> f64 {
	if cell <= 0.0 {
		return 0.0;
	}
	(now_ms * drift_per_ms).rem_euclid(cell)
}

pub fn draw_orbs<S: Surface2d>(surface: &S, viewport: Viewport, theme: &BackgroundTheme) {
	let vp = viewport.clamped();
	for (rx, ry, radius) in ORBS {
		let (x, y) = (vp.w() * rx, vp.h() * ry);
		surface.set_fill_gradient(&Gradient::Radial {
			x,
			y,
			radius,
			stops: vec![
				ColorStop::new(0.0, theme.ink_css(theme.orb_alpha)),
				ColorStop::new(1.0, theme.ink_css(0.0)),
			],
		});
		surface.begin_path();
		surface.circle(x, y, radius);
		surface.fill();
	}
}

pub fn draw_grid<S: Surface2d>(
	surface: &S,
	viewport: Viewport,
	config: &BackgroundConfig,
	theme: &BackgroundTheme,
	now_ms: f64,
) {
	let cell = config.grid_cell;
	if cell <= 0.0 {
		return;
	}
	let offset = grid_offset(now_ms, config.grid_drift_per_ms, cell);
	let (w, h) = (viewport.w(), viewport.h());

	surface.set_stroke_color(&theme.ink_css(theme.grid_alpha));
	surface.set_line_width(theme.grid_line_width);

	let mut x = -offset;
	while x < w + cell {
		surface.begin_path();
		surface.move_to(x, 0.0);
		surface.line_to(x, h);
		surface.stroke();
		x += cell;
	}

	let mut y = -offset;
	while y < h + cell {
		surface.begin_path();
		surface.move_to(0.0, y);
		surface.line_to(w, y);
		surface.stroke();
		y += cell;
	}
}

/// Fills the silhouette with a fade towards the top, then strokes the ridge.
pub fn draw_mountain<S: Surface2d>(
	surface: &S,
	viewport: Viewport,
	profile: &MountainProfile,
	theme: &BackgroundTheme,
) {
	let Some(first) = profile.points.first() else {
		return;
	};
	let (w, h) = (viewport.w(), viewport.h());

	surface.begin_path();
	surface.move_to(0.0, h);
	surface.line_to(first.x, first.y);
	for seg in profile.smoothed_segments() {
		surface.quadratic_curve_to(seg.cx, seg.cy, seg.x, seg.y);
	}
	surface.line_to(w, h);
	surface.close_path();

	let gh = viewport.clamped().h();
	surface.set_fill_gradient(&Gradient::Linear {
		x0: 0.0,
		y0: gh * MOUNTAIN_FADE_TOP,
		x1: 0.0,
		y1: gh,
		stops: vec![
			ColorStop::new(0.0, theme.ink_css(theme.mountain_fill_alpha)),
			ColorStop::new(1.0, theme.ink_css(0.0)),
		],
	});
	surface.fill();

	surface.begin_path();
	surface.move_to(first.x, first.y);
	for seg in profile.smoothed_segments() {
		surface.quadratic_curve_to(seg.cx, seg.cy, seg.x, seg.y);
	}
	surface.set_stroke_color(&theme.ink_css(theme.mountain_outline_alpha));
	surface.set_line_width(theme.mountain_line_width);
	surface.stroke();
}

/// Lines between nearby particles, and from particles to the pointer.
///
/// Quadratic in the particle count, which stays small because it is bounded
/// by the viewport area.
pub fn draw_connections<S: Surface2d>(
	surface: &S,
	field: &ParticleField,
	pointer: PointerState,
	config: &BackgroundConfig,
	theme: &BackgroundTheme,
) {
	let particles = &field.particles;
	for (i, a) in particles.iter().enumerate() {
		for b in &particles[i + 1..] {
			let distance = (a.x - b.x).hypot(a.y - b.y);
			let opacity = connection_opacity(
				distance,
				config.connection_distance,
				config.connection_max_opacity,
			);
			if opacity > 0.0 {
				stroke_line(
					surface,
					(a.x, a.y),
					(b.x, b.y),
					&theme.ink_css(opacity),
					config.connection_line_width,
				);
			}
		}

		if let Some((px, py)) = pointer.position() {
			let distance = (a.x - px).hypot(a.y - py);
			let opacity =
				connection_opacity(distance, config.pointer_distance, config.pointer_max_opacity);
			if opacity > 0.0 {
				stroke_line(
					surface,
					(a.x, a.y),
					(px, py),
					&theme.ink_css(opacity),
					config.pointer_line_width,
				);
			}
		}
	}
}

fn stroke_line<S: Surface2d>(surface: &S, from: (f64, f64), to: (f64, f64), css: &str, width: f64) {
	surface.begin_path();
	surface.set_stroke_color(css);
	surface.set_line_width(width);
	surface.move_to(from.0, from.1);
	surface.line_to(to.0, to.1);
	surface.stroke();
}

pub fn draw_particles<S: Surface2d>(surface: &S, field: &ParticleField, theme: &BackgroundTheme) {
	for p in &field.particles {
		surface.begin_path();
		surface.circle(p.x, p.y, p.radius);
		surface.set_fill_color(&theme.ink_css(p.pulse_opacity()));
		surface.fill();
	}
}

pub fn draw_symbols<S: Surface2d>(
	surface: &S,
	field: &SymbolField,
	config: &BackgroundConfig,
	theme: &BackgroundTheme,
) {
	for s in &field.symbols {
		let Some(glyph) = config.glyphs.get(s.glyph) else {
			continue;
		};
		surface.save();
		surface.translate(s.x, s.y);
		surface.rotate(s.rotation);
		surface.set_fill_color(&theme.ink_css(s.opacity));
		surface.set_font(&format!("{}px {}", s.size, config.font_family));
		surface.fill_text(glyph, 0.0, 0.0);
		surface.restore();
	}
}
