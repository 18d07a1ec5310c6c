//! Procedural mountain ridge along the bottom of the viewport.
//!
//! The ridge is a pure function of the viewport size: a half-period sine peak
//! spanning the full width plus three fixed-frequency ripples, all subtracted
//! from a baseline at 85% of the height. Rebuilding for the same size always
//! yields the same points.

use std::f64::consts::PI;

use super::types::Viewport;

/// Baseline height as a fraction of the viewport.
const BASELINE: f64 = 0.85;
/// Height of the main half-sine peak.
const PEAK_AMPLITUDE: f64 = 80.0;
/// Ripples as (frequency per segment, amplitude).
const RIPPLES: [(f64, f64); 3] = [(0.2, 30.0), (0.5, 15.0), (0.1, 50.0)];

/// A vertex of the ridge line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MountainPoint {
	/// Horizontal position in px.
	pub x: f64,
	/// Ridge height in px.
	pub y: f64,
	/// The baseline before any terms were subtracted.
	pub base_y: f64,
}

/// Ordered ridge points, left to right.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MountainProfile {
	/// Ridge points; empty for a degenerate viewport.
	pub points: Vec<MountainPoint>,
}

impl MountainProfile {
	/// Builds `segments + 1` points spanning the viewport width.
	///
	/// Empty for degenerate viewports or zero segments.
	pub fn generate(viewport: Viewport, segments: usize) -> Self {
		if viewport.is_degenerate() || segments == 0 {
			return Self::default();
		}
		let base_y = viewport.h() * BASELINE;
		let points = (0..=segments)
			.map(|i| {
				let t = i as f64 / segments as f64;
				let peak = (t * PI).sin() * PEAK_AMPLITUDE;
				let ripples: f64 = RIPPLES
					.iter()
					.map(|&(freq, amp)| (i as f64 * freq).sin() * amp)
					.sum();
				MountainPoint {
					x: t * viewport.w(),
					y: base_y - peak - ripples,
					base_y,
				}
			})
			.collect();
		Self { points }
	}

	/// Whether there is nothing to draw.
	pub fn is_empty(&self) -> bool {
		self.points.is_empty()
	}

	/// Quadratic segments smoothing the ridge.
	///
	/// Each segment uses the previous point as its control point and ends at
	/// the midpoint between the previous and current point.
	pub fn smoothed_segments(&self) -> impl Iterator<Item = QuadSegment> + '_ {
		self.points.windows(2).map(|pair| {
			let (prev, cur) = (pair[0], pair[1]);
			QuadSegment {
				cx: prev.x,
				cy: prev.y,
				x: (prev.x + cur.x) / 2.0,
				y: (prev.y + cur.y) / 2.0,
			}
		})
	}
}

/// One `quadraticCurveTo` call: control point then end point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadSegment {
	/// Control point x.
	pub cx: f64,
	/// Control point y.
	pub cy: f64,
	/// End point x.
	pub x: f64,
	/// End point y.
	pub y: f64,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn generation_is_deterministic() {
		let vp = Viewport::new(1280, 720);
		assert_eq!(MountainProfile::generate(vp, 50), MountainProfile::generate(vp, 50));
	}

	#[test]
	fn spans_the_width_with_shared_baseline() {
		let vp = Viewport::new(1000, 800);
		let profile = MountainProfile::generate(vp, 50);
		assert_eq!(profile.points.len(), 51);
		assert_eq!(profile.points[0].x, 0.0);
		assert_eq!(profile.points[50].x, 1000.0);
		assert!(profile.points.iter().all(|p| (p.base_y - 680.0).abs() < 1e-9));
	}

	#[test]
	fn first_point_sits_on_the_baseline() {
		// every sine term is zero at segment 0
		let profile = MountainProfile::generate(Viewport::new(1000, 800), 50);
		assert!((profile.points[0].y - 680.0).abs() < 1e-9);
	}

	#[test]
	fn middle_point_matches_formula() {
		let profile = MountainProfile::generate(Viewport::new(1000, 800), 50);
		let i = 25.0_f64;
		let expected = 680.0
			- 80.0
			- (i * 0.2).sin() * 30.0
			- (i * 0.5).sin() * 15.0
			- (i * 0.1).sin() * 50.0;
		assert!((profile.points[25].y - expected).abs() < 1e-9);
	}

	#[test]
	fn degenerate_viewport_has_no_ridge() {
		assert!(MountainProfile::generate(Viewport::new(0, 800), 50).is_empty());
		assert!(MountainProfile::generate(Viewport::new(1000, 800), 0).is_empty());
	}

	#[test]
	fn smoothed_segments_use_midpoints() {
		let profile = MountainProfile {
			points: vec![
				MountainPoint { x: 0.0, y: 10.0, base_y: 0.0 },
				MountainPoint { x: 10.0, y: 20.0, base_y: 0.0 },
			],
		};
		let segs: Vec<_> = profile.smoothed_segments().collect();
		assert_eq!(
			segs,
			vec![QuadSegment { cx: 0.0, cy: 10.0, x: 5.0, y: 15.0 }]
		);
	}
}
