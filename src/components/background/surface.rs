//! Immediate-mode 2D drawing surface.
//!
//! The renderer only needs a small slice of the canvas API, expressed here as
//! [`Surface2d`] so layers can be drawn onto the browser canvas or onto a
//! recording surface in tests.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

/// A colour stop: offset in `[0, 1]` and CSS colour.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorStop {
	/// Position along the gradient, `0.0` to `1.0`.
	pub offset: f32,
	/// CSS colour at this stop.
	pub color: String,
}

impl ColorStop {
	/// A stop at `offset` with a CSS colour.
	pub fn new(offset: f32, color: impl Into<String>) -> Self {
		Self {
			offset,
			color: color.into(),
		}
	}
}

/// Gradient description, realised by the surface when used as a fill.
#[derive(Clone, Debug, PartialEq)]
pub enum Gradient {
	/// Straight gradient from `(x0, y0)` to `(x1, y1)`.
	Linear {
		/// Start x.
		x0: f64,
		/// Start y.
		y0: f64,
		/// End x.
		x1: f64,
		/// End y.
		y1: f64,
		/// Colour stops, in offset order.
		stops: Vec<ColorStop>,
	},
	/// Concentric radial gradient from radius 0 to `radius`.
	Radial {
		/// Centre x.
		x: f64,
		/// Centre y.
		y: f64,
		/// Outer radius.
		radius: f64,
		/// Colour stops, in offset order.
		stops: Vec<ColorStop>,
	},
}

/// The drawing operations the background renderer issues.
pub trait Surface2d {
	/// Clears a rectangle to transparent.
	fn clear_rect(&self, x: f64, y: f64, width: f64, height: f64);
	/// Starts a new path.
	fn begin_path(&self);
	/// Closes the current subpath.
	fn close_path(&self);
	/// Moves the pen without drawing.
	fn move_to(&self, x: f64, y: f64);
	/// Adds a straight segment.
	fn line_to(&self, x: f64, y: f64);
	/// Adds a quadratic curve through control point `(cx, cy)`.
	fn quadratic_curve_to(&self, cx: f64, cy: f64, x: f64, y: f64);
	/// Adds a full circle to the current path.
	fn circle(&self, x: f64, y: f64, radius: f64);
	/// Fills the current path.
	fn fill(&self);
	/// Strokes the current path.
	fn stroke(&self);
	/// Solid fill colour.
	fn set_fill_color(&self, css: &str);
	/// Solid stroke colour.
	fn set_stroke_color(&self, css: &str);
	/// Gradient fill.
	fn set_fill_gradient(&self, gradient: &Gradient);
	/// Stroke width in px.
	fn set_line_width(&self, width: f64);
	/// Pushes the drawing state.
	fn save(&self);
	/// Pops the drawing state.
	fn restore(&self);
	/// Moves the origin.
	fn translate(&self, x: f64, y: f64);
	/// Rotates by `angle` radians.
	fn rotate(&self, angle: f64);
	/// CSS font shorthand for text.
	fn set_font(&self, font: &str);
	/// Fills `text` at `(x, y)`.
	fn fill_text(&self, text: &str, x: f64, y: f64);
}

impl Surface2d for CanvasRenderingContext2d {
	fn clear_rect(&self, x: f64, y: f64, width: f64, height: f64) {
		CanvasRenderingContext2d::clear_rect(self, x, y, width, height);
	}

	fn begin_path(&self) {
		CanvasRenderingContext2d::begin_path(self);
	}

	fn close_path(&self) {
		CanvasRenderingContext2d::close_path(self);
	}

	fn move_to(&self, x: f64, y: f64) {
		CanvasRenderingContext2d::move_to(self, x, y);
	}

	fn line_to(&self, x: f64, y: f64) {
		CanvasRenderingContext2d::line_to(self, x, y);
	}

	fn quadratic_curve_to(&self, cx: f64, cy: f64, x: f64, y: f64) {
		CanvasRenderingContext2d::quadratic_curve_to(self, cx, cy, x, y);
	}

	fn circle(&self, x: f64, y: f64, radius: f64) {
		let _ = self.arc(x, y, radius, 0.0, TAU);
	}

	fn fill(&self) {
		CanvasRenderingContext2d::fill(self);
	}

	fn stroke(&self) {
		CanvasRenderingContext2d::stroke(self);
	}

	fn set_fill_color(&self, css: &str) {
		self.set_fill_style_str(css);
	}

	fn set_stroke_color(&self, css: &str) {
		self.set_stroke_style_str(css);
	}

	fn set_fill_gradient(&self, gradient: &Gradient) {
		let (canvas_gradient, stops) = match gradient {
			Gradient::Linear {
				x0,
				y0,
				x1,
				y1,
				stops,
			} => (self.create_linear_gradient(*x0, *y0, *x1, *y1), stops),
			Gradient::Radial {
				x,
				y,
				radius,
				stops,
			} => match self.create_radial_gradient(*x, *y, 0.0, *x, *y, *radius) {
				Ok(g) => (g, stops),
				Err(e) => {
					log::debug!("ambient-backdrop: radial gradient rejected: {e:?}");
					return;
				}
			},
		};
		for stop in stops {
			let _ = canvas_gradient.add_color_stop(stop.offset, &stop.color);
		}
		#[allow(deprecated)]
		self.set_fill_style(&canvas_gradient);
	}

	fn set_line_width(&self, width: f64) {
		CanvasRenderingContext2d::set_line_width(self, width);
	}

	fn save(&self) {
		CanvasRenderingContext2d::save(self);
	}

	fn restore(&self) {
		CanvasRenderingContext2d::restore(self);
	}

	fn translate(&self, x: f64, y: f64) {
		let _ = CanvasRenderingContext2d::translate(self, x, y);
	}

	fn rotate(&self, angle: f64) {
		let _ = CanvasRenderingContext2d::rotate(self, angle);
	}

	fn set_font(&self, font: &str) {
		CanvasRenderingContext2d::set_font(self, font);
	}

	fn fill_text(&self, text: &str, x: f64, y: f64) {
		let _ = CanvasRenderingContext2d::fill_text(self, text, x, y);
	}
}

#[cfg(test)]
pub(crate) mod recording {
	use std::cell::RefCell;

	use super::{Gradient, Surface2d};

	/// One recorded drawing call.
	#[derive(Clone, Debug, PartialEq)]
	pub(crate) enum Op {
		Clear { width: f64, height: f64 },
		BeginPath,
		ClosePath,
		MoveTo(f64, f64),
		LineTo(f64, f64),
		Quad { cx: f64, cy: f64, x: f64, y: f64 },
		Circle { x: f64, y: f64, radius: f64 },
		Fill,
		Stroke,
		FillColor(String),
		StrokeColor(String),
		FillGradient(Gradient),
		LineWidth(f64),
		Save,
		Restore,
		Translate(f64, f64),
		Rotate(f64),
		Font(String),
		Text { text: String, x: f64, y: f64 },
	}

	/// Surface that remembers every call, in order.
	#[derive(Debug, Default)]
	pub(crate) struct RecordingSurface {
		ops: RefCell<Vec<Op>>,
	}

	impl RecordingSurface {
		pub(crate) fn take(&self) -> Vec<Op> {
			self.ops.take()
		}

		fn push(&self, op: Op) {
			self.ops.borrow_mut().push(op);
		}
	}

	impl Surface2d for RecordingSurface {
		fn clear_rect(&self, _x: f64, _y: f64, width: f64, height: f64) {
			self.push(Op::Clear { width, height });
		}
		fn begin_path(&self) {
			self.push(Op::BeginPath);
		}
		fn close_path(&self) {
			self.push(Op::ClosePath);
		}
		fn move_to(&self, x: f64, y: f64) {
			self.push(Op::MoveTo(x, y));
		}
		fn line_to(&self, x: f64, y: f64) {
			self.push(Op::LineTo(x, y));
		}
		fn quadratic_curve_to(&self, cx: f64, cy: f64, x: f64, y: f64) {
			self.push(Op::Quad { cx, cy, x, y });
		}
		fn circle(&self, x: f64, y: f64, radius: f64) {
			self.push(Op::Circle { x, y, radius });
		}
		fn fill(&self) {
			self.push(Op::Fill);
		}
		fn stroke(&self) {
			self.push(Op::Stroke);
		}
		fn set_fill_color(&self, css: &str) {
			self.push(Op::FillColor(css.to_string()));
		}
		fn set_stroke_color(&self, css: &str) {
			self.push(Op::StrokeColor(css.to_string()));
		}
		fn set_fill_gradient(&self, gradient: &Gradient) {
			self.push(Op::FillGradient(gradient.clone()));
		}
		fn set_line_width(&self, width: f64) {
			self.push(Op::LineWidth(width));
		}
		fn save(&self) {
			self.push(Op::Save);
		}
		fn restore(&self) {
			self.push(Op::Restore);
		}
		fn translate(&self, x: f64, y: f64) {
			self.push(Op::Translate(x, y));
		}
		fn rotate(&self, angle: f64) {
			self.push(Op::Rotate(angle));
		}
		fn set_font(&self, font: &str) {
			self.push(Op::Font(font.to_string()));
		}
		fn fill_text(&self, text: &str, x: f64, y: f64) {
			self.push(Op::Text {
				text: text.to_string(),
				x,
				y,
			});
		}
	}
}
