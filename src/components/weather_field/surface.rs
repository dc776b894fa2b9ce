//! Drawing primitives the renderer needs, and their canvas implementation.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

/// Rim stop of soft discs. Colors are passed through as CSS text, so only the
/// rim needs a literal.
const TRANSPARENT: &str = "rgba(0, 0, 0, 0)";

/// A 2D drawing target.
///
/// Implemented for the browser canvas context; tests use a recording surface.
pub trait Surface {
	fn clear(&mut self, width: f64, height: f64);
	fn set_alpha(&mut self, alpha: f64);
	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: &str);
	fn fill_disc(&mut self, x: f64, y: f64, radius: f64, color: &str);
	/// A disc fading from `color` at the center to transparent at the rim.
	/// `color` is any CSS color; opacity comes from the global alpha.
	fn fill_soft_disc(&mut self, x: f64, y: f64, radius: f64, color: &str);
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&mut self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn set_alpha(&mut self, alpha: f64) {
		self.set_global_alpha(alpha);
	}

	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: &str) {
		self.begin_path();
		self.set_stroke_style_str(color);
		self.set_line_width(width);
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.stroke();
	}

	fn fill_disc(&mut self, x: f64, y: f64, radius: f64, color: &str) {
		self.begin_path();
		self.set_fill_style_str(color);
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		self.fill();
	}

	fn fill_soft_disc(&mut self, x: f64, y: f64, radius: f64, color: &str) {
		let Ok(gradient) = self.create_radial_gradient(x, y, 0.0, x, y, radius) else {
			self.fill_disc(x, y, radius, color);
			return;
		};
		// A color the canvas can't parse makes add_color_stop fail; draw it solid instead.
		if gradient.add_color_stop(0.0, color).is_err() {
			self.fill_disc(x, y, radius, color);
			return;
		}
		let _ = gradient.add_color_stop(1.0, TRANSPARENT);

		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		#[allow(deprecated)]
		self.set_fill_style(&gradient);
		self.fill();
	}
}
