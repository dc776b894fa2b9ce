//! Noise generation for the grain overlay.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Grain cadence and compositing settings.
#[derive(Clone, Debug, PartialEq)]
pub struct GrainConfig {
	/// Regenerate the noise on every n-th frame.
	pub frame_interval: u64,
	/// Per-pixel alpha written into the noise buffer.
	pub pixel_alpha: u8,
	/// CSS opacity of the whole overlay canvas.
	pub opacity: f64,
	/// CSS `mix-blend-mode` of the overlay canvas.
	pub blend_mode: &'static str,
}

impl Default for GrainConfig {
	fn default() -> Self {
		Self {
			frame_interval: 3,
			pixel_alpha: 15,
			opacity: 0.03,
			blend_mode: "overlay",
		}
	}
}

impl GrainConfig {
	/// Whether the 1-based frame `n` should get fresh noise.
	pub fn is_grain_frame(&self, n: u64) -> bool {
		n % self.frame_interval.max(1) == 0
	}

	pub fn canvas_style(&self) -> String {
		format!(
			"position: fixed; inset: 0; pointer-events: none; z-index: 100; opacity: {}; mix-blend-mode: {};",
			self.opacity, self.blend_mode
		)
	}
}

/// A reusable RGBA noise buffer.
pub struct NoiseField {
	data: Vec<u8>,
	rng: Xoshiro256PlusPlus,
}

impl NoiseField {
	pub fn new(seed: u64) -> Self {
		Self {
			data: Vec::new(),
			rng: Xoshiro256PlusPlus::seed_from_u64(seed),
		}
	}

	/// Fills a `width` x `height` buffer with grey noise and returns its RGBA bytes.
	pub fn regenerate(&mut self, width: u32, height: u32, alpha: u8) -> &[u8] {
		let len = width as usize * height as usize * 4;
		if len != self.data.len() {
			self.data.resize(len, 0);
		}

		for px in self.data.chunks_exact_mut(4) {
			let v: u8 = self.rng.random();
			px[0] = v;
			px[1] = v;
			px[2] = v;
			px[3] = alpha;
		}
		&self.data
	}
}
