//! The particle pool: allocation, per-frame integration and wrap-around.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use super::profile::CategoryProfile;
use super::types::{FieldParams, WeatherCategory};

/// A single weather particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub size: f64,
	pub opacity: f64,
	/// Category the particle was created for.
	pub category: WeatherCategory,
}

/// Fixed-size pool of particles driven by one set of [`FieldParams`].
pub struct ParticleField {
	particles: Vec<Particle>,
	params: FieldParams,
	width: f64,
	height: f64,
	rng: Xoshiro256PlusPlus,
}

impl ParticleField {
	pub fn new(params: &FieldParams, width: f64, height: f64, seed: u64) -> Self {
		let mut field = Self {
			particles: Vec::new(),
			params: params.sanitized(),
			width: sanitize_extent(width),
			height: sanitize_extent(height),
			rng: Xoshiro256PlusPlus::seed_from_u64(seed),
		};
		field.populate();
		field
	}

	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	pub fn params(&self) -> &FieldParams {
		&self.params
	}

	pub fn size(&self) -> (f64, f64) {
		(self.width, self.height)
	}

	/// Discards the pool and rebuilds it for new parameters.
	///
	/// Returns `false` when the sanitized parameters equal the current ones, in
	/// which case the pool is left untouched.
	pub fn reconfigure(&mut self, params: &FieldParams) -> bool {
		let params = params.sanitized();
		if params == self.params {
			return false;
		}
		self.params = params;
		self.populate();
		true
	}

	/// Advances every particle by its velocity and wraps it back into the viewport.
	pub fn tick(&mut self) {
		let (w, h) = (self.width, self.height);
		for p in &mut self.particles {
			p.x = wrap(p.x + p.vx, w);
			p.y = wrap(p.y + p.vy, h);
		}
	}

	/// Changes the viewport. Positions are wrapped on the next tick.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = sanitize_extent(width);
		self.height = sanitize_extent(height);
	}

	fn populate(&mut self) {
		let profile = CategoryProfile::for_category(self.params.category);
		let (w, h) = (self.width, self.height);
		let (speed, direction) = (self.params.wind_speed_kmh, self.params.wind_direction_deg);
		let rng = &mut self.rng;

		self.particles.clear();
		self.particles.reserve(profile.count);
		for _ in 0..profile.count {
			let x = rng.random::<f64>() * w;
			let y = rng.random::<f64>() * h;
			let size = rng.random_range(profile.size.clone());
			let opacity = rng.random_range(profile.opacity.clone());
			let (vx, vy) = profile.velocity(speed, direction, rng);
			self.particles.push(Particle {
				x,
				y,
				vx,
				vy,
				size,
				opacity,
				category: self.params.category,
			});
		}
	}
}

fn sanitize_extent(v: f64) -> f64 {
	if v.is_finite() { v.max(0.0) } else { 0.0 }
}

/// Toroidal wrap of a coordinate into `[0, extent)`.
fn wrap(v: f64, extent: f64) -> f64 {
	if extent <= 0.0 || !v.is_finite() {
		return 0.0;
	}
	let w = v.rem_euclid(extent);
	// rem_euclid can round up to `extent` for tiny negative inputs
	if w >= extent { 0.0 } else { w }
}

#[cfg(test)]
mod tests {
	use super::*;

	fn params(category: WeatherCategory) -> FieldParams {
		FieldParams::new(category, 20.0, 90.0, "#D4A574")
	}

	fn in_bounds(field: &ParticleField) -> bool {
		let (w, h) = field.size();
		field
			.particles()
			.iter()
			.all(|p| (0.0..w).contains(&p.x) && (0.0..h).contains(&p.y))
	}

	#[test]
	fn pool_size_matches_category_table() {
		for category in WeatherCategory::ALL {
			let field = ParticleField::new(&params(category), 800.0, 600.0, 1);
			assert_eq!(
				field.particles().len(),
				CategoryProfile::for_category(category).count,
				"{}",
				category.as_str()
			);
		}
	}

	#[test]
	fn rain_falls_with_gravity_bias() {
		let field = ParticleField::new(&params(WeatherCategory::Rain), 800.0, 600.0, 42);
		let n = field.particles().len();
		assert!((60..=100).contains(&n));
		for p in field.particles() {
			assert!(p.vy >= 5.0, "vy = {}", p.vy);
			assert!((0.5..2.0).contains(&p.size));
			assert!((0.2..0.7).contains(&p.opacity));
		}
	}

	#[test]
	fn clouds_are_large_and_faint() {
		let field = ParticleField::new(&params(WeatherCategory::Clouds), 800.0, 600.0, 9);
		for p in field.particles() {
			assert!(p.opacity <= 0.15);
			assert!(p.size >= 50.0);
		}
	}

	#[test]
	fn particles_stay_inside_viewport() {
		for category in WeatherCategory::ALL {
			for direction in [0.0, 90.0, 180.0, 270.0, 333.0] {
				let p = FieldParams::new(category, 120.0, direction, "#fff");
				let mut field = ParticleField::new(&p, 320.0, 240.0, 5);
				for _ in 0..1000 {
					field.tick();
					assert!(in_bounds(&field));
				}
			}
		}
	}

	#[test]
	fn wrap_moves_to_opposite_edge() {
		assert_eq!(wrap(105.0, 100.0), 5.0);
		assert_eq!(wrap(-5.0, 100.0), 95.0);
		assert_eq!(wrap(100.0, 100.0), 0.0);
		assert_eq!(wrap(-1e-18, 100.0), 0.0);
		assert_eq!(wrap(42.0, 0.0), 0.0);
	}

	#[test]
	fn category_change_rebuilds_pool() {
		let mut field = ParticleField::new(&params(WeatherCategory::Rain), 800.0, 600.0, 2);
		assert!(field.reconfigure(&params(WeatherCategory::Snow)));
		assert_eq!(field.particles().len(), 50);
		for p in field.particles() {
			assert_eq!(p.category, WeatherCategory::Snow);
			assert!((2.0..5.0).contains(&p.size));
			assert!(p.vy >= 1.0);
		}
	}

	#[test]
	fn wind_change_rebuilds_pool() {
		let mut field = ParticleField::new(&params(WeatherCategory::Rain), 800.0, 600.0, 2);
		let mut calmer = params(WeatherCategory::Rain);
		calmer.wind_speed_kmh = 0.0;
		assert!(field.reconfigure(&calmer));
		assert!(field.particles().iter().all(|p| p.vx == 0.0 && p.vy == 5.0));
	}

	#[test]
	fn direction_change_rebuilds_pool() {
		let mut east = params(WeatherCategory::Storm);
		east.wind_direction_deg = 0.0;
		let mut field = ParticleField::new(&east, 800.0, 600.0, 2);
		assert!(field.particles().iter().all(|p| p.vx == 6.0 && p.vy == 8.0));

		assert!(field.reconfigure(&params(WeatherCategory::Storm)));
		assert_eq!(field.params().wind_direction_deg, 90.0);
		assert_eq!(field.particles().len(), 80);
		for p in field.particles() {
			assert!(p.vx.abs() < 1e-9);
			assert!((p.vy - 14.0).abs() < 1e-9);
		}
	}

	#[test]
	fn accent_change_rebuilds_pool() {
		let mut field = ParticleField::new(&params(WeatherCategory::Rain), 800.0, 600.0, 2);
		let before = field.particles().to_vec();
		let mut recolored = params(WeatherCategory::Rain);
		recolored.accent_color = "hsl(30, 50%, 64%)".into();
		assert!(field.reconfigure(&recolored));
		assert_eq!(field.params().accent_color, "hsl(30, 50%, 64%)");
		assert_eq!(field.particles().len(), 60);
		assert_ne!(field.particles(), &before[..]);
	}

	#[test]
	fn unchanged_params_keep_pool() {
		let mut field = ParticleField::new(&params(WeatherCategory::Snow), 800.0, 600.0, 2);
		let before = field.particles().to_vec();
		assert!(!field.reconfigure(&params(WeatherCategory::Snow)));
		assert_eq!(field.particles(), &before[..]);
	}

	#[test]
	fn resize_keeps_count_and_rewraps_on_tick() {
		let mut field = ParticleField::new(&params(WeatherCategory::Clear), 1000.0, 1000.0, 8);
		field.resize(100.0, 50.0);
		assert_eq!(field.size(), (100.0, 50.0));
		assert_eq!(field.particles().len(), 30);
		field.tick();
		assert!(in_bounds(&field));

		field.resize(0.0, f64::NAN);
		field.tick();
		assert!(field.particles().iter().all(|p| p.x == 0.0 && p.y == 0.0));
	}

	#[test]
	fn negative_wind_is_treated_as_calm() {
		let p = FieldParams::new(WeatherCategory::Storm, -40.0, 90.0, "#fff");
		let field = ParticleField::new(&p, 800.0, 600.0, 4);
		assert!(field.particles().iter().all(|p| p.vx == 0.0 && p.vy == 8.0));
	}

	#[test]
	fn restored_params_give_same_pool_shape() {
		let original = FieldParams::new(WeatherCategory::Storm, 35.0, 200.0, "#abcdef");
		let json = serde_json::to_string(&original).unwrap();
		let restored: FieldParams = serde_json::from_str(&json).unwrap();
		assert_eq!(restored, original);

		let a = ParticleField::new(&original, 640.0, 480.0, 11);
		let b = ParticleField::new(&restored, 640.0, 480.0, 12);
		assert_eq!(a.particles().len(), b.particles().len());
		let profile = CategoryProfile::for_category(WeatherCategory::Storm);
		for p in a.particles().iter().chain(b.particles()) {
			assert!(profile.size.contains(&p.size));
			assert!(profile.opacity.contains(&p.opacity));
		}
		// Velocity depends only on the wind for storms
		assert_eq!(a.particles()[0].vx, b.particles()[0].vx);
		assert_eq!(a.particles()[0].vy, b.particles()[0].vy);
	}
}
