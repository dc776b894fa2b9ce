//! Per-category particle tuning.
//!
//! Pool size, size range, opacity range and the wind-driven velocity formula
//! are constants of the category. Nothing here depends on the viewport.

use std::ops::Range;

use rand::Rng;

use super::types::WeatherCategory;

/// Wind speed (km/h) to pixels-per-frame factor.
const WIND_SCALE: f64 = 0.1;

/// Particle count, appearance ranges and kinematics for one weather category.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryProfile {
	pub count: usize,
	/// Radius (dots, clouds) or base stroke width (streaks), in pixels.
	pub size: Range<f64>,
	pub opacity: Range<f64>,
	/// Multipliers applied to the wind vector on each axis.
	pub wind_gain: (f64, f64),
	/// Constant added to the vertical velocity (positive is down).
	pub gravity: f64,
	/// Half-width of the uniform horizontal jitter added per particle.
	pub jitter: f64,
}

impl CategoryProfile {
	pub fn for_category(category: WeatherCategory) -> Self {
		match category {
			WeatherCategory::Rain => Self {
				count: 60,
				size: 0.5..2.0,
				opacity: 0.2..0.7,
				wind_gain: (2.0, 2.0),
				gravity: 5.0,
				jitter: 0.0,
			},
			WeatherCategory::Snow => Self {
				count: 50,
				size: 2.0..5.0,
				opacity: 0.2..0.7,
				wind_gain: (0.5, 0.5),
				gravity: 1.0,
				jitter: 0.5,
			},
			WeatherCategory::Clouds => Self {
				count: 10,
				size: 50.0..150.0,
				opacity: 0.05..0.15,
				wind_gain: (0.3, 0.1),
				gravity: 0.0,
				jitter: 0.0,
			},
			WeatherCategory::Storm => Self {
				count: 80,
				size: 1.0..3.0,
				opacity: 0.2..0.7,
				wind_gain: (3.0, 3.0),
				gravity: 8.0,
				jitter: 0.0,
			},
			WeatherCategory::Clear => Self {
				count: 30,
				size: 0.5..2.5,
				opacity: 0.2..0.7,
				wind_gain: (0.2, 0.2),
				gravity: 0.0,
				jitter: 0.0,
			},
		}
	}

	/// Velocity a fresh particle gets for the given (already sanitized) wind.
	pub fn velocity<R: Rng + ?Sized>(
		&self,
		wind_speed_kmh: f64,
		wind_direction_deg: f64,
		rng: &mut R,
	) -> (f64, f64) {
		let (wx, wy) = wind_vector(wind_speed_kmh, wind_direction_deg);
		let jitter = if self.jitter > 0.0 {
			rng.random_range(-self.jitter..self.jitter)
		} else {
			0.0
		};
		(
			wx * self.wind_gain.0 + jitter,
			wy * self.wind_gain.1 + self.gravity,
		)
	}
}

/// Wind as a per-frame displacement vector, before category gains.
pub fn wind_vector(wind_speed_kmh: f64, wind_direction_deg: f64) -> (f64, f64) {
	let angle = wind_direction_deg.to_radians();
	let speed = wind_speed_kmh * WIND_SCALE;
	(angle.cos() * speed, angle.sin() * speed)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand_xoshiro::Xoshiro256PlusPlus;

	#[test]
	fn counts_are_fixed_per_category() {
		let counts: Vec<usize> = WeatherCategory::ALL
			.iter()
			.map(|&c| CategoryProfile::for_category(c).count)
			.collect();
		assert_eq!(counts, vec![30, 10, 60, 50, 80]);
	}

	#[test]
	fn storm_is_rain_at_higher_gain() {
		let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
		let rain = CategoryProfile::for_category(WeatherCategory::Rain);
		let storm = CategoryProfile::for_category(WeatherCategory::Storm);
		let (rx, ry) = rain.velocity(20.0, 0.0, &mut rng);
		let (sx, sy) = storm.velocity(20.0, 0.0, &mut rng);
		assert!((rx - 4.0).abs() < 1e-9);
		assert!((ry - 5.0).abs() < 1e-9);
		assert!((sx - 6.0).abs() < 1e-9);
		assert!((sy - 8.0).abs() < 1e-9);
	}

	#[test]
	fn snow_jitter_stays_within_half_a_pixel() {
		let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
		let snow = CategoryProfile::for_category(WeatherCategory::Snow);
		for _ in 0..500 {
			let (vx, vy) = snow.velocity(0.0, 0.0, &mut rng);
			assert!((-0.5..0.5).contains(&vx));
			assert_eq!(vy, 1.0);
		}
	}

	#[test]
	fn calm_air_leaves_only_gravity() {
		let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
		let clear = CategoryProfile::for_category(WeatherCategory::Clear);
		assert_eq!(clear.velocity(0.0, 123.0, &mut rng), (0.0, 0.0));
	}
}
