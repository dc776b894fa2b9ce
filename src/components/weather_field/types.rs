//! Input data for the weather field: the weather category and wind/accent parameters.

use serde::{Deserialize, Serialize};

use super::theme::DEFAULT_ACCENT;

/// The kind of weather the particle field depicts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCategory {
	#[default]
	Clear,
	Clouds,
	Rain,
	Snow,
	Storm,
}

impl WeatherCategory {
	/// Every category, in table order.
	pub const ALL: [WeatherCategory; 5] = [
		WeatherCategory::Clear,
		WeatherCategory::Clouds,
		WeatherCategory::Rain,
		WeatherCategory::Snow,
		WeatherCategory::Storm,
	];

	/// Maps a provider condition name (e.g. "Thunderstorm", "light rain") onto a category.
	///
	/// Matching is case-insensitive and by substring. Unknown conditions such as
	/// "Mist" or "Haze" fall back to [`WeatherCategory::Clear`].
	pub fn from_condition(condition: &str) -> Self {
		let c = condition.trim().to_lowercase();
		if c.contains("cloud") {
			Self::Clouds
		} else if c.contains("rain") {
			Self::Rain
		} else if c.contains("snow") {
			Self::Snow
		} else if c.contains("storm") || c.contains("thunder") {
			Self::Storm
		} else if c.contains("drizzle") {
			Self::Rain
		} else {
			Self::Clear
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Clear => "clear",
			Self::Clouds => "clouds",
			Self::Rain => "rain",
			Self::Snow => "snow",
			Self::Storm => "storm",
		}
	}

	/// Rain and storm particles are drawn as streaks rather than dots.
	pub fn is_streak(self) -> bool {
		matches!(self, Self::Rain | Self::Storm)
	}
}

/// Everything the particle field is configured from.
///
/// A change to any field rebuilds the whole particle pool.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldParams {
	pub category: WeatherCategory,
	pub wind_speed_kmh: f64,
	/// Meteorological wind direction in degrees.
	pub wind_direction_deg: f64,
	/// CSS color string (e.g. `#D4A574`). Empty means the page theme's accent.
	pub accent_color: String,
}

impl Default for FieldParams {
	fn default() -> Self {
		Self {
			category: WeatherCategory::Clear,
			wind_speed_kmh: 10.0,
			wind_direction_deg: 45.0,
			accent_color: String::new(),
		}
	}
}

impl FieldParams {
	pub fn new(
		category: WeatherCategory,
		wind_speed_kmh: f64,
		wind_direction_deg: f64,
		accent_color: impl Into<String>,
	) -> Self {
		Self {
			category,
			wind_speed_kmh,
			wind_direction_deg,
			accent_color: accent_color.into(),
		}
	}

	/// Returns a copy with wind values clamped into range and an accent color present.
	pub fn sanitized(&self) -> Self {
		let wind_speed_kmh = if self.wind_speed_kmh.is_finite() {
			self.wind_speed_kmh.max(0.0)
		} else {
			0.0
		};
		let wind_direction_deg = if self.wind_direction_deg.is_finite() {
			let d = self.wind_direction_deg.rem_euclid(360.0);
			if d >= 360.0 { 0.0 } else { d }
		} else {
			0.0
		};
		let accent = self.accent_color.trim();
		Self {
			category: self.category,
			wind_speed_kmh,
			wind_direction_deg,
			accent_color: if accent.is_empty() {
				DEFAULT_ACCENT.to_string()
			} else {
				accent.to_string()
			},
		}
	}
}

/// Weather as the page reports it, before it becomes [`FieldParams`].
///
/// `category` wins over `condition`; missing wind values take the dashboard
/// defaults (10 km/h from 45°).
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeatherReport {
	pub category: Option<WeatherCategory>,
	/// Provider condition name such as "Clouds" or "Thunderstorm".
	pub condition: Option<String>,
	pub wind_speed_kmh: Option<f64>,
	pub wind_direction_deg: Option<f64>,
	pub accent_color: Option<String>,
}

impl WeatherReport {
	pub fn to_params(&self) -> FieldParams {
		let defaults = FieldParams::default();
		let category = self
			.category
			.or_else(|| self.condition.as_deref().map(WeatherCategory::from_condition))
			.unwrap_or(defaults.category);
		FieldParams {
			category,
			wind_speed_kmh: self.wind_speed_kmh.unwrap_or(defaults.wind_speed_kmh),
			wind_direction_deg: self.wind_direction_deg.unwrap_or(defaults.wind_direction_deg),
			accent_color: self.accent_color.clone().unwrap_or_default(),
		}
	}
}

/// 8-point compass label for a wind direction in degrees.
pub fn compass_point(deg: f64) -> &'static str {
	const POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
	let deg = if deg.is_finite() { deg.rem_euclid(360.0) } else { 0.0 };
	POINTS[((deg / 45.0).round() as usize) % 8]
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn condition_names_map_to_categories() {
		assert_eq!(WeatherCategory::from_condition("Clouds"), WeatherCategory::Clouds);
		assert_eq!(WeatherCategory::from_condition("light rain"), WeatherCategory::Rain);
		assert_eq!(WeatherCategory::from_condition("Drizzle"), WeatherCategory::Rain);
		assert_eq!(WeatherCategory::from_condition("SNOW"), WeatherCategory::Snow);
		assert_eq!(WeatherCategory::from_condition("Thunderstorm"), WeatherCategory::Storm);
		assert_eq!(WeatherCategory::from_condition("Mist"), WeatherCategory::Clear);
		assert_eq!(WeatherCategory::from_condition(""), WeatherCategory::Clear);
	}

	#[test]
	fn sanitize_clamps_wind() {
		let p = FieldParams::new(WeatherCategory::Rain, -5.0, -90.0, "  ").sanitized();
		assert_eq!(p.wind_speed_kmh, 0.0);
		assert_eq!(p.wind_direction_deg, 270.0);
		assert_eq!(p.accent_color, DEFAULT_ACCENT);

		let p = FieldParams::new(WeatherCategory::Rain, f64::NAN, 720.0, "#fff").sanitized();
		assert_eq!(p.wind_speed_kmh, 0.0);
		assert_eq!(p.wind_direction_deg, 0.0);
		assert_eq!(p.accent_color, "#fff");
	}

	#[test]
	fn params_deserialize_with_defaults() {
		let p: FieldParams =
			serde_json::from_str(r#"{"category":"storm","windSpeedKmh":30}"#).unwrap();
		assert_eq!(p.category, WeatherCategory::Storm);
		assert_eq!(p.wind_speed_kmh, 30.0);
		assert_eq!(p.wind_direction_deg, 45.0);
		assert_eq!(p.sanitized().accent_color, DEFAULT_ACCENT);
	}

	#[test]
	fn report_prefers_explicit_category() {
		let r: WeatherReport =
			serde_json::from_str(r#"{"category":"snow","condition":"Rain"}"#).unwrap();
		assert_eq!(r.to_params().category, WeatherCategory::Snow);

		let r: WeatherReport =
			serde_json::from_str(r#"{"condition":"Thunderstorm","windDirectionDeg":270}"#)
				.unwrap();
		let p = r.to_params();
		assert_eq!(p.category, WeatherCategory::Storm);
		assert_eq!(p.wind_speed_kmh, 10.0);
		assert_eq!(p.wind_direction_deg, 270.0);
		assert!(p.accent_color.is_empty());

		assert_eq!(WeatherReport::default().to_params(), FieldParams::default());
	}

	#[test]
	fn compass_points() {
		assert_eq!(compass_point(0.0), "N");
		assert_eq!(compass_point(44.0), "NE");
		assert_eq!(compass_point(180.0), "S");
		assert_eq!(compass_point(350.0), "N");
		assert_eq!(compass_point(-90.0), "W");
	}
}
