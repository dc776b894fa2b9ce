//! Per-frame drawing of the particle field.
//!
//! Streak categories (rain, storm) draw a short line along the velocity, clouds
//! draw soft gradient discs at half opacity, everything else draws solid dots.

use super::particles::{Particle, ParticleField};
use super::surface::Surface;
use super::types::WeatherCategory;

/// Streak length as a multiple of the per-frame velocity.
const STREAK_LENGTH: f64 = 2.0;
/// Stroke width as a fraction of particle size.
const STREAK_WIDTH: f64 = 0.5;
/// Clouds stay ambient.
const CLOUD_ALPHA: f64 = 0.5;

/// Clears the surface and draws every particle in the field's accent color.
pub fn draw<S: Surface + ?Sized>(field: &ParticleField, surface: &mut S) {
	let (width, height) = field.size();
	let accent = field.params().accent_color.as_str();

	surface.clear(width, height);

	for p in field.particles() {
		draw_particle(p, surface, accent);
		surface.set_alpha(1.0);
	}
}

fn draw_particle<S: Surface + ?Sized>(p: &Particle, surface: &mut S, accent: &str) {
	if p.category.is_streak() {
		surface.set_alpha(p.opacity);
		surface.stroke_line(
			(p.x, p.y),
			(p.x + p.vx * STREAK_LENGTH, p.y + p.vy * STREAK_LENGTH),
			p.size * STREAK_WIDTH,
			accent,
		);
	} else if p.category == WeatherCategory::Clouds {
		surface.set_alpha(p.opacity * CLOUD_ALPHA);
		surface.fill_soft_disc(p.x, p.y, p.size, accent);
	} else {
		surface.set_alpha(p.opacity);
		surface.fill_disc(p.x, p.y, p.size, accent);
	}
}
