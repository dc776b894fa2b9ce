//! weather-field: animated weather backdrop for a weather dashboard.
//!
//! This crate provides WASM components that render wind-driven weather
//! particles (rain, snow, clouds, storm, clear-sky dust) and a film grain
//! overlay behind the page content, colored by the theme accent.

use std::cell::RefCell;

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use send_wrapper::SendWrapper;
use wasm_bindgen::JsCast;
use web_sys::{CustomEvent, HtmlScriptElement, Window};

pub mod components;

pub use components::film_grain::{FilmGrain, GrainConfig};
pub use components::frame_loop::WindowListener;
pub use components::weather_field::{
	FieldParams, ParticleCanvas, ParticleField, WeatherCategory, WeatherReport,
};

/// Window event carrying a new [`WeatherReport`] as its `detail` (JSON string).
pub const WEATHER_UPDATE_EVENT: &str = "weather-update";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("weather-field: logging initialized");
}

/// Parses a [`WeatherReport`] payload into field parameters, logging failures.
pub fn parse_report(json_text: &str) -> Option<FieldParams> {
	match serde_json::from_str::<WeatherReport>(json_text) {
		Ok(report) => Some(report.to_params()),
		Err(e) => {
			warn!("weather-field: failed to parse weather data: {}", e);
			None
		}
	}
}

/// Load the initial weather from a script element with id="weather-data".
/// Expected format: JSON with { category?, condition?, windSpeedKmh?, windDirectionDeg?, accentColor? }
fn load_weather() -> Option<FieldParams> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("weather-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	let params = parse_report(&json_text)?;
	info!(
		"weather-field: loaded {} at {} km/h",
		params.category.as_str(),
		params.wind_speed_kmh
	);
	Some(params)
}

/// Main application component.
/// Loads the weather from the DOM, renders the backdrop, and follows
/// `weather-update` events dispatched on the window.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let weather = RwSignal::new(load_weather().unwrap_or_default());

	if let Some(window) = web_sys::window() {
		let listener = WindowListener::attach(&window, WEATHER_UPDATE_EVENT, move |ev| {
			let Some(detail) = ev
				.dyn_ref::<CustomEvent>()
				.and_then(|ce| ce.detail().as_string())
			else {
				warn!("weather-field: {} without a JSON string detail", WEATHER_UPDATE_EVENT);
				return;
			};
			if let Some(params) = parse_report(&detail) {
				weather.set(params);
			}
		});
		let listener = SendWrapper::new(RefCell::new(listener));
		on_cleanup(move || listener.borrow_mut().detach());
	}

	view! {
		<Title text="Weather" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="weather-backdrop">
			<ParticleCanvas params=weather />
			<div
				class="weather-glow"
				style="position: fixed; inset: 0; pointer-events: none; z-index: 0; opacity: 0.4; background: radial-gradient(ellipse at top right, var(--accent-glow) 0%, transparent 60%);"
			/>
			<FilmGrain />
		</div>
	}
}
