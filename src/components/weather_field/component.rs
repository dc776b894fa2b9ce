//! Leptos component wrapping the weather particle canvas.
//!
//! The component creates a full-viewport canvas behind the page content. An
//! animation loop runs via `requestAnimationFrame`, ticking the particle field
//! and redrawing it each frame. Parameter changes rebuild the particle pool, and
//! unmounting cancels the loop and detaches the resize listener.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use send_wrapper::SendWrapper;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::components::frame_loop::{
	FrameLoop, Teardown, WindowListener, context_2d, random_seed, viewport_size,
};

use super::particles::ParticleField;
use super::render;
use super::theme::document_accent;
use super::types::{FieldParams, compass_point};

/// The particle pool together with the canvas it draws on.
struct FieldContext {
	field: ParticleField,
	surface: CanvasRenderingContext2d,
}

/// Fills empty accents from the page theme.
fn with_theme_accent(mut params: FieldParams) -> FieldParams {
	if params.accent_color.trim().is_empty() {
		params.accent_color = document_accent();
	}
	params
}

fn describe(params: &FieldParams) -> String {
	format!(
		"{} wind {:.0} km/h {}",
		params.category.as_str(),
		params.wind_speed_kmh,
		compass_point(params.wind_direction_deg)
	)
}

/// Renders animated weather particles on a fixed, full-viewport canvas.
///
/// Pass the weather via the reactive `params` signal. Any change to category,
/// wind or accent rebuilds the particle pool. If no 2D context can be obtained
/// the component renders an empty canvas and does nothing else.
#[component]
pub fn ParticleCanvas(#[prop(into)] params: Signal<FieldParams>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<FieldContext>>> = Rc::new(RefCell::new(None));
	let teardown: Rc<RefCell<Teardown>> = Rc::new(RefCell::new(Teardown::default()));
	let (context_init, teardown_init) = (context.clone(), teardown.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if teardown_init.borrow().is_armed() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			warn!("weather-field: no window, particles disabled");
			return;
		};
		let Some(surface) = context_2d(&canvas) else {
			warn!("weather-field: canvas has no 2d context, particles disabled");
			return;
		};

		let (w, h) = viewport_size(&window).unwrap_or((0.0, 0.0));
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let initial = with_theme_accent(params.get_untracked());
		let field = ParticleField::new(&initial, w, h, random_seed());
		info!(
			"weather-field: {} particles ({}) on {}x{}",
			field.particles().len(),
			describe(field.params()),
			w,
			h
		);
		*context_init.borrow_mut() = Some(FieldContext { field, surface });

		let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
		let resize = WindowListener::on_resize(&window, move |nw, nh| {
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut c) = *context_resize.borrow_mut() {
				c.field.resize(nw, nh);
			}
		});

		let context_anim = context_init.clone();
		let frame_loop = FrameLoop::start(move |_| {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.field.tick();
				render::draw(&c.field, &mut c.surface);
			}
		});

		let mut td = teardown_init.borrow_mut();
		td.add_listener(resize);
		if let Some(frame_loop) = frame_loop {
			td.set_loop(frame_loop);
		}
	});

	let context_params = context.clone();
	Effect::new(move |_| {
		let next = with_theme_accent(params.get());
		if let Some(ref mut c) = *context_params.borrow_mut() {
			if c.field.reconfigure(&next) {
				info!(
					"weather-field: rebuilt pool with {} particles ({})",
					c.field.particles().len(),
					describe(c.field.params())
				);
			}
		}
	});

	let teardown = SendWrapper::new(teardown);
	on_cleanup(move || {
		teardown.borrow_mut().run();
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="weather-particles"
			style="position: fixed; inset: 0; pointer-events: none; z-index: 0; opacity: 0.5;"
		/>
	}
}
