//! Leptos component for the grain overlay canvas.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use send_wrapper::SendWrapper;
use wasm_bindgen::Clamped;
use web_sys::{HtmlCanvasElement, ImageData};

use super::noise::{GrainConfig, NoiseField};
use crate::components::frame_loop::{
	FrameLoop, Teardown, WindowListener, context_2d, random_seed, viewport_size,
};

/// Full-viewport film grain, regenerated on a fixed frame cadence.
#[component]
pub fn FilmGrain(#[prop(optional)] config: Option<GrainConfig>) -> impl IntoView {
	let config = config.unwrap_or_default();
	let style = config.canvas_style();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let teardown: Rc<RefCell<Teardown>> = Rc::new(RefCell::new(Teardown::default()));
	let teardown_init = teardown.clone();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if teardown_init.borrow().is_armed() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		let Some(ctx) = context_2d(&canvas) else {
			warn!("weather-field: grain canvas has no 2d context, grain disabled");
			return;
		};

		let (w, h) = viewport_size(&window).unwrap_or((0.0, 0.0));
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let canvas_resize = canvas.clone();
		let resize = WindowListener::on_resize(&window, move |nw, nh| {
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
		});

		let mut noise = NoiseField::new(random_seed());
		let config = config.clone();
		let frame_loop = FrameLoop::start(move |n| {
			if !config.is_grain_frame(n) {
				return;
			}
			let (gw, gh) = (canvas.width(), canvas.height());
			if gw == 0 || gh == 0 {
				return;
			}
			let pixels = noise.regenerate(gw, gh, config.pixel_alpha);
			match ImageData::new_with_u8_clamped_array_and_sh(Clamped(pixels), gw, gh) {
				Ok(image) => {
					let _ = ctx.put_image_data(&image, 0.0, 0.0);
				}
				Err(e) => debug!("weather-field: grain frame skipped: {:?}", e),
			}
		});

		let mut td = teardown_init.borrow_mut();
		td.add_listener(resize);
		if let Some(frame_loop) = frame_loop {
			td.set_loop(frame_loop);
		}
	});

	let teardown = SendWrapper::new(teardown);
	on_cleanup(move || {
		teardown.borrow_mut().run();
	});

	view! { <canvas node_ref=canvas_ref class="film-grain" style=style /> }
}
