//! Host plumbing shared by the canvas components: the `requestAnimationFrame`
//! loop, window event listeners, 2D context lookup and RNG seeding.
//!
//! Loops and listeners hand out handles that must be released exactly once when
//! the owning component unmounts. Releasing them again is a no-op.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Event, HtmlCanvasElement, Window};

/// The canvas' 2D context, or `None` when the browser won't provide one.
pub fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

/// Seed for a component's RNG, from `Math.random` mixed with the clock.
pub fn random_seed() -> u64 {
	(js_sys::Math::random() * (1u64 << 53) as f64) as u64 ^ js_sys::Date::now() as u64
}

/// Gates frame work on whether the loop is still running.
///
/// Each call to [`FrameGate::run`] performs one complete frame (update, then
/// draw) or nothing at all once stopped.
#[derive(Debug)]
pub struct FrameGate {
	running: bool,
	frames: u64,
}

impl Default for FrameGate {
	fn default() -> Self {
		Self::new()
	}
}

impl FrameGate {
	pub fn new() -> Self {
		Self {
			running: true,
			frames: 0,
		}
	}

	/// Number of frames run so far.
	pub fn frames(&self) -> u64 {
		self.frames
	}

	/// Stops the gate. Returns `true` only for the call that actually stopped it.
	pub fn stop(&mut self) -> bool {
		std::mem::replace(&mut self.running, false)
	}

	/// Runs `frame` with the 1-based frame number if the gate is still open.
	pub fn run(&mut self, frame: impl FnOnce(u64)) -> bool {
		if !self.running {
			return false;
		}
		self.frames += 1;
		frame(self.frames);
		true
	}
}

/// A cancellable `requestAnimationFrame` loop.
pub struct FrameLoop {
	gate: Rc<RefCell<FrameGate>>,
	pending: Rc<Cell<Option<i32>>>,
	callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl FrameLoop {
	/// Starts calling `on_frame` once per display frame.
	///
	/// Returns `None` when there is no window to schedule against.
	pub fn start(mut on_frame: impl FnMut(u64) + 'static) -> Option<Self> {
		let window = web_sys::window()?;
		let gate = Rc::new(RefCell::new(FrameGate::new()));
		let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
		let callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
		let (gate_cb, pending_cb, callback_cb) = (gate.clone(), pending.clone(), callback.clone());

		*callback.borrow_mut() = Some(Closure::new(move || {
			pending_cb.set(None);
			if !gate_cb.borrow_mut().run(&mut on_frame) {
				return;
			}
			if let (Some(cb), Some(win)) = (&*callback_cb.borrow(), web_sys::window()) {
				pending_cb.set(win.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
			}
		}));

		if let Some(ref cb) = *callback.borrow() {
			pending.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
		}

		Some(Self {
			gate,
			pending,
			callback,
		})
	}

	/// Stops the loop and cancels the pending frame, if any.
	pub fn cancel(&self) {
		if self.gate.borrow_mut().stop() {
			log::debug!(
				"weather-field: frame loop stopped after {} frames",
				self.gate.borrow().frames()
			);
		}
		if let Some(id) = self.pending.take() {
			if let Some(win) = web_sys::window() {
				let _ = win.cancel_animation_frame(id);
			}
		}
		// The closure holds a reference to its own slot; dropping it breaks the cycle.
		self.callback.borrow_mut().take();
	}
}

/// Current inner size of the window.
pub fn viewport_size(window: &Window) -> Option<(f64, f64)> {
	let w = window.inner_width().ok()?.as_f64()?;
	let h = window.inner_height().ok()?.as_f64()?;
	Some((w, h))
}

/// An event listener registered on the window, removed by [`WindowListener::detach`].
pub struct WindowListener {
	event: &'static str,
	callback: Option<Closure<dyn FnMut(Event)>>,
}

impl WindowListener {
	pub fn attach(
		window: &Window,
		event: &'static str,
		handler: impl FnMut(Event) + 'static,
	) -> Self {
		let callback: Closure<dyn FnMut(Event)> = Closure::new(handler);
		let _ = window.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref());
		Self {
			event,
			callback: Some(callback),
		}
	}

	/// Listens for `resize`, calling `on_resize` with the new viewport size.
	pub fn on_resize(window: &Window, mut on_resize: impl FnMut(f64, f64) + 'static) -> Self {
		Self::attach(window, "resize", move |_| {
			if let Some((w, h)) = web_sys::window().and_then(|win| viewport_size(&win)) {
				on_resize(w, h);
			}
		})
	}

	pub fn detach(&mut self) {
		let Some(cb) = self.callback.take() else {
			return;
		};
		if let Some(win) = web_sys::window() {
			let _ =
				win.remove_event_listener_with_callback(self.event, cb.as_ref().unchecked_ref());
		}
	}
}

/// Everything a mounted canvas component must release on unmount.
#[derive(Default)]
pub struct Teardown {
	frame_loop: Option<FrameLoop>,
	listeners: Vec<WindowListener>,
}

impl Teardown {
	pub fn set_loop(&mut self, frame_loop: FrameLoop) {
		self.frame_loop = Some(frame_loop);
	}

	pub fn add_listener(&mut self, listener: WindowListener) {
		self.listeners.push(listener);
	}

	pub fn is_armed(&self) -> bool {
		self.frame_loop.is_some() || !self.listeners.is_empty()
	}

	/// Cancels the frame loop and detaches every listener. Safe to call repeatedly.
	pub fn run(&mut self) {
		if let Some(frame_loop) = self.frame_loop.take() {
			frame_loop.cancel();
		}
		for mut listener in self.listeners.drain(..) {
			listener.detach();
		}
	}
}
