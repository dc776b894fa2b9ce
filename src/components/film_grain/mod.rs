//! Animated film grain overlay.
//!
//! A full-viewport canvas of grey noise, regenerated every few frames and
//! composited over the page at very low opacity with the `overlay` blend mode.
//! It shares nothing with the particle field beyond the helpers in
//! [`crate::components::frame_loop`].

mod component;
mod noise;

pub use component::FilmGrain;
pub use noise::{GrainConfig, NoiseField};
