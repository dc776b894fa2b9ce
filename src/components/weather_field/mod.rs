//! Wind-driven weather particles drawn behind the page.
//!
//! Keeps a fixed-size pool of particles for the current weather category and
//! redraws it every animation frame:
//! - Rain and storm as thin streaks along the wind, with a gravity bias
//! - Snow as slowly drifting flakes with a little horizontal jitter
//! - Clouds as large, faint gradient blobs
//! - Clear skies as sparse floating dust
//!
//! Particles wrap around the viewport edges, so the pool never grows or shrinks
//! until the weather changes, at which point it is rebuilt from scratch.
//!
//! # Example
//!
//! ```ignore
//! use weather_field::{FieldParams, ParticleCanvas, WeatherCategory};
//!
//! let params = FieldParams::new(WeatherCategory::Rain, 20.0, 90.0, "");
//!
//! view! { <ParticleCanvas params=Signal::derive(move || params.clone()) /> }
//! ```

mod component;
mod particles;
mod profile;
mod render;
pub mod surface;
pub mod theme;
mod types;

pub use component::ParticleCanvas;
pub use particles::{Particle, ParticleField};
pub use profile::CategoryProfile;
pub use render::draw;
pub use types::{FieldParams, WeatherCategory, WeatherReport, compass_point};
