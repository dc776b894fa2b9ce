//! UI components.

pub mod film_grain;
pub mod frame_loop;
pub mod weather_field;
