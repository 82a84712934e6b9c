//! Application systems
//!
//! Modular systems extracted from main.rs for better organization and testability.

mod frame;
mod window;

pub use frame::{FrameSystem, SENSOR_POLL_INTERVAL};
pub use window::{surface_center, WindowError, WindowSystem};
