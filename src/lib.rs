//! Gyro4D - rotating tesseract driven by device tilt or drag
//!
//! The binary wires these modules to a winit window; they are exposed as a
//! library so integration tests can reach them.

pub mod config;
pub mod input;
pub mod systems;
