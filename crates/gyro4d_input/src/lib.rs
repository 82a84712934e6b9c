//! Angle Sources
//!
//! This crate turns raw input into the two rotation angles that drive the
//! tesseract:
//!
//! - [`SensorSource`] - device orientation, low-pass filtered
//! - [`DragInertia`] - pointer drag with momentum after release
//! - [`InputRouter`] - owns both and exposes whichever is active
//!
//! Nothing here depends on a windowing system; hosts translate their own
//! events into gesture and sensor calls.

mod angles;
mod sensor_filter;
mod orientation;
mod sensor_source;
mod decay_ticker;
mod drag_inertia;
mod router;

pub use angles::{AngleSource, AngleState};
pub use sensor_filter::{SensorFilter, SensorParams, DEFAULT_SMOOTHING_ALPHA};
pub use orientation::Orientation;
pub use sensor_source::{SensorSender, SensorSource};
pub use decay_ticker::{DecayTicker, DEFAULT_TICK_INTERVAL, MAX_CATCH_UP_TICKS};
pub use drag_inertia::{DragInertia, DragParams, DragPhase, MIN_STOP_THRESHOLD};
pub use router::{InputMode, InputRouter};
