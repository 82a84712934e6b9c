//! Input mode selection
//!
//! [`InputRouter`] owns both angle sources and exposes the active one.
//! Only one mode is live at a time; switching stops any drag coast before
//! returning, so the two sources never write on the same frame.

use std::time::Instant;

use serde::{Serialize, Deserialize};

use crate::angles::{AngleSource, AngleState};
use crate::drag_inertia::{DragInertia, DragParams, DragPhase};
use crate::sensor_filter::SensorParams;
use crate::sensor_source::{SensorSender, SensorSource};

/// Which source drives the rotation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// Filtered device orientation
    #[default]
    Sensor,
    /// Pointer drag with inertia
    Drag,
}

impl InputMode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            InputMode::Sensor => InputMode::Drag,
            InputMode::Drag => InputMode::Sensor,
        }
    }
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputMode::Sensor => write!(f, "sensor"),
            InputMode::Drag => write!(f, "drag"),
        }
    }
}

/// Holds both angle sources and forwards input to the active one
pub struct InputRouter {
    mode: InputMode,
    sensor: SensorSource,
    drag: DragInertia,
}

impl InputRouter {
    /// Create a router and the sender for sensor samples
    pub fn new(mode: InputMode, sensor: SensorParams, drag: DragParams) -> (Self, SensorSender) {
        let (sensor, sender) = SensorSource::new(sensor);
        let router = Self {
            mode,
            sensor,
            drag: DragInertia::new(drag),
        };
        (router, sender)
    }

    #[inline]
    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Select the active source
    ///
    /// Leaving drag mode cancels any coast (or an unfinished gesture) without
    /// touching either source's angles. Returns whether the mode changed.
    pub fn set_mode(&mut self, mode: InputMode) -> bool {
        if mode == self.mode {
            return false;
        }
        if self.drag.phase() != DragPhase::Idle {
            self.drag.cancel_deceleration();
        }
        log::info!("Input mode: {} -> {}", self.mode, mode);
        self.mode = mode;
        true
    }

    /// Flip between sensor and drag; returns the new mode
    pub fn toggle_mode(&mut self) -> InputMode {
        self.set_mode(self.mode.toggled());
        self.mode
    }

    /// Drain pending sensor samples
    ///
    /// The filter keeps consuming samples in drag mode so it is already
    /// settled when sensor mode comes back.
    pub fn pump_sensor(&mut self) -> usize {
        self.sensor.pump()
    }

    /// Feed a sensor sample directly
    pub fn push_sensor_sample(&mut self, raw: AngleState) -> AngleState {
        self.sensor.push_sample(raw)
    }

    /// Pointer went down (drag mode only)
    pub fn gesture_start(&mut self) -> bool {
        self.gesture_start_at(Instant::now())
    }

    pub fn gesture_start_at(&mut self, now: Instant) -> bool {
        if self.mode != InputMode::Drag {
            return false;
        }
        self.drag.gesture_start_at(now);
        true
    }

    /// Pointer moved (drag mode only)
    pub fn gesture_move(&mut self, dx: f32, dy: f32) -> bool {
        self.gesture_move_at(dx, dy, Instant::now())
    }

    pub fn gesture_move_at(&mut self, dx: f32, dy: f32, now: Instant) -> bool {
        self.mode == InputMode::Drag && self.drag.gesture_move_at(dx, dy, now)
    }

    /// Pointer went up (drag mode only)
    pub fn gesture_end(&mut self) -> bool {
        self.gesture_end_at(Instant::now())
    }

    pub fn gesture_end_at(&mut self, now: Instant) -> bool {
        if self.mode != InputMode::Drag {
            return false;
        }
        self.drag.gesture_end_at(now);
        true
    }

    /// Run due decay ticks; returns how many were applied
    pub fn advance(&mut self, now: Instant) -> u32 {
        match self.mode {
            InputMode::Drag => self.drag.advance(now),
            InputMode::Sensor => 0,
        }
    }

    /// Next time [`advance`](Self::advance) has work, if any
    pub fn next_deadline(&self) -> Option<Instant> {
        match self.mode {
            InputMode::Drag => self.drag.next_deadline(),
            InputMode::Sensor => None,
        }
    }

    /// Zero the active source
    pub fn reset_view(&mut self) {
        match self.mode {
            InputMode::Drag => self.drag.reset(),
            InputMode::Sensor => self.sensor.reset(),
        }
    }

    pub fn sensor(&self) -> &SensorSource {
        &self.sensor
    }

    pub fn drag(&self) -> &DragInertia {
        &self.drag
    }
}

impl AngleSource for InputRouter {
    fn angles(&self) -> AngleState {
        match self.mode {
            InputMode::Sensor => self.sensor.angles(),
            InputMode::Drag => self.drag.angles(),
        }
    }
}
