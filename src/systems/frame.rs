//! Frame driver
//!
//! Ties the angle sources to the projector once per frame:
//! - drain queued sensor samples
//! - run decay ticks that came due
//! - snapshot the active angles and project the tesseract
//!
//! It also tells the event loop when it next has work, so the host can
//! sleep until then instead of polling.

use std::time::{Duration, Instant};

use gyro4d_input::{AngleSource, AngleState, InputMode, InputRouter, SensorSender};
use gyro4d_math::{ScreenPoint, Tesseract4D};
use gyro4d_render::{ProjectedFrame, WireframeProjector};

use crate::config::AppConfig;

/// How often sensor mode checks for new samples
pub const SENSOR_POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Owns the geometry, projector and input sources
pub struct FrameSystem {
    tesseract: Tesseract4D,
    projector: WireframeProjector,
    router: InputRouter,
    frames: u64,
}

impl FrameSystem {
    pub fn new(tesseract: Tesseract4D, projector: WireframeProjector, router: InputRouter) -> Self {
        Self {
            tesseract,
            projector,
            router,
            frames: 0,
        }
    }

    /// Build everything from configuration
    ///
    /// Returns the sender for orientation samples alongside the system.
    pub fn from_config(config: &AppConfig) -> (Self, SensorSender) {
        let (router, sender) = InputRouter::new(
            config.input.start_mode,
            config.to_sensor_params(),
            config.to_drag_params(),
        );
        let tesseract = Tesseract4D::new(config.tesseract.half_size);
        let projector = WireframeProjector::new(config.to_viewer_distances());
        (Self::new(tesseract, projector, router), sender)
    }

    /// Advance input state to `now` and project one frame centred on `center`
    pub fn update(&mut self, now: Instant, center: ScreenPoint) -> ProjectedFrame {
        let samples = self.router.pump_sensor();
        let ticks = self.router.advance(now);
        if samples > 0 || ticks > 0 {
            log::trace!("Frame {}: {} sensor samples, {} decay ticks", self.frames, samples, ticks);
        }
        self.frames += 1;
        self.projector.project(&self.tesseract, self.router.angles(), center)
    }

    /// When the host should wake next without any new events
    ///
    /// Drag mode only needs waking while coasting; sensor mode polls the
    /// sample channel at a fixed rate.
    pub fn next_wake(&self, now: Instant) -> Option<Instant> {
        match self.router.mode() {
            InputMode::Drag => self.router.next_deadline(),
            InputMode::Sensor => Some(now + SENSOR_POLL_INTERVAL),
        }
    }

    /// Angles the next frame will use (before draining new input)
    pub fn angles(&self) -> AngleState {
        self.router.angles()
    }

    pub fn mode(&self) -> InputMode {
        self.router.mode()
    }

    pub fn router(&self) -> &InputRouter {
        &self.router
    }

    pub fn router_mut(&mut self) -> &mut InputRouter {
        &mut self.router
    }

    /// Frames produced so far
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}
