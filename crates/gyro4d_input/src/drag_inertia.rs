//! Drag gesture with inertial coast
//!
//! Phases:
//! - Idle: nothing moving
//! - Dragging: a pointer is down; moves turn the tesseract directly
//! - Decelerating: released; momentum is applied and decays every tick
//!
//! A new gesture always wins over leftover momentum: starting a drag cancels
//! the decay schedule before anything else happens.

use std::time::{Duration, Instant};

use crate::angles::{AngleSource, AngleState};
use crate::decay_ticker::{DecayTicker, DEFAULT_TICK_INTERVAL};

/// Smallest stop threshold a coast runs with
///
/// Kept inside the normal f32 range, where every decay step strictly shrinks
/// the momentum. Subnormal values can round back to themselves.
pub const MIN_STOP_THRESHOLD: f32 = 1e-30;

/// Drag tuning
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragParams {
    /// Radians per pixel of drag
    pub sensitivity: f32,
    /// Weight of the newest velocity sample in the one-pole smoother
    pub velocity_blend: f32,
    /// Scale applied to the smoothed velocity when seeding momentum
    pub release_scale: f32,
    /// Momentum multiplier per decay tick, in (0, 1)
    pub decay_rate: f32,
    /// Momentum magnitude below which both axes count as stopped
    pub stop_threshold: f32,
    /// Decay tick period
    pub tick_interval: Duration,
    /// Floor for the time between two moves, in milliseconds
    pub min_move_interval_ms: f32,
}

impl Default for DragParams {
    fn default() -> Self {
        Self {
            sensitivity: 0.005,
            velocity_blend: 0.7,
            release_scale: 0.9,
            decay_rate: 0.999,
            stop_threshold: 1e-4,
            tick_interval: DEFAULT_TICK_INTERVAL,
            min_move_interval_ms: 1.0,
        }
    }
}

impl DragParams {
    /// Replace values that would break the gesture maths
    ///
    /// Non-finite fields and a decay rate outside (0, 1) fall back to their
    /// defaults. The stop threshold is raised to [`MIN_STOP_THRESHOLD`].
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let finite_or = |name: &str, value: f32, fallback: f32| {
            if value.is_finite() {
                value
            } else {
                log::warn!("Drag {} {} is not finite, using {}", name, value, fallback);
                fallback
            }
        };

        let decay_rate = if self.decay_rate > 0.0 && self.decay_rate < 1.0 {
            self.decay_rate
        } else {
            log::warn!(
                "Drag decay rate {} outside (0, 1), using {}",
                self.decay_rate,
                defaults.decay_rate
            );
            defaults.decay_rate
        };

        let stop_threshold = if self.stop_threshold.is_nan() {
            log::warn!("Drag stop threshold is NaN, using {}", defaults.stop_threshold);
            defaults.stop_threshold
        } else if self.stop_threshold < MIN_STOP_THRESHOLD {
            log::warn!(
                "Drag stop threshold {} too small, using {}",
                self.stop_threshold,
                MIN_STOP_THRESHOLD
            );
            MIN_STOP_THRESHOLD
        } else {
            self.stop_threshold
        };

        Self {
            sensitivity: finite_or("sensitivity", self.sensitivity, defaults.sensitivity),
            velocity_blend: finite_or("velocity blend", self.velocity_blend, defaults.velocity_blend),
            release_scale: finite_or("release scale", self.release_scale, defaults.release_scale),
            decay_rate,
            stop_threshold,
            tick_interval: self.tick_interval,
            min_move_interval_ms: finite_or(
                "min move interval",
                self.min_move_interval_ms,
                defaults.min_move_interval_ms,
            ),
        }
    }

    /// Upper bound on decay ticks before a momentum of `seed` stops
    ///
    /// Smallest n with `|seed|·rate^n < stop_threshold`.
    pub fn ticks_to_stop(&self, seed: f32) -> u32 {
        let seed = seed.abs() as f64;
        let threshold = self.stop_threshold as f64;
        if seed < threshold {
            return 0;
        }
        let rate = self.decay_rate as f64;
        if rate <= 0.0 {
            return 1;
        }
        if rate >= 1.0 || threshold <= 0.0 {
            return u32::MAX;
        }
        let n = (threshold / seed).ln() / rate.ln();
        (n.floor() + 1.0).min(u32::MAX as f64) as u32
    }
}

/// Gesture phase
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
    Decelerating,
}

/// Drag-to-rotate state with momentum
pub struct DragInertia {
    params: DragParams,
    phase: DragPhase,
    angles: AngleState,

    // Smoothed velocity, radians per millisecond
    velocity: [f32; 2],
    // Radians added per decay tick
    momentum: [f32; 2],

    last_move: Option<Instant>,
    ticker: DecayTicker,
    decay_ticks: u32,
}

impl Default for DragInertia {
    fn default() -> Self {
        Self::new(DragParams::default())
    }
}

impl DragInertia {
    /// Create the gesture state; params pass through [`DragParams::sanitized`]
    pub fn new(params: DragParams) -> Self {
        let params = params.sanitized();
        Self {
            params,
            phase: DragPhase::Idle,
            angles: AngleState::ZERO,
            velocity: [0.0; 2],
            momentum: [0.0; 2],
            last_move: None,
            ticker: DecayTicker::new(params.tick_interval),
            decay_ticks: 0,
        }
    }

    #[inline]
    pub fn params(&self) -> &DragParams {
        &self.params
    }

    #[inline]
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    #[inline]
    pub fn is_decelerating(&self) -> bool {
        self.phase == DragPhase::Decelerating
    }

    /// Smoothed velocity in radians per millisecond
    #[inline]
    pub fn velocity(&self) -> [f32; 2] {
        self.velocity
    }

    /// Momentum applied on the next decay tick
    #[inline]
    pub fn momentum(&self) -> [f32; 2] {
        self.momentum
    }

    /// When the next decay tick is due, if decelerating
    #[inline]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.ticker.next_deadline()
    }

    /// Pointer went down
    pub fn gesture_start(&mut self) {
        self.gesture_start_at(Instant::now());
    }

    /// Pointer went down at `now`
    pub fn gesture_start_at(&mut self, now: Instant) {
        if self.phase == DragPhase::Decelerating {
            log::debug!("Drag started; dropping momentum {:?}", self.momentum);
        }
        self.ticker.cancel();
        self.momentum = [0.0; 2];
        self.velocity = [0.0; 2];
        self.last_move = Some(now);
        self.phase = DragPhase::Dragging;
    }

    /// Pointer moved by `(dx, dy)` pixels
    pub fn gesture_move(&mut self, dx: f32, dy: f32) -> bool {
        self.gesture_move_at(dx, dy, Instant::now())
    }

    /// Pointer moved by `(dx, dy)` pixels at `now`
    ///
    /// Ignored unless dragging. Returns whether the move was applied.
    pub fn gesture_move_at(&mut self, dx: f32, dy: f32, now: Instant) -> bool {
        if self.phase != DragPhase::Dragging {
            log::trace!("Ignoring drag move outside a gesture");
            return false;
        }

        let elapsed_ms = self
            .last_move
            .map(|last| now.saturating_duration_since(last).as_millis() as f32)
            .unwrap_or(0.0)
            .max(self.params.min_move_interval_ms)
            .max(f32::MIN_POSITIVE);
        self.last_move = Some(now);

        let k = self.params.sensitivity;
        let blend = self.params.velocity_blend;
        let instant = [dx * k / elapsed_ms, dy * k / elapsed_ms];
        self.velocity = [
            blend * instant[0] + (1.0 - blend) * self.velocity[0],
            blend * instant[1] + (1.0 - blend) * self.velocity[1],
        ];

        self.angles += [dx * k, dy * k];
        true
    }

    /// Pointer went up
    pub fn gesture_end(&mut self) {
        self.gesture_end_at(Instant::now());
    }

    /// Pointer went up at `now`
    ///
    /// Seeds momentum from the smoothed velocity and schedules the first
    /// decay tick for `now`.
    pub fn gesture_end_at(&mut self, now: Instant) {
        if self.phase != DragPhase::Dragging {
            return;
        }

        let scale = self.params.release_scale;
        self.momentum = [self.velocity[0] * scale, self.velocity[1] * scale];
        self.last_move = None;
        self.decay_ticks = 0;

        if self.momentum_stopped() {
            self.momentum = [0.0; 2];
            self.phase = DragPhase::Idle;
            log::debug!("Drag released without momentum");
            return;
        }

        self.phase = DragPhase::Decelerating;
        self.ticker.start(now);
        log::debug!("Drag released; coasting with momentum {:?}", self.momentum);
    }

    /// Apply one decay step
    ///
    /// Returns `false` (and changes nothing) unless decelerating.
    pub fn decay_tick(&mut self) -> bool {
        if self.phase != DragPhase::Decelerating {
            return false;
        }

        self.angles += self.momentum;
        let rate = self.params.decay_rate;
        self.momentum = [self.momentum[0] * rate, self.momentum[1] * rate];
        self.decay_ticks += 1;

        if self.momentum_stopped() {
            log::debug!("Momentum exhausted after {} ticks", self.decay_ticks);
            self.momentum = [0.0; 2];
            self.phase = DragPhase::Idle;
            self.ticker.cancel();
        }
        true
    }

    /// Run every decay tick due at `now`; returns how many were applied
    pub fn advance(&mut self, now: Instant) -> u32 {
        if self.phase != DragPhase::Decelerating {
            self.ticker.cancel();
            return 0;
        }

        let due = self.ticker.due_ticks(now);
        let mut applied = 0;
        for _ in 0..due {
            if !self.decay_tick() {
                break;
            }
            applied += 1;
        }
        applied
    }

    /// Stop any coast immediately, keeping the current angles
    pub fn cancel_deceleration(&mut self) {
        self.ticker.cancel();
        self.momentum = [0.0; 2];
        self.velocity = [0.0; 2];
        self.last_move = None;
        self.phase = DragPhase::Idle;
    }

    /// Return to zero angles and Idle
    pub fn reset(&mut self) {
        self.cancel_deceleration();
        self.angles = AngleState::ZERO;
    }

    fn momentum_stopped(&self) -> bool {
        let threshold = self.params.stop_threshold;
        self.momentum[0].abs() < threshold && self.momentum[1].abs() < threshold
    }
}

impl AngleSource for DragInertia {
    fn angles(&self) -> AngleState {
        self.angles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Drag 100 px right over 10 ms and release
    fn fling(drag: &mut DragInertia, t0: Instant) {
        drag.gesture_start_at(t0);
        drag.gesture_move_at(100.0, 0.0, t0 + ms(10));
        drag.gesture_end_at(t0 + ms(10));
    }

    #[test]
    fn test_starts_idle() {
        let drag = DragInertia::default();
        assert_eq!(drag.phase(), DragPhase::Idle);
        assert_eq!(drag.angles(), AngleState::ZERO);
    }

    #[test]
    fn test_move_accumulates_angle() {
        let mut drag = DragInertia::default();
        let t0 = Instant::now();
        drag.gesture_start_at(t0);
        assert!(drag.gesture_move_at(10.0, -20.0, t0 + ms(5)));
        let a = drag.angles();
        assert!((a.xw - 0.05).abs() < 1e-6);
        assert!((a.yz + 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_velocity_is_smoothed() {
        let mut drag = DragInertia::default();
        let t0 = Instant::now();
        drag.gesture_start_at(t0);
        drag.gesture_move_at(100.0, 0.0, t0 + ms(10));
        // v = 100 * 0.005 / 10 = 0.05; smoothed = 0.7 * 0.05 + 0.3 * 0
        assert!((drag.velocity()[0] - 0.035).abs() < 1e-6);
        drag.gesture_move_at(100.0, 0.0, t0 + ms(20));
        // 0.7 * 0.05 + 0.3 * 0.035
        assert!((drag.velocity()[0] - 0.0455).abs() < 1e-6);
    }

    #[test]
    fn test_zero_elapsed_is_floored() {
        let mut drag = DragInertia::default();
        let t0 = Instant::now();
        drag.gesture_start_at(t0);
        drag.gesture_move_at(10.0, 10.0, t0);
        let v = drag.velocity();
        assert!(v[0].is_finite() && v[1].is_finite());
        // Δt floored to 1 ms: 0.7 * 10 * 0.005 / 1
        assert!((v[0] - 0.035).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_order_timestamp_is_floored() {
        let mut drag = DragInertia::default();
        let t0 = Instant::now() + ms(100);
        drag.gesture_start_at(t0);
        drag.gesture_move_at(10.0, 0.0, t0 - ms(50));
        assert!(drag.velocity()[0].is_finite());
    }

    #[test]
    fn test_move_ignored_when_not_dragging() {
        let mut drag = DragInertia::default();
        assert!(!drag.gesture_move_at(10.0, 10.0, Instant::now()));
        assert_eq!(drag.angles(), AngleState::ZERO);
    }

    #[test]
    fn test_release_seeds_momentum() {
        let mut drag = DragInertia::default();
        fling(&mut drag, Instant::now());
        assert_eq!(drag.phase(), DragPhase::Decelerating);
        assert!((drag.momentum()[0] - 0.0315).abs() < 1e-6);
        assert_eq!(drag.momentum()[1], 0.0);
    }

    #[test]
    fn test_release_without_motion_goes_idle() {
        let mut drag = DragInertia::default();
        let t0 = Instant::now();
        drag.gesture_start_at(t0);
        drag.gesture_end_at(t0 + ms(100));
        assert_eq!(drag.phase(), DragPhase::Idle);
        assert!(drag.next_deadline().is_none());
    }

    #[test]
    fn test_decay_is_monotonic_and_terminates() {
        let mut drag = DragInertia::default();
        fling(&mut drag, Instant::now());

        let bound = drag.params().ticks_to_stop(drag.momentum()[0]);
        assert!(bound > 0 && bound < 10_000);

        let mut prev = drag.momentum()[0].abs();
        let mut ticks = 0;
        while drag.decay_tick() {
            ticks += 1;
            let m = drag.momentum()[0].abs();
            if drag.phase() == DragPhase::Decelerating {
                assert!(m < prev, "momentum grew at tick {}", ticks);
            }
            prev = m;
            // f32 rounding may shift the stop by a tick either way
            assert!(ticks <= bound + 2, "no stop within {} ticks", bound);
        }
        assert_eq!(drag.phase(), DragPhase::Idle);
        assert!(ticks + 2 >= bound);
        assert!(drag.next_deadline().is_none());
    }

    #[test]
    fn test_decay_adds_momentum_to_angle() {
        let mut drag = DragInertia::default();
        fling(&mut drag, Instant::now());
        let before = drag.angles().xw;
        let m = drag.momentum()[0];
        drag.decay_tick();
        assert!((drag.angles().xw - (before + m)).abs() < 1e-6);
        assert!((drag.momentum()[0] - m * 0.999).abs() < 1e-7);
    }

    #[test]
    fn test_advance_runs_due_ticks() {
        let mut drag = DragInertia::default();
        let t0 = Instant::now();
        fling(&mut drag, t0);
        let release = t0 + ms(10);
        // First tick is due on release, then every 16 ms
        assert_eq!(drag.advance(release), 1);
        assert_eq!(drag.advance(release + ms(8)), 0);
        assert_eq!(drag.advance(release + ms(32)), 2);
    }

    #[test]
    fn test_new_gesture_cancels_decay() {
        let mut drag = DragInertia::default();
        let t0 = Instant::now();
        fling(&mut drag, t0);
        drag.advance(t0 + ms(10));

        drag.gesture_start_at(t0 + ms(20));
        let frozen = drag.angles();
        assert_eq!(drag.phase(), DragPhase::Dragging);
        assert_eq!(drag.momentum(), [0.0, 0.0]);
        assert!(drag.next_deadline().is_none());

        // No tick may fire after the new gesture started
        assert_eq!(drag.advance(t0 + ms(500)), 0);
        assert!(!drag.decay_tick());
        assert_eq!(drag.angles(), frozen);
    }

    #[test]
    fn test_cancel_deceleration_keeps_angles() {
        let mut drag = DragInertia::default();
        let t0 = Instant::now();
        fling(&mut drag, t0);
        drag.advance(t0 + ms(10));
        let held = drag.angles();
        drag.cancel_deceleration();
        drag.cancel_deceleration();
        assert_eq!(drag.phase(), DragPhase::Idle);
        assert_eq!(drag.advance(t0 + ms(100)), 0);
        assert_eq!(drag.angles(), held);
    }

    #[test]
    fn test_reset() {
        let mut drag = DragInertia::default();
        fling(&mut drag, Instant::now());
        drag.reset();
        assert_eq!(drag.angles(), AngleState::ZERO);
        assert_eq!(drag.phase(), DragPhase::Idle);
    }

    #[test]
    fn test_ticks_to_stop() {
        let params = DragParams::default();
        assert_eq!(params.ticks_to_stop(0.0), 0);
        assert_eq!(params.ticks_to_stop(5e-5), 0);
        // ln(1e-4 / 0.01) / ln(0.999) ≈ 4603
        let n = params.ticks_to_stop(0.01);
        assert!((4600..4610).contains(&n), "got {}", n);
    }

    /// Decay until Idle, failing after `limit` ticks
    fn coast_ticks(drag: &mut DragInertia, limit: u32) {
        let mut ticks = 0;
        while drag.decay_tick() {
            ticks += 1;
            assert!(ticks <= limit, "still coasting after {} ticks", limit);
        }
    }

    #[test]
    fn test_zero_stop_threshold_still_stops() {
        let mut drag = DragInertia::new(DragParams {
            stop_threshold: 0.0,
            ..Default::default()
        });
        assert_eq!(drag.params().stop_threshold, MIN_STOP_THRESHOLD);

        fling(&mut drag, Instant::now());
        let bound = drag.params().ticks_to_stop(drag.momentum()[0]);
        assert!(bound < 100_000, "got {}", bound);
        // Rounding drift over a long coast can move the stop a few ticks
        coast_ticks(&mut drag, bound + 16);
        assert_eq!(drag.phase(), DragPhase::Idle);
        assert_eq!(drag.momentum(), [0.0, 0.0]);
    }

    #[test]
    fn test_negative_and_nan_stop_threshold() {
        let negative = DragInertia::new(DragParams {
            stop_threshold: -1.0,
            ..Default::default()
        });
        assert_eq!(negative.params().stop_threshold, MIN_STOP_THRESHOLD);

        let nan = DragInertia::new(DragParams {
            stop_threshold: f32::NAN,
            ..Default::default()
        });
        assert_eq!(nan.params().stop_threshold, DragParams::default().stop_threshold);
    }

    #[test]
    fn test_decay_rate_outside_unit_interval_is_replaced() {
        for rate in [1.0, 1.5, 0.0, -0.5, f32::NAN] {
            let drag = DragInertia::new(DragParams {
                decay_rate: rate,
                ..Default::default()
            });
            assert_eq!(drag.params().decay_rate, 0.999, "rate {}", rate);
        }
    }

    #[test]
    fn test_non_finite_tuning_falls_back() {
        let params = DragParams {
            sensitivity: f32::NAN,
            velocity_blend: f32::INFINITY,
            release_scale: f32::NEG_INFINITY,
            min_move_interval_ms: f32::NAN,
            ..Default::default()
        }
        .sanitized();
        let defaults = DragParams::default();
        assert_eq!(params.sensitivity, defaults.sensitivity);
        assert_eq!(params.velocity_blend, defaults.velocity_blend);
        assert_eq!(params.release_scale, defaults.release_scale);
        assert_eq!(params.min_move_interval_ms, defaults.min_move_interval_ms);

        let mut drag = DragInertia::new(params);
        fling(&mut drag, Instant::now());
        assert!(drag.momentum()[0].is_finite());
    }

    #[test]
    fn test_sanitized_keeps_valid_params() {
        let params = DragParams {
            sensitivity: 0.01,
            decay_rate: 0.95,
            stop_threshold: 1e-3,
            ..Default::default()
        };
        assert_eq!(params.sanitized(), params);
        assert_eq!(DragInertia::new(params).params(), &params);
    }
}
