//! Input mapping from raw events to semantic actions
//!
//! Maps keyboard and mouse input to high-level actions like ToggleMode, Exit, etc.
//! Pointer motion is NOT mapped here - it goes through [`CursorTracker`] as deltas.

use std::f32::consts::FRAC_PI_2;

use gyro4d_input::Orientation;
use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

/// Actions triggered by discrete input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Switch between sensor and drag mode (Tab or M)
    ToggleMode,
    /// Zero the active angle source (R key)
    ResetView,
    /// Toggle fullscreen mode (F key)
    ToggleFullscreen,
    /// Exit application (Escape)
    Exit,
    /// Left button pressed
    GestureStart,
    /// Left button released
    GestureEnd,
}

/// Maps raw input events to semantic actions
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Returns `Some(action)` for bound keys, `None` otherwise
    pub fn map_keyboard(key: KeyCode, state: ElementState) -> Option<InputAction> {
        // Only handle key presses, not releases
        if state != ElementState::Pressed {
            return None;
        }

        match key {
            KeyCode::Tab | KeyCode::KeyM => Some(InputAction::ToggleMode),
            KeyCode::KeyR => Some(InputAction::ResetView),
            KeyCode::KeyF => Some(InputAction::ToggleFullscreen),
            KeyCode::Escape => Some(InputAction::Exit),
            _ => None,
        }
    }

    /// Map mouse button to a gesture boundary
    ///
    /// Only the left button drags.
    pub fn map_mouse_button(button: MouseButton, state: ElementState) -> Option<InputAction> {
        if button != MouseButton::Left {
            return None;
        }
        match state {
            ElementState::Pressed => Some(InputAction::GestureStart),
            ElementState::Released => Some(InputAction::GestureEnd),
        }
    }

    /// Stand-in device tilt from a cursor position
    ///
    /// The window centre is level; the edges are a quarter turn. Vertical
    /// offset gives pitch, horizontal offset gives roll, both clamped to
    /// [-π/2, π/2].
    pub fn cursor_tilt(x: f64, y: f64, width: u32, height: u32) -> Orientation {
        let half_w = (width.max(1) as f64) * 0.5;
        let half_h = (height.max(1) as f64) * 0.5;
        let nx = ((x - half_w) / half_w).clamp(-1.0, 1.0) as f32;
        let ny = ((y - half_h) / half_h).clamp(-1.0, 1.0) as f32;
        Orientation::new(0.0, ny * FRAC_PI_2, nx * FRAC_PI_2)
    }
}

/// Turns absolute cursor positions into per-event deltas
#[derive(Debug, Default, Clone, Copy)]
pub struct CursorTracker {
    last: Option<(f64, f64)>,
}

impl CursorTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a position, returning the delta from the previous one
    ///
    /// The first position after creation or [`forget`](Self::forget) has no delta.
    pub fn moved_to(&mut self, x: f64, y: f64) -> Option<(f32, f32)> {
        let delta = self.last.map(|(lx, ly)| ((x - lx) as f32, (y - ly) as f32));
        self.last = Some((x, y));
        delta
    }

    /// Last known position
    pub fn position(&self) -> Option<(f64, f64)> {
        self.last
    }

    /// Drop the last position (cursor left the window)
    pub fn forget(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_exits() {
        let action = InputMapper::map_keyboard(KeyCode::Escape, ElementState::Pressed);
        assert_eq!(action, Some(InputAction::Exit));
    }

    #[test]
    fn test_mode_toggle_keys() {
        for key in [KeyCode::Tab, KeyCode::KeyM] {
            assert_eq!(
                InputMapper::map_keyboard(key, ElementState::Pressed),
                Some(InputAction::ToggleMode),
                "Key {:?} should toggle mode",
                key
            );
        }
    }

    #[test]
    fn test_unbound_keys_not_mapped() {
        for key in [KeyCode::KeyW, KeyCode::KeyA, KeyCode::Space] {
            let action = InputMapper::map_keyboard(key, ElementState::Pressed);
            assert_eq!(action, None, "Key {:?} should not be mapped", key);
        }
    }

    #[test]
    fn test_key_release_ignored() {
        let action = InputMapper::map_keyboard(KeyCode::Escape, ElementState::Released);
        assert_eq!(action, None);
    }

    #[test]
    fn test_special_keys() {
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::KeyR, ElementState::Pressed),
            Some(InputAction::ResetView)
        );
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::KeyF, ElementState::Pressed),
            Some(InputAction::ToggleFullscreen)
        );
    }

    #[test]
    fn test_left_button_gesture() {
        assert_eq!(
            InputMapper::map_mouse_button(MouseButton::Left, ElementState::Pressed),
            Some(InputAction::GestureStart)
        );
        assert_eq!(
            InputMapper::map_mouse_button(MouseButton::Left, ElementState::Released),
            Some(InputAction::GestureEnd)
        );
        assert_eq!(
            InputMapper::map_mouse_button(MouseButton::Right, ElementState::Pressed),
            None
        );
    }

    #[test]
    fn test_cursor_tilt_center_is_level() {
        let o = InputMapper::cursor_tilt(640.0, 360.0, 1280, 720);
        assert_eq!(o.pitch, 0.0);
        assert_eq!(o.roll, 0.0);
    }

    #[test]
    fn test_cursor_tilt_edges_and_clamp() {
        let o = InputMapper::cursor_tilt(1280.0, 0.0, 1280, 720);
        assert!((o.roll - FRAC_PI_2).abs() < 1e-6);
        assert!((o.pitch + FRAC_PI_2).abs() < 1e-6);

        // Outside the window still clamps to a quarter turn
        let o = InputMapper::cursor_tilt(-5000.0, 5000.0, 1280, 720);
        assert!((o.roll + FRAC_PI_2).abs() < 1e-6);
        assert!((o.pitch - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_cursor_tracker_deltas() {
        let mut tracker = CursorTracker::new();
        assert_eq!(tracker.moved_to(10.0, 10.0), None);
        assert_eq!(tracker.moved_to(15.0, 7.0), Some((5.0, -3.0)));
        tracker.forget();
        assert_eq!(tracker.moved_to(0.0, 0.0), None);
        assert_eq!(tracker.position(), Some((0.0, 0.0)));
    }
}
