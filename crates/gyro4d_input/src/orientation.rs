//! Device orientation from a rotation-vector reading
//!
//! Rotation-vector sensors report the device attitude as the vector part of a
//! unit quaternion, `(x, y, z)`, optionally followed by the scalar part `w`.
//! This module turns such a reading into azimuth/pitch/roll the way mobile
//! platforms do: quaternion -> 3x3 rotation matrix -> Euler angles.

use crate::angles::AngleState;

/// Device attitude in radians
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Orientation {
    /// Rotation about -Z (compass heading), in [-π, π]
    pub azimuth: f32,
    /// Rotation about X, in [-π/2, π/2]
    pub pitch: f32,
    /// Rotation about Y, in [-π, π]
    pub roll: f32,
}

impl Orientation {
    pub fn new(azimuth: f32, pitch: f32, roll: f32) -> Self {
        Self { azimuth, pitch, roll }
    }

    /// Decode a rotation-vector reading
    ///
    /// `values` holds `x, y, z` and optionally `w`. When `w` is missing it is
    /// recovered from the unit-length constraint (clamped at zero).
    /// Returns `None` with fewer than three components.
    pub fn from_rotation_vector(values: &[f32]) -> Option<Self> {
        if values.len() < 3 {
            return None;
        }
        let (q1, q2, q3) = (values[0], values[1], values[2]);
        let q0 = match values.get(3) {
            Some(&w) => w,
            None => {
                let w2 = 1.0 - q1 * q1 - q2 * q2 - q3 * q3;
                if w2 > 0.0 { w2.sqrt() } else { 0.0 }
            }
        };

        let m = rotation_matrix(q0, q1, q2, q3);
        Some(Self::from_rotation_matrix(&m))
    }

    /// Extract Euler angles from a row-major 3x3 rotation matrix
    pub fn from_rotation_matrix(m: &[f32; 9]) -> Self {
        Self {
            azimuth: m[1].atan2(m[4]),
            pitch: (-m[7]).clamp(-1.0, 1.0).asin(),
            roll: (-m[6]).atan2(m[8]),
        }
    }

    /// Rotation angles driven by this attitude: pitch turns XW, roll turns YZ
    #[inline]
    pub fn to_angles(&self) -> AngleState {
        AngleState::new(self.pitch, self.roll)
    }
}

/// Row-major rotation matrix of the unit quaternion `(q0; q1, q2, q3)`
fn rotation_matrix(q0: f32, q1: f32, q2: f32, q3: f32) -> [f32; 9] {
    let sq_q1 = 2.0 * q1 * q1;
    let sq_q2 = 2.0 * q2 * q2;
    let sq_q3 = 2.0 * q3 * q3;
    let q1_q2 = 2.0 * q1 * q2;
    let q3_q0 = 2.0 * q3 * q0;
    let q1_q3 = 2.0 * q1 * q3;
    let q2_q0 = 2.0 * q2 * q0;
    let q2_q3 = 2.0 * q2 * q3;
    let q1_q0 = 2.0 * q1 * q0;

    [
        1.0 - sq_q2 - sq_q3, q1_q2 - q3_q0, q1_q3 + q2_q0,
        q1_q2 + q3_q0, 1.0 - sq_q1 - sq_q3, q2_q3 - q1_q0,
        q1_q3 - q2_q0, q2_q3 + q1_q0, 1.0 - sq_q1 - sq_q2,
    ]
}
