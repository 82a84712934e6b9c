//! The angle pair that drives the tesseract rotation

use serde::{Serialize, Deserialize};

/// Rotation angles in radians
///
/// `xw` turns the tesseract in the XW plane, `yz` in the YZ plane.
/// Each angle source owns one of these; readers get a copy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AngleState {
    pub xw: f32,
    pub yz: f32,
}

impl AngleState {
    pub const ZERO: Self = Self { xw: 0.0, yz: 0.0 };

    #[inline]
    pub const fn new(xw: f32, yz: f32) -> Self {
        Self { xw, yz }
    }

    /// Whether both angles are finite
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.xw.is_finite() && self.yz.is_finite()
    }
}

impl std::ops::AddAssign<[f32; 2]> for AngleState {
    #[inline]
    fn add_assign(&mut self, delta: [f32; 2]) {
        self.xw += delta[0];
        self.yz += delta[1];
    }
}

/// Anything that exposes a current angle pair
///
/// Implemented by both input pipelines so the frame driver can read
/// whichever one is active without knowing which.
pub trait AngleSource {
    /// The angle pair at this instant
    fn angles(&self) -> AngleState;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zero() {
        assert_eq!(AngleState::default(), AngleState::ZERO);
    }

    #[test]
    fn test_add_assign_delta() {
        let mut a = AngleState::new(1.0, 2.0);
        a += [0.5, -1.0];
        assert_eq!(a, AngleState::new(1.5, 1.0));
    }

    #[test]
    fn test_is_finite() {
        assert!(AngleState::new(0.1, 0.2).is_finite());
        assert!(!AngleState::new(f32::NAN, 0.0).is_finite());
    }
}
