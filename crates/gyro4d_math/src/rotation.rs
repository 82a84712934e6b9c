//! Plane rotations in 4D
//!
//! In 4D, rotations happen in planes rather than around axes. The viewer
//! only ever turns the tesseract in two of the six planes: XW (driven by the
//! first angle) and YZ (driven by the second).
//!
//! XW and YZ share no axis, so the two rotations commute: rotating in XW and
//! then YZ gives the same point as YZ then XW.

use crate::Vec4;

/// The two rotation planes used by the viewer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotationPlane {
    /// XW plane - mixes x with the 4th dimension
    XW,
    /// YZ plane - standard 3D roll
    YZ,
}

impl Vec4 {
    /// Rotate this point by `angle` radians within a single plane
    ///
    /// For the plane spanned by axes (a, b):
    /// `a' = a·cos θ − b·sin θ`, `b' = a·sin θ + b·cos θ`.
    /// The other two coordinates are untouched.
    #[inline]
    pub fn rotated_in_plane(self, plane: RotationPlane, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        match plane {
            RotationPlane::XW => Self::new(
                self.x * cos - self.w * sin,
                self.y,
                self.z,
                self.x * sin + self.w * cos,
            ),
            RotationPlane::YZ => Self::new(
                self.x,
                self.y * cos - self.z * sin,
                self.y * sin + self.z * cos,
                self.w,
            ),
        }
    }
}

/// Apply the XW rotation by `angle_xw`, then the YZ rotation by `angle_yz`
///
/// The YZ step reads y and z straight from the input, since the XW step
/// leaves them alone.
#[inline]
pub fn rotate_xw_yz(v: Vec4, angle_xw: f32, angle_yz: f32) -> Vec4 {
    v.rotated_in_plane(RotationPlane::XW, angle_xw)
        .rotated_in_plane(RotationPlane::YZ, angle_yz)
}
