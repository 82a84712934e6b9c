//! Perspective projection 4D -> 3D -> 2D
//!
//! Each stage divides by the distance between the point and a viewer placed
//! on the dropped axis: `factor = d / (d - coord)`.

use serde::{Serialize, Deserialize};

use crate::{Vec3, Vec4};

/// Smallest divisor magnitude allowed in a perspective division
pub const PROJECTION_EPSILON: f32 = 1e-4;

/// Default viewer distance for both projection stages
pub const DEFAULT_VIEWER_DISTANCE: f32 = 300.0;

/// 2D coordinate in device pixel space
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Viewer distances for the two perspective stages
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewerDistances {
    /// Distance of the 4D viewer along w
    pub d4: f32,
    /// Distance of the 3D viewer along z
    pub d3: f32,
}

impl Default for ViewerDistances {
    fn default() -> Self {
        Self {
            d4: DEFAULT_VIEWER_DISTANCE,
            d3: DEFAULT_VIEWER_DISTANCE,
        }
    }
}

impl ViewerDistances {
    pub fn new(d4: f32, d3: f32) -> Self {
        Self { d4, d3 }
    }

    /// Whether the divisors stay away from zero for every point whose rotated
    /// coordinates are bounded by `extent`
    ///
    /// Stage one needs `d4 > extent`. Stage two sees z scaled by at most
    /// `d4 / (d4 - extent)`, so it needs `d3` above that scaled extent.
    pub fn clears_extent(&self, extent: f32) -> bool {
        if self.d4 <= extent {
            return false;
        }
        let max_factor = self.d4 / (self.d4 - extent);
        self.d3 > extent * max_factor
    }
}

/// Clamp a perspective divisor away from zero, keeping its sign
///
/// Zero (of either sign) maps to `+PROJECTION_EPSILON`.
#[inline]
pub fn guard_divisor(divisor: f32) -> f32 {
    if divisor.abs() >= PROJECTION_EPSILON {
        return divisor;
    }
    log::trace!("Perspective divisor {} clamped to epsilon", divisor);
    if divisor < 0.0 {
        -PROJECTION_EPSILON
    } else {
        PROJECTION_EPSILON
    }
}

/// Project a 4D point to 3D with the viewer at distance `d4` along w
#[inline]
pub fn project_4d_to_3d(point: Vec4, d4: f32) -> Vec3 {
    let factor = d4 / guard_divisor(d4 - point.w);
    point.xyz() * factor
}

/// Project a 3D point to the screen with the viewer at distance `d3` along z,
/// then offset by `center`
#[inline]
pub fn project_3d_to_2d(point: Vec3, d3: f32, center: ScreenPoint) -> ScreenPoint {
    let factor = d3 / guard_divisor(d3 - point.z);
    ScreenPoint::new(point.x * factor + center.x, point.y * factor + center.y)
}

/// Both perspective stages in sequence
#[inline]
pub fn project_to_screen(point: Vec4, distances: ViewerDistances, center: ScreenPoint) -> ScreenPoint {
    project_3d_to_2d(project_4d_to_3d(point, distances.d4), distances.d3, center)
}
