//! 4D Mathematics Library
//!
//! This crate provides the geometry and projection math behind the Gyro4D
//! tesseract viewer.
//!
//! ## Core Types
//!
//! - [`Vec4`] - 4D point with x, y, z, w components
//! - [`Vec3`] - 3D point produced by the 4D -> 3D projection
//! - [`ScreenPoint`] - 2D point in device pixels
//!
//! ## Shape Types
//!
//! - [`WireframeShape4D`] - Trait for 4D shapes drawn as vertices + edges
//! - [`Edge`] - A pair of vertex indices
//! - [`Tesseract4D`] - The 4D hypercube

mod vec4;
pub mod shape;
pub mod tesseract;
pub mod rotation;
pub mod projection;

pub use vec4::{Vec3, Vec4};
pub use shape::{Edge, WireframeShape4D};
pub use tesseract::Tesseract4D;
pub use rotation::{RotationPlane, rotate_xw_yz};
pub use projection::{
    ScreenPoint, ViewerDistances, PROJECTION_EPSILON,
    guard_divisor, project_4d_to_3d, project_3d_to_2d, project_to_screen,
};
