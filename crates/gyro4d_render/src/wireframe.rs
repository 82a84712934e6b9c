//! Rotation & projection of the tesseract wireframe
//!
//! Per frame: rotate every vertex in the XW and YZ planes, project 4D -> 3D
//! -> screen, then pair the projected points up along the edge list.
//! The projector holds no per-frame state; it reads an angle snapshot and the
//! immutable geometry, so it can be called from anywhere without locking.

use gyro4d_input::AngleState;
use gyro4d_math::{
    rotate_xw_yz, project_to_screen,
    tesseract::VERTEX_COUNT,
    ScreenPoint, Tesseract4D, ViewerDistances, WireframeShape4D,
};

use crate::error::RenderError;

/// One line to draw, in device pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LineSegment {
    pub start: ScreenPoint,
    pub end: ScreenPoint,
}

impl LineSegment {
    pub fn new(start: ScreenPoint, end: ScreenPoint) -> Self {
        Self { start, end }
    }

    /// Length in pixels
    pub fn length(&self) -> f32 {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.start.is_finite() && self.end.is_finite()
    }
}

/// How segments are stroked
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineStyle {
    /// RGBA color
    pub color: [f32; 4],
    /// Stroke width in pixels
    pub width: f32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0, 1.0],
            width: 6.0,
        }
    }
}

/// Output of one projection pass
#[derive(Clone, Debug)]
pub struct ProjectedFrame {
    /// Projected vertices, in vertex index order
    pub points: [ScreenPoint; VERTEX_COUNT],
    /// One segment per edge, in edge order
    pub segments: Vec<LineSegment>,
}

/// Draws a list of segments
///
/// The renderer decides what the pixels look like; the core only hands it
/// geometry and a style.
pub trait SegmentRenderer {
    fn draw(&mut self, segments: &[LineSegment], style: &LineStyle) -> Result<(), RenderError>;
}

/// Stateless rotate-and-project pipeline
#[derive(Clone, Copy, Debug, Default)]
pub struct WireframeProjector {
    distances: ViewerDistances,
}

impl WireframeProjector {
    pub fn new(distances: ViewerDistances) -> Self {
        Self { distances }
    }

    #[inline]
    pub fn distances(&self) -> ViewerDistances {
        self.distances
    }

    /// Rotate and project every vertex
    pub fn project_points(
        &self,
        tesseract: &Tesseract4D,
        angles: AngleState,
        center: ScreenPoint,
    ) -> [ScreenPoint; VERTEX_COUNT] {
        let mut points = [ScreenPoint::default(); VERTEX_COUNT];
        for (point, vertex) in points.iter_mut().zip(tesseract.vertex_array().iter()) {
            let rotated = rotate_xw_yz(*vertex, angles.xw, angles.yz);
            *point = project_to_screen(rotated, self.distances, center);
        }
        points
    }

    /// Project the tesseract and build its edge segments
    pub fn project(
        &self,
        tesseract: &Tesseract4D,
        angles: AngleState,
        center: ScreenPoint,
    ) -> ProjectedFrame {
        let points = self.project_points(tesseract, angles, center);
        let segments = tesseract
            .edges()
            .iter()
            .map(|edge| LineSegment::new(points[edge.i], points[edge.j]))
            .collect();
        ProjectedFrame { points, segments }
    }
}
