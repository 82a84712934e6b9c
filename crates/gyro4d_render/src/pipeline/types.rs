//! GPU-compatible vertex data for the line pipeline
//!
//! Segments are stroked on the CPU: each one becomes a quad of two
//! triangles, already in normalized device coordinates.

use bytemuck::{Pod, Zeroable};

use crate::wireframe::{LineSegment, LineStyle};

/// Most segments one frame can upload
pub const MAX_SEGMENTS: usize = 64;

/// Vertices emitted per segment (two triangles)
pub const VERTICES_PER_SEGMENT: usize = 6;

/// A stroked-line vertex
/// Layout: 24 bytes (must match line.wgsl VertexInput)
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    /// Position in normalized device coordinates
    pub position: [f32; 2],
    /// RGBA color
    pub color: [f32; 4],
}

/// Convert a pixel position to normalized device coordinates (y up)
#[inline]
pub fn pixel_to_ndc(x: f32, y: f32, viewport: (u32, u32)) -> [f32; 2] {
    let w = viewport.0.max(1) as f32;
    let h = viewport.1.max(1) as f32;
    [x / w * 2.0 - 1.0, 1.0 - y / h * 2.0]
}

/// Expand one segment into a quad `style.width` pixels wide
///
/// Returns `None` for zero-length or non-finite segments.
pub fn segment_quad(
    segment: &LineSegment,
    style: &LineStyle,
    viewport: (u32, u32),
) -> Option<[LineVertex; VERTICES_PER_SEGMENT]> {
    if !segment.is_finite() {
        return None;
    }
    let length = segment.length();
    if length <= f32::EPSILON {
        return None;
    }

    let (a, b) = (segment.start, segment.end);
    let half = style.width * 0.5;
    // Unit normal scaled to half the stroke width
    let nx = -(b.y - a.y) / length * half;
    let ny = (b.x - a.x) / length * half;

    let corner = |x: f32, y: f32| LineVertex {
        position: pixel_to_ndc(x, y, viewport),
        color: style.color,
    };
    let a0 = corner(a.x + nx, a.y + ny);
    let a1 = corner(a.x - nx, a.y - ny);
    let b0 = corner(b.x + nx, b.y + ny);
    let b1 = corner(b.x - nx, b.y - ny);

    Some([a0, a1, b0, b0, a1, b1])
}

/// Stroke every segment, up to [`MAX_SEGMENTS`]
pub fn build_line_vertices(
    segments: &[LineSegment],
    style: &LineStyle,
    viewport: (u32, u32),
) -> Vec<LineVertex> {
    if segments.len() > MAX_SEGMENTS {
        log::warn!("Dropping {} segments over the {} limit", segments.len() - MAX_SEGMENTS, MAX_SEGMENTS);
    }
    segments
        .iter()
        .take(MAX_SEGMENTS)
        .filter_map(|s| segment_quad(s, style, viewport))
        .flatten()
        .collect()
}
