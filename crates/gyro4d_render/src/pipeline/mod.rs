//! Rendering pipeline components
//!
//! CPU-side line stroking plus the render pipeline that draws the result.

pub mod types;
pub mod line_pipeline;

pub use types::{
    LineVertex, MAX_SEGMENTS, VERTICES_PER_SEGMENT,
    build_line_vertices, pixel_to_ndc, segment_quad,
};

pub use line_pipeline::{LinePipeline, clear_color};
