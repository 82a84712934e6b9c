//! Wireframe Rendering Library
//!
//! Turns the tesseract plus an angle snapshot into screen-space line
//! segments, and draws those segments with wgpu.
//!
//! ## Key Components
//!
//! - [`wireframe::WireframeProjector`] - rotate, project and pair up vertices
//! - [`wireframe::SegmentRenderer`] - anything that can draw segments
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`pipeline::LinePipeline`] - stroked lines as screen-space quads
//! - [`renderer::WgpuLineRenderer`] - the GPU `SegmentRenderer`

pub mod error;
pub mod wireframe;
pub mod context;
pub mod pipeline;
pub mod renderer;

pub use error::RenderError;
pub use wireframe::{LineSegment, LineStyle, ProjectedFrame, SegmentRenderer, WireframeProjector};
pub use renderer::WgpuLineRenderer;

// Re-export core types for convenience
pub use gyro4d_math::{ScreenPoint, Tesseract4D, ViewerDistances};
pub use gyro4d_input::AngleState;
