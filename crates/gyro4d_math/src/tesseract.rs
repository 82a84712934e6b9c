//! Tesseract (4D Hypercube) geometry
//!
//! A tesseract has 16 vertices (all combinations of ±s for x,y,z,w)
//! and 32 edges. Two vertices share an edge exactly when they differ
//! in one coordinate, which makes the wireframe the 4-cube graph.

use crate::{Vec4, shape::{Edge, WireframeShape4D}};

/// Default half edge length, in device pixels before projection
pub const DEFAULT_HALF_SIZE: f32 = 100.0;

/// Number of tesseract vertices
pub const VERTEX_COUNT: usize = 16;

/// Number of tesseract edges
pub const EDGE_COUNT: usize = 32;

/// A tesseract (4D hypercube) - pure geometry without colors
///
/// Built once; the vertex and edge lists never change afterwards.
#[derive(Clone, Debug)]
pub struct Tesseract4D {
    /// Half the side length
    half_size: f32,
    /// The 16 vertices of the tesseract
    vertices: [Vec4; VERTEX_COUNT],
    /// Index pairs of vertices one coordinate apart
    edges: Vec<Edge>,
}

impl Tesseract4D {
    /// Create a new tesseract centered at origin
    ///
    /// # Arguments
    /// * `half_size` - Half the side length (the `s` in ±s)
    pub fn new(half_size: f32) -> Self {
        let (vertices, edges) = generate(half_size);
        Self {
            half_size,
            vertices,
            edges,
        }
    }

    /// Get the half-size (half the side length)
    #[inline]
    pub fn half_size(&self) -> f32 {
        self.half_size
    }

    /// Get the full size (side length)
    #[inline]
    pub fn size(&self) -> f32 {
        self.half_size * 2.0
    }

    /// The vertices as a fixed-size array
    #[inline]
    pub fn vertex_array(&self) -> &[Vec4; VERTEX_COUNT] {
        &self.vertices
    }

    /// Largest distance any vertex can reach from the origin within one
    /// rotation plane (`s·√2`)
    ///
    /// Both rotation planes mix two coordinates of magnitude `s`, so a
    /// rotated coordinate never exceeds this bound.
    #[inline]
    pub fn planar_extent(&self) -> f32 {
        self.half_size.abs() * std::f32::consts::SQRT_2
    }
}

impl Default for Tesseract4D {
    fn default() -> Self {
        Self::new(DEFAULT_HALF_SIZE)
    }
}

impl WireframeShape4D for Tesseract4D {
    fn vertices(&self) -> &[Vec4] {
        &self.vertices
    }

    fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

/// Generate the tesseract's vertices and edges
///
/// Vertices follow the nested product order over (x, y, z, w) with x
/// outermost, so vertex `i` has x = +s when bit 3 of `i` is set, y when
/// bit 2 is set, z for bit 1 and w for bit 0. Edges are listed in
/// lexicographic `(i, j)` order.
pub fn generate(half_size: f32) -> ([Vec4; VERTEX_COUNT], Vec<Edge>) {
    let signs = [-half_size, half_size];

    let mut vertices = [Vec4::ZERO; VERTEX_COUNT];
    let mut idx = 0;
    for &x in &signs {
        for &y in &signs {
            for &z in &signs {
                for &w in &signs {
                    vertices[idx] = Vec4::new(x, y, z, w);
                    idx += 1;
                }
            }
        }
    }

    let mut edges = Vec::with_capacity(EDGE_COUNT);
    for i in 0..VERTEX_COUNT {
        for j in (i + 1)..VERTEX_COUNT {
            if vertices[i].mismatch_count(vertices[j]) == 1 {
                edges.extend(Edge::new(i, j));
            }
        }
    }

    (vertices, edges)
}
