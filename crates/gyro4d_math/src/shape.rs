//! Shape traits and primitives for 4D wireframes
//!
//! Shapes are pure geometric data - no colors, stroke widths, or rendering info.

use crate::Vec4;

/// An edge of a wireframe, defined by two vertex indices
///
/// Edges are unordered; the constructor stores them with `i < j`
/// so that equal edges compare equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    /// Lower vertex index
    pub i: usize,
    /// Higher vertex index
    pub j: usize,
}

impl Edge {
    /// Create a new edge, normalising the index order
    ///
    /// Returns `None` for a degenerate edge (`a == b`).
    #[inline]
    pub fn new(a: usize, b: usize) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { i: a, j: b }),
            std::cmp::Ordering::Greater => Some(Self { i: b, j: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Whether this edge touches the given vertex
    #[inline]
    pub fn touches(&self, vertex: usize) -> bool {
        self.i == vertex || self.j == vertex
    }
}

/// Trait for 4D shapes drawn as wireframes
///
/// A WireframeShape4D provides:
/// - Vertices: The 4D points that define the shape
/// - Edges: Index pairs into the vertex list
pub trait WireframeShape4D: Send + Sync {
    /// Get the vertices of this shape
    fn vertices(&self) -> &[Vec4];

    /// Get the edges of this shape
    fn edges(&self) -> &[Edge];

    /// Get the number of vertices
    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertices().len()
    }

    /// Get the number of edges
    #[inline]
    fn edge_count(&self) -> usize {
        self.edges().len()
    }

    /// Number of edges meeting at a vertex
    fn degree(&self, vertex: usize) -> usize {
        self.edges().iter().filter(|e| e.touches(vertex)).count()
    }
}
