//! Vertex attribute tuples carried through a cut.

use crate::math::{Point, Point2, Real, Vector};
use crate::utils;

/// The full attribute tuple of one mesh vertex.
///
/// This is the unit the cutter classifies, interpolates and deduplicates:
/// two vertices with the same position but different UVs or normals (e.g.
/// along a texture seam or a hard edge) are distinct tuples and stay
/// distinct through reassembly.
#[derive(PartialEq, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VertexData {
    /// The vertex position, in the mesh's local space.
    pub position: Point<Real>,
    /// The texture coordinates.
    pub uv: Point2<Real>,
    /// The vertex normal.
    ///
    /// Not necessarily unit-length: normals produced by edge interpolation
    /// are linear blends of the endpoints' normals.
    pub normal: Vector<Real>,
}

impl VertexData {
    /// Creates a vertex attribute tuple.
    #[inline]
    pub fn new(position: Point<Real>, uv: Point2<Real>, normal: Vector<Real>) -> Self {
        VertexData {
            position,
            uv,
            normal,
        }
    }

    /// Linearly interpolates every attribute of `self` toward `other`.
    ///
    /// The interpolated normal is not renormalized.
    #[inline]
    pub fn lerp(&self, other: &VertexData, t: Real) -> VertexData {
        VertexData {
            position: Point::from(self.position.coords.lerp(&other.position.coords, t)),
            uv: Point2::from(self.uv.coords.lerp(&other.uv.coords, t)),
            normal: self.normal.lerp(&other.normal, t),
        }
    }

    /// The image of this tuple on the grid of size `tolerance`.
    ///
    /// Tuples whose attributes differ by less than the tolerance map to the
    /// same key, so hash-maps keyed by the result implement the approximate
    /// equality used for deduplication and cap adjacency.
    #[inline]
    pub fn quantized(&self, tolerance: Real) -> QuantizedVertex {
        QuantizedVertex {
            position: utils::quantize_point3(&self.position, tolerance),
            uv: utils::quantize_point2(&self.uv, tolerance),
            normal: utils::quantize_vector3(&self.normal, tolerance),
        }
    }
}

/// The grid-quantized image of a [`VertexData`].
///
/// Unlike the raw floating-point tuple this is `Eq + Hash`, with equality
/// consistent with the tolerance the key was built with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct QuantizedVertex {
    position: [i64; 3],
    uv: [i64; 2],
    normal: [i64; 3],
}
