//! Indexed triangle meshes with shared vertex attributes.

use crate::math::{Point, Point2, Real, Vector};
use crate::shape::VertexData;

/// An inconsistency found while validating an indexed triangle mesh.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum MeshValidationError {
    /// The per-vertex attribute arrays do not all have the same length.
    #[error("mismatched attribute lengths: {vertices} positions, {uvs} uvs, {normals} normals.")]
    MismatchedAttributes {
        /// Number of vertex positions.
        vertices: usize,
        /// Number of texture coordinates.
        uvs: usize,
        /// Number of vertex normals.
        normals: usize,
    },
    /// A sub-mesh index list does not describe whole triangles.
    #[error("the index list of sub-mesh {submesh} has {count} entries, which is not a multiple of 3.")]
    IndicesNotTriplets {
        /// The offending sub-mesh.
        submesh: usize,
        /// Length of its index list.
        count: usize,
    },
    /// A sub-mesh references a vertex that does not exist.
    #[error("sub-mesh {submesh} references vertex {index} but the mesh has {num_vertices} vertices.")]
    IndexOutOfBounds {
        /// The offending sub-mesh.
        submesh: usize,
        /// The out-of-bounds index.
        index: u32,
        /// Number of vertices in the attribute arrays.
        num_vertices: usize,
    },
}

/// An indexed triangle mesh with one triangle index list per sub-mesh.
///
/// All sub-meshes (material slots) share the same `vertices`/`uvs`/`normals`
/// arrays; each sub-mesh owns a flat index list describing its triangles as
/// consecutive index triplets, winding order encoding the face normal
/// (`cross(b - a, c - a)`).
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexedMesh {
    /// The vertex positions, shared by all sub-meshes.
    pub vertices: Vec<Point<Real>>,
    /// The texture coordinates, one per vertex.
    pub uvs: Vec<Point2<Real>>,
    /// The vertex normals, one per vertex.
    pub normals: Vec<Vector<Real>>,
    /// The flat triangle index lists, one per sub-mesh.
    pub submeshes: Vec<Vec<u32>>,
}

impl IndexedMesh {
    /// Creates an indexed mesh after validating its buffers.
    pub fn new(
        vertices: Vec<Point<Real>>,
        uvs: Vec<Point2<Real>>,
        normals: Vec<Vector<Real>>,
        submeshes: Vec<Vec<u32>>,
    ) -> Result<IndexedMesh, MeshValidationError> {
        let result = IndexedMesh {
            vertices,
            uvs,
            normals,
            submeshes,
        };
        result.validate()?;
        Ok(result)
    }

    /// Checks that the attribute arrays agree in length, that every
    /// sub-mesh index list groups into whole triangles, and that every
    /// index is in bounds.
    pub fn validate(&self) -> Result<(), MeshValidationError> {
        if self.uvs.len() != self.vertices.len() || self.normals.len() != self.vertices.len() {
            return Err(MeshValidationError::MismatchedAttributes {
                vertices: self.vertices.len(),
                uvs: self.uvs.len(),
                normals: self.normals.len(),
            });
        }

        for (submesh, indices) in self.submeshes.iter().enumerate() {
            if indices.len() % 3 != 0 {
                return Err(MeshValidationError::IndicesNotTriplets {
                    submesh,
                    count: indices.len(),
                });
            }

            if let Some(&index) = indices.iter().find(|i| **i as usize >= self.vertices.len()) {
                return Err(MeshValidationError::IndexOutOfBounds {
                    submesh,
                    index,
                    num_vertices: self.vertices.len(),
                });
            }
        }

        Ok(())
    }

    /// The number of sub-meshes (material slots).
    #[inline]
    pub fn num_submeshes(&self) -> usize {
        self.submeshes.len()
    }

    /// The total number of triangles across all sub-meshes.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.submeshes.iter().map(|indices| indices.len() / 3).sum()
    }

    /// The full attribute tuple of the `index`-th vertex.
    #[inline]
    pub fn vertex_data(&self, index: u32) -> VertexData {
        let i = index as usize;
        VertexData::new(self.vertices[i], self.uvs[i], self.normals[i])
    }

    /// Iterates over the index triplets of one sub-mesh.
    ///
    /// A trailing partial triplet, which [`Self::validate`] rejects, is
    /// silently dropped here.
    #[inline]
    pub fn submesh_triangles(&self, submesh: usize) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.submeshes[submesh]
            .chunks_exact(3)
            .map(|idx| [idx[0], idx[1], idx[2]])
    }
}
