//! Mesh data and the cutting plane.

pub use self::cut_plane::CutPlane;
pub use self::indexed_mesh::{IndexedMesh, MeshValidationError};
pub use self::vertex_data::{QuantizedVertex, VertexData};

mod cut_plane;
mod indexed_mesh;
mod vertex_data;
