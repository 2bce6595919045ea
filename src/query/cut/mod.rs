//! Plane-based mesh bisection and its diagnostics.

pub use self::cut_mesh::{CutError, CutResult};
pub use self::diagnostics::{CutDiagnostics, MissedIntersection, WindingMismatch};

mod cap;
mod cut_mesh;
mod diagnostics;
