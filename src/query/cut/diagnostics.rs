//! Debugging side-channel of the cut operation.

use crate::math::{Point, Real, Vector};
use crate::shape::CutPlane;

/// A sub-triangle whose recomputed winding disagreed with its source
/// triangle even after swapping two of its vertices.
#[derive(Clone, Debug)]
pub struct WindingMismatch {
    /// The sub-mesh the source triangle belongs to.
    pub submesh: usize,
    /// The vertices of the source triangle.
    pub triangle: [Point<Real>; 3],
    /// The plane-side classification of the source triangle's vertices
    /// (`true` = above).
    pub sides: [bool; 3],
    /// The vertices of the emitted sub-triangle, kept with its best-effort
    /// winding.
    pub sub_triangle: [Point<Real>; 3],
    /// The scaled normal of the source triangle.
    pub original_cross: Vector<Real>,
    /// The scaled normal of the sub-triangle as first emitted.
    pub first_cross: Vector<Real>,
    /// The scaled normal of the sub-triangle after the flip attempt.
    pub flipped_cross: Vector<Real>,
}

/// An edge that was expected to cross the plane but for which no
/// intersection could be computed.
#[derive(Copy, Clone, Debug)]
pub struct MissedIntersection {
    /// The sub-mesh of the triangle being split.
    pub submesh: usize,
    /// The edge's start point (the triangle's lone vertex).
    pub start: Point<Real>,
    /// The edge's end point.
    pub end: Point<Real>,
}

/// A read-only record of one cut: its plane, its recoverable anomalies and
/// the cap loops it stitched.
///
/// Diagnostics are returned alongside the cut result and are never required
/// for correct operation; they exist so visualization and tooling layers
/// can inspect what a cut did.
#[derive(Clone, Debug)]
pub struct CutDiagnostics {
    /// The cutting plane, in mesh-local space.
    pub plane: CutPlane,
    /// `true` iff any recoverable anomaly was recorded during the cut.
    pub errored: bool,
    /// The first winding disagreement encountered, if any.
    pub winding_mismatch: Option<WindingMismatch>,
    /// Every edge whose expected plane intersection could not be computed.
    pub missed_intersections: Vec<MissedIntersection>,
    /// The ordered vertices of every stitched cap loop.
    pub cap_loops: Vec<Vec<Point<Real>>>,
    /// The sub-meshes whose cross-section consisted of more than one loop.
    pub multi_loop_submeshes: Vec<usize>,
}

impl CutDiagnostics {
    pub(crate) fn new(plane: CutPlane) -> Self {
        CutDiagnostics {
            plane,
            errored: false,
            winding_mismatch: None,
            missed_intersections: Vec::new(),
            cap_loops: Vec::new(),
            multi_loop_submeshes: Vec::new(),
        }
    }
}
