//! The cutting plane shape.

use crate::math::{Isometry, Point, Real, UnitVector};

/// A plane used to bisect a mesh, expressed in the mesh's local space.
///
/// The plane contains every point `p` with `normal · p == bias`. Points with
/// a positive signed distance are on the side that becomes the detached
/// piece; points with a non-positive signed distance belong to the
/// remaining base.
#[derive(PartialEq, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CutPlane {
    /// The plane's unit normal.
    pub normal: UnitVector<Real>,
    /// The plane's offset along its normal.
    pub bias: Real,
}

impl CutPlane {
    /// Builds a cutting plane from its unit normal and its offset along the
    /// normal.
    #[inline]
    pub fn new(normal: UnitVector<Real>, bias: Real) -> CutPlane {
        CutPlane { normal, bias }
    }

    /// Builds the cutting plane with the given unit normal containing `point`.
    #[inline]
    pub fn from_point(normal: UnitVector<Real>, point: &Point<Real>) -> CutPlane {
        CutPlane {
            normal,
            bias: normal.dot(&point.coords),
        }
    }

    /// The signed distance from `point` to this plane.
    #[inline]
    pub fn signed_distance(&self, point: &Point<Real>) -> Real {
        self.normal.dot(&point.coords) - self.bias
    }

    /// Is `point` strictly on the positive side of this plane?
    ///
    /// Points exactly on the plane count as below, so every point is always
    /// attributed to exactly one side.
    #[inline]
    pub fn is_above(&self, point: &Point<Real>) -> bool {
        self.signed_distance(point) > 0.0
    }

    /// Intersects the segment from `start` to `end` with this plane.
    ///
    /// Returns the intersection point and its parameter `t` along the
    /// segment (`0` at `start`, `1` at `end`), or `None` if the segment is
    /// parallel to the plane or does not reach it.
    pub fn intersect_segment(
        &self,
        start: &Point<Real>,
        end: &Point<Real>,
    ) -> Option<(Point<Real>, Real)> {
        let dir = end - start;
        let denominator = self.normal.dot(&dir);

        if relative_eq!(denominator, 0.0) {
            return None;
        }

        let t = (self.bias - self.normal.dot(&start.coords)) / denominator;
        if !(0.0..=1.0).contains(&t) {
            return None;
        }

        Some((start + dir * t, t))
    }

    /// Transforms this plane by `pos`.
    ///
    /// To express a world-space plane in a mesh's local space, pass the
    /// inverse of the mesh's pose.
    pub fn transform_by(&self, pos: &Isometry<Real>) -> CutPlane {
        let normal = pos * self.normal;
        let point_in_plane = pos * Point::from(*self.normal * self.bias);
        CutPlane::from_point(normal, &point_in_plane)
    }
}
