use crate::math::{Point, Point2, Real, Vector};

/// Rounds a scalar to the grid of size `tolerance`.
///
/// Two scalars closer than `tolerance` map to the same or to adjacent grid
/// cells, which makes the result usable as a hash key consistent with
/// approximate equality.
#[inline]
pub fn quantize_real(value: Real, tolerance: Real) -> i64 {
    (value / tolerance).round() as i64
}

/// Rounds each component of a 2D point to the grid of size `tolerance`.
#[inline]
pub fn quantize_point2(point: &Point2<Real>, tolerance: Real) -> [i64; 2] {
    [
        quantize_real(point.x, tolerance),
        quantize_real(point.y, tolerance),
    ]
}

/// Rounds each component of a 3D point to the grid of size `tolerance`.
#[inline]
pub fn quantize_point3(point: &Point<Real>, tolerance: Real) -> [i64; 3] {
    quantize_vector3(&point.coords, tolerance)
}

/// Rounds each component of a 3D vector to the grid of size `tolerance`.
#[inline]
pub fn quantize_vector3(vector: &Vector<Real>, tolerance: Real) -> [i64; 3] {
    [
        quantize_real(vector.x, tolerance),
        quantize_real(vector.y, tolerance),
        quantize_real(vector.z, tolerance),
    ]
}
