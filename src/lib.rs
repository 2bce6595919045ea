/*!
cleave3d
========

**cleave3d** is a 3-dimensional mesh cutting library written with
the rust programming language. It bisects indexed triangle meshes with
arbitrary planes and stitches the resulting cross-sections closed.

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![doc(html_root_url = "https://docs.rs/cleave3d/0.1.0")]

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;
#[macro_use]
extern crate approx;
extern crate num_traits as num;

pub extern crate nalgebra as na;

pub mod query;
pub mod shape;
pub mod utils;

mod real {
    /// The scalar type used throughout this crate.
    #[cfg(feature = "f64")]
    pub use f64 as Real;

    /// The scalar type used throughout this crate.
    #[cfg(feature = "f32")]
    pub use f32 as Real;
}

/// Compilation flags dependent aliases for mathematical types.
#[cfg(feature = "dim3")]
pub mod math {
    pub use super::real::*;
    use na::U3;
    pub use na::{Isometry3, Point2, Point3, UnitVector3, Vector2, Vector3};

    /// The default tolerance used for geometric operations.
    pub const DEFAULT_EPSILON: Real = Real::EPSILON;

    /// The default tolerance used to classify vertices against a cutting
    /// plane and to collapse vertex attributes during reassembly.
    ///
    /// This is much coarser than [`DEFAULT_EPSILON`]: it has to absorb the
    /// round-off accumulated when the same cut point is reached through two
    /// different triangle edges.
    pub const DEFAULT_CUT_TOLERANCE: Real = 1.0e-4;

    /// The dimension of the space.
    pub const DIM: usize = 3;

    /// The dimension of the ambient space.
    pub type Dim = U3;

    /// The point type.
    pub use Point3 as Point;

    /// The vector type.
    pub use Vector3 as Vector;

    /// The unit vector type.
    pub use UnitVector3 as UnitVector;

    /// The transformation matrix type.
    pub use Isometry3 as Isometry;
}
