//! Various support utilities for the cutting pipeline.

pub use self::quantize::{quantize_point2, quantize_point3, quantize_real, quantize_vector3};

pub mod hashmap;
pub mod hashset;
mod quantize;
