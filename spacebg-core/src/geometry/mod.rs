//! Procedural geometry generators
//!
//! Every generator returns an indexed [`TriangleMesh`](crate::TriangleMesh)
//! with normals and texture coordinates filled in, counter-clockwise winding
//! when viewed from outside.

mod capsule;
mod circle;
mod rounded_box;

pub use capsule::capsule;
pub use circle::circle;
pub use rounded_box::rounded_box;

use crate::{Error, Result};

fn ensure_positive(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidData(format!("{} must be positive, got {}", name, value)))
    }
}

/// Append the two triangles of the grid quad whose lower-left corner is `a`
fn push_quad(faces: &mut Vec<[usize; 3]>, a: usize, row_stride: usize) {
    let b = a + 1;
    let c = a + row_stride;
    let d = c + 1;
    faces.push([a, b, d]);
    faces.push([a, d, c]);
}
