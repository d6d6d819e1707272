//! Linear algebra for graph space.
//!
//! Vectors are row vectors and are multiplied on the left of a matrix:
//! `v' = v * M`, so `x' = x * m[0][0] + y * m[1][0] + ...`. Products compose
//! in reading order, `(v * a) * b == v * (a * b)`.

mod mat;
mod vec2;
mod vec3;

pub use mat::{Mat2x2, Mat3x3, Mat4x4};
pub use vec2::Vec2;
pub use vec3::Vec3;

#[cfg(test)]
pub(crate) fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "expected {b}, got {a}");
}
