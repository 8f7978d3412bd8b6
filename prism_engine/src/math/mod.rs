//! Math support: vectors, 4x4 matrices and the camera
//!
//! Conventions: row vectors multiplied on the left (`p' = p * M`), matrices
//! stored row-major with translation in row 3, right-handed view space looking
//! down -Z, OpenGL clip space (z in [-1, 1]). Angles in degrees at the API.

mod vector;
mod matrix;
mod camera;

pub use vector::{Vec2, Vec3, Vec4};
pub use matrix::Matrix;
pub use camera::Camera;

/// Pi as `f32`
pub const PI: f32 = std::f32::consts::PI;

/// Convert degrees to radians
#[inline]
pub fn degree_to_radian(degrees: f32) -> f32 {
    degrees * (PI / 180.0)
}

/// Convert radians to degrees
#[inline]
pub fn radian_to_degree(radians: f32) -> f32 {
    radians * (180.0 / PI)
}
