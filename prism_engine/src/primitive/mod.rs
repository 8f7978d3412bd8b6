//! Primitive module
//!
//! Vertex data uploaded to GPU buffers, grouped prims and generated shapes.

mod vertex;
mod prim;
mod shapes;

pub use vertex::Vertex;
pub use prim::{Prim, PrimType, Prims};
pub use shapes::{evaluate_normals, Shape};
