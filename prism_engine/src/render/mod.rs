//! Render module
//!
//! Per-frame drawing on top of a `GraphicsDevice`: camera, resource stocks
//! and the uniforms every prim is drawn with.

mod render;

pub use render::{Render, RenderConfig};
