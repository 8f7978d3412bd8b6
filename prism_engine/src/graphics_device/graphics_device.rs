/// GraphicsDevice trait - main backend interface
///
/// One device wraps one GPU context bound to one window. It creates GPU
/// resources and issues the handful of state and draw calls the renderer needs.

use std::rc::Rc;
use bitflags::bitflags;

use crate::error::Result;
use crate::graphics_device::{
    PrimitiveBuffers, PrimitiveBuffersDesc, Shader, ShaderDesc, Texture, TextureDesc,
};

// ============================================================================
// Configuration and statistics
// ============================================================================

/// Graphics device configuration
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// Color used by `begin_frame` when clearing the color buffer
    pub clear_color: [f32; 4],
    /// Synchronize buffer swaps with the display refresh
    pub vsync: bool,
    /// Requested depth buffer precision in bits
    pub depth_bits: u8,
    /// Requested OpenGL core version (major, minor)
    pub gl_version: (u8, u8),
    /// Enable backend debug output
    pub enable_debug: bool,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.3, 0.5, 0.7, 1.0],
            vsync: true,
            depth_bits: 24,
            gl_version: (3, 3),
            enable_debug: cfg!(debug_assertions),
        }
    }
}

/// Device statistics since the last `begin_frame`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceStats {
    /// Number of draw calls this frame
    pub draw_calls: u32,
    /// Number of vertices (or indices for indexed draws) submitted this frame
    pub vertices: u32,
    /// Number of frames presented since creation
    pub frames: u64,
}

bitflags! {
    /// Buffers cleared at the start of a frame
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClearFlags: u32 {
        const COLOR = 0b01;
        const DEPTH = 0b10;
    }
}

/// Polygon rasterization mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillMode {
    #[default]
    Solid,
    Wireframe,
}

/// Value of a shader uniform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Int(i32),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    /// Row-major 4x4 matrix, uploaded without transposition
    Mat4([f32; 16]),
}

// ============================================================================
// GraphicsDevice trait
// ============================================================================

/// Main graphics device trait
///
/// Implemented by backend-specific devices (e.g. `GlGraphicsDevice`).
/// All methods are called from the thread that owns the window.
pub trait GraphicsDevice {
    /// Upload vertex (and optional index) data and build the vertex array
    fn create_primitive_buffers(&mut self, desc: &PrimitiveBuffersDesc<'_>) -> Result<Rc<dyn PrimitiveBuffers>>;

    /// Create a 2D RGBA8 texture
    fn create_texture(&mut self, desc: &TextureDesc<'_>) -> Result<Rc<dyn Texture>>;

    /// Compile and link a vertex + fragment shader program
    fn create_shader(&mut self, desc: &ShaderDesc<'_>) -> Result<Rc<dyn Shader>>;

    /// Clear the requested buffers and reset per-frame statistics
    fn begin_frame(&mut self, clear: ClearFlags);

    /// Wait for submitted GPU work to finish
    fn end_frame(&mut self);

    /// Present the back buffer (swap buffers)
    fn present(&mut self) -> Result<()>;

    /// Notify the device that the drawable has been resized
    fn resize(&mut self, width: u32, height: u32);

    /// Make a shader program current (`None` unbinds)
    fn use_shader(&mut self, shader: Option<&dyn Shader>);

    /// Set a uniform on a program
    ///
    /// # Returns
    ///
    /// `false` if the program has no active uniform with that name
    fn set_uniform(&mut self, shader: &dyn Shader, name: &str, value: UniformValue) -> bool;

    /// Bind a texture to a texture unit (`None` unbinds)
    fn bind_texture(&mut self, unit: u32, texture: Option<&dyn Texture>);

    /// Draw the buffers with their own topology, indexed if they carry indices
    fn draw(&mut self, buffers: &dyn PrimitiveBuffers);

    /// Switch between solid and wireframe rasterization
    fn set_fill_mode(&mut self, mode: FillMode);

    /// Get statistics about the current frame
    fn stats(&self) -> DeviceStats;
}
