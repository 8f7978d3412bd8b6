/*!
# Prism Engine - OpenGL Backend

OpenGL 3.3 core implementation of the Prism graphics device traits.

The context comes from glutin, GL calls go through glow. The backend is
registered as the `"opengl"` graphics device plugin and created by the window
runner once the window exists.
*/

mod debug;
mod gl_context;
mod gl_buffers;
mod gl_texture;
mod gl_shader;
mod gl_device;

pub use gl_device::GlGraphicsDevice;
pub use gl_buffers::GlPrimitiveBuffers;
pub use gl_texture::GlTexture;
pub use gl_shader::GlShader;

// Re-export debug utilities
pub use debug::{get_debug_stats, print_debug_stats_report, GlDebugStats};

use prism_engine::prism::{Engine, Result};

/// Plugin name used in `AnimConfig::plugin`
pub const PLUGIN_NAME: &str = "opengl";

/// Register the OpenGL backend with the plugin system
///
/// # Example
///
/// ```no_run
/// use prism_engine::prism::Engine;
///
/// Engine::initialize()?;
/// prism_engine_renderer_gl::register()?;
/// # Ok::<(), prism_engine::prism::Error>(())
/// ```
pub fn register() -> Result<()> {
    Engine::register_graphics_device_plugin(PLUGIN_NAME, |window, config| {
        Ok(Box::new(GlGraphicsDevice::new(window, config)?))
    })
}
