/// GlContext - glutin display, context and window surface plus the glow loader
///
/// Owns the platform objects; resources only keep the shared `glow::Context`.

use std::num::NonZeroU32;
use std::rc::Rc;

use glow::HasContext;
use glutin::config::{ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext,
    Version,
};
use glutin::display::{Display, DisplayApiPreference, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use raw_window_handle::{HasDisplayHandle, HasWindowHandle, RawWindowHandle};
use winit::window::Window;

use prism_engine::prism::device::DeviceConfig;
use prism_engine::prism::{Error, Result};
use prism_engine::{engine_info, engine_warn};

use crate::debug;

pub(crate) struct GlContext {
    pub(crate) gl: Rc<glow::Context>,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    // Kept alive for the context and surface
    _display: Display,
}

fn init_error(what: &str, err: impl std::fmt::Display) -> Error {
    Error::InitializationFailed(format!("{}: {}", what, err))
}

/// Surfaces cannot be zero-sized
fn non_zero(value: u32) -> NonZeroU32 {
    NonZeroU32::new(value).unwrap_or(NonZeroU32::MIN)
}

#[cfg(target_os = "windows")]
fn api_preference(window: RawWindowHandle) -> DisplayApiPreference {
    DisplayApiPreference::WglThenEgl(Some(window))
}

#[cfg(target_os = "macos")]
fn api_preference(_window: RawWindowHandle) -> DisplayApiPreference {
    DisplayApiPreference::Cgl
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn api_preference(_window: RawWindowHandle) -> DisplayApiPreference {
    DisplayApiPreference::Egl
}

impl GlContext {
    /// Create a core-profile context for the window and make it current
    pub(crate) fn new(window: &Window, config: &DeviceConfig) -> Result<Self> {
        let raw_display = window
            .display_handle()
            .map_err(|e| init_error("No display handle", e))?
            .as_raw();
        let raw_window = window
            .window_handle()
            .map_err(|e| init_error("No window handle", e))?
            .as_raw();

        // SAFETY: the handles come from a live window that outlives the device
        let display = unsafe { Display::new(raw_display, api_preference(raw_window)) }
            .map_err(|e| init_error("Failed to open GL display", e))?;

        let template = ConfigTemplateBuilder::new()
            .with_depth_size(config.depth_bits)
            .compatible_with_native_window(raw_window)
            .build();
        let gl_config = unsafe { display.find_configs(template) }
            .map_err(|e| init_error("Failed to query GL configs", e))?
            .max_by_key(|c| c.depth_size())
            .ok_or_else(|| init_error("No GL config", format!("{}-bit depth unavailable", config.depth_bits)))?;

        let debug = config.enable_debug || cfg!(feature = "gl-debug");
        let (major, minor) = config.gl_version;
        let context_attributes = ContextAttributesBuilder::new()
            .with_profile(GlProfile::Core)
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .with_debug(debug)
            .build(Some(raw_window));
        let not_current = unsafe { display.create_context(&gl_config, &context_attributes) }
            .map_err(|e| init_error(&format!("Failed to create OpenGL {}.{} context", major, minor), e))?;

        let size = window.inner_size();
        let surface_attributes = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_window,
            non_zero(size.width),
            non_zero(size.height),
        );
        let surface = unsafe { display.create_window_surface(&gl_config, &surface_attributes) }
            .map_err(|e| init_error("Failed to create window surface", e))?;

        let context = not_current
            .make_current(&surface)
            .map_err(|e| init_error("Failed to make context current", e))?;

        let interval = if config.vsync { SwapInterval::Wait(NonZeroU32::MIN) } else { SwapInterval::DontWait };
        if let Err(e) = surface.set_swap_interval(&context, interval) {
            engine_warn!("prism::gl::Context", "Swap interval not applied: {}", e);
        }

        let mut gl = unsafe { glow::Context::from_loader_function_cstr(|name| display.get_proc_address(name)) };
        unsafe {
            engine_info!(
                "prism::gl::Context",
                "OpenGL {} on {}",
                gl.get_parameter_string(glow::VERSION),
                gl.get_parameter_string(glow::RENDERER)
            );
        }
        if debug {
            debug::install(&mut gl);
        }

        Ok(Self { gl: Rc::new(gl), surface, context, _display: display })
    }

    pub(crate) fn swap_buffers(&self) -> Result<()> {
        self.surface
            .swap_buffers(&self.context)
            .map_err(|e| Error::BackendError(format!("Swap buffers failed: {}", e)))
    }

    pub(crate) fn resize(&self, width: u32, height: u32) {
        self.surface.resize(&self.context, non_zero(width), non_zero(height));
    }
}
