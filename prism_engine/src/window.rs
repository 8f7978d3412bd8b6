/// Window runner
///
/// Opens one winit window, creates the configured graphics device for it and
/// drives an `Anim` from the event loop: input events are fed to `Input`,
/// every idle pass renders and presents a frame.

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Fullscreen, Window, WindowId};

use crate::anim::Anim;
use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::graphics_device::DeviceConfig;
use crate::render::{Render, RenderConfig};
use crate::{engine_error, engine_info, engine_warn};

// ============================================================================
// Configuration
// ============================================================================

/// Window and animation configuration
#[derive(Debug, Clone)]
pub struct AnimConfig {
    pub title: String,
    /// Initial client area size in physical pixels
    pub size: (u32, u32),
    pub fullscreen: bool,
    /// Name of the registered graphics device plugin
    pub plugin: String,
    pub device: DeviceConfig,
    /// `frame_size` is overwritten by the window size
    pub render: RenderConfig,
}

impl Default for AnimConfig {
    fn default() -> Self {
        Self {
            title: "Prism".to_string(),
            size: (1009, 488),
            fullscreen: false,
            plugin: "opengl".to_string(),
            device: DeviceConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

// ============================================================================
// Runner
// ============================================================================

/// Run the animation until its window is closed or `do_exit` is requested
///
/// `setup` runs once, after `Anim::init`, to add units and resources.
///
/// # Errors
///
/// Returns an error if the event loop, the window, the graphics device,
/// `Anim::init` or `setup` fails. Errors of individual frames are logged and
/// the loop goes on.
pub fn run<F>(config: AnimConfig, setup: F) -> Result<()>
where
    F: FnOnce(&mut Anim) -> Result<()>,
{
    let event_loop = EventLoop::new()
        .map_err(|e| Error::InitializationFailed(format!("Failed to create event loop: {}", e)))?;

    let mut runner = Runner {
        anim: None,
        window: None,
        config,
        setup: Some(setup),
        error: None,
    };

    event_loop
        .run_app(&mut runner)
        .map_err(|e| Error::BackendError(format!("Event loop terminated with error: {}", e)))?;

    match runner.error.take() {
        Some(err) => {
            engine_error!("prism::window", "{}", err);
            Err(err)
        }
        None => Ok(()),
    }
}

struct Runner<F> {
    // Declared before the window: the device must go first
    anim: Option<Anim>,
    window: Option<Window>,
    config: AnimConfig,
    setup: Option<F>,
    /// Initialization error returned by `run`
    error: Option<Error>,
}

impl<F> Runner<F>
where
    F: FnOnce(&mut Anim) -> Result<()>,
{
    fn create(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let (width, height) = self.config.size;
        let mut attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(PhysicalSize::new(width.max(1), height.max(1)));
        if self.config.fullscreen {
            attributes = attributes.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = event_loop
            .create_window(attributes)
            .map_err(|e| Error::InitializationFailed(format!("Failed to create window: {}", e)))?;

        let device = Engine::create_graphics_device(&self.config.plugin, &window, &self.config.device)?;

        let size = window.inner_size();
        let mut render_config = self.config.render.clone();
        render_config.frame_size = (size.width.max(1), size.height.max(1));

        let mut anim = Anim::new(Render::new(device, &render_config));
        anim.init()?;
        if let Some(setup) = self.setup.take() {
            setup(&mut anim)?;
        }
        engine_info!(
            "prism::window",
            "Window '{}' ready ({}x{}, {} units)",
            self.config.title, size.width, size.height, anim.unit_count()
        );

        window.request_redraw();
        self.anim = Some(anim);
        self.window = Some(window);
        Ok(())
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(anim) = self.anim.as_mut() else {
            return;
        };

        if let Err(err) = anim.render() {
            engine_warn!("prism::window", "Frame rendered with errors: {}", err);
        }
        if let Err(err) = anim.copy_frame() {
            engine_error!("prism::window", "Failed to present frame: {}", err);
        }

        self.apply_requests(event_loop);
    }

    /// Handle exit and fullscreen requests made by the units
    fn apply_requests(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(anim), Some(window)) = (self.anim.as_mut(), self.window.as_ref()) else {
            return;
        };
        let requests = anim.context_mut().take_window_requests(window.fullscreen().is_some());

        if let Some(on) = requests.fullscreen {
            engine_info!("prism::window", "Fullscreen {}", if on { "on" } else { "off" });
            window.set_fullscreen(on.then_some(Fullscreen::Borderless(None)));
        }

        if requests.exit {
            event_loop.exit();
        }
    }
}

impl<F> ApplicationHandler for Runner<F>
where
    F: FnOnce(&mut Anim) -> Result<()>,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.error.is_some() {
            return;
        }
        if let Err(err) = self.create(event_loop) {
            self.error = Some(err);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(anim) = self.anim.as_mut() else {
            return;
        };

        if anim.context_mut().input.handle_window_event(&event) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                // Minimized
                if size.width == 0 || size.height == 0 {
                    return;
                }
                if let Err(err) = anim.resize(size.width, size.height) {
                    engine_warn!("prism::window", "Resize frame rendered with errors: {}", err);
                }
            }
            WindowEvent::RedrawRequested => self.frame(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Poll);
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.anim = None;
        self.window = None;
        engine_info!("prism::window", "Event loop finished");
    }
}
