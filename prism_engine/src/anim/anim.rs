/// Animation driver
///
/// `Anim` owns the per-window context (render, timer, input) and an ordered
/// list of units. Every frame each unit first gets a `response` call (update
/// state, react to input) and then, inside the render frame, a `render` call.

use crate::anim::{Input, Timer};
use crate::error::{Error, Result};
use crate::render::Render;
use crate::engine_error;

// ============================================================================
// Unit
// ============================================================================

/// Per-frame participant of the animation
///
/// Both methods default to doing nothing.
pub trait Unit {
    /// Update state once per frame, before rendering starts
    fn response(&mut self, _ctx: &mut AnimContext) -> Result<()> {
        Ok(())
    }

    /// Draw between `Render::start` and `Render::end`
    fn render(&mut self, _ctx: &mut AnimContext) -> Result<()> {
        Ok(())
    }
}

// ============================================================================
// AnimContext
// ============================================================================

/// State shared with the units
pub struct AnimContext {
    pub render: Render,
    pub timer: Timer,
    pub input: Input,
    exit_requested: bool,
    fullscreen_requested: bool,
}

impl AnimContext {
    fn new(render: Render) -> Self {
        Self {
            render,
            timer: Timer::new(),
            input: Input::new(),
            exit_requested: false,
            fullscreen_requested: false,
        }
    }

    /// Ask the window runner to close the window and leave the event loop
    pub fn do_exit(&mut self) {
        self.exit_requested = true;
    }

    pub fn is_exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Ask the window runner to toggle fullscreen
    pub fn flip_full_screen(&mut self) {
        self.fullscreen_requested = !self.fullscreen_requested;
    }

    /// Pending fullscreen toggle, cleared by this call
    pub fn take_fullscreen_request(&mut self) -> bool {
        std::mem::take(&mut self.fullscreen_requested)
    }

    /// Window changes requested since the last call
    ///
    /// `fullscreen` is the current window state. The returned `fullscreen`
    /// holds the state to switch to, if any.
    pub fn take_window_requests(&mut self, fullscreen: bool) -> WindowRequests {
        WindowRequests {
            fullscreen: self.take_fullscreen_request().then_some(!fullscreen),
            exit: self.exit_requested,
        }
    }
}

/// Window changes the runner applies after a frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowRequests {
    pub fullscreen: Option<bool>,
    pub exit: bool,
}

// ============================================================================
// Anim
// ============================================================================

pub struct Anim {
    // Units go first: they hold resources of the render device
    units: Vec<Box<dyn Unit>>,
    ctx: AnimContext,
}

impl Anim {
    pub fn new(render: Render) -> Self {
        Self { units: Vec::new(), ctx: AnimContext::new(render) }
    }

    /// Create the default shader and material
    pub fn init(&mut self) -> Result<()> {
        self.ctx.render.init()
    }

    /// Append a unit; units run in insertion order
    ///
    /// # Example
    ///
    /// ```ignore
    /// anim.add_unit(Control::new()).add_unit(Scene::new(&mut anim.context_mut().render)?);
    /// ```
    pub fn add_unit<U: Unit + 'static>(&mut self, unit: U) -> &mut Self {
        self.units.push(Box::new(unit));
        self
    }

    pub fn add_boxed_unit(&mut self, unit: Box<dyn Unit>) -> &mut Self {
        self.units.push(unit);
        self
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    /// Run one frame: timer, input, unit responses, then unit renders
    /// between `start` and `end`
    ///
    /// A failing unit is logged and the frame goes on; the first error is
    /// returned once the frame is finished.
    pub fn render(&mut self) -> Result<()> {
        let ctx = &mut self.ctx;
        ctx.timer.response();
        ctx.input.response();
        ctx.render.set_time(ctx.timer.time());

        let mut first_error: Option<Error> = None;
        let mut record = |result: Result<()>, stage: &str, index: usize| {
            if let Err(err) = result {
                engine_error!("prism::Anim", "Unit #{} {} failed: {}", index, stage, err);
                first_error.get_or_insert(err);
            }
        };

        for (index, unit) in self.units.iter_mut().enumerate() {
            record(unit.response(ctx), "response", index);
        }

        ctx.render.start();
        for (index, unit) in self.units.iter_mut().enumerate() {
            record(unit.render(ctx), "render", index);
        }
        ctx.render.end();

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Present the last rendered frame
    pub fn copy_frame(&mut self) -> Result<()> {
        self.ctx.render.copy_frame()
    }

    /// Resize the frame, then render and present it
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.ctx.render.resize(width, height);
        let rendered = self.render();
        self.copy_frame()?;
        rendered
    }

    pub fn context(&self) -> &AnimContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut AnimContext {
        &mut self.ctx
    }

    pub fn do_exit(&mut self) {
        self.ctx.do_exit();
    }

    pub fn flip_full_screen(&mut self) {
        self.ctx.flip_full_screen();
    }
}

#[cfg(test)]
#[path = "anim_tests.rs"]
mod tests;
