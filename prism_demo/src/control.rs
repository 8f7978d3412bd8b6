//! Keyboard control unit
//!
//! - `Esc` exit, `F` fullscreen, `P` pause, `LShift+W` wireframe
//! - `W`/`S` forward/back, `A`/`D` strafe, `Up`/`Down` lift
//! - `Left`/`Right` turn, `F5` reload shaders from disk

use prism_engine::engine_info;
use prism_engine::prism::anim::{AnimContext, Input, KeyCode, Unit};
use prism_engine::prism::Result;

/// Camera speed in units per second
const MOVE_SPEED: f32 = 78.0 / 24.0;

/// Turn speed in degrees per second
const TURN_SPEED: f32 = 780.0 / 24.0;

/// Seconds between frame rate reports
const FPS_REPORT_PERIOD: f32 = 5.0;

/// Per-axis camera motion requested by the held keys, each in [-1, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Motion {
    pub forward: f32,
    pub strafe: f32,
    pub lift: f32,
    /// Positive turns right
    pub turn: f32,
}

impl Motion {
    pub fn from_input(input: &Input) -> Self {
        // LShift+W toggles wireframe instead of moving
        let forward_key = if input.key(KeyCode::ShiftLeft) { 0.0 } else { input.key_axis(KeyCode::KeyW) };
        Self {
            forward: forward_key - input.key_axis(KeyCode::KeyS),
            strafe: input.key_axis(KeyCode::KeyD) - input.key_axis(KeyCode::KeyA),
            lift: input.key_axis(KeyCode::ArrowUp) - input.key_axis(KeyCode::ArrowDown),
            turn: input.key_axis(KeyCode::ArrowRight) - input.key_axis(KeyCode::ArrowLeft),
        }
    }

    pub fn is_idle(&self) -> bool {
        *self == Motion::default()
    }
}

#[derive(Debug, Default)]
pub struct Control {
    last_report: f32,
}

impl Control {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Unit for Control {
    fn response(&mut self, ctx: &mut AnimContext) -> Result<()> {
        let input = &ctx.input;
        let exit = input.key_click(KeyCode::Escape);
        let fullscreen = input.key_click(KeyCode::KeyF);
        let pause = input.key_click(KeyCode::KeyP);
        let wireframe = input.key(KeyCode::ShiftLeft) && input.key_click(KeyCode::KeyW);
        let reload = input.key_click(KeyCode::F5);
        let motion = Motion::from_input(input);

        if exit {
            ctx.do_exit();
        }
        if fullscreen {
            ctx.flip_full_screen();
        }
        if pause {
            ctx.timer.toggle_pause();
            engine_info!("prism_demo", "Pause {}", if ctx.timer.is_pause() { "on" } else { "off" });
        }
        if wireframe {
            let on = !ctx.render.is_wireframe();
            ctx.render.set_wireframe(on);
        }
        if reload {
            let reloaded = ctx.render.reload_shaders();
            engine_info!("prism_demo", "{} shader program(s) reloaded", reloaded);
        }

        // Navigation runs on global time so it still works while paused
        let dt = ctx.timer.global_delta_time();
        if !motion.is_idle() {
            let camera = ctx.render.camera_mut();
            let step = (camera.dir() * motion.forward + camera.right() * motion.strafe + camera.up() * motion.lift)
                * (MOVE_SPEED * dt);
            camera.move_by(step);
            camera.rotate_around_up(-motion.turn * TURN_SPEED * dt);
        }

        let now = ctx.timer.global_time();
        if now - self.last_report >= FPS_REPORT_PERIOD {
            self.last_report = now;
            let stats = ctx.render.stats();
            engine_info!(
                "prism_demo",
                "{:.1} fps, {} draw calls, {} vertices",
                ctx.timer.fps(), stats.draw_calls, stats.vertices
            );
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "control_tests.rs"]
mod tests;
