//! Prism demo: keyboard-controlled camera over a small lit scene
//!
//! Run with: cargo run -p prism_demo

mod control;
mod scene;

use std::path::PathBuf;
use std::process::ExitCode;

use prism_engine::prism::render::RenderConfig;
use prism_engine::prism::{run, AnimConfig, Engine, Result};

use control::Control;
use scene::{Axes, Scene};

fn run_demo() -> Result<()> {
    Engine::initialize()?;
    prism_engine_renderer_gl::register()?;

    let config = AnimConfig {
        title: "Prism demo".to_string(),
        render: RenderConfig {
            shader_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("shaders"),
            ..Default::default()
        },
        ..Default::default()
    };
    let debug = config.device.enable_debug;

    let result = run(config, |anim| {
        let render = &mut anim.context_mut().render;
        let axes = Axes::new(render)?;
        let scene = Scene::new(render)?;
        anim.add_unit(Control::new()).add_unit(axes).add_unit(scene);
        Ok(())
    });

    if debug {
        prism_engine_renderer_gl::print_debug_stats_report();
    }
    Engine::shutdown();
    result
}

fn main() -> ExitCode {
    // Errors are logged where they are raised
    match run_demo() {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
