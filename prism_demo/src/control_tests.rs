//! Unit tests for control.rs

use std::time::{Duration, Instant};

use super::*;
use prism_engine::prism::anim::{Anim, Timer};
use prism_engine::prism::device::mock_graphics_device::SharedMockDevice;
use prism_engine::prism::render::{Render, RenderConfig};

fn input_with(keys: &[KeyCode]) -> Input {
    let mut input = Input::new();
    for &key in keys {
        input.on_key(key, true);
    }
    input.response();
    input
}

#[test]
fn test_motion_idle_without_keys() {
    assert!(Motion::from_input(&Input::new()).is_idle());
}

#[test]
fn test_motion_axes() {
    let motion = Motion::from_input(&input_with(&[KeyCode::KeyW, KeyCode::KeyA, KeyCode::ArrowDown]));
    assert_eq!(motion, Motion { forward: 1.0, strafe: -1.0, lift: -1.0, turn: 0.0 });

    let motion = Motion::from_input(&input_with(&[KeyCode::KeyS, KeyCode::ArrowRight]));
    assert_eq!(motion, Motion { forward: -1.0, strafe: 0.0, lift: 0.0, turn: 1.0 });
}

#[test]
fn test_opposite_keys_cancel() {
    let motion = Motion::from_input(&input_with(&[KeyCode::KeyA, KeyCode::KeyD, KeyCode::ArrowLeft, KeyCode::ArrowRight]));
    assert!(motion.is_idle());
}

#[test]
fn test_shift_w_does_not_move() {
    let motion = Motion::from_input(&input_with(&[KeyCode::ShiftLeft, KeyCode::KeyW]));
    assert_eq!(motion.forward, 0.0);

    // Backward still works with shift held
    let motion = Motion::from_input(&input_with(&[KeyCode::ShiftLeft, KeyCode::KeyS]));
    assert_eq!(motion.forward, -1.0);
}

// ============================================================================
// Control unit
// ============================================================================

fn setup(shader_dir: &str) -> (Anim, SharedMockDevice) {
    let device = SharedMockDevice::new();
    let config = RenderConfig {
        shader_dir: std::env::temp_dir().join(shader_dir),
        ..Default::default()
    };
    let mut anim = Anim::new(Render::new(device.boxed(), &config));
    anim.init().unwrap();
    (anim, device)
}

/// Press `keys`, advance the timer by one second and run one response
fn step(ctx: &mut AnimContext, control: &mut Control, keys: &[KeyCode]) {
    let start = Instant::now();
    let paused = ctx.timer.is_pause();
    ctx.timer = Timer::starting_at(start);
    ctx.timer.set_pause(paused);
    ctx.timer.response_at(start + Duration::from_secs(1));

    for &key in keys {
        ctx.input.on_key(key, true);
    }
    ctx.input.response();
    control.response(ctx).unwrap();
    for &key in keys {
        ctx.input.on_key(key, false);
    }
    ctx.input.response();
}

#[test]
fn test_escape_requests_exit() {
    let (mut anim, _device) = setup("prism_control_tests_exit");
    let ctx = anim.context_mut();
    let mut control = Control::new();

    step(ctx, &mut control, &[]);
    assert!(!ctx.is_exit_requested());
    step(ctx, &mut control, &[KeyCode::Escape]);
    assert!(ctx.is_exit_requested());
}

#[test]
fn test_f_toggles_fullscreen_request() {
    let (mut anim, _device) = setup("prism_control_tests_fullscreen");
    let ctx = anim.context_mut();
    let mut control = Control::new();

    step(ctx, &mut control, &[KeyCode::KeyF]);
    assert_eq!(ctx.take_window_requests(false).fullscreen, Some(true));
    step(ctx, &mut control, &[KeyCode::KeyF]);
    assert_eq!(ctx.take_window_requests(true).fullscreen, Some(false));
}

#[test]
fn test_p_toggles_pause() {
    let (mut anim, _device) = setup("prism_control_tests_pause");
    let ctx = anim.context_mut();
    let mut control = Control::new();

    step(ctx, &mut control, &[KeyCode::KeyP]);
    assert!(ctx.timer.is_pause());
    step(ctx, &mut control, &[KeyCode::KeyP]);
    assert!(!ctx.timer.is_pause());
}

#[test]
fn test_shift_w_toggles_wireframe() {
    let (mut anim, _device) = setup("prism_control_tests_wireframe");
    let ctx = anim.context_mut();
    let mut control = Control::new();
    let loc = ctx.render.camera().loc();

    step(ctx, &mut control, &[KeyCode::ShiftLeft, KeyCode::KeyW]);
    assert!(ctx.render.is_wireframe());
    assert_eq!(ctx.render.camera().loc(), loc);

    // W alone moves instead
    step(ctx, &mut control, &[KeyCode::KeyW]);
    assert!(ctx.render.is_wireframe());

    step(ctx, &mut control, &[KeyCode::ShiftLeft, KeyCode::KeyW]);
    assert!(!ctx.render.is_wireframe());
}

#[test]
fn test_f5_reloads_shaders_from_disk() {
    let dir = std::env::temp_dir().join("prism_control_tests_reload");
    std::fs::create_dir_all(dir.join("flat")).unwrap();
    std::fs::write(dir.join("flat").join("vert.glsl"), "uniform mat4 WVP;").unwrap();
    std::fs::write(dir.join("flat").join("frag.glsl"), "uniform float Trans;").unwrap();

    let (mut anim, device) = setup("prism_control_tests_reload");
    let ctx = anim.context_mut();
    ctx.render.load_shader("flat").unwrap();
    let compiled = device.0.borrow().count("create_shader flat");

    let mut control = Control::new();
    step(ctx, &mut control, &[KeyCode::F5]);
    assert_eq!(device.0.borrow().count("create_shader flat"), compiled + 1);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_navigation_moves_while_paused() {
    let (mut anim, _device) = setup("prism_control_tests_paused_move");
    let ctx = anim.context_mut();
    ctx.timer.set_pause(true);
    let mut control = Control::new();

    let loc = ctx.render.camera().loc();
    let dir = ctx.render.camera().dir();
    step(ctx, &mut control, &[KeyCode::KeyW]);

    let moved = ctx.render.camera().loc() - loc;
    assert!((moved.length() - MOVE_SPEED).abs() < 1e-3, "{:?}", moved);
    assert!(moved.normalized().dot(dir) > 0.999);
}

#[test]
fn test_right_arrow_turns_right() {
    let (mut anim, _device) = setup("prism_control_tests_turn");
    let ctx = anim.context_mut();
    let mut control = Control::new();

    let loc = ctx.render.camera().loc();
    let dir = ctx.render.camera().dir();
    let right = ctx.render.camera().right();
    step(ctx, &mut control, &[KeyCode::ArrowRight]);
    assert_eq!(ctx.render.camera().loc(), loc);

    let turned = ctx.render.camera().dir();
    assert!(turned.dot(right) > 0.0, "{:?} turned away from {:?}", turned, right);
    assert!((turned.dot(dir) - TURN_SPEED.to_radians().cos()).abs() < 1e-3);
}
