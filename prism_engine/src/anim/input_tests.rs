//! Unit tests for input.rs

use super::*;
use winit::dpi::PhysicalPosition;
use winit::event::{DeviceId, TouchPhase};

fn device_id() -> DeviceId {
    // SAFETY: only compared against other dummies, never handed to the platform
    unsafe { DeviceId::dummy() }
}

#[test]
fn test_key_hold_and_click() {
    let mut input = Input::new();
    input.on_key(KeyCode::KeyW, true);
    assert!(input.key(KeyCode::KeyW));
    // Click is published on the next response
    assert!(!input.key_click(KeyCode::KeyW));

    input.response();
    assert!(input.key_click(KeyCode::KeyW));
    assert_eq!(input.key_axis(KeyCode::KeyW), 1.0);

    // Still held: no new click
    input.on_key(KeyCode::KeyW, true);
    input.response();
    assert!(input.key(KeyCode::KeyW));
    assert!(!input.key_click(KeyCode::KeyW));

    input.on_key(KeyCode::KeyW, false);
    input.response();
    assert!(!input.key(KeyCode::KeyW));
    assert_eq!(input.key_axis(KeyCode::KeyW), 0.0);
}

#[test]
fn test_tap_within_one_frame_still_clicks() {
    let mut input = Input::new();
    input.on_key(KeyCode::KeyP, true);
    input.on_key(KeyCode::KeyP, false);
    input.response();

    assert!(input.key_click(KeyCode::KeyP));
    assert!(!input.key(KeyCode::KeyP));
}

#[test]
fn test_mouse_buttons() {
    let mut input = Input::new();
    input.on_mouse_button(MouseButton::Left, true);
    input.response();
    assert!(input.button(MouseButton::Left));
    assert!(input.button_click(MouseButton::Left));
    assert!(!input.button(MouseButton::Right));

    input.response();
    assert!(!input.button_click(MouseButton::Left));
}

#[test]
fn test_mouse_delta_accumulates_per_frame() {
    let mut input = Input::new();
    input.on_cursor_moved(10.0, 10.0);
    input.response();
    // First position gives no delta
    assert_eq!(input.mouse_delta(), (0.0, 0.0));
    assert_eq!(input.mouse_pos(), (10.0, 10.0));

    input.on_cursor_moved(15.0, 8.0);
    input.on_cursor_moved(20.0, 12.0);
    input.response();
    assert_eq!(input.mouse_delta(), (10.0, 2.0));

    input.response();
    assert_eq!(input.mouse_delta(), (0.0, 0.0));
}

#[test]
fn test_window_events() {
    let mut input = Input::new();

    let moved = WindowEvent::CursorMoved { device_id: device_id(), position: PhysicalPosition::new(4.0, 2.0) };
    assert!(input.handle_window_event(&moved));

    let wheel = WindowEvent::MouseWheel {
        device_id: device_id(),
        delta: MouseScrollDelta::LineDelta(0.0, 2.0),
        phase: TouchPhase::Moved,
    };
    assert!(input.handle_window_event(&wheel));

    let pixels = WindowEvent::MouseWheel {
        device_id: device_id(),
        delta: MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -40.0)),
        phase: TouchPhase::Moved,
    };
    assert!(input.handle_window_event(&pixels));

    let click = WindowEvent::MouseInput {
        device_id: device_id(),
        state: ElementState::Pressed,
        button: MouseButton::Right,
    };
    assert!(input.handle_window_event(&click));

    assert!(!input.handle_window_event(&WindowEvent::Focused(true)));

    input.response();
    assert_eq!(input.mouse_pos(), (4.0, 2.0));
    assert_eq!(input.wheel_delta(), 0.0);
    assert!(input.button(MouseButton::Right));
}

#[test]
fn test_focus_loss_releases_keys() {
    let mut input = Input::new();
    input.on_key(KeyCode::KeyA, true);
    input.on_mouse_button(MouseButton::Left, true);

    input.handle_window_event(&WindowEvent::Focused(false));
    input.response();

    assert!(!input.key(KeyCode::KeyA));
    assert!(!input.button(MouseButton::Left));
}
