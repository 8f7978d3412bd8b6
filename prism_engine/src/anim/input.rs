/// Keyboard and mouse state
///
/// Window events are accumulated as they arrive; `response` (once per frame)
/// publishes them. Key clicks are edge-triggered: a key counts as clicked only
/// during the frame after it went down.

use rustc_hash::FxHashSet;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Pixels of a pixel-precise scroll counted as one wheel line
const PIXELS_PER_LINE: f32 = 20.0;

#[derive(Debug, Default, Clone)]
pub struct Input {
    keys: FxHashSet<KeyCode>,
    keys_click: FxHashSet<KeyCode>,
    pending_clicks: FxHashSet<KeyCode>,

    buttons: FxHashSet<MouseButton>,
    buttons_click: FxHashSet<MouseButton>,
    pending_button_clicks: FxHashSet<MouseButton>,

    /// Last cursor position, `None` until the first move
    cursor: Option<(f32, f32)>,
    mouse_delta: (f32, f32),
    pending_mouse_delta: (f32, f32),
    wheel: f32,
    pending_wheel: f32,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== EVENT FEED =====

    /// Record a key press or release
    pub fn on_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            if self.keys.insert(key) {
                self.pending_clicks.insert(key);
            }
        } else {
            self.keys.remove(&key);
        }
    }

    /// Record a mouse button press or release
    pub fn on_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        if pressed {
            if self.buttons.insert(button) {
                self.pending_button_clicks.insert(button);
            }
        } else {
            self.buttons.remove(&button);
        }
    }

    /// Record the cursor position in window pixels
    pub fn on_cursor_moved(&mut self, x: f32, y: f32) {
        if let Some((old_x, old_y)) = self.cursor {
            self.pending_mouse_delta.0 += x - old_x;
            self.pending_mouse_delta.1 += y - old_y;
        }
        self.cursor = Some((x, y));
    }

    /// Record wheel rotation in lines (positive away from the user)
    pub fn on_mouse_wheel(&mut self, lines: f32) {
        self.pending_wheel += lines;
    }

    /// Release everything (window lost focus)
    pub fn release_all(&mut self) {
        self.keys.clear();
        self.buttons.clear();
    }

    /// Feed a winit window event
    ///
    /// # Returns
    ///
    /// `true` if the event was an input event
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    self.on_key(code, event.state == ElementState::Pressed);
                }
                true
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.on_mouse_button(*button, *state == ElementState::Pressed);
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.on_cursor_moved(position.x as f32, position.y as f32);
                true
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / PIXELS_PER_LINE,
                };
                self.on_mouse_wheel(lines);
                true
            }
            WindowEvent::Focused(false) => {
                self.release_all();
                false
            }
            _ => false,
        }
    }

    /// Publish the events received since the previous frame
    pub fn response(&mut self) {
        self.keys_click = std::mem::take(&mut self.pending_clicks);
        self.buttons_click = std::mem::take(&mut self.pending_button_clicks);
        self.mouse_delta = std::mem::take(&mut self.pending_mouse_delta);
        self.wheel = std::mem::take(&mut self.pending_wheel);
    }

    // ===== QUERIES =====

    /// Key is held down
    pub fn key(&self, key: KeyCode) -> bool {
        self.keys.contains(&key)
    }

    /// Key went down since the previous frame
    pub fn key_click(&self, key: KeyCode) -> bool {
        self.keys_click.contains(&key)
    }

    /// 1.0 if the key is down, 0.0 otherwise
    pub fn key_axis(&self, key: KeyCode) -> f32 {
        if self.key(key) { 1.0 } else { 0.0 }
    }

    pub fn button(&self, button: MouseButton) -> bool {
        self.buttons.contains(&button)
    }

    pub fn button_click(&self, button: MouseButton) -> bool {
        self.buttons_click.contains(&button)
    }

    /// Cursor position in window pixels ((0, 0) before the first move)
    pub fn mouse_pos(&self) -> (f32, f32) {
        self.cursor.unwrap_or((0.0, 0.0))
    }

    /// Cursor movement during the last frame
    pub fn mouse_delta(&self) -> (f32, f32) {
        self.mouse_delta
    }

    /// Wheel lines during the last frame
    pub fn wheel_delta(&self) -> f32 {
        self.wheel
    }
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
