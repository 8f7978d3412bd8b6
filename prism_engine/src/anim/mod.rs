//! Animation module
//!
//! The animation driver composes render, timer and input and calls a list of
//! polymorphic units every frame.

mod timer;
mod input;
mod anim;

pub use timer::Timer;
pub use input::Input;
pub use anim::{Anim, AnimContext, Unit, WindowRequests};

// Key and button identifiers used by `Input`
pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;
