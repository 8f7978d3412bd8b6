/// Graphics device module - all backend-facing types and traits

// Module declarations
pub mod graphics_device;
pub mod buffer;
pub mod texture;
pub mod shader;
pub mod plugin;

// Re-export everything from graphics_device.rs
pub use graphics_device::*;

// Re-export from other modules
pub use buffer::*;
pub use texture::*;
pub use shader::*;
pub use plugin::*;

// Mock graphics device for tests (no GPU required)
#[cfg(any(test, feature = "mock"))]
pub mod mock_graphics_device;
