/*!
# Prism 3D Engine

Core types for the Prism real-time rendering framework.

A window message loop (winit) drives an immediate-style renderer every frame.
The renderer owns a camera built on the engine's own 3D math, plus name-keyed
stocks of materials, textures and shaders. GPU work goes through the
`GraphicsDevice` trait so that backends (OpenGL today) are loaded as plugins
and the rest of the engine can be exercised without a GPU.

## Architecture

- **math**: `Vec2`/`Vec3`/`Vec4`, row-major `Matrix`, `Camera`
- **GraphicsDevice**: backend factory/command trait (buffers, textures, shaders, draws)
- **resource**: `ResourceStock` and the material/texture/shader managers
- **primitive**: vertex data uploaded to GPU buffers, with generated shapes
- **render**: per-frame drawing with material and transform uniforms
- **anim**: animation driver calling polymorphic `Unit`s every frame
- **window**: winit event loop gluing everything together
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod math;
pub mod graphics_device;
pub mod resource;
pub mod primitive;
pub mod render;
pub mod anim;
pub mod window;

// Main prism namespace module
pub mod prism {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Math sub-module
    pub mod math {
        pub use crate::math::*;
    }

    // Graphics device sub-module with all backend-facing types
    pub mod device {
        pub use crate::graphics_device::*;
    }

    // Resource sub-module
    pub mod resource {
        pub use crate::resource::*;
    }

    // Primitive sub-module
    pub mod primitive {
        pub use crate::primitive::*;
    }

    // Render sub-module
    pub mod render {
        pub use crate::render::*;
    }

    // Animation sub-module
    pub mod anim {
        pub use crate::anim::*;
    }

    // Window runner
    pub use crate::window::{run, AnimConfig};
}

// Re-export math interop library at crate root
pub use glam;
