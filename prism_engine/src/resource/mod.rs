//! Resource management module
//!
//! Name-keyed stocks of shader programs, textures and materials. Every
//! manager wraps a `ResourceStock` and hands out shared `Rc` handles.

mod stock;
pub mod shader;
pub mod texture;
pub mod material;

pub use stock::ResourceStock;
pub use shader::{ShaderProgram, ShaderManager, DEFAULT_SHADER};
pub use texture::{Texture, TextureManager};
pub use material::{Material, MaterialDesc, MaterialManager, DEFAULT_MATERIAL, MAX_TEXTURES};
