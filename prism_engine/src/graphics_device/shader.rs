/// Shader program trait and descriptor

use std::any::Any;

/// Descriptor for creating a shader program from GLSL sources
#[derive(Debug, Clone)]
pub struct ShaderDesc<'a> {
    /// Debug name (used in compile errors)
    pub name: &'a str,
    pub vertex_source: &'a str,
    pub fragment_source: &'a str,
}

/// Linked GPU shader program
pub trait Shader {
    /// Program name
    fn name(&self) -> &str;

    /// Downcast support for backends
    fn as_any(&self) -> &dyn Any;
}
