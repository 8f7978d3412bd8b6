/// Primitive buffer trait and descriptors

use std::any::Any;

/// Index value that restarts a strip/fan inside one indexed draw
pub const PRIMITIVE_RESTART_INDEX: u32 = u32::MAX;

/// Vertex attribute data format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum AttributeFormat {
    R32_SFLOAT,          // float (4 bytes)
    R32G32_SFLOAT,       // vec2 (8 bytes)
    R32G32B32_SFLOAT,    // vec3 (12 bytes)
    R32G32B32A32_SFLOAT, // vec4 (16 bytes)
}

impl AttributeFormat {
    /// Number of float components
    pub fn component_count(&self) -> u32 {
        match self {
            AttributeFormat::R32_SFLOAT => 1,
            AttributeFormat::R32G32_SFLOAT => 2,
            AttributeFormat::R32G32B32_SFLOAT => 3,
            AttributeFormat::R32G32B32A32_SFLOAT => 4,
        }
    }

    /// Size in bytes
    pub fn size_bytes(&self) -> u32 {
        self.component_count() * 4
    }
}

/// One vertex attribute inside an interleaved vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader input location
    pub location: u32,
    /// Data format
    pub format: AttributeFormat,
    /// Byte offset from the start of the vertex
    pub offset: u32,
}

/// Interleaved vertex layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    /// Size of one vertex in bytes
    pub stride: u32,
    /// Attributes in location order
    pub attributes: Vec<VertexAttribute>,
}

/// Primitive topology
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveTopology {
    TriangleList,
    TriangleStrip,
    LineList,
    LineStrip,
    PointList,
}

/// Descriptor for uploading a primitive's buffers
#[derive(Debug, Clone)]
pub struct PrimitiveBuffersDesc<'a> {
    /// Raw interleaved vertex bytes
    pub vertex_data: &'a [u8],
    /// Number of vertices in `vertex_data`
    pub vertex_count: u32,
    /// Vertex layout
    pub layout: VertexLayout,
    /// Index list (empty = non-indexed draw)
    pub indices: &'a [u32],
    /// Topology used when drawing
    pub topology: PrimitiveTopology,
}

/// Immutable information about created buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimitiveBuffersInfo {
    pub vertex_count: u32,
    pub index_count: u32,
    pub topology: PrimitiveTopology,
}

impl PrimitiveBuffersInfo {
    /// True if an index buffer was created
    pub fn is_indexed(&self) -> bool {
        self.index_count > 0
    }
}

/// GPU vertex array + vertex buffer + optional index buffer
///
/// Backends release the GPU objects when the last handle is dropped.
pub trait PrimitiveBuffers {
    /// Buffer information
    fn info(&self) -> &PrimitiveBuffersInfo;

    /// Downcast support for backends
    fn as_any(&self) -> &dyn Any;
}
