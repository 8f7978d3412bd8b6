/// Interleaved vertex format shared by every primitive

use bytemuck::{Pod, Zeroable};

use crate::graphics_device::{AttributeFormat, VertexAttribute, VertexLayout};
use crate::math::{Vec2, Vec3, Vec4};

/// Vertex: position, texture coordinates, normal, color
///
/// Attribute locations 0..3 in field order.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Vertex {
    pub p: Vec3,
    pub t: Vec2,
    pub n: Vec3,
    pub c: Vec4,
}

impl Vertex {
    pub const fn new(p: Vec3, t: Vec2, n: Vec3, c: Vec4) -> Self {
        Self { p, t, n, c }
    }

    /// White vertex with only a position
    pub const fn from_position(p: Vec3) -> Self {
        Self {
            p,
            t: Vec2::zero(),
            n: Vec3::zero(),
            c: Vec4::splat(1.0),
        }
    }

    /// Device vertex layout for this struct
    pub fn layout() -> VertexLayout {
        let attribute = |location, format, offset| VertexAttribute { location, format, offset };
        VertexLayout {
            stride: std::mem::size_of::<Vertex>() as u32,
            attributes: vec![
                attribute(0, AttributeFormat::R32G32B32_SFLOAT, 0),
                attribute(1, AttributeFormat::R32G32_SFLOAT, 12),
                attribute(2, AttributeFormat::R32G32B32_SFLOAT, 20),
                attribute(3, AttributeFormat::R32G32B32A32_SFLOAT, 32),
            ],
        }
    }
}
