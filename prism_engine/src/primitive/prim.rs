/// Renderable primitive
///
/// A `Prim` owns the device buffers created from its vertex (and optional
/// index) list, an axis-aligned bounding box computed at construction, a local
/// transform and an optional material. Buffers are released on `destroy` or drop.

use std::fmt;
use std::rc::Rc;

use crate::error::Result;
use crate::graphics_device::{GraphicsDevice, PrimitiveBuffers, PrimitiveBuffersDesc, PrimitiveTopology};
use crate::math::{Matrix, Vec3};
use crate::primitive::Vertex;
use crate::resource::Material;

/// Kind of geometry a prim draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrimType {
    /// Triangle list
    #[default]
    Mesh,
    /// Line list
    Line,
    LineStrip,
    Point,
    /// Triangle strip
    Strip,
}

impl PrimType {
    /// Device topology for this prim type
    pub fn topology(self) -> PrimitiveTopology {
        match self {
            PrimType::Mesh => PrimitiveTopology::TriangleList,
            PrimType::Line => PrimitiveTopology::LineList,
            PrimType::LineStrip => PrimitiveTopology::LineStrip,
            PrimType::Point => PrimitiveTopology::PointList,
            PrimType::Strip => PrimitiveTopology::TriangleStrip,
        }
    }
}

// ===== PRIM =====

pub struct Prim {
    prim_type: PrimType,
    buffers: Rc<dyn PrimitiveBuffers>,
    min_bb: Vec3,
    max_bb: Vec3,
    /// Local transform applied before the world matrix
    pub transform: Matrix,
    /// `None` renders with the default material
    pub material: Option<Rc<Material>>,
}

impl Prim {
    /// Upload vertices (and indices, if any) and build the prim
    ///
    /// Index `PRIMITIVE_RESTART_INDEX` restarts strips inside one draw.
    pub fn new(
        device: &mut dyn GraphicsDevice,
        prim_type: PrimType,
        vertices: &[Vertex],
        indices: &[u32],
    ) -> Result<Self> {
        let buffers = device.create_primitive_buffers(&PrimitiveBuffersDesc {
            vertex_data: bytemuck::cast_slice(vertices),
            vertex_count: vertices.len() as u32,
            layout: Vertex::layout(),
            indices,
            topology: prim_type.topology(),
        })?;

        let (min_bb, max_bb) = bounding_box(vertices);
        Ok(Self {
            prim_type,
            buffers,
            min_bb,
            max_bb,
            transform: Matrix::identity(),
            material: None,
        })
    }

    /// Release the GPU buffers now
    pub fn destroy(self) {}

    /// Builder-style material assignment
    pub fn with_material(mut self, material: Rc<Material>) -> Self {
        self.material = Some(material);
        self
    }

    /// Builder-style transform assignment
    pub fn with_transform(mut self, transform: Matrix) -> Self {
        self.transform = transform;
        self
    }

    pub fn prim_type(&self) -> PrimType {
        self.prim_type
    }

    /// Device buffers
    pub fn buffers(&self) -> &dyn PrimitiveBuffers {
        self.buffers.as_ref()
    }

    pub fn vertex_count(&self) -> u32 {
        self.buffers.info().vertex_count
    }

    pub fn index_count(&self) -> u32 {
        self.buffers.info().index_count
    }

    pub fn is_indexed(&self) -> bool {
        self.buffers.info().is_indexed()
    }

    /// (min, max) corners in local space
    pub fn bounding_box(&self) -> (Vec3, Vec3) {
        (self.min_bb, self.max_bb)
    }
}

impl fmt::Debug for Prim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prim")
            .field("prim_type", &self.prim_type)
            .field("info", self.buffers.info())
            .field("min_bb", &self.min_bb)
            .field("max_bb", &self.max_bb)
            .finish()
    }
}

/// Component-wise min/max of the positions; zero box when empty
fn bounding_box(vertices: &[Vertex]) -> (Vec3, Vec3) {
    let Some(first) = vertices.first() else {
        return (Vec3::zero(), Vec3::zero());
    };
    vertices
        .iter()
        .fold((first.p, first.p), |(min, max), v| (min.min(v.p), max.max(v.p)))
}

// ===== PRIMS =====

/// Ordered group of prims sharing a transform
#[derive(Debug, Default)]
pub struct Prims {
    pub prims: Vec<Prim>,
    pub transform: Matrix,
}

impl Prims {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a prim (chainable)
    pub fn add(&mut self, prim: Prim) -> &mut Self {
        self.prims.push(prim);
        self
    }

    pub fn len(&self) -> usize {
        self.prims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prims.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Prim> {
        self.prims.iter()
    }

    /// Union of the members' boxes after their own transforms
    ///
    /// Zero box when empty.
    pub fn bounding_box(&self) -> (Vec3, Vec3) {
        let mut corners = self.prims.iter().flat_map(|prim| {
            let (lo, hi) = prim.bounding_box();
            (0..8).map(move |i| {
                let corner = Vec3::new(
                    if i & 1 == 0 { lo.x } else { hi.x },
                    if i & 2 == 0 { lo.y } else { hi.y },
                    if i & 4 == 0 { lo.z } else { hi.z },
                );
                prim.transform.point_transform(corner)
            })
        });
        let Some(first) = corners.next() else {
            return (Vec3::zero(), Vec3::zero());
        };
        corners.fold((first, first), |(min, max), p| (min.min(p), max.max(p)))
    }
}

#[cfg(test)]
#[path = "prim_tests.rs"]
mod tests;
