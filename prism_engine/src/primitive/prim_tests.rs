//! Unit tests for prim.rs and the vertex layout

use super::*;
use crate::graphics_device::mock_graphics_device::MockGraphicsDevice;
use crate::graphics_device::{AttributeFormat, PRIMITIVE_RESTART_INDEX};
use crate::math::{Vec2, Vec4};
use crate::resource::{MaterialDesc, MaterialManager};

fn vertex(x: f32, y: f32, z: f32) -> Vertex {
    Vertex::from_position(Vec3::new(x, y, z))
}

fn triangle() -> Vec<Vertex> {
    vec![vertex(-1.0, 0.0, 2.0), vertex(3.0, -4.0, 0.5), vertex(0.0, 5.0, -1.0)]
}

// ============================================================================
// VERTEX
// ============================================================================

#[test]
fn test_vertex_layout_matches_struct() {
    let layout = Vertex::layout();
    assert_eq!(layout.stride, 48);
    assert_eq!(std::mem::size_of::<Vertex>(), 48);

    let offsets: Vec<u32> = layout.attributes.iter().map(|a| a.offset).collect();
    assert_eq!(offsets, vec![0, 12, 20, 32]);
    let locations: Vec<u32> = layout.attributes.iter().map(|a| a.location).collect();
    assert_eq!(locations, vec![0, 1, 2, 3]);
    assert_eq!(layout.attributes[3].format, AttributeFormat::R32G32B32A32_SFLOAT);

    let total: u32 = layout.attributes.iter().map(|a| a.format.size_bytes()).sum();
    assert_eq!(total, layout.stride);
}

#[test]
fn test_vertex_bytes_are_interleaved() {
    let v = Vertex::new(
        Vec3::new(1.0, 2.0, 3.0),
        Vec2::new(4.0, 5.0),
        Vec3::new(6.0, 7.0, 8.0),
        Vec4::new(9.0, 10.0, 11.0, 12.0),
    );
    let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&v));
    assert_eq!(floats, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0]);
}

// ============================================================================
// PRIM TYPE
// ============================================================================

#[test]
fn test_prim_type_topology() {
    assert_eq!(PrimType::Mesh.topology(), PrimitiveTopology::TriangleList);
    assert_eq!(PrimType::Line.topology(), PrimitiveTopology::LineList);
    assert_eq!(PrimType::LineStrip.topology(), PrimitiveTopology::LineStrip);
    assert_eq!(PrimType::Point.topology(), PrimitiveTopology::PointList);
    assert_eq!(PrimType::Strip.topology(), PrimitiveTopology::TriangleStrip);
}

// ============================================================================
// PRIM
// ============================================================================

#[test]
fn test_new_computes_bounding_box() {
    let mut device = MockGraphicsDevice::new();
    let prim = Prim::new(&mut device, PrimType::Mesh, &triangle(), &[]).unwrap();

    let (min, max) = prim.bounding_box();
    assert_eq!(min, Vec3::new(-1.0, -4.0, -1.0));
    assert_eq!(max, Vec3::new(3.0, 5.0, 2.0));
    assert_eq!(prim.transform, Matrix::identity());
    assert!(prim.material.is_none());
}

#[test]
fn test_empty_prim_has_zero_box() {
    let mut device = MockGraphicsDevice::new();
    let prim = Prim::new(&mut device, PrimType::Point, &[], &[]).unwrap();
    assert_eq!(prim.bounding_box(), (Vec3::zero(), Vec3::zero()));
    assert_eq!(prim.vertex_count(), 0);
}

#[test]
fn test_non_indexed_and_indexed_upload() {
    let mut device = MockGraphicsDevice::new();

    let plain = Prim::new(&mut device, PrimType::Mesh, &triangle(), &[]).unwrap();
    assert!(!plain.is_indexed());
    assert_eq!(plain.vertex_count(), 3);

    let strip = Prim::new(&mut device, PrimType::Strip, &triangle(), &[0, 1, 2, PRIMITIVE_RESTART_INDEX, 2, 1, 0]).unwrap();
    assert!(strip.is_indexed());
    assert_eq!(strip.index_count(), 7);
    assert_eq!(strip.buffers().info().topology, PrimitiveTopology::TriangleStrip);

    assert_eq!(device.commands, vec!["create_buffers 3 0", "create_buffers 3 7"]);
}

#[test]
fn test_destroy_and_drop_release_buffers() {
    let mut device = MockGraphicsDevice::new();
    let a = Prim::new(&mut device, PrimType::Mesh, &triangle(), &[]).unwrap();
    let b = Prim::new(&mut device, PrimType::Line, &triangle()[..2], &[]).unwrap();
    assert_eq!(device.live_buffers(), 2);

    a.destroy();
    assert_eq!(device.live_buffers(), 1);

    drop(b);
    assert_eq!(device.live_buffers(), 0);
}

#[test]
fn test_builders_set_material_and_transform() {
    let mut device = MockGraphicsDevice::new();
    let mut materials = MaterialManager::new();
    let m = materials.create("m", MaterialDesc::default());

    let prim = Prim::new(&mut device, PrimType::Mesh, &triangle(), &[])
        .unwrap()
        .with_material(m.clone())
        .with_transform(Matrix::scale(Vec3::splat(2.0)));

    assert!(Rc::ptr_eq(prim.material.as_ref().unwrap(), &m));
    assert_eq!(prim.transform, Matrix::scale(Vec3::splat(2.0)));
}

// ============================================================================
// PRIMS
// ============================================================================

#[test]
fn test_prims_bounding_box_uses_member_transforms() {
    let mut device = MockGraphicsDevice::new();
    let unit = vec![vertex(0.0, 0.0, 0.0), vertex(1.0, 1.0, 1.0)];

    let mut prims = Prims::new();
    assert_eq!(prims.bounding_box(), (Vec3::zero(), Vec3::zero()));

    prims
        .add(Prim::new(&mut device, PrimType::Line, &unit, &[]).unwrap())
        .add(
            Prim::new(&mut device, PrimType::Line, &unit, &[])
                .unwrap()
                .with_transform(Matrix::translate(Vec3::new(5.0, 0.0, -3.0))),
        );

    assert_eq!(prims.len(), 2);
    let (min, max) = prims.bounding_box();
    assert_eq!(min, Vec3::new(0.0, 0.0, -3.0));
    assert_eq!(max, Vec3::new(6.0, 1.0, 1.0));
}
