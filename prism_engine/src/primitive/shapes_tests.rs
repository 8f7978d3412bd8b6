//! Unit tests for shapes.rs

use super::*;
use crate::graphics_device::mock_graphics_device::MockGraphicsDevice;

const EPS: f32 = 1e-4;

#[test]
fn test_sphere_vertices_lie_on_surface() {
    let shape = Shape::sphere(2.5, 16, 8);

    assert_eq!(shape.prim_type, PrimType::Mesh);
    assert_eq!(shape.vertices.len(), 17 * 9);
    assert_eq!(shape.indices.len(), 16 * 8 * 6);
    for v in &shape.vertices {
        assert!((v.p.length() - 2.5).abs() < EPS);
        assert!((v.n.length() - 1.0).abs() < EPS);
        assert!(v.p.normalized().distance(v.n) < EPS);
    }
    assert!(shape.indices.iter().all(|&i| (i as usize) < shape.vertices.len()));
}

#[test]
fn test_sphere_clamps_tessellation() {
    let shape = Shape::sphere(1.0, 0, 0);
    assert_eq!(shape.vertices.len(), 4 * 3);
}

#[test]
fn test_plane_uses_restart_between_rows() {
    let shape = Shape::plane(4.0, 2.0, 2, 3);

    assert_eq!(shape.prim_type, PrimType::Strip);
    assert_eq!(shape.vertices.len(), 3 * 4);
    let restarts = shape.indices.iter().filter(|&&i| i == PRIMITIVE_RESTART_INDEX).count();
    assert_eq!(restarts, 2);
    assert_eq!(shape.indices.len(), 3 * 6 + 2);

    let (min, max) = shape
        .vertices
        .iter()
        .fold((Vec3::splat(f32::MAX), Vec3::splat(f32::MIN)), |(lo, hi), v| (lo.min(v.p), hi.max(v.p)));
    assert_eq!(min, Vec3::new(-2.0, 0.0, -1.0));
    assert_eq!(max, Vec3::new(2.0, 0.0, 1.0));
    assert!(shape.vertices.iter().all(|v| v.n == Vec3::Y));
}

#[test]
fn test_plane_strip_winds_toward_normal() {
    let shape = Shape::plane(4.0, 2.0, 3, 2);

    let mut triangles = 0;
    for strip in shape.indices.split(|&i| i == PRIMITIVE_RESTART_INDEX) {
        for (k, tri) in strip.windows(3).enumerate() {
            // Odd strip triangles have their first two vertices swapped
            let (a, b, c) = if k % 2 == 0 { (tri[0], tri[1], tri[2]) } else { (tri[1], tri[0], tri[2]) };
            let p = |i: u32| shape.vertices[i as usize].p;
            let n = (p(b) - p(a)).cross(p(c) - p(a));
            assert!(n.dot(Vec3::Y) > 0.0, "triangle {:?} faces {:?}", tri, n);
            triangles += 1;
        }
    }
    assert_eq!(triangles, 2 * 3 * 2);
}

#[test]
fn test_cube_faces() {
    let shape = Shape::cube(2.0);

    assert_eq!(shape.vertices.len(), 24);
    assert_eq!(shape.indices.len(), 36);
    for v in &shape.vertices {
        // Every corner sits on the face its normal points to
        assert!((v.p.dot(v.n) - 1.0).abs() < EPS);
        assert!(v.p.x.abs() <= 1.0 + EPS && v.p.y.abs() <= 1.0 + EPS && v.p.z.abs() <= 1.0 + EPS);
    }
}

#[test]
fn test_cube_triangles_face_outward() {
    let shape = Shape::cube(1.0);
    for tri in shape.indices.chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| shape.vertices[i as usize]);
        let face = (b.p - a.p).cross(c.p - a.p);
        assert!(face.dot(a.n) > 0.0);
    }
}

#[test]
fn test_axes_are_colored_lines() {
    let shape = Shape::axes(3.0);

    assert_eq!(shape.prim_type, PrimType::Line);
    assert!(shape.indices.is_empty());
    assert_eq!(shape.vertices.len(), 6);
    assert_eq!(shape.vertices[1].p, Vec3::new(3.0, 0.0, 0.0));
    assert_eq!(shape.vertices[3].c, Vec4::new(0.0, 1.0, 0.0, 1.0));
    assert_eq!(shape.vertices[5].p, Vec3::new(0.0, 0.0, 3.0));
}

#[test]
fn test_shape_create_uploads_prim() {
    let mut device = MockGraphicsDevice::new();
    let prim = Shape::cube(1.0).create(&mut device).unwrap();

    assert_eq!(prim.index_count(), 36);
    assert_eq!(prim.bounding_box(), (Vec3::splat(-0.5), Vec3::splat(0.5)));
    assert_eq!(device.commands, vec!["create_buffers 24 36"]);
}

// ============================================================================
// NORMALS
// ============================================================================

#[test]
fn test_evaluate_normals_single_triangle() {
    let mut vertices = vec![
        Vertex::from_position(Vec3::new(0.0, 0.0, 0.0)),
        Vertex::from_position(Vec3::new(1.0, 0.0, 0.0)),
        Vertex::from_position(Vec3::new(0.0, 1.0, 0.0)),
    ];
    evaluate_normals(&mut vertices, &[]);
    assert!(vertices.iter().all(|v| v.n == Vec3::Z));
}

#[test]
fn test_evaluate_normals_matches_generated_sphere() {
    let mut shape = Shape::sphere(1.0, 24, 12);
    let expected: Vec<Vec3> = shape.vertices.iter().map(|v| v.n).collect();
    evaluate_normals(&mut shape.vertices, &shape.indices);

    // Skip the poles and the seam, where vertices are duplicated
    for (i, v) in shape.vertices.iter().enumerate() {
        let (stack, slice) = (i / 25, i % 25);
        if stack == 0 || stack == 12 || slice == 0 || slice == 24 {
            continue;
        }
        assert!(v.n.dot(expected[i]) > 0.99, "vertex {}: {:?} vs {:?}", i, v.n, expected[i]);
    }
}

#[test]
fn test_evaluate_normals_skips_restart_indices() {
    let mut vertices = vec![
        Vertex::from_position(Vec3::new(0.0, 0.0, 0.0)),
        Vertex::from_position(Vec3::new(0.0, 0.0, 1.0)),
        Vertex::from_position(Vec3::new(1.0, 0.0, 0.0)),
    ];
    evaluate_normals(&mut vertices, &[0, 1, 2, 0, PRIMITIVE_RESTART_INDEX, 1]);
    assert!(vertices.iter().all(|v| v.n.distance(Vec3::Y) < EPS));
}
