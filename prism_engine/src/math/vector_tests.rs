//! Unit tests for vector.rs

use super::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const EPS: f32 = 1e-5;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < EPS
}

// ============================================================================
// ARITHMETIC
// ============================================================================

#[test]
fn test_vec3_arithmetic() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(4.0, -5.0, 6.0);

    assert_eq!(a + b, Vec3::new(5.0, -3.0, 9.0));
    assert_eq!(a - b, Vec3::new(-3.0, 7.0, -3.0));
    assert_eq!(-a, Vec3::new(-1.0, -2.0, -3.0));
    assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
    assert_eq!(2.0 * a, a * 2.0);
    assert_eq!(b / 2.0, Vec3::new(2.0, -2.5, 3.0));

    let mut c = a;
    c += b;
    c -= a;
    assert_eq!(c, b);
    c *= 3.0;
    c /= 3.0;
    assert_eq!(c, b);
}

#[test]
fn test_dot_products() {
    assert_eq!(Vec2::new(1.0, 2.0).dot(Vec2::new(3.0, 4.0)), 11.0);
    assert_eq!(Vec3::new(1.0, 2.0, 3.0).dot(Vec3::new(4.0, 5.0, 6.0)), 32.0);
    assert_eq!(Vec4::new(1.0, 2.0, 3.0, 4.0).dot(Vec4::splat(1.0)), 10.0);
}

#[test]
fn test_cross_product_is_orthogonal_to_operands() {
    let a = Vec3::new(0.3, -1.2, 2.5);
    let b = Vec3::new(-4.0, 0.7, 1.1);
    let c = a.cross(b);

    assert!(close(c.dot(a), 0.0));
    assert!(close(c.dot(b), 0.0));
    assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
    assert_eq!(Vec3::Y.cross(Vec3::X), -Vec3::Z);
}

#[test]
fn test_cross_matches_glam() {
    let a = Vec3::new(1.5, 2.0, -0.5);
    let b = Vec3::new(0.25, -3.0, 4.0);
    let expected: Vec3 = glam::Vec3::from(a).cross(glam::Vec3::from(b)).into();
    assert!(a.cross(b).distance(expected) < EPS);
}

// ============================================================================
// LENGTH / NORMALIZATION
// ============================================================================

#[test]
fn test_normalize_gives_unit_length() {
    let mut v = Vec3::new(3.0, -4.0, 12.0);
    assert!(close(v.length(), 13.0));
    v.normalize();
    assert!(close(v.length(), 1.0));

    let n = Vec4::new(1.0, 2.0, 2.0, 4.0).normalized();
    assert!(close(n.length(), 1.0));

    let n2 = Vec2::new(-7.0, 0.5).normalized();
    assert!(close(n2.length(), 1.0));
}

#[test]
fn test_normalize_extreme_magnitudes() {
    // length2 of these overflows or underflows in f32
    let big = Vec3::new(1e20, -3e20, 0.0).normalized();
    assert!(close(big.length(), 1.0), "{:?}", big);
    assert!(big.x > 0.0 && big.y < 0.0);

    let tiny = Vec3::new(1e-25, 0.0, 0.0).normalized();
    assert_eq!(tiny, Vec3::X);

    let huge4 = Vec4::new(f32::MAX, f32::MAX, 0.0, 0.0).normalized();
    assert!(close(huge4.length(), 1.0));
}

#[test]
fn test_normalize_non_finite_is_left_alone() {
    let v = Vec3::new(f32::INFINITY, 1.0, 0.0);
    assert_eq!(v.normalized().y, 1.0);
    assert!(!v.is_finite());
    assert!(Vec3::new(1.0, 2.0, 3.0).is_finite());
}

#[test]
fn test_normalized_leaves_original_untouched() {
    let v = Vec3::new(0.0, 5.0, 0.0);
    let n = v.normalized();
    assert_eq!(v, Vec3::new(0.0, 5.0, 0.0));
    assert_eq!(n, Vec3::Y);
}

#[test]
fn test_normalize_zero_vector_stays_zero() {
    let mut v = Vec3::zero();
    v.normalize();
    assert_eq!(v, Vec3::zero());
    assert!(!v.x.is_nan());
}

#[test]
fn test_distance() {
    let a = Vec3::new(1.0, 1.0, 1.0);
    let b = Vec3::new(4.0, 5.0, 1.0);
    assert_eq!(a.distance2(b), 25.0);
    assert!(close(a.distance(b), 5.0));
}

#[test]
fn test_min_max_lerp() {
    let a = Vec3::new(1.0, 5.0, -2.0);
    let b = Vec3::new(3.0, -1.0, 0.0);
    assert_eq!(a.min(b), Vec3::new(1.0, -1.0, -2.0));
    assert_eq!(a.max(b), Vec3::new(3.0, 5.0, 0.0));
    assert_eq!(a.lerp(b, 0.5), Vec3::new(2.0, 2.0, -1.0));
}

// ============================================================================
// INDEXING / CONVERSIONS
// ============================================================================

#[test]
fn test_indexing() {
    let mut v = Vec4::new(1.0, 2.0, 3.0, 4.0);
    assert_eq!(v[0], 1.0);
    assert_eq!(v[3], 4.0);
    v[2] = 9.0;
    assert_eq!(v.z, 9.0);
}

#[test]
#[should_panic(expected = "index out of range")]
fn test_index_out_of_range_panics() {
    let v = Vec3::new(1.0, 2.0, 3.0);
    let _ = v[3];
}

#[test]
fn test_array_and_vec4_conversions() {
    let v: Vec3 = [1.0, 2.0, 3.0].into();
    let a: [f32; 3] = v.into();
    assert_eq!(a, [1.0, 2.0, 3.0]);
    assert_eq!(v.extend(1.0).truncate(), v);
}

#[test]
fn test_pod_layout() {
    let v = [Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0)];
    let floats: &[f32] = bytemuck::cast_slice(&v);
    assert_eq!(floats, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    assert_eq!(std::mem::size_of::<Vec4>(), 16);
}

// ============================================================================
// RANDOM
// ============================================================================

#[test]
fn test_rnd_respects_ranges() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for _ in 0..200 {
        let v = Vec3::rnd(&mut rng);
        assert!((0.0..=10.0).contains(&v.x));
        assert!((0.0..=6.0).contains(&v.y));
        assert!((0.0..=8.0).contains(&v.z));

        let w = Vec4::rnd(&mut rng);
        assert!((0.0..=4.0).contains(&w.z));
        assert!((0.0..=9.0).contains(&w.w));
    }
}
