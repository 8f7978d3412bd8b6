//! Unit tests for gl_texture.rs (no GL context required)

use super::*;

#[test]
fn test_mip_level_count() {
    assert_eq!(mip_level_count(1, 1), 1);
    assert_eq!(mip_level_count(2, 1), 2);
    assert_eq!(mip_level_count(256, 256), 9);
    // Non-power-of-two rounds down per level
    assert_eq!(mip_level_count(300, 20), 9);
    assert_eq!(mip_level_count(0, 0), 1);
}
