//! Unit tests for texture.rs

use super::*;
use crate::error::Error;
use crate::graphics_device::mock_graphics_device::MockGraphicsDevice;
use std::path::PathBuf;

fn temp_file(test: &str, ext: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("prism_textures_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir.join(format!("{}.{}", test, ext))
}

fn write_png(path: &Path, width: u32, height: u32) {
    let img = image::RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x * 40) as u8, (y * 40) as u8, 128, 255])
    });
    img.save(path).unwrap();
}

// ============================================================================
// CREATE
// ============================================================================

#[test]
fn test_create_texture() {
    let mut device = MockGraphicsDevice::new();
    let mut textures = TextureManager::new();

    let tex = textures.create(&mut device, "white", 2, 2, &[255u8; 16]).unwrap();

    assert_eq!(tex.name(), "white");
    assert_eq!((tex.width(), tex.height()), (2, 2));
    assert_eq!(tex.handle().info().width, 2);
    assert_eq!(device.count("create_texture white"), 1);
    assert!(Rc::ptr_eq(&tex, &textures.find("white").unwrap()));
}

#[test]
fn test_create_rejects_wrong_data_size() {
    let mut device = MockGraphicsDevice::new();
    let mut textures = TextureManager::new();

    let result = textures.create(&mut device, "bad", 2, 2, &[0u8; 15]);
    assert!(matches!(result, Err(Error::InvalidResource(_))));
    assert!(textures.is_empty());
    assert_eq!(device.count("create_texture"), 0);
}

#[test]
fn test_create_rejects_zero_size() {
    let mut device = MockGraphicsDevice::new();
    let mut textures = TextureManager::new();
    assert!(textures.create(&mut device, "empty", 0, 4, &[]).is_err());
}

// ============================================================================
// LOAD
// ============================================================================

#[test]
fn test_load_png() {
    let path = temp_file("load_png", "png");
    write_png(&path, 4, 3);
    let mut device = MockGraphicsDevice::new();
    let mut textures = TextureManager::new();

    let tex = textures.load(&mut device, "checker", &path).unwrap();

    assert_eq!((tex.width(), tex.height()), (4, 3));
    assert_eq!(textures.names(), vec!["checker".to_string()]);
}

#[test]
fn test_load_is_find_or_create() {
    let path = temp_file("load_twice", "png");
    write_png(&path, 2, 2);
    let mut device = MockGraphicsDevice::new();
    let mut textures = TextureManager::new();

    let a = textures.load(&mut device, "tex", &path).unwrap();
    let b = textures.load(&mut device, "tex", "does/not/matter.png").unwrap();

    assert!(Rc::ptr_eq(&a, &b));
    assert_eq!(device.count("create_texture"), 1);
    assert_eq!(textures.len(), 1);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let mut device = MockGraphicsDevice::new();
    let mut textures = TextureManager::new();

    let result = textures.load(&mut device, "ghost", temp_file("missing", "png"));
    assert!(matches!(result, Err(Error::Io(_))));
    assert!(textures.find("ghost").is_none());
}
