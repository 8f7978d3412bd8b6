/// Texture trait and texture descriptor

use std::any::Any;

/// Descriptor for creating a 2D RGBA8 texture
#[derive(Debug, Clone)]
pub struct TextureDesc<'a> {
    /// Debug name
    pub name: &'a str,
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA8 pixels, `width * height * 4` bytes
    pub data: &'a [u8],
    /// Generate a full mipmap chain
    pub mipmaps: bool,
}

impl TextureDesc<'_> {
    /// Expected byte length of `data`
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

/// Immutable information about a created texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureInfo {
    pub width: u32,
    pub height: u32,
    pub mip_levels: u32,
}

/// GPU texture
pub trait Texture {
    /// Texture information
    fn info(&self) -> &TextureInfo;

    /// Downcast support for backends
    fn as_any(&self) -> &dyn Any;
}
