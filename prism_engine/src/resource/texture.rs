/// Resource-level texture type.
///
/// Wraps a device `Texture` (GPU object) with its name and size. Textures are
/// created from raw RGBA8 pixels or decoded from PNG/JPEG files.

use std::fmt;
use std::path::Path;
use std::rc::Rc;

use crate::error::Result;
use crate::graphics_device::{GraphicsDevice, Texture as DeviceTexture, TextureDesc};
use crate::resource::ResourceStock;
use crate::{engine_bail, engine_error, engine_info};

// ===== TEXTURE =====

/// Named 2D RGBA texture resource
pub struct Texture {
    name: String,
    width: u32,
    height: u32,
    handle: Rc<dyn DeviceTexture>,
}

impl Texture {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Device texture handle
    pub fn handle(&self) -> &dyn DeviceTexture {
        self.handle.as_ref()
    }
}

impl fmt::Debug for Texture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Texture")
            .field("name", &self.name)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

// ===== TEXTURE MANAGER =====

/// Texture stock
#[derive(Debug, Default)]
pub struct TextureManager {
    stock: ResourceStock<Texture>,
}

impl TextureManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a texture from tightly packed RGBA8 pixels
    ///
    /// Replaces any texture with the same name.
    ///
    /// # Errors
    ///
    /// Returns an error if the size is zero or `rgba` is not `width * height * 4` bytes
    pub fn create(
        &mut self,
        device: &mut dyn GraphicsDevice,
        name: &str,
        width: u32,
        height: u32,
        rgba: &[u8],
    ) -> Result<Rc<Texture>> {
        if width == 0 || height == 0 {
            engine_bail!("prism::TextureManager", "Texture '{}' has zero size {}x{}", name, width, height);
        }
        let desc = TextureDesc { name, width, height, data: rgba, mipmaps: true };
        if rgba.len() != desc.expected_len() {
            engine_bail!(
                "prism::TextureManager",
                "Texture '{}': expected {} bytes of RGBA data, got {}",
                name, desc.expected_len(), rgba.len()
            );
        }

        let handle = device.create_texture(&desc)?;
        Ok(self.stock.insert(name, Texture {
            name: name.to_string(),
            width,
            height,
            handle,
        }))
    }

    /// Find a texture by name, or decode `path` (PNG/JPEG) into a new one
    pub fn load(
        &mut self,
        device: &mut dyn GraphicsDevice,
        name: &str,
        path: impl AsRef<Path>,
    ) -> Result<Rc<Texture>> {
        if let Some(texture) = self.stock.find(name) {
            return Ok(texture);
        }

        let path = path.as_ref();
        let image = image::open(path)
            .map_err(|e| {
                engine_error!("prism::TextureManager", "Cannot load '{}' from {}: {}", name, path.display(), e);
                e
            })?
            .to_rgba8();
        let (width, height) = image.dimensions();

        let texture = self.create(device, name, width, height, image.as_raw())?;
        engine_info!("prism::TextureManager", "Texture '{}' loaded ({}x{})", name, width, height);
        Ok(texture)
    }

    pub fn find(&self, name: &str) -> Option<Rc<Texture>> {
        self.stock.find(name)
    }

    pub fn len(&self) -> usize {
        self.stock.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stock.is_empty()
    }

    /// Texture names, sorted
    pub fn names(&self) -> Vec<String> {
        self.stock.names()
    }
}

#[cfg(test)]
#[path = "texture_tests.rs"]
mod tests;
