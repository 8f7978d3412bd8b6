/// GlTexture - 2D RGBA8 texture

use std::any::Any;
use std::rc::Rc;

use glow::{HasContext, PixelUnpackData};

use prism_engine::prism::device::{Texture, TextureDesc, TextureInfo};
use prism_engine::prism::{Error, Result};
use prism_engine::engine_bail;

pub struct GlTexture {
    gl: Rc<glow::Context>,
    pub(crate) texture: glow::Texture,
    info: TextureInfo,
}

/// Number of levels in a full mipmap chain
pub(crate) fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

impl GlTexture {
    pub(crate) fn new(gl: &Rc<glow::Context>, desc: &TextureDesc<'_>) -> Result<Self> {
        if desc.width == 0 || desc.height == 0 {
            engine_bail!("prism::gl::Texture", "Texture '{}' has zero size", desc.name);
        }
        if desc.data.len() != desc.expected_len() {
            engine_bail!(
                "prism::gl::Texture",
                "Texture '{}' data is {} bytes, expected {}",
                desc.name, desc.data.len(), desc.expected_len()
            );
        }

        unsafe {
            let texture = gl
                .create_texture()
                .map_err(|e| Error::BackendError(format!("Failed to create texture '{}': {}", desc.name, e)))?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA8 as i32,
                desc.width as i32,
                desc.height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                PixelUnpackData::Slice(Some(desc.data)),
            );

            let min_filter = if desc.mipmaps {
                gl.generate_mipmap(glow::TEXTURE_2D);
                glow::LINEAR_MIPMAP_LINEAR
            } else {
                glow::LINEAR
            };
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, min_filter as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            gl.bind_texture(glow::TEXTURE_2D, None);

            let mip_levels = if desc.mipmaps { mip_level_count(desc.width, desc.height) } else { 1 };
            Ok(Self {
                gl: gl.clone(),
                texture,
                info: TextureInfo { width: desc.width, height: desc.height, mip_levels },
            })
        }
    }
}

impl Texture for GlTexture {
    fn info(&self) -> &TextureInfo {
        &self.info
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for GlTexture {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_texture(self.texture);
        }
    }
}

#[cfg(test)]
#[path = "gl_texture_tests.rs"]
mod tests;
