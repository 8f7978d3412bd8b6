/// Resource-level material type.
///
/// A Material is a Phong surface description: ambient/diffuse/specular
/// coefficients, shininess, transparency, up to eight texture slots and the
/// name of the shader program that renders it. Applying a material pushes
/// these values to the program as uniforms.

use std::rc::Rc;

use crate::error::{Error, Result};
use crate::graphics_device::{GraphicsDevice, UniformValue};
use crate::math::Vec3;
use crate::resource::{ResourceStock, ShaderProgram, Texture, DEFAULT_SHADER};
use crate::{engine_debug, engine_error, engine_warn};

/// Name of the fallback material
pub const DEFAULT_MATERIAL: &str = "DEFAULT";

/// Number of texture slots per material
pub const MAX_TEXTURES: usize = 8;

// ===== MATERIAL =====

/// Material resource
#[derive(Debug, Clone)]
pub struct Material {
    name: String,
    /// Ambient coefficient
    pub ka: Vec3,
    /// Diffuse coefficient
    pub kd: Vec3,
    /// Specular coefficient
    pub ks: Vec3,
    /// Phong exponent
    pub ph: f32,
    /// Opacity (1 = opaque)
    pub trans: f32,
    pub textures: [Option<Rc<Texture>>; MAX_TEXTURES],
    /// Shader program name
    pub shader: String,
}

impl Material {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of occupied texture slots
    pub fn texture_count(&self) -> usize {
        self.textures.iter().filter(|t| t.is_some()).count()
    }
}

// ===== DESCRIPTOR =====

/// Material creation descriptor
///
/// `Default` is the gold-like fallback material.
#[derive(Debug, Clone)]
pub struct MaterialDesc {
    pub ka: Vec3,
    pub kd: Vec3,
    pub ks: Vec3,
    pub ph: f32,
    pub trans: f32,
    /// Textures for slots 0.. (extra entries beyond `MAX_TEXTURES` are ignored)
    pub textures: Vec<Rc<Texture>>,
    pub shader: String,
}

impl Default for MaterialDesc {
    fn default() -> Self {
        Self {
            ka: Vec3::new(0.24, 0.19, 0.07),
            kd: Vec3::new(0.75, 0.60, 0.23),
            ks: Vec3::new(0.63, 0.56, 0.37),
            ph: 51.2,
            trans: 1.0,
            textures: Vec::new(),
            shader: DEFAULT_SHADER.to_string(),
        }
    }
}

// ===== MATERIAL MANAGER =====

/// Material stock
#[derive(Debug, Default)]
pub struct MaterialManager {
    stock: ResourceStock<Material>,
}

impl MaterialManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the `"DEFAULT"` material
    pub fn init(&mut self) -> Rc<Material> {
        self.create(DEFAULT_MATERIAL, MaterialDesc::default())
    }

    /// Find a material by name, or create it from `desc`
    pub fn create(&mut self, name: &str, desc: MaterialDesc) -> Rc<Material> {
        if let Some(material) = self.stock.find(name) {
            return material;
        }

        if desc.textures.len() > MAX_TEXTURES {
            engine_warn!(
                "prism::MaterialManager",
                "Material '{}': {} textures given, only {} slots used",
                name, desc.textures.len(), MAX_TEXTURES
            );
        }
        let mut textures: [Option<Rc<Texture>>; MAX_TEXTURES] = Default::default();
        for (slot, texture) in textures.iter_mut().zip(desc.textures) {
            *slot = Some(texture);
        }

        engine_debug!("prism::MaterialManager", "Material '{}' created", name);
        self.stock.insert(name, Material {
            name: name.to_string(),
            ka: desc.ka,
            kd: desc.kd,
            ks: desc.ks,
            ph: desc.ph,
            trans: desc.trans,
            textures,
            shader: desc.shader,
        })
    }

    pub fn find(&self, name: &str) -> Option<Rc<Material>> {
        self.stock.find(name)
    }

    /// The named material, or `"DEFAULT"` when `None`
    pub fn resolve(&self, material: Option<&Rc<Material>>) -> Result<Rc<Material>> {
        match material {
            Some(m) => Ok(m.clone()),
            None => self.default_material(),
        }
    }

    fn default_material(&self) -> Result<Rc<Material>> {
        self.stock.find(DEFAULT_MATERIAL).ok_or_else(|| {
            let err = Error::ResourceNotFound(format!("material '{}'", DEFAULT_MATERIAL));
            engine_error!("prism::MaterialManager", "{}", err);
            err
        })
    }

    /// Make `shader` current and upload the material's uniforms and textures
    ///
    /// `None` applies `"DEFAULT"`. Uniforms the program does not declare are skipped.
    pub fn apply(
        &self,
        material: Option<&Material>,
        shader: &ShaderProgram,
        device: &mut dyn GraphicsDevice,
    ) -> Result<()> {
        let fallback;
        let material = match material {
            Some(m) => m,
            None => {
                fallback = self.default_material()?;
                fallback.as_ref()
            }
        };

        let program = shader.handle();
        device.use_shader(Some(program));

        device.set_uniform(program, "Ka", UniformValue::Vec3(material.ka.to_array()));
        device.set_uniform(program, "Kd", UniformValue::Vec3(material.kd.to_array()));
        device.set_uniform(program, "Ks", UniformValue::Vec3(material.ks.to_array()));
        device.set_uniform(program, "Ph", UniformValue::Float(material.ph));
        device.set_uniform(program, "Trans", UniformValue::Float(material.trans));

        for (unit, texture) in material.textures.iter().enumerate() {
            let is_texture = format!("IsTexture{}", unit);
            match texture {
                Some(texture) => {
                    device.set_uniform(program, &is_texture, UniformValue::Int(1));
                    device.bind_texture(unit as u32, Some(texture.handle()));
                    device.set_uniform(program, &format!("Tex{}", unit), UniformValue::Int(unit as i32));
                }
                None => {
                    device.set_uniform(program, &is_texture, UniformValue::Int(0));
                }
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.stock.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stock.is_empty()
    }

    /// Material names, sorted
    pub fn names(&self) -> Vec<String> {
        self.stock.names()
    }
}

#[cfg(test)]
#[path = "material_tests.rs"]
mod tests;
