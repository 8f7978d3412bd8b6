/// Render - per-window drawing context
///
/// Owns the graphics device, the camera and the shader/texture/material
/// stocks. A frame is `start` → any number of `draw` calls → `end` →
/// `copy_frame`.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::graphics_device::{ClearFlags, DeviceStats, FillMode, GraphicsDevice, UniformValue};
use crate::math::{Camera, Matrix, Vec3};
use crate::primitive::{Prim, PrimType, Prims, Shape, Vertex};
use crate::resource::{
    Material, MaterialDesc, MaterialManager, ShaderManager, ShaderProgram, Texture, TextureManager,
    DEFAULT_SHADER,
};
use crate::{engine_debug, engine_error, engine_info};

// ============================================================================
// Configuration
// ============================================================================

/// Render configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Root directory of `<name>/vert.glsl` + `frag.glsl` shader programs
    pub shader_dir: PathBuf,
    /// Initial frame size
    pub frame_size: (u32, u32),
    pub camera_loc: Vec3,
    pub camera_at: Vec3,
    pub camera_up: Vec3,
    /// Projection plane size
    pub proj_size: f32,
    /// Near plane distance
    pub proj_dist: f32,
    pub far_clip: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            shader_dir: PathBuf::from("shaders"),
            frame_size: Camera::DEFAULT_FRAME_SIZE,
            camera_loc: Vec3::new(3.0, 0.0, 4.0),
            camera_at: Vec3::zero(),
            camera_up: Vec3::Y,
            proj_size: Camera::DEFAULT_PROJ_SIZE,
            proj_dist: Camera::DEFAULT_PROJ_DIST,
            far_clip: Camera::DEFAULT_FAR_CLIP,
        }
    }
}

// ============================================================================
// Render
// ============================================================================

pub struct Render {
    camera: Camera,
    shaders: ShaderManager,
    textures: TextureManager,
    materials: MaterialManager,
    frame_size: (u32, u32),
    /// Value of the `Time` uniform
    time: f32,
    wireframe: bool,
    // Last: the stocks hold device resources
    device: Box<dyn GraphicsDevice>,
}

impl Render {
    /// Wrap a device, apply the frame size and build the camera matrices
    pub fn new(device: Box<dyn GraphicsDevice>, config: &RenderConfig) -> Self {
        let mut camera = Camera::new(config.camera_loc, config.camera_at, config.camera_up);
        camera.set_proj_params(config.proj_size, config.proj_dist, config.far_clip);

        let mut render = Self {
            camera,
            shaders: ShaderManager::new(&config.shader_dir),
            textures: TextureManager::new(),
            materials: MaterialManager::new(),
            frame_size: config.frame_size,
            time: 0.0,
            wireframe: false,
            device,
        };
        render.resize(config.frame_size.0, config.frame_size.1);
        render
    }

    /// Create the `"DEFAULT"` shader program and material
    pub fn init(&mut self) -> Result<()> {
        self.shaders.init(self.device.as_mut())?;
        self.materials.init();
        engine_info!("prism::Render", "Render initialized");
        Ok(())
    }

    // ===== FRAME =====

    /// Clear color and depth
    pub fn start(&mut self) {
        self.device.begin_frame(ClearFlags::COLOR | ClearFlags::DEPTH);
    }

    /// Finish submitted GPU work
    pub fn end(&mut self) {
        self.device.end_frame();
    }

    /// Present the frame
    pub fn copy_frame(&mut self) -> Result<()> {
        self.device.present()
    }

    /// Set viewport and camera frame size
    pub fn resize(&mut self, width: u32, height: u32) {
        self.frame_size = (width, height);
        self.device.resize(width, height);
        self.camera.resize(width, height);
    }

    // ===== DRAWING =====

    /// Shader program for a material, falling back to `"DEFAULT"`
    fn program_for(&self, material: &Material) -> Result<Rc<ShaderProgram>> {
        if let Some(program) = self.shaders.find(&material.shader) {
            return Ok(program);
        }
        engine_debug!(
            "prism::Render",
            "Shader '{}' of material '{}' not found, using DEFAULT",
            material.shader, material.name()
        );
        self.shaders.find(DEFAULT_SHADER).ok_or_else(|| {
            let err = Error::ResourceNotFound(format!("shader '{}'", DEFAULT_SHADER));
            engine_error!("prism::Render", "{}", err);
            err
        })
    }

    /// Draw one prim with an extra world transform
    ///
    /// Sets `WVP`, `InvTrans`, `World`, `CamLoc` and `Time` besides the
    /// material uniforms.
    pub fn draw(&mut self, prim: &Prim, world: &Matrix) -> Result<()> {
        let material = self.materials.resolve(prim.material.as_ref())?;
        let program = self.program_for(&material)?;
        self.materials.apply(Some(&*material), &program, self.device.as_mut())?;

        let world = &prim.transform * world;
        let wvp = &world * self.camera.vp();
        let inv_trans = world.inverse().transpose();

        let shader = program.handle();
        let device = self.device.as_mut();
        device.set_uniform(shader, "WVP", UniformValue::Mat4(wvp.to_array()));
        device.set_uniform(shader, "InvTrans", UniformValue::Mat4(inv_trans.to_array()));
        device.set_uniform(shader, "World", UniformValue::Mat4(world.to_array()));
        device.set_uniform(shader, "CamLoc", UniformValue::Vec3(self.camera.loc().to_array()));
        device.set_uniform(shader, "Time", UniformValue::Float(self.time));

        device.draw(prim.buffers());
        device.use_shader(None);
        Ok(())
    }

    /// Draw every prim of a group with `prims.transform * world`
    pub fn draw_prims(&mut self, prims: &Prims, world: &Matrix) -> Result<()> {
        let world = &prims.transform * world;
        for prim in prims.iter() {
            self.draw(prim, &world)?;
        }
        Ok(())
    }

    // ===== STATE =====

    pub fn set_wireframe(&mut self, wireframe: bool) {
        self.wireframe = wireframe;
        self.device.set_fill_mode(if wireframe { FillMode::Wireframe } else { FillMode::Solid });
    }

    pub fn is_wireframe(&self) -> bool {
        self.wireframe
    }

    /// Draw statistics since `start`
    pub fn stats(&self) -> DeviceStats {
        self.device.stats()
    }

    /// Set the value sent as the `Time` uniform
    pub fn set_time(&mut self, time: f32) {
        self.time = time;
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn frame_size(&self) -> (u32, u32) {
        self.frame_size
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Underlying device
    pub fn device_mut(&mut self) -> &mut dyn GraphicsDevice {
        self.device.as_mut()
    }

    // ===== RESOURCES =====

    pub fn shaders(&self) -> &ShaderManager {
        &self.shaders
    }

    pub fn textures(&self) -> &TextureManager {
        &self.textures
    }

    pub fn materials(&self) -> &MaterialManager {
        &self.materials
    }

    /// Find or compile `<shader_dir>/<name>/`
    pub fn load_shader(&mut self, name: &str) -> Result<Rc<ShaderProgram>> {
        self.shaders.load(self.device.as_mut(), name)
    }

    /// Recompile every shader program loaded from disk
    pub fn reload_shaders(&mut self) -> usize {
        self.shaders.reload_all(self.device.as_mut())
    }

    /// Find or decode a PNG/JPEG texture
    pub fn load_texture(&mut self, name: &str, path: impl AsRef<Path>) -> Result<Rc<Texture>> {
        self.textures.load(self.device.as_mut(), name, path)
    }

    /// Create a texture from RGBA8 pixels
    pub fn create_texture(&mut self, name: &str, width: u32, height: u32, rgba: &[u8]) -> Result<Rc<Texture>> {
        self.textures.create(self.device.as_mut(), name, width, height, rgba)
    }

    /// Find or create a material
    pub fn create_material(&mut self, name: &str, desc: MaterialDesc) -> Rc<Material> {
        self.materials.create(name, desc)
    }

    /// Upload a prim
    pub fn create_prim(&mut self, prim_type: PrimType, vertices: &[Vertex], indices: &[u32]) -> Result<Prim> {
        Prim::new(self.device.as_mut(), prim_type, vertices, indices)
    }

    /// Upload a generated shape
    pub fn create_shape(&mut self, shape: &Shape) -> Result<Prim> {
        shape.create(self.device.as_mut())
    }
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
