/// Mock GraphicsDevice for unit tests (no GPU required)
///
/// Records every call as a short command string so tests can check the
/// exact sequence the renderer and managers issue.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::graphics_device::{
    ClearFlags, DeviceStats, FillMode, GraphicsDevice, PrimitiveBuffers, PrimitiveBuffersDesc,
    PrimitiveBuffersInfo, Shader, ShaderDesc, Texture, TextureDesc, TextureInfo, UniformValue,
};

// ============================================================================
// Mock Buffers
// ============================================================================

#[derive(Debug)]
pub struct MockPrimitiveBuffers {
    pub info: PrimitiveBuffersInfo,
    pub vertex_bytes: usize,
    live: Rc<Cell<u32>>,
}

impl PrimitiveBuffers for MockPrimitiveBuffers {
    fn info(&self) -> &PrimitiveBuffersInfo {
        &self.info
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for MockPrimitiveBuffers {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

// ============================================================================
// Mock Texture
// ============================================================================

#[derive(Debug)]
pub struct MockTexture {
    pub info: TextureInfo,
    pub name: String,
}

impl Texture for MockTexture {
    fn info(&self) -> &TextureInfo {
        &self.info
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ============================================================================
// Mock Shader
// ============================================================================

#[derive(Debug)]
pub struct MockShader {
    pub name: String,
    /// Uniform names declared in the sources (`uniform <type> <name>;`)
    pub uniforms: Vec<String>,
}

impl MockShader {
    pub fn new(name: &str, vertex_source: &str, fragment_source: &str) -> Self {
        let mut uniforms = Vec::new();
        for line in vertex_source.lines().chain(fragment_source.lines()) {
            let mut words = line.trim().trim_end_matches(';').split_whitespace();
            if words.next() == Some("uniform") {
                if let Some(name) = words.nth(1) {
                    if !uniforms.iter().any(|u| u == name) {
                        uniforms.push(name.to_string());
                    }
                }
            }
        }
        Self { name: name.to_string(), uniforms }
    }
}

impl Shader for MockShader {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ============================================================================
// Mock GraphicsDevice
// ============================================================================

#[derive(Debug, Default)]
pub struct MockGraphicsDevice {
    pub commands: Vec<String>,
    pub uniforms: Vec<(String, UniformValue)>,
    pub viewport: (u32, u32),
    pub fill_mode: FillMode,
    pub fail_shaders: bool,
    stats: DeviceStats,
    live_buffers: Rc<Cell<u32>>,
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of primitive buffers created and not yet dropped
    pub fn live_buffers(&self) -> u32 {
        self.live_buffers.get()
    }

    /// Last value set for a uniform name
    pub fn uniform(&self, name: &str) -> Option<UniformValue> {
        self.uniforms.iter().rev().find(|(n, _)| n == name).map(|(_, v)| *v)
    }

    /// Count commands starting with a prefix
    pub fn count(&self, prefix: &str) -> usize {
        self.commands.iter().filter(|c| c.starts_with(prefix)).count()
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_primitive_buffers(&mut self, desc: &PrimitiveBuffersDesc<'_>) -> Result<Rc<dyn PrimitiveBuffers>> {
        if desc.vertex_data.len() != (desc.vertex_count * desc.layout.stride) as usize {
            return Err(Error::InvalidResource("vertex data size mismatch".to_string()));
        }
        self.live_buffers.set(self.live_buffers.get() + 1);
        self.commands.push(format!("create_buffers {} {}", desc.vertex_count, desc.indices.len()));
        Ok(Rc::new(MockPrimitiveBuffers {
            info: PrimitiveBuffersInfo {
                vertex_count: desc.vertex_count,
                index_count: desc.indices.len() as u32,
                topology: desc.topology,
            },
            vertex_bytes: desc.vertex_data.len(),
            live: self.live_buffers.clone(),
        }))
    }

    fn create_texture(&mut self, desc: &TextureDesc<'_>) -> Result<Rc<dyn Texture>> {
        if desc.data.len() != desc.expected_len() {
            return Err(Error::InvalidResource(format!("texture '{}' data size mismatch", desc.name)));
        }
        self.commands.push(format!("create_texture {}", desc.name));
        Ok(Rc::new(MockTexture {
            info: TextureInfo { width: desc.width, height: desc.height, mip_levels: 1 },
            name: desc.name.to_string(),
        }))
    }

    fn create_shader(&mut self, desc: &ShaderDesc<'_>) -> Result<Rc<dyn Shader>> {
        if self.fail_shaders {
            return Err(Error::ShaderCompilation(format!("{}: mock failure", desc.name)));
        }
        self.commands.push(format!("create_shader {}", desc.name));
        Ok(Rc::new(MockShader::new(desc.name, desc.vertex_source, desc.fragment_source)))
    }

    fn begin_frame(&mut self, clear: ClearFlags) {
        self.stats.draw_calls = 0;
        self.stats.vertices = 0;
        self.commands.push(format!("begin_frame {:?}", clear));
    }

    fn end_frame(&mut self) {
        self.commands.push("end_frame".to_string());
    }

    fn present(&mut self) -> Result<()> {
        self.stats.frames += 1;
        self.commands.push("present".to_string());
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
        self.commands.push(format!("resize {}x{}", width, height));
    }

    fn use_shader(&mut self, shader: Option<&dyn Shader>) {
        match shader {
            Some(s) => self.commands.push(format!("use_shader {}", s.name())),
            None => self.commands.push("use_shader none".to_string()),
        }
    }

    fn set_uniform(&mut self, shader: &dyn Shader, name: &str, value: UniformValue) -> bool {
        let Some(mock) = shader.as_any().downcast_ref::<MockShader>() else {
            return false;
        };
        if !mock.uniforms.iter().any(|u| u == name) {
            return false;
        }
        self.uniforms.push((name.to_string(), value));
        true
    }

    fn bind_texture(&mut self, unit: u32, texture: Option<&dyn Texture>) {
        let name = texture
            .and_then(|t| t.as_any().downcast_ref::<MockTexture>())
            .map(|t| t.name.clone())
            .unwrap_or_else(|| "none".to_string());
        self.commands.push(format!("bind_texture {} {}", unit, name));
    }

    fn draw(&mut self, buffers: &dyn PrimitiveBuffers) {
        let info = buffers.info();
        let count = if info.is_indexed() { info.index_count } else { info.vertex_count };
        self.stats.draw_calls += 1;
        self.stats.vertices += count;
        self.commands.push(format!("draw {:?} {}", info.topology, count));
    }

    fn set_fill_mode(&mut self, mode: FillMode) {
        self.fill_mode = mode;
        self.commands.push(format!("fill_mode {:?}", mode));
    }

    fn stats(&self) -> DeviceStats {
        self.stats
    }
}

// ============================================================================
// Shared handle (lets tests inspect a device owned by Render/Anim)
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct SharedMockDevice(pub Rc<RefCell<MockGraphicsDevice>>);

impl SharedMockDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn boxed(&self) -> Box<dyn GraphicsDevice> {
        Box::new(self.clone())
    }
}

impl GraphicsDevice for SharedMockDevice {
    fn create_primitive_buffers(&mut self, desc: &PrimitiveBuffersDesc<'_>) -> Result<Rc<dyn PrimitiveBuffers>> {
        self.0.borrow_mut().create_primitive_buffers(desc)
    }

    fn create_texture(&mut self, desc: &TextureDesc<'_>) -> Result<Rc<dyn Texture>> {
        self.0.borrow_mut().create_texture(desc)
    }

    fn create_shader(&mut self, desc: &ShaderDesc<'_>) -> Result<Rc<dyn Shader>> {
        self.0.borrow_mut().create_shader(desc)
    }

    fn begin_frame(&mut self, clear: ClearFlags) {
        self.0.borrow_mut().begin_frame(clear)
    }

    fn end_frame(&mut self) {
        self.0.borrow_mut().end_frame()
    }

    fn present(&mut self) -> Result<()> {
        self.0.borrow_mut().present()
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.0.borrow_mut().resize(width, height)
    }

    fn use_shader(&mut self, shader: Option<&dyn Shader>) {
        self.0.borrow_mut().use_shader(shader)
    }

    fn set_uniform(&mut self, shader: &dyn Shader, name: &str, value: UniformValue) -> bool {
        self.0.borrow_mut().set_uniform(shader, name, value)
    }

    fn bind_texture(&mut self, unit: u32, texture: Option<&dyn Texture>) {
        self.0.borrow_mut().bind_texture(unit, texture)
    }

    fn draw(&mut self, buffers: &dyn PrimitiveBuffers) {
        self.0.borrow_mut().draw(buffers)
    }

    fn set_fill_mode(&mut self, mode: FillMode) {
        self.0.borrow_mut().set_fill_mode(mode)
    }

    fn stats(&self) -> DeviceStats {
        self.0.borrow().stats()
    }
}
