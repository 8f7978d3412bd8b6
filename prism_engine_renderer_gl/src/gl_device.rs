/// GlGraphicsDevice - OpenGL implementation of the GraphicsDevice trait

use std::rc::Rc;

use glow::HasContext;
use winit::window::Window;

use prism_engine::prism::device::{
    ClearFlags, DeviceConfig, DeviceStats, FillMode, GraphicsDevice, PrimitiveBuffers,
    PrimitiveBuffersDesc, Shader, ShaderDesc, Texture, TextureDesc, UniformValue,
};
use prism_engine::prism::Result;
use prism_engine::{engine_error, engine_info, engine_warn};

use crate::gl_buffers::{gl_topology, GlPrimitiveBuffers};
use crate::gl_context::GlContext;
use crate::gl_shader::GlShader;
use crate::gl_texture::GlTexture;

pub struct GlGraphicsDevice {
    config: DeviceConfig,
    stats: DeviceStats,
    current_program: Option<glow::Program>,
    // Last: resources created by this device share its GL context
    context: GlContext,
}

impl GlGraphicsDevice {
    /// Create a context for the window and set the fixed pipeline state
    ///
    /// Enables depth test (less-or-equal) and alpha blending, disables face
    /// culling and applies the clear color. Restart indices are handled by
    /// splitting indexed draws, see `GlPrimitiveBuffers`.
    pub fn new(window: &Window, config: &DeviceConfig) -> Result<Self> {
        let context = GlContext::new(window, config)?;
        let size = window.inner_size();

        let mut device = Self {
            config: config.clone(),
            stats: DeviceStats::default(),
            current_program: None,
            context,
        };
        device.init_state();
        device.resize(size.width, size.height);

        engine_info!("prism::gl::Device", "OpenGL device created ({}x{})", size.width, size.height);
        Ok(device)
    }

    fn gl(&self) -> &glow::Context {
        &self.context.gl
    }

    fn init_state(&self) {
        let [r, g, b, a] = self.config.clear_color;
        let gl = self.gl();
        unsafe {
            gl.clear_color(r, g, b, a);
            gl.enable(glow::DEPTH_TEST);
            gl.depth_func(glow::LEQUAL);
            gl.enable(glow::BLEND);
            gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
            gl.disable(glow::CULL_FACE);
        }
    }

    fn make_current(&mut self, program: glow::Program) {
        if self.current_program != Some(program) {
            unsafe { self.context.gl.use_program(Some(program)) };
            self.current_program = Some(program);
        }
    }
}

impl GraphicsDevice for GlGraphicsDevice {
    fn create_primitive_buffers(&mut self, desc: &PrimitiveBuffersDesc<'_>) -> Result<Rc<dyn PrimitiveBuffers>> {
        Ok(Rc::new(GlPrimitiveBuffers::new(&self.context.gl, desc)?))
    }

    fn create_texture(&mut self, desc: &TextureDesc<'_>) -> Result<Rc<dyn Texture>> {
        Ok(Rc::new(GlTexture::new(&self.context.gl, desc)?))
    }

    fn create_shader(&mut self, desc: &ShaderDesc<'_>) -> Result<Rc<dyn Shader>> {
        Ok(Rc::new(GlShader::new(&self.context.gl, desc)?))
    }

    fn begin_frame(&mut self, clear: ClearFlags) {
        self.stats.draw_calls = 0;
        self.stats.vertices = 0;

        let mut mask = 0;
        if clear.contains(ClearFlags::COLOR) {
            mask |= glow::COLOR_BUFFER_BIT;
        }
        if clear.contains(ClearFlags::DEPTH) {
            mask |= glow::DEPTH_BUFFER_BIT;
        }
        if mask != 0 {
            unsafe { self.gl().clear(mask) };
        }
    }

    fn end_frame(&mut self) {
        unsafe { self.gl().finish() };
    }

    fn present(&mut self) -> Result<()> {
        self.context.swap_buffers()?;
        self.stats.frames += 1;
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
        unsafe { self.gl().viewport(0, 0, width as i32, height as i32) };
    }

    fn use_shader(&mut self, shader: Option<&dyn Shader>) {
        match shader.and_then(|s| s.as_any().downcast_ref::<GlShader>()) {
            Some(gl_shader) => self.make_current(gl_shader.program),
            None => {
                if shader.is_some() {
                    engine_warn!("prism::gl::Device", "use_shader: not an OpenGL shader");
                }
                unsafe { self.gl().use_program(None) };
                self.current_program = None;
            }
        }
    }

    fn set_uniform(&mut self, shader: &dyn Shader, name: &str, value: UniformValue) -> bool {
        let Some(gl_shader) = shader.as_any().downcast_ref::<GlShader>() else {
            return false;
        };
        let Some(location) = gl_shader.location(name) else {
            return false;
        };
        self.make_current(gl_shader.program);

        let gl = self.gl();
        let location = Some(&location);
        unsafe {
            match value {
                UniformValue::Float(v) => gl.uniform_1_f32(location, v),
                UniformValue::Int(v) => gl.uniform_1_i32(location, v),
                UniformValue::Vec3([x, y, z]) => gl.uniform_3_f32(location, x, y, z),
                UniformValue::Vec4([x, y, z, w]) => gl.uniform_4_f32(location, x, y, z, w),
                // Row-major rows read as GLSL columns: shaders compute `M * v`
                UniformValue::Mat4(m) => gl.uniform_matrix_4_f32_slice(location, false, &m),
            }
        }
        true
    }

    fn bind_texture(&mut self, unit: u32, texture: Option<&dyn Texture>) {
        let handle = texture
            .and_then(|t| t.as_any().downcast_ref::<GlTexture>())
            .map(|t| t.texture);
        let gl = self.gl();
        unsafe {
            gl.active_texture(glow::TEXTURE0 + unit);
            gl.bind_texture(glow::TEXTURE_2D, handle);
            gl.active_texture(glow::TEXTURE0);
        }
    }

    fn draw(&mut self, buffers: &dyn PrimitiveBuffers) {
        let Some(gl_buffers) = buffers.as_any().downcast_ref::<GlPrimitiveBuffers>() else {
            engine_error!("prism::gl::Device", "draw: not OpenGL primitive buffers");
            return;
        };
        let info = *buffers.info();
        let mode = gl_topology(info.topology);
        let gl = self.gl();

        unsafe {
            gl.bind_vertex_array(Some(gl_buffers.vao));
            if info.is_indexed() {
                // One draw per run between restart indices
                for &(first, count) in &gl_buffers.segments {
                    let offset = (first as usize * std::mem::size_of::<u32>()) as i32;
                    gl.draw_elements(mode, count as i32, glow::UNSIGNED_INT, offset);
                }
            } else {
                gl.draw_arrays(mode, 0, info.vertex_count as i32);
            }
            gl.bind_vertex_array(None);
        }

        self.stats.draw_calls += 1;
        self.stats.vertices += if info.is_indexed() { info.index_count } else { info.vertex_count };
    }

    fn set_fill_mode(&mut self, mode: FillMode) {
        let gl_mode = match mode {
            FillMode::Solid => glow::FILL,
            FillMode::Wireframe => glow::LINE,
        };
        unsafe { self.gl().polygon_mode(glow::FRONT_AND_BACK, gl_mode) };
    }

    fn stats(&self) -> DeviceStats {
        self.stats
    }
}
