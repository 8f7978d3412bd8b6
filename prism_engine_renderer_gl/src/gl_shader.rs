/// GlShader - linked vertex + fragment program with cached uniform locations

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use glow::HasContext;
use rustc_hash::FxHashMap;

use prism_engine::prism::device::{Shader, ShaderDesc};
use prism_engine::prism::{Error, Result};
use prism_engine::{engine_debug, engine_error};

pub struct GlShader {
    gl: Rc<glow::Context>,
    pub(crate) program: glow::Program,
    name: String,
    /// Lookups by name, misses included
    locations: RefCell<FxHashMap<String, Option<glow::UniformLocation>>>,
}

fn stage_name(stage: u32) -> &'static str {
    match stage {
        glow::VERTEX_SHADER => "vertex",
        glow::FRAGMENT_SHADER => "fragment",
        _ => "unknown",
    }
}

/// Compile one stage, returning the info log on failure
unsafe fn compile_stage(gl: &glow::Context, stage: u32, source: &str, name: &str) -> Result<glow::Shader> {
    let shader = gl
        .create_shader(stage)
        .map_err(|e| Error::BackendError(format!("Failed to create {} shader: {}", stage_name(stage), e)))?;
    gl.shader_source(shader, source);
    gl.compile_shader(shader);
    if gl.get_shader_compile_status(shader) {
        return Ok(shader);
    }

    let log = gl.get_shader_info_log(shader);
    gl.delete_shader(shader);
    let err = Error::ShaderCompilation(format!("{} ({}): {}", name, stage_name(stage), log.trim()));
    engine_error!("prism::gl::Shader", "{}", err);
    Err(err)
}

impl GlShader {
    pub(crate) fn new(gl: &Rc<glow::Context>, desc: &ShaderDesc<'_>) -> Result<Self> {
        unsafe {
            let vertex = compile_stage(gl, glow::VERTEX_SHADER, desc.vertex_source, desc.name)?;
            let fragment = match compile_stage(gl, glow::FRAGMENT_SHADER, desc.fragment_source, desc.name) {
                Ok(fragment) => fragment,
                Err(err) => {
                    gl.delete_shader(vertex);
                    return Err(err);
                }
            };

            let program = gl
                .create_program()
                .map_err(|e| Error::BackendError(format!("Failed to create program '{}': {}", desc.name, e)));
            let program = match program {
                Ok(program) => program,
                Err(err) => {
                    gl.delete_shader(vertex);
                    gl.delete_shader(fragment);
                    return Err(err);
                }
            };

            gl.attach_shader(program, vertex);
            gl.attach_shader(program, fragment);
            gl.link_program(program);
            let linked = gl.get_program_link_status(program);

            gl.detach_shader(program, vertex);
            gl.detach_shader(program, fragment);
            gl.delete_shader(vertex);
            gl.delete_shader(fragment);

            if !linked {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                let err = Error::ShaderCompilation(format!("{} (link): {}", desc.name, log.trim()));
                engine_error!("prism::gl::Shader", "{}", err);
                return Err(err);
            }

            engine_debug!("prism::gl::Shader", "Program '{}' linked", desc.name);
            Ok(Self {
                gl: gl.clone(),
                program,
                name: desc.name.to_string(),
                locations: RefCell::new(FxHashMap::default()),
            })
        }
    }

    /// Location of an active uniform
    pub(crate) fn location(&self, name: &str) -> Option<glow::UniformLocation> {
        if let Some(cached) = self.locations.borrow().get(name) {
            return cached.clone();
        }
        let location = unsafe { self.gl.get_uniform_location(self.program, name) };
        self.locations.borrow_mut().insert(name.to_string(), location.clone());
        location
    }
}

impl Shader for GlShader {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for GlShader {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.program);
        }
    }
}
