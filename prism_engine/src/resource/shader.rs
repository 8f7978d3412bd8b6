/// Shader program resources
///
/// Programs live in `<shader_dir>/<name>/vert.glsl` + `frag.glsl`. The
/// `"DEFAULT"` program falls back to a built-in Phong shader when no file
/// version exists.

use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::graphics_device::{GraphicsDevice, Shader, ShaderDesc};
use crate::resource::ResourceStock;
use crate::{engine_debug, engine_error, engine_info, engine_warn};

/// Name of the fallback shader program
pub const DEFAULT_SHADER: &str = "DEFAULT";

const VERTEX_FILE: &str = "vert.glsl";
const FRAGMENT_FILE: &str = "frag.glsl";

const DEFAULT_VERTEX_SOURCE: &str = r#"#version 330 core

layout(location = 0) in vec3 InPosition;
layout(location = 1) in vec2 InTexCoord;
layout(location = 2) in vec3 InNormal;
layout(location = 3) in vec4 InColor;

uniform mat4 WVP;
uniform mat4 World;
uniform mat4 InvTrans;

out vec3 DrawPos;
out vec3 DrawNormal;
out vec2 DrawTexCoord;
out vec4 DrawColor;

void main()
{
    gl_Position = WVP * vec4(InPosition, 1.0);
    DrawPos = (World * vec4(InPosition, 1.0)).xyz;
    DrawNormal = mat3(InvTrans) * InNormal;
    DrawTexCoord = InTexCoord;
    DrawColor = InColor;
}
"#;

const DEFAULT_FRAGMENT_SOURCE: &str = r#"#version 330 core

in vec3 DrawPos;
in vec3 DrawNormal;
in vec2 DrawTexCoord;
in vec4 DrawColor;

uniform vec3 Ka;
uniform vec3 Kd;
uniform vec3 Ks;
uniform float Ph;
uniform float Trans;
uniform vec3 CamLoc;
uniform float Time;
uniform int IsTexture0;
uniform sampler2D Tex0;

out vec4 OutColor;

void main()
{
    vec3 L = normalize(vec3(1.0, 2.0, 3.0));
    vec3 N = normalize(DrawNormal);
    vec3 V = normalize(DrawPos - CamLoc);
    N = faceforward(N, V, N);

    vec3 diffuse = Kd;
    if (IsTexture0 != 0)
        diffuse *= texture(Tex0, DrawTexCoord).rgb;

    vec3 color = Ka + diffuse * max(dot(N, L), 0.0);
    vec3 R = reflect(V, N);
    color += Ks * pow(max(dot(R, L), 0.0), Ph);

    OutColor = vec4(color * DrawColor.rgb, Trans * DrawColor.a);
}
"#;

// ===== SHADER PROGRAM =====

/// Named shader program resource
pub struct ShaderProgram {
    name: String,
    handle: Rc<dyn Shader>,
    /// Directory the sources were loaded from (`None` for in-memory sources)
    source_dir: Option<PathBuf>,
}

impl ShaderProgram {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Device program handle
    pub fn handle(&self) -> &dyn Shader {
        self.handle.as_ref()
    }

    pub fn source_dir(&self) -> Option<&Path> {
        self.source_dir.as_deref()
    }
}

impl fmt::Debug for ShaderProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderProgram")
            .field("name", &self.name)
            .field("source_dir", &self.source_dir)
            .finish()
    }
}

// ===== SHADER MANAGER =====

/// Shader program stock
#[derive(Debug)]
pub struct ShaderManager {
    stock: ResourceStock<ShaderProgram>,
    shader_dir: PathBuf,
}

impl ShaderManager {
    /// Create an empty manager reading programs from `shader_dir`
    pub fn new(shader_dir: impl Into<PathBuf>) -> Self {
        Self {
            stock: ResourceStock::new(),
            shader_dir: shader_dir.into(),
        }
    }

    pub fn shader_dir(&self) -> &Path {
        &self.shader_dir
    }

    /// Register the `"DEFAULT"` program
    ///
    /// Loaded from disk when `<shader_dir>/DEFAULT` exists, built-in otherwise.
    pub fn init(&mut self, device: &mut dyn GraphicsDevice) -> Result<Rc<ShaderProgram>> {
        if self.shader_dir.join(DEFAULT_SHADER).is_dir() {
            match self.load(device, DEFAULT_SHADER) {
                Ok(program) => return Ok(program),
                Err(err) => engine_warn!(
                    "prism::ShaderManager",
                    "Falling back to built-in DEFAULT shader: {}", err
                ),
            }
        }
        self.create(device, DEFAULT_SHADER, DEFAULT_VERTEX_SOURCE, DEFAULT_FRAGMENT_SOURCE)
    }

    /// Find a program by name, or compile it from `<shader_dir>/<name>/`
    pub fn load(&mut self, device: &mut dyn GraphicsDevice, name: &str) -> Result<Rc<ShaderProgram>> {
        if let Some(program) = self.stock.find(name) {
            return Ok(program);
        }

        let dir = self.shader_dir.join(name);
        let handle = Self::compile_dir(device, name, &dir)?;
        engine_info!("prism::ShaderManager", "Shader '{}' loaded from {}", name, dir.display());
        Ok(self.stock.insert(name, ShaderProgram {
            name: name.to_string(),
            handle,
            source_dir: Some(dir),
        }))
    }

    /// Compile a program from in-memory sources, replacing any program with that name
    pub fn create(
        &mut self,
        device: &mut dyn GraphicsDevice,
        name: &str,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Rc<ShaderProgram>> {
        let handle = device.create_shader(&ShaderDesc { name, vertex_source, fragment_source })?;
        engine_debug!("prism::ShaderManager", "Shader '{}' created", name);
        Ok(self.stock.insert(name, ShaderProgram {
            name: name.to_string(),
            handle,
            source_dir: None,
        }))
    }

    pub fn find(&self, name: &str) -> Option<Rc<ShaderProgram>> {
        self.stock.find(name)
    }

    /// Recompile every program that came from disk
    ///
    /// A program that fails to compile keeps its previous version.
    ///
    /// # Returns
    ///
    /// Number of programs successfully reloaded
    pub fn reload_all(&mut self, device: &mut dyn GraphicsDevice) -> usize {
        let sources: Vec<(String, PathBuf)> = self
            .stock
            .iter()
            .filter_map(|(name, p)| p.source_dir.clone().map(|dir| (name.to_string(), dir)))
            .collect();

        let mut reloaded = 0;
        for (name, dir) in sources {
            match Self::compile_dir(device, &name, &dir) {
                Ok(handle) => {
                    self.stock.add(name.clone(), ShaderProgram {
                        name,
                        handle,
                        source_dir: Some(dir),
                    });
                    reloaded += 1;
                }
                Err(err) => {
                    engine_warn!("prism::ShaderManager", "Keeping previous '{}': {}", name, err);
                }
            }
        }
        reloaded
    }

    pub fn len(&self) -> usize {
        self.stock.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stock.is_empty()
    }

    /// Program names, sorted
    pub fn names(&self) -> Vec<String> {
        self.stock.names()
    }

    fn compile_dir(device: &mut dyn GraphicsDevice, name: &str, dir: &Path) -> Result<Rc<dyn Shader>> {
        let vertex_source = read_source(&dir.join(VERTEX_FILE))?;
        let fragment_source = read_source(&dir.join(FRAGMENT_FILE))?;
        device.create_shader(&ShaderDesc {
            name,
            vertex_source: &vertex_source,
            fragment_source: &fragment_source,
        })
    }
}

fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        let err = Error::Io(format!("{}: {}", path.display(), e));
        engine_error!("prism::ShaderManager", "{}", err);
        err
    })
}

#[cfg(test)]
#[path = "shader_tests.rs"]
mod tests;
