/// GlPrimitiveBuffers - vertex array + vertex buffer + optional index buffer

use std::any::Any;
use std::rc::Rc;

use glow::HasContext;

use prism_engine::prism::device::{
    AttributeFormat, PrimitiveBuffers, PrimitiveBuffersDesc, PrimitiveBuffersInfo, PrimitiveTopology,
    PRIMITIVE_RESTART_INDEX,
};
use prism_engine::prism::{Error, Result};
use prism_engine::engine_bail;

pub struct GlPrimitiveBuffers {
    gl: Rc<glow::Context>,
    pub(crate) vao: glow::VertexArray,
    vbo: glow::Buffer,
    ebo: Option<glow::Buffer>,
    /// (first index, count) of each run between restart indices
    pub(crate) segments: Vec<(u32, u32)>,
    info: PrimitiveBuffersInfo,
}

/// GL primitive mode for a topology
pub(crate) fn gl_topology(topology: PrimitiveTopology) -> u32 {
    match topology {
        PrimitiveTopology::TriangleList => glow::TRIANGLES,
        PrimitiveTopology::TriangleStrip => glow::TRIANGLE_STRIP,
        PrimitiveTopology::LineList => glow::LINES,
        PrimitiveTopology::LineStrip => glow::LINE_STRIP,
        PrimitiveTopology::PointList => glow::POINTS,
    }
}

/// Component count passed to `glVertexAttribPointer`
pub(crate) fn gl_attribute_size(format: AttributeFormat) -> i32 {
    format.component_count() as i32
}

/// Split an index list at restart indices into non-empty (first, count) runs
pub(crate) fn restart_segments(indices: &[u32]) -> Vec<(u32, u32)> {
    let mut segments = Vec::new();
    let mut first = 0u32;
    for (i, &index) in indices.iter().enumerate() {
        if index == PRIMITIVE_RESTART_INDEX {
            let i = i as u32;
            if i > first {
                segments.push((first, i - first));
            }
            first = i + 1;
        }
    }
    let end = indices.len() as u32;
    if end > first {
        segments.push((first, end - first));
    }
    segments
}

impl GlPrimitiveBuffers {
    pub(crate) fn new(gl: &Rc<glow::Context>, desc: &PrimitiveBuffersDesc<'_>) -> Result<Self> {
        if desc.vertex_data.len() != (desc.vertex_count * desc.layout.stride) as usize {
            engine_bail!(
                "prism::gl::Buffers",
                "Vertex data is {} bytes, expected {} vertices of {} bytes",
                desc.vertex_data.len(), desc.vertex_count, desc.layout.stride
            );
        }
        if let Some(&bad) = desc
            .indices
            .iter()
            .find(|&&i| i != PRIMITIVE_RESTART_INDEX && i >= desc.vertex_count)
        {
            engine_bail!("prism::gl::Buffers", "Index {} out of range ({} vertices)", bad, desc.vertex_count);
        }

        let backend = |e: String| Error::BackendError(format!("Failed to create GL buffer: {}", e));
        unsafe {
            let vao = gl.create_vertex_array().map_err(backend)?;
            gl.bind_vertex_array(Some(vao));

            let vbo = gl.create_buffer().map_err(backend)?;
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, desc.vertex_data, glow::STATIC_DRAW);

            for attribute in &desc.layout.attributes {
                gl.enable_vertex_attrib_array(attribute.location);
                gl.vertex_attrib_pointer_f32(
                    attribute.location,
                    gl_attribute_size(attribute.format),
                    glow::FLOAT,
                    false,
                    desc.layout.stride as i32,
                    attribute.offset as i32,
                );
            }

            // The element buffer binding is part of the vertex array state
            let ebo = if desc.indices.is_empty() {
                None
            } else {
                let ebo = gl.create_buffer().map_err(backend)?;
                gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
                gl.buffer_data_u8_slice(
                    glow::ELEMENT_ARRAY_BUFFER,
                    bytemuck::cast_slice(desc.indices),
                    glow::STATIC_DRAW,
                );
                Some(ebo)
            };

            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);

            Ok(Self {
                gl: gl.clone(),
                vao,
                vbo,
                ebo,
                segments: restart_segments(desc.indices),
                info: PrimitiveBuffersInfo {
                    vertex_count: desc.vertex_count,
                    index_count: desc.indices.len() as u32,
                    topology: desc.topology,
                },
            })
        }
    }
}

impl PrimitiveBuffers for GlPrimitiveBuffers {
    fn info(&self) -> &PrimitiveBuffersInfo {
        &self.info
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for GlPrimitiveBuffers {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_vertex_array(self.vao);
            self.gl.delete_buffer(self.vbo);
            if let Some(ebo) = self.ebo.take() {
                self.gl.delete_buffer(ebo);
            }
        }
    }
}

#[cfg(test)]
#[path = "gl_buffers_tests.rs"]
mod tests;
