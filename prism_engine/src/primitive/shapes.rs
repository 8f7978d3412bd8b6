/// Generated geometry: sphere, plane, cube and coordinate axes

use crate::error::Result;
use crate::graphics_device::{GraphicsDevice, PRIMITIVE_RESTART_INDEX};
use crate::math::{Vec2, Vec3, Vec4, PI};
use crate::primitive::{Prim, PrimType, Vertex};

/// CPU-side geometry ready to be uploaded as a `Prim`
#[derive(Debug, Clone, Default)]
pub struct Shape {
    pub prim_type: PrimType,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Shape {
    /// Upload to the device
    pub fn create(&self, device: &mut dyn GraphicsDevice) -> Result<Prim> {
        Prim::new(device, self.prim_type, &self.vertices, &self.indices)
    }

    /// UV sphere centered at the origin
    ///
    /// `slices` around Y (at least 3), `stacks` from pole to pole (at least 2).
    pub fn sphere(radius: f32, slices: u32, stacks: u32) -> Shape {
        let slices = slices.max(3);
        let stacks = stacks.max(2);

        let mut vertices = Vec::with_capacity(((slices + 1) * (stacks + 1)) as usize);
        for i in 0..=stacks {
            let theta = PI * i as f32 / stacks as f32;
            for j in 0..=slices {
                let phi = 2.0 * PI * j as f32 / slices as f32;
                let n = Vec3::new(theta.sin() * phi.sin(), theta.cos(), theta.sin() * phi.cos());
                vertices.push(Vertex::new(
                    n * radius,
                    Vec2::new(j as f32 / slices as f32, i as f32 / stacks as f32),
                    n,
                    Vec4::splat(1.0),
                ));
            }
        }

        let row = slices + 1;
        let mut indices = Vec::with_capacity((slices * stacks * 6) as usize);
        for i in 0..stacks {
            for j in 0..slices {
                let a = i * row + j;
                let b = a + row;
                indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
            }
        }

        Shape { prim_type: PrimType::Mesh, vertices, indices }
    }

    /// Plane in XZ centered at the origin, facing +Y
    ///
    /// `nx` x `nz` cells (at least 1 each), drawn as one triangle strip per
    /// row separated by restart indices.
    pub fn plane(width: f32, depth: f32, nx: u32, nz: u32) -> Shape {
        let nx = nx.max(1);
        let nz = nz.max(1);

        let mut vertices = Vec::with_capacity(((nx + 1) * (nz + 1)) as usize);
        for z in 0..=nz {
            let v = z as f32 / nz as f32;
            for x in 0..=nx {
                let u = x as f32 / nx as f32;
                vertices.push(Vertex::new(
                    Vec3::new((u - 0.5) * width, 0.0, (v - 0.5) * depth),
                    Vec2::new(u, v),
                    Vec3::Y,
                    Vec4::splat(1.0),
                ));
            }
        }

        let row = nx + 1;
        let mut indices = Vec::with_capacity((nz * (row * 2 + 1)) as usize);
        for z in 0..nz {
            if z > 0 {
                indices.push(PRIMITIVE_RESTART_INDEX);
            }
            for x in 0..row {
                indices.push(z * row + x);
                indices.push((z + 1) * row + x);
            }
        }

        Shape { prim_type: PrimType::Strip, vertices, indices }
    }

    /// Axis-aligned cube centered at the origin with flat face normals
    pub fn cube(size: f32) -> Shape {
        let h = size / 2.0;
        // (normal, u axis, v axis) per face
        let faces = [
            (Vec3::X, -Vec3::Z, Vec3::Y),
            (-Vec3::X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::X, -Vec3::Z),
            (-Vec3::Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (-Vec3::Z, -Vec3::X, Vec3::Y),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (n, u, v) in faces {
            let base = vertices.len() as u32;
            for (tu, tv) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)] {
                let p = (n + u * (tu * 2.0 - 1.0) + v * (tv * 2.0 - 1.0)) * h;
                vertices.push(Vertex::new(p, Vec2::new(tu, tv), n, Vec4::splat(1.0)));
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Shape { prim_type: PrimType::Mesh, vertices, indices }
    }

    /// X (red), Y (green) and Z (blue) axes from the origin as a line list
    pub fn axes(length: f32) -> Shape {
        let axis = |dir: Vec3, color: Vec4| {
            [
                Vertex::new(Vec3::zero(), Vec2::zero(), dir, color),
                Vertex::new(dir * length, Vec2::zero(), dir, color),
            ]
        };
        let mut vertices = Vec::with_capacity(6);
        vertices.extend(axis(Vec3::X, Vec4::new(1.0, 0.0, 0.0, 1.0)));
        vertices.extend(axis(Vec3::Y, Vec4::new(0.0, 1.0, 0.0, 1.0)));
        vertices.extend(axis(Vec3::Z, Vec4::new(0.0, 0.0, 1.0, 1.0)));

        Shape { prim_type: PrimType::Line, vertices, indices: Vec::new() }
    }
}

/// Recompute smooth vertex normals of a triangle list
///
/// Face normals are accumulated (area weighted) into each referenced vertex
/// and normalized. With no indices, consecutive vertex triples form the
/// triangles. Triangles with restart or out-of-range indices are skipped.
pub fn evaluate_normals(vertices: &mut [Vertex], indices: &[u32]) {
    for v in vertices.iter_mut() {
        v.n = Vec3::zero();
    }

    let sequential: Vec<u32>;
    let indices = if indices.is_empty() {
        sequential = (0..vertices.len() as u32).collect();
        &sequential[..]
    } else {
        indices
    };

    for tri in indices.chunks_exact(3) {
        let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        if i0 >= vertices.len() || i1 >= vertices.len() || i2 >= vertices.len() {
            continue;
        }
        let p0 = vertices[i0].p;
        let n = (vertices[i1].p - p0).cross(vertices[i2].p - p0);
        vertices[i0].n += n;
        vertices[i1].n += n;
        vertices[i2].n += n;
    }

    for v in vertices.iter_mut() {
        v.n.normalize();
    }
}

#[cfg(test)]
#[path = "shapes_tests.rs"]
mod tests;
