//! Demo units: coordinate axes and a small lit scene

use prism_engine::engine_warn;
use prism_engine::prism::anim::{AnimContext, Unit};
use prism_engine::prism::math::{Matrix, Vec3};
use prism_engine::prism::primitive::{Prim, Prims, Shape};
use prism_engine::prism::render::Render;
use prism_engine::prism::resource::MaterialDesc;
use prism_engine::prism::Result;

/// Checkerboard side in pixels
const CHECKER_SIZE: u32 = 64;

/// RGBA8 checkerboard with 8x8 pixel cells
fn checker_pixels(size: u32) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let value = if (x / 8 + y / 8) % 2 == 0 { 230 } else { 40 };
            pixels.extend_from_slice(&[value, value, value, 255]);
        }
    }
    pixels
}

// ============================================================================
// Axes
// ============================================================================

/// X/Y/Z axes drawn with the unlit `flat` shader
pub struct Axes {
    prim: Prim,
}

impl Axes {
    pub fn new(render: &mut Render) -> Result<Self> {
        let shader = match render.load_shader("flat") {
            Ok(program) => program.name().to_string(),
            Err(err) => {
                engine_warn!("prism_demo", "Axes drawn with the default shader: {}", err);
                "DEFAULT".to_string()
            }
        };
        let material = render.create_material("axes", MaterialDesc {
            ka: Vec3::splat(1.0),
            kd: Vec3::splat(1.0),
            ks: Vec3::zero(),
            shader,
            ..Default::default()
        });
        let prim = render.create_shape(&Shape::axes(100.0))?.with_material(material);
        Ok(Self { prim })
    }
}

impl Unit for Axes {
    fn render(&mut self, ctx: &mut AnimContext) -> Result<()> {
        ctx.render.draw(&self.prim, &Matrix::identity())
    }
}

// ============================================================================
// Scene
// ============================================================================

/// Spinning sphere and cube over a checkered floor
pub struct Scene {
    sphere: Prim,
    objects: Prims,
    floor: Prim,
    /// Animation angle in degrees
    angle: f32,
}

impl Scene {
    pub fn new(render: &mut Render) -> Result<Self> {
        let checker = render.create_texture("checker", CHECKER_SIZE, CHECKER_SIZE, &checker_pixels(CHECKER_SIZE))?;

        let gold = render.create_material("gold", MaterialDesc::default());
        let ruby = render.create_material("ruby", MaterialDesc {
            ka: Vec3::new(0.17, 0.01, 0.01),
            kd: Vec3::new(0.61, 0.04, 0.04),
            ks: Vec3::new(0.73, 0.63, 0.63),
            ph: 76.8,
            ..Default::default()
        });
        let floor_material = render.create_material("floor", MaterialDesc {
            ka: Vec3::splat(0.1),
            kd: Vec3::splat(0.8),
            ks: Vec3::splat(0.1),
            ph: 8.0,
            textures: vec![checker],
            ..Default::default()
        });

        let sphere = render.create_shape(&Shape::sphere(1.0, 32, 16))?.with_material(gold);

        let mut objects = Prims::new();
        objects.add(
            render
                .create_shape(&Shape::cube(1.0))?
                .with_material(ruby.clone())
                .with_transform(Matrix::translate(Vec3::new(2.5, 0.0, 0.0))),
        );
        objects.add(
            render
                .create_shape(&Shape::cube(0.5))?
                .with_material(ruby)
                .with_transform(Matrix::translate(Vec3::new(-2.5, 0.0, 0.0))),
        );

        let floor = render
            .create_shape(&Shape::plane(20.0, 20.0, 20, 20))?
            .with_material(floor_material)
            .with_transform(Matrix::translate(Vec3::new(0.0, -1.5, 0.0)));

        Ok(Self { sphere, objects, floor, angle: 0.0 })
    }
}

impl Unit for Scene {
    fn response(&mut self, ctx: &mut AnimContext) -> Result<()> {
        // Animation time stops while paused
        self.angle = ctx.timer.time() * 30.0;
        Ok(())
    }

    fn render(&mut self, ctx: &mut AnimContext) -> Result<()> {
        let render = &mut ctx.render;
        render.draw(&self.floor, &Matrix::identity())?;
        render.draw(&self.sphere, &Matrix::rotate_y(self.angle))?;

        let orbit = Matrix::rotate(Vec3::new(1.0, 1.0, 0.0), self.angle * 2.0) * Matrix::rotate_y(-self.angle);
        render.draw_prims(&self.objects, &orbit)
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
