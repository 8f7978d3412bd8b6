/// Perspective camera
///
/// Keeps an orthonormal view basis (Dir, Up, Right) plus the view,
/// projection and combined `VP = View * Proj` matrices. Every mutator
/// rebuilds the dependent matrices before returning.

use crate::engine_warn;
use crate::math::{Matrix, Vec3};

/// Squared length below which a cross product is treated as degenerate
const DEGENERATE_EPS: f32 = 1e-10;

/// Too short (or not finite) to define a basis axis
fn is_degenerate(v: Vec3) -> bool {
    !v.is_finite() || v.length2() < DEGENERATE_EPS
}

/// Camera with view coordinate system and symmetric frustum projection
#[derive(Debug, Clone)]
pub struct Camera {
    loc: Vec3,
    dir: Vec3,
    up: Vec3,
    right: Vec3,
    at: Vec3,

    view: Matrix,
    proj: Matrix,
    vp: Matrix,

    /// Projection plane fit size
    proj_size: f32,
    /// Near plane distance
    proj_dist: f32,
    far_clip: f32,

    frame_w: u32,
    frame_h: u32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(3.0, 0.0, 4.0), Vec3::zero(), Vec3::Y)
    }
}

impl Camera {
    /// Default projection plane size
    pub const DEFAULT_PROJ_SIZE: f32 = 0.1;
    /// Default near plane distance
    pub const DEFAULT_PROJ_DIST: f32 = 0.1;
    /// Default far plane distance
    pub const DEFAULT_FAR_CLIP: f32 = 1000.0;
    /// Default frame size
    pub const DEFAULT_FRAME_SIZE: (u32, u32) = (1009, 488);

    /// Create a camera at `loc` looking at `at` with approximate `up`
    pub fn new(loc: Vec3, at: Vec3, up: Vec3) -> Self {
        let (dir, right, up) = Self::basis(loc, at, up);
        let mut cam = Self {
            loc,
            dir,
            up,
            right,
            at,
            view: Matrix::identity(),
            proj: Matrix::identity(),
            vp: Matrix::identity(),
            proj_size: Self::DEFAULT_PROJ_SIZE,
            proj_dist: Self::DEFAULT_PROJ_DIST,
            far_clip: Self::DEFAULT_FAR_CLIP,
            frame_w: Self::DEFAULT_FRAME_SIZE.0,
            frame_h: Self::DEFAULT_FRAME_SIZE.1,
        };
        cam.set_cam();
        cam.set_proj();
        cam
    }

    /// Orthonormal (dir, right, up) from a location, target and approximate up
    fn basis(loc: Vec3, at: Vec3, up: Vec3) -> (Vec3, Vec3, Vec3) {
        let mut dir = at - loc;
        if is_degenerate(dir) {
            engine_warn!("prism::Camera", "Camera target {:?} unusable from {:?}, looking down -Z", at, loc);
            dir = -Vec3::Z;
        }
        dir.normalize();

        let mut right = dir.cross(up);
        if is_degenerate(right) {
            let fallback = if dir.z.abs() < 0.9 { Vec3::Z } else { Vec3::X };
            engine_warn!(
                "prism::Camera",
                "Up vector {:?} is parallel to view direction {:?}, using {:?}",
                up, dir, fallback
            );
            right = dir.cross(fallback);
        }
        right.normalize();

        (dir, right, right.cross(dir))
    }

    /// Remove numeric drift from the basis, keeping Dir
    fn orthonormalize(&mut self) {
        self.dir.normalize();
        self.right = self.right - self.dir * self.right.dot(self.dir);
        if is_degenerate(self.right) {
            let (_, right, _) = Self::basis(Vec3::zero(), self.dir, self.up);
            self.right = right;
        }
        self.right.normalize();
        self.up = self.right.cross(self.dir);
    }

    fn update_vp(&mut self) {
        self.vp = &self.view * &self.proj;
    }

    // ===== PROJECTION =====

    /// Rebuild the frustum from plane size and frame aspect, then VP
    pub fn set_proj(&mut self) {
        let mut ratio_x = self.proj_size / 2.0;
        let mut ratio_y = ratio_x;
        let (w, h) = (self.frame_w as f32, self.frame_h as f32);
        if w > h {
            ratio_x *= w / h;
        } else {
            ratio_y *= h / w;
        }
        self.proj = Matrix::frustum(-ratio_x, ratio_x, -ratio_y, ratio_y, self.proj_dist, self.far_clip);
        self.update_vp();
    }

    /// Change projection plane size and clip distances
    pub fn set_proj_params(&mut self, proj_size: f32, proj_dist: f32, far_clip: f32) {
        self.proj_size = proj_size;
        self.proj_dist = proj_dist;
        self.far_clip = far_clip;
        self.set_proj();
    }

    /// Set frame size (clamped to at least 1x1) and rebuild the projection
    pub fn resize(&mut self, width: u32, height: u32) {
        self.frame_w = width.max(1);
        self.frame_h = height.max(1);
        self.set_proj();
    }

    // ===== VIEW =====

    /// Rebuild the view matrix from the current basis
    pub fn set_cam(&mut self) {
        self.view = Matrix::view(self.loc, self.dir, self.up, self.right);
    }

    /// Place the camera at `loc` looking at `at`
    pub fn set_view(&mut self, loc: Vec3, at: Vec3, up: Vec3) {
        let (dir, right, up) = Self::basis(loc, at, up);
        self.loc = loc;
        self.at = at;
        self.dir = dir;
        self.right = right;
        self.up = up;
        self.set_cam();
        self.update_vp();
    }

    /// Replace the view matrix directly. The stored basis is left untouched.
    pub fn set_view_matrix(&mut self, view: Matrix) {
        self.view = view;
        self.update_vp();
    }

    // ===== MOVEMENT =====

    /// Translate location and target by `dv`
    pub fn move_by(&mut self, dv: Vec3) {
        if dv.length2() == 0.0 {
            return;
        }
        self.loc += dv;
        self.at += dv;
        self.set_cam();
        self.update_vp();
    }

    fn rotate_basis(&mut self, transform: &Matrix) {
        self.at = self.loc + transform.vector_transform(self.at - self.loc);
        self.dir = transform.vector_transform(self.dir);
        self.right = transform.vector_transform(self.right);
        self.up = transform.vector_transform(self.up);
        self.orthonormalize();
        self.set_cam();
        self.update_vp();
    }

    /// Pitch around the Right vector
    pub fn rotate_around_right(&mut self, degrees: f32) {
        if degrees == 0.0 {
            return;
        }
        self.rotate_basis(&Matrix::rotate(self.right, degrees));
    }

    /// Turn around the world Y axis
    pub fn rotate_around_y(&mut self, degrees: f32) {
        if degrees == 0.0 {
            return;
        }
        self.rotate_basis(&Matrix::rotate_y(degrees));
    }

    /// Yaw around the Up vector
    pub fn rotate_around_up(&mut self, degrees: f32) {
        if degrees == 0.0 {
            return;
        }
        self.rotate_basis(&Matrix::rotate(self.up, degrees));
    }

    // ===== ACCESSORS =====

    pub fn view(&self) -> &Matrix {
        &self.view
    }

    pub fn proj(&self) -> &Matrix {
        &self.proj
    }

    pub fn vp(&self) -> &Matrix {
        &self.vp
    }

    pub fn loc(&self) -> Vec3 {
        self.loc
    }

    pub fn at(&self) -> Vec3 {
        self.at
    }

    pub fn dir(&self) -> Vec3 {
        self.dir
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn frame_size(&self) -> (u32, u32) {
        (self.frame_w, self.frame_h)
    }

    pub fn proj_size(&self) -> f32 {
        self.proj_size
    }

    pub fn proj_dist(&self) -> f32 {
        self.proj_dist
    }

    pub fn far_clip(&self) -> f32 {
        self.far_clip
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
