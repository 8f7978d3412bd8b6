/// 4x4 `f32` matrix
///
/// Row-major storage, row-vector convention: a point is transformed as
/// `p * M`, translation lives in row 3 and `A * B` applies `A` first.
/// The inverse is computed on first request and cached until the matrix is
/// mutated.

use std::cell::OnceCell;
use std::ops::{Mul, MulAssign};

use crate::math::{degree_to_radian, Vec3, Vec4};

type Rows = [[f32; 4]; 4];

const IDENTITY: Rows = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// 4x4 transformation matrix with a lazily cached inverse
#[derive(Debug, Clone)]
pub struct Matrix {
    a: Rows,
    /// `Some(None)` once evaluated for a singular matrix
    inverse: OnceCell<Option<Rows>>,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        self.a == other.a
    }
}

/// Determinant of a 3x3 matrix given row by row
#[allow(clippy::too_many_arguments)]
#[inline]
pub fn determ3x3(
    a11: f32, a12: f32, a13: f32,
    a21: f32, a22: f32, a23: f32,
    a31: f32, a32: f32, a33: f32,
) -> f32 {
    a11 * a22 * a33 - a11 * a23 * a32 - a12 * a21 * a33
        + a12 * a23 * a31 + a13 * a21 * a32 - a13 * a22 * a31
}

impl Matrix {
    // ===== CONSTRUCTION =====

    /// Build from rows
    #[must_use]
    pub const fn new(rows: [[f32; 4]; 4]) -> Self {
        Self { a: rows, inverse: OnceCell::new() }
    }

    /// Build from 16 values given row by row
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub const fn from_rows(
        a11: f32, a12: f32, a13: f32, a14: f32,
        a21: f32, a22: f32, a23: f32, a24: f32,
        a31: f32, a32: f32, a33: f32, a34: f32,
        a41: f32, a42: f32, a43: f32, a44: f32,
    ) -> Self {
        Self::new([
            [a11, a12, a13, a14],
            [a21, a22, a23, a24],
            [a31, a32, a33, a34],
            [a41, a42, a43, a44],
        ])
    }

    /// Identity matrix
    #[must_use]
    pub const fn identity() -> Self {
        Self::new(IDENTITY)
    }

    /// All elements zero
    #[must_use]
    pub const fn zero() -> Self {
        Self::new([[0.0; 4]; 4])
    }

    // ===== ELEMENT ACCESS =====

    /// All rows
    pub fn rows(&self) -> &[[f32; 4]; 4] {
        &self.a
    }

    /// Element at (row, column)
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.a[row][col]
    }

    /// Set element at (row, column); drops the cached inverse
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.a[row][col] = value;
        self.inverse = OnceCell::new();
    }

    /// The 16 elements row by row (upload order for shaders)
    pub fn to_array(&self) -> [f32; 16] {
        let mut out = [0.0; 16];
        for (i, row) in self.a.iter().enumerate() {
            out[i * 4..i * 4 + 4].copy_from_slice(row);
        }
        out
    }

    /// The 16 elements row by row, borrowed
    pub fn as_slice(&self) -> &[f32] {
        bytemuck::cast_slice(&self.a)
    }

    // ===== DETERMINANT / INVERSE / TRANSPOSE =====

    fn minor(&self, row: usize, col: usize) -> f32 {
        let mut m = [0.0f32; 9];
        let mut k = 0;
        for r in (0..4).filter(|&r| r != row) {
            for c in (0..4).filter(|&c| c != col) {
                m[k] = self.a[r][c];
                k += 1;
            }
        }
        determ3x3(m[0], m[1], m[2], m[3], m[4], m[5], m[6], m[7], m[8])
    }

    fn cofactor(&self, row: usize, col: usize) -> f32 {
        let sign = if (row + col) % 2 == 0 { 1.0 } else { -1.0 };
        sign * self.minor(row, col)
    }

    /// Determinant (cofactor expansion along row 0)
    pub fn determinant(&self) -> f32 {
        (0..4).map(|c| self.a[0][c] * self.cofactor(0, c)).sum()
    }

    fn evaluate_inverse(&self) -> Option<Rows> {
        *self.inverse.get_or_init(|| {
            let det = self.determinant();
            if det == 0.0 || !det.is_finite() {
                return None;
            }
            let mut inv = [[0.0f32; 4]; 4];
            for (r, row) in inv.iter_mut().enumerate() {
                for (c, value) in row.iter_mut().enumerate() {
                    // adjugate = transposed cofactor matrix
                    *value = self.cofactor(c, r) / det;
                }
            }
            Some(inv)
        })
    }

    /// True if the inverse has been evaluated and is still valid
    pub fn has_cached_inverse(&self) -> bool {
        self.inverse.get().is_some()
    }

    /// Inverse matrix, `None` if singular
    pub fn try_inverse(&self) -> Option<Matrix> {
        self.evaluate_inverse().map(Matrix::new)
    }

    /// Inverse matrix; a singular matrix yields the identity
    pub fn inverse(&self) -> Matrix {
        self.try_inverse().unwrap_or_else(Matrix::identity)
    }

    /// Transposed matrix
    pub fn transpose(&self) -> Matrix {
        let mut t = [[0.0f32; 4]; 4];
        for (r, row) in self.a.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                t[c][r] = *value;
            }
        }
        Matrix::new(t)
    }

    // ===== TRANSFORM BUILDERS =====

    /// Translation by `t`
    pub fn translate(t: Vec3) -> Matrix {
        Matrix::from_rows(
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            t.x, t.y, t.z, 1.0,
        )
    }

    /// Non-uniform scale by `s`
    pub fn scale(s: Vec3) -> Matrix {
        Matrix::from_rows(
            s.x, 0.0, 0.0, 0.0,
            0.0, s.y, 0.0, 0.0,
            0.0, 0.0, s.z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation around +X (counter-clockwise looking down the axis)
    pub fn rotate_x(degrees: f32) -> Matrix {
        let (si, co) = degree_to_radian(degrees).sin_cos();
        Matrix::from_rows(
            1.0, 0.0, 0.0, 0.0,
            0.0, co, si, 0.0,
            0.0, -si, co, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation around +Y
    pub fn rotate_y(degrees: f32) -> Matrix {
        let (si, co) = degree_to_radian(degrees).sin_cos();
        Matrix::from_rows(
            co, 0.0, -si, 0.0,
            0.0, 1.0, 0.0, 0.0,
            si, 0.0, co, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation around +Z
    pub fn rotate_z(degrees: f32) -> Matrix {
        let (si, co) = degree_to_radian(degrees).sin_cos();
        Matrix::from_rows(
            co, si, 0.0, 0.0,
            -si, co, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation around an arbitrary axis (normalized internally)
    ///
    /// Same direction convention as `rotate_x/y/z`. A zero axis gives the identity.
    pub fn rotate(axis: Vec3, degrees: f32) -> Matrix {
        if axis.length2() == 0.0 {
            return Matrix::identity();
        }
        let (si, co) = degree_to_radian(degrees).sin_cos();
        let v = axis.normalized();
        let ic = 1.0 - co;
        Matrix::from_rows(
            co + v.x * v.x * ic, v.x * v.y * ic + v.z * si, v.x * v.z * ic - v.y * si, 0.0,
            v.y * v.x * ic - v.z * si, co + v.y * v.y * ic, v.y * v.z * ic + v.x * si, 0.0,
            v.z * v.x * ic + v.y * si, v.z * v.y * ic - v.x * si, co + v.z * v.z * ic, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// View matrix from an orthonormal camera basis
    pub fn view(loc: Vec3, dir: Vec3, up: Vec3, right: Vec3) -> Matrix {
        Matrix::from_rows(
            right.x, up.x, -dir.x, 0.0,
            right.y, up.y, -dir.y, 0.0,
            right.z, up.z, -dir.z, 0.0,
            -loc.dot(right), -loc.dot(up), loc.dot(dir), 1.0,
        )
    }

    /// View matrix looking from `loc` at `at`
    ///
    /// `up` must not be parallel to the view direction.
    pub fn look_at(loc: Vec3, at: Vec3, up: Vec3) -> Matrix {
        let dir = (at - loc).normalized();
        let right = dir.cross(up).normalized();
        let up = right.cross(dir);
        Matrix::view(loc, dir, up, right)
    }

    /// Perspective projection for the frustum [l, r] x [b, t] at near plane `n`
    pub fn frustum(l: f32, r: f32, b: f32, t: f32, n: f32, f: f32) -> Matrix {
        Matrix::from_rows(
            2.0 * n / (r - l), 0.0, 0.0, 0.0,
            0.0, 2.0 * n / (t - b), 0.0, 0.0,
            (r + l) / (r - l), (t + b) / (t - b), -(f + n) / (f - n), -1.0,
            0.0, 0.0, -2.0 * n * f / (f - n), 0.0,
        )
    }

    /// Orthographic projection of the box [l, r] x [b, t] x [n, f]
    pub fn ortho(l: f32, r: f32, b: f32, t: f32, n: f32, f: f32) -> Matrix {
        Matrix::from_rows(
            2.0 / (r - l), 0.0, 0.0, 0.0,
            0.0, 2.0 / (t - b), 0.0, 0.0,
            0.0, 0.0, -2.0 / (f - n), 0.0,
            -(r + l) / (r - l), -(t + b) / (t - b), -(f + n) / (f - n), 1.0,
        )
    }

    // ===== TRANSFORMS =====

    /// Transform a point (w = 1) with perspective divide
    pub fn point_transform(&self, p: Vec3) -> Vec3 {
        let a = &self.a;
        let w = p.x * a[0][3] + p.y * a[1][3] + p.z * a[2][3] + a[3][3];
        let r = Vec3::new(
            p.x * a[0][0] + p.y * a[1][0] + p.z * a[2][0] + a[3][0],
            p.x * a[0][1] + p.y * a[1][1] + p.z * a[2][1] + a[3][1],
            p.x * a[0][2] + p.y * a[1][2] + p.z * a[2][2] + a[3][2],
        );
        if w != 0.0 && w != 1.0 {
            r / w
        } else {
            r
        }
    }

    /// Transform a direction (w = 0): upper 3x3 only
    pub fn vector_transform(&self, v: Vec3) -> Vec3 {
        let a = &self.a;
        Vec3::new(
            v.x * a[0][0] + v.y * a[1][0] + v.z * a[2][0],
            v.x * a[0][1] + v.y * a[1][1] + v.z * a[2][1],
            v.x * a[0][2] + v.y * a[1][2] + v.z * a[2][2],
        )
    }

    /// Transform a surface normal by the inverse-transpose
    ///
    /// The result is not normalized. A singular matrix leaves `n` unchanged.
    pub fn normal_transform(&self, n: Vec3) -> Vec3 {
        let Some(inv) = self.evaluate_inverse() else {
            return n;
        };
        Vec3::new(
            n.x * inv[0][0] + n.y * inv[0][1] + n.z * inv[0][2],
            n.x * inv[1][0] + n.y * inv[1][1] + n.z * inv[1][2],
            n.x * inv[2][0] + n.y * inv[2][1] + n.z * inv[2][2],
        )
    }

    /// Transform a homogeneous 4D vector without divide
    pub fn transform4(&self, v: Vec4) -> Vec4 {
        let a = &self.a;
        let mut out = [0.0f32; 4];
        for (c, value) in out.iter_mut().enumerate() {
            *value = v.x * a[0][c] + v.y * a[1][c] + v.z * a[2][c] + v.w * a[3][c];
        }
        Vec4::from(out)
    }
}

// ===== PRODUCT =====

impl Mul<&Matrix> for &Matrix {
    type Output = Matrix;

    fn mul(self, m: &Matrix) -> Matrix {
        let mut r = [[0.0f32; 4]; 4];
        for (i, row) in r.iter_mut().enumerate() {
            for (j, value) in row.iter_mut().enumerate() {
                *value = (0..4).map(|k| self.a[i][k] * m.a[k][j]).sum();
            }
        }
        Matrix::new(r)
    }
}

impl Mul<Matrix> for Matrix {
    type Output = Matrix;

    fn mul(self, m: Matrix) -> Matrix {
        &self * &m
    }
}

impl Mul<&Matrix> for Matrix {
    type Output = Matrix;

    fn mul(self, m: &Matrix) -> Matrix {
        &self * m
    }
}

impl MulAssign<&Matrix> for Matrix {
    fn mul_assign(&mut self, m: &Matrix) {
        let product = &*self * m;
        self.a = product.a;
        self.inverse = OnceCell::new();
    }
}

impl MulAssign<Matrix> for Matrix {
    fn mul_assign(&mut self, m: Matrix) {
        *self *= &m;
    }
}

// ===== GLAM INTEROP =====
//
// Row-major rows of a row-vector matrix are the columns of the equivalent
// column-vector glam matrix, so the element layout is shared.

impl From<glam::Mat4> for Matrix {
    fn from(m: glam::Mat4) -> Self {
        Matrix::new(m.to_cols_array_2d())
    }
}

impl From<&Matrix> for glam::Mat4 {
    fn from(m: &Matrix) -> Self {
        glam::Mat4::from_cols_array_2d(&m.a)
    }
}

impl From<Matrix> for glam::Mat4 {
    fn from(m: Matrix) -> Self {
        glam::Mat4::from(&m)
    }
}

#[cfg(test)]
#[path = "matrix_tests.rs"]
mod tests;
