/// 2D, 3D and 4D `f32` vectors
///
/// Plain value types (`Copy`) laid out as `#[repr(C)]` so they can be placed
/// directly inside vertex structs and uploaded as uniforms.

use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};
use bytemuck::{Pod, Zeroable};
use rand::Rng;

/// 2D vector (texture coordinates)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

/// 3D vector (points, directions, normals, colors)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// 4D vector (homogeneous points, RGBA colors)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

/// Shared arithmetic for all vector sizes
macro_rules! impl_vector {
    ($name:ident, $n:literal, $($field:ident => $idx:literal),+) => {
        impl $name {
            /// Create a vector from components
            #[must_use]
            pub const fn new($($field: f32),+) -> Self {
                Self { $($field),+ }
            }

            /// All components zero
            #[must_use]
            pub const fn zero() -> Self {
                Self { $($field: 0.0),+ }
            }

            /// All components equal to `v`
            #[must_use]
            pub const fn splat(v: f32) -> Self {
                Self { $($field: v),+ }
            }

            /// Dot product
            #[must_use]
            pub fn dot(&self, other: Self) -> f32 {
                0.0 $(+ self.$field * other.$field)+
            }

            /// Squared length
            #[must_use]
            pub fn length2(&self) -> f32 {
                self.dot(*self)
            }

            /// Length
            #[must_use]
            pub fn length(&self) -> f32 {
                self.length2().sqrt()
            }

            /// Normalize in place. The zero vector is left unchanged.
            pub fn normalize(&mut self) -> &mut Self {
                // Prescale by the largest component so length2 neither overflows nor underflows
                let scale = 0.0_f32 $(.max(self.$field.abs()))+;
                if scale > 0.0 && scale.is_finite() {
                    $(self.$field /= scale;)+
                    let len = self.length();
                    $(self.$field /= len;)+
                }
                self
            }

            /// True when every component is finite
            #[must_use]
            pub fn is_finite(&self) -> bool {
                true $(&& self.$field.is_finite())+
            }

            /// Normalized copy. The zero vector is returned unchanged.
            #[must_use]
            pub fn normalized(&self) -> Self {
                let mut r = *self;
                r.normalize();
                r
            }

            /// Squared distance to another point
            #[must_use]
            pub fn distance2(&self, other: Self) -> f32 {
                (other - *self).length2()
            }

            /// Distance to another point
            #[must_use]
            pub fn distance(&self, other: Self) -> f32 {
                self.distance2(other).sqrt()
            }

            /// Set every component to zero
            pub fn set_zero(&mut self) -> &mut Self {
                *self = Self::zero();
                self
            }

            /// Component-wise minimum
            #[must_use]
            pub fn min(&self, other: Self) -> Self {
                Self { $($field: self.$field.min(other.$field)),+ }
            }

            /// Component-wise maximum
            #[must_use]
            pub fn max(&self, other: Self) -> Self {
                Self { $($field: self.$field.max(other.$field)),+ }
            }

            /// Linear interpolation (`t = 0` gives `self`)
            #[must_use]
            pub fn lerp(&self, other: Self, t: f32) -> Self {
                *self + (other - *self) * t
            }

            /// Components as an array
            #[must_use]
            pub fn to_array(&self) -> [f32; $n] {
                [$(self.$field),+]
            }
        }

        impl From<[f32; $n]> for $name {
            fn from(a: [f32; $n]) -> Self {
                Self { $($field: a[$idx]),+ }
            }
        }

        impl From<$name> for [f32; $n] {
            fn from(v: $name) -> Self {
                v.to_array()
            }
        }

        impl Add for $name {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                Self { $($field: self.$field + rhs.$field),+ }
            }
        }

        impl Sub for $name {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                Self { $($field: self.$field - rhs.$field),+ }
            }
        }

        impl Neg for $name {
            type Output = Self;
            fn neg(self) -> Self {
                Self { $($field: -self.$field),+ }
            }
        }

        impl Mul<f32> for $name {
            type Output = Self;
            fn mul(self, n: f32) -> Self {
                Self { $($field: self.$field * n),+ }
            }
        }

        impl Mul<$name> for f32 {
            type Output = $name;
            fn mul(self, v: $name) -> $name {
                v * self
            }
        }

        impl Div<f32> for $name {
            type Output = Self;
            fn div(self, n: f32) -> Self {
                Self { $($field: self.$field / n),+ }
            }
        }

        impl AddAssign for $name {
            fn add_assign(&mut self, rhs: Self) {
                $(self.$field += rhs.$field;)+
            }
        }

        impl SubAssign for $name {
            fn sub_assign(&mut self, rhs: Self) {
                $(self.$field -= rhs.$field;)+
            }
        }

        impl MulAssign<f32> for $name {
            fn mul_assign(&mut self, n: f32) {
                $(self.$field *= n;)+
            }
        }

        impl DivAssign<f32> for $name {
            fn div_assign(&mut self, n: f32) {
                $(self.$field /= n;)+
            }
        }

        impl Index<usize> for $name {
            type Output = f32;
            fn index(&self, i: usize) -> &f32 {
                match i {
                    $($idx => &self.$field,)+
                    _ => panic!("{} index out of range: {}", stringify!($name), i),
                }
            }
        }

        impl IndexMut<usize> for $name {
            fn index_mut(&mut self, i: usize) -> &mut f32 {
                match i {
                    $($idx => &mut self.$field,)+
                    _ => panic!("{} index out of range: {}", stringify!($name), i),
                }
            }
        }
    };
}

impl_vector!(Vec2, 2, x => 0, y => 1);
impl_vector!(Vec3, 3, x => 0, y => 1, z => 2);
impl_vector!(Vec4, 4, x => 0, y => 1, z => 2, w => 3);

// ===== SIZE-SPECIFIC OPERATIONS =====

impl Vec2 {
    /// Random vector, x in [0, 10], y in [0, 6]
    pub fn rnd<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(rng.gen_range(0.0..=10.0), rng.gen_range(0.0..=6.0))
    }
}

impl Vec3 {
    /// +X unit vector
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    /// +Y unit vector
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    /// +Z unit vector
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Cross product (right-handed)
    #[must_use]
    pub fn cross(&self, v: Self) -> Self {
        Self::new(
            self.y * v.z - self.z * v.y,
            self.z * v.x - self.x * v.z,
            self.x * v.y - self.y * v.x,
        )
    }

    /// Extend with a w component
    #[must_use]
    pub fn extend(&self, w: f32) -> Vec4 {
        Vec4::new(self.x, self.y, self.z, w)
    }

    /// Random vector, x in [0, 10], y in [0, 6], z in [0, 8]
    pub fn rnd<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(
            rng.gen_range(0.0..=10.0),
            rng.gen_range(0.0..=6.0),
            rng.gen_range(0.0..=8.0),
        )
    }
}

impl Vec4 {
    /// Drop the w component
    #[must_use]
    pub fn truncate(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Random vector, x in [0, 10], y in [0, 6], z in [0, 4], w in [0, 9]
    pub fn rnd<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(
            rng.gen_range(0.0..=10.0),
            rng.gen_range(0.0..=6.0),
            rng.gen_range(0.0..=4.0),
            rng.gen_range(0.0..=9.0),
        )
    }
}

// ===== GLAM INTEROP =====

impl From<glam::Vec2> for Vec2 {
    fn from(v: glam::Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vec2> for glam::Vec2 {
    fn from(v: Vec2) -> Self {
        glam::Vec2::new(v.x, v.y)
    }
}

impl From<glam::Vec3> for Vec3 {
    fn from(v: glam::Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vec3> for glam::Vec3 {
    fn from(v: Vec3) -> Self {
        glam::Vec3::new(v.x, v.y, v.z)
    }
}

impl From<glam::Vec4> for Vec4 {
    fn from(v: glam::Vec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Vec4> for glam::Vec4 {
    fn from(v: Vec4) -> Self {
        glam::Vec4::new(v.x, v.y, v.z, v.w)
    }
}

#[cfg(test)]
#[path = "vector_tests.rs"]
mod tests;
