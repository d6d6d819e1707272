use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use super::{Mat3x3, Mat4x4};
use crate::numeric;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    /// Zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// Unit vector along the X axis.
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    /// Unit vector along the Y axis.
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    /// Unit vector along the Z axis.
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    #[must_use]
    pub const fn length_squared(self) -> f64 {
        self.dot(self)
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Angle between this vector and the X axis, in radians.
    #[must_use]
    pub fn angle_x(self) -> f64 {
        (self.y * self.y + self.z * self.z).sqrt().atan2(self.x)
    }

    /// Angle between this vector and the Y axis, in radians.
    #[must_use]
    pub fn angle_y(self) -> f64 {
        (self.z * self.z + self.x * self.x).sqrt().atan2(self.y)
    }

    /// Angle between this vector and the Z axis, in radians.
    #[must_use]
    pub fn angle_z(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt().atan2(self.z)
    }

    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        (self - other).length_squared()
    }

    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    #[must_use]
    pub const fn dot(self, rhs: Self) -> f64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    #[must_use]
    pub const fn cross(self, rhs: Self) -> Self {
        Self {
            x: self.y * rhs.z - self.z * rhs.y,
            y: self.z * rhs.x - self.x * rhs.z,
            z: self.x * rhs.y - self.y * rhs.x,
        }
    }

    #[must_use]
    pub fn rotate_x(self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(
            self.x,
            self.y * cos - self.z * sin,
            self.y * sin + self.z * cos,
        )
    }

    #[must_use]
    pub fn rotate_y(self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(
            self.x * cos + self.z * sin,
            self.y,
            -self.x * sin + self.z * cos,
        )
    }

    #[must_use]
    pub fn rotate_z(self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(
            self.x * cos - self.y * sin,
            self.x * sin + self.y * cos,
            self.z,
        )
    }

    /// Rotates around an arbitrary axis through the origin (Rodrigues).
    /// A zero axis leaves the vector unchanged.
    #[must_use]
    pub fn rotate_around_axis(self, axis: Self, angle: f64) -> Self {
        let k = axis.normalized();
        if k == Self::ZERO {
            return self;
        }
        let (sin, cos) = angle.sin_cos();
        self * cos + k.cross(self) * sin + k * (k.dot(self) * (1.0 - cos))
    }

    /// Unit vector with the same direction. The zero vector stays zero.
    #[must_use]
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            return Self::ZERO;
        }
        self / len
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }

    /// Rounds all components to `n` decimal places.
    #[must_use]
    pub fn round(self, n: i32) -> Self {
        Self::new(
            numeric::round(self.x, n),
            numeric::round(self.y, n),
            numeric::round(self.z, n),
        )
    }

    /// Returns `self * (1 - t) + rhs * t`.
    #[must_use]
    pub fn lerp(self, rhs: Self, t: f64) -> Self {
        Self::new(
            self.x * (1.0 - t) + rhs.x * t,
            self.y * (1.0 - t) + rhs.y * t,
            self.z * (1.0 - t) + rhs.z * t,
        )
    }

    #[must_use]
    pub fn mul_mat(self, mat: &Mat3x3) -> Self {
        let m = mat.rows();
        Self::new(
            self.x * m[0][0] + self.y * m[1][0] + self.z * m[2][0],
            self.x * m[0][1] + self.y * m[1][1] + self.z * m[2][1],
            self.x * m[0][2] + self.y * m[1][2] + self.z * m[2][2],
        )
    }

    /// Affine product with an implicit `w = 1`; row 3 carries the translation.
    #[must_use]
    pub fn mul_mat4(self, mat: &Mat4x4) -> Self {
        let m = mat.rows();
        Self::new(
            self.x * m[0][0] + self.y * m[1][0] + self.z * m[2][0] + m[3][0],
            self.x * m[0][1] + self.y * m[1][1] + self.z * m[2][1] + m[3][1],
            self.x * m[0][2] + self.y * m[1][2] + self.z * m[2][2] + m[3][2],
        )
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Vec3> for [f64; 3] {
    fn from(v: Vec3) -> Self {
        v.to_array()
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Vec3> for f64 {
    type Output = Vec3;
    fn mul(self, rhs: Vec3) -> Self::Output {
        rhs * self
    }
}

impl MulAssign<f64> for Vec3 {
    fn mul_assign(&mut self, rhs: f64) {
        *self = *self * rhs;
    }
}

impl Mul<&Mat3x3> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: &Mat3x3) -> Self::Output {
        self.mul_mat(rhs)
    }
}

impl MulAssign<&Mat3x3> for Vec3 {
    fn mul_assign(&mut self, rhs: &Mat3x3) {
        *self = self.mul_mat(rhs);
    }
}

impl Mul<&Mat4x4> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: &Mat4x4) -> Self::Output {
        self.mul_mat4(rhs)
    }
}

impl Div<f64> for Vec3 {
    type Output = Self;
    fn div(self, rhs: f64) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl DivAssign<f64> for Vec3 {
    fn div_assign(&mut self, rhs: f64) {
        *self = *self / rhs;
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self::Output {
        self.opposite()
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;
    use crate::math::assert_close;

    fn assert_vec_close(a: Vec3, b: Vec3) {
        assert_close(a.x, b.x);
        assert_close(a.y, b.y);
        assert_close(a.z, b.z);
    }

    #[test]
    fn test_vec3_operators() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);

        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(2.0 * a, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(a / 2.0, Vec3::new(0.5, 1.0, 1.5));
        assert_eq!(-a, Vec3::new(-1.0, -2.0, -3.0));
    }

    #[test]
    fn test_vec3_cross_is_right_handed() {
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
        assert_eq!(Vec3::Y.cross(Vec3::Z), Vec3::X);
        assert_close(Vec3::new(1.0, 2.0, 3.0).dot(Vec3::new(4.0, 5.0, 6.0)), 32.0);
    }

    #[test]
    fn test_vec3_axis_angles() {
        assert_close(Vec3::X.angle_x(), 0.0);
        assert_close(Vec3::Y.angle_x(), FRAC_PI_2);
        assert_close(Vec3::Z.angle_y(), FRAC_PI_2);
        assert_close(Vec3::Z.angle_z(), 0.0);
    }

    #[test]
    fn test_vec3_rotations_match_matrices() {
        let v = Vec3::new(0.3, -1.2, 2.5);
        let angle = 0.9;
        assert_vec_close(v.rotate_x(angle), v * &Mat3x3::rotation_x(angle));
        assert_vec_close(v.rotate_y(angle), v * &Mat3x3::rotation_y(angle));
        assert_vec_close(v.rotate_z(angle), v * &Mat3x3::rotation_z(angle));
    }

    #[test]
    fn test_vec3_rotations_preserve_length() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_close(v.rotate_y(1.3).length(), v.length());
        assert_close(v.rotate_around_axis(Vec3::new(1.0, 1.0, 0.0), 2.1).length(), v.length());
    }

    #[test]
    fn test_vec3_rotate_around_axis_matches_fixed_axes() {
        let v = Vec3::new(0.5, 1.5, -2.0);
        assert_vec_close(v.rotate_around_axis(Vec3::Z, 0.4), v.rotate_z(0.4));
        assert_vec_close(v.rotate_around_axis(Vec3::X * 3.0, 0.4), v.rotate_x(0.4));
        assert_eq!(v.rotate_around_axis(Vec3::ZERO, 1.0), v);
    }

    #[test]
    fn test_vec3_mul_mat4_applies_translation() {
        let m = Mat4x4::translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(Vec3::new(1.0, 1.0, 1.0) * &m, Vec3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn test_vec3_normalized_and_lerp() {
        assert_eq!(Vec3::ZERO.normalized(), Vec3::ZERO);
        assert_close(Vec3::new(2.0, -3.0, 6.0).normalized().length(), 1.0);
        assert_eq!(
            Vec3::ZERO.lerp(Vec3::new(10.0, 20.0, 30.0), 0.5),
            Vec3::new(5.0, 10.0, 15.0)
        );
    }

    #[test]
    fn test_vec3_display() {
        assert_eq!(Vec3::new(1.0, 2.5, -3.0).to_string(), "[1, 2.5, -3]");
    }
}
