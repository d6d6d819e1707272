use std::fmt;
use std::ops::{Add, Mul, MulAssign};

use serde::{Deserialize, Serialize};

use super::Vec3;
use crate::numeric;

/// Shared square-matrix plumbing. Storage is row-major, `m[row][col]`.
macro_rules! square_matrix {
    ($name:ident, $n:expr) => {
        #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            m: [[f64; $n]; $n],
        }

        impl $name {
            /// Matrix with every entry set to zero.
            pub const ZERO: Self = Self { m: [[0.0; $n]; $n] };

            #[must_use]
            pub const fn new(rows: [[f64; $n]; $n]) -> Self {
                Self { m: rows }
            }

            #[must_use]
            pub fn identity() -> Self {
                let mut m = [[0.0; $n]; $n];
                for (i, row) in m.iter_mut().enumerate() {
                    row[i] = 1.0;
                }
                Self { m }
            }

            /// Access the raw rows.
            #[must_use]
            pub const fn rows(&self) -> &[[f64; $n]; $n] {
                &self.m
            }

            #[must_use]
            pub fn get(&self, row: usize, col: usize) -> f64 {
                self.m[row][col]
            }

            pub fn set(&mut self, row: usize, col: usize, value: f64) {
                self.m[row][col] = value;
            }

            #[must_use]
            pub fn transpose(self) -> Self {
                let mut m = [[0.0; $n]; $n];
                for (i, row) in m.iter_mut().enumerate() {
                    for (j, entry) in row.iter_mut().enumerate() {
                        *entry = self.m[j][i];
                    }
                }
                Self { m }
            }

            /// Rounds every entry to `n` decimal places.
            #[must_use]
            pub fn round(mut self, n: i32) -> Self {
                for row in &mut self.m {
                    for entry in row.iter_mut() {
                        *entry = numeric::round(*entry, n);
                    }
                }
                self
            }

            #[must_use]
            pub fn mul_scalar(mut self, scalar: f64) -> Self {
                for row in &mut self.m {
                    for entry in row.iter_mut() {
                        *entry *= scalar;
                    }
                }
                self
            }

            #[must_use]
            pub fn mul_mat(&self, rhs: &Self) -> Self {
                let mut m = [[0.0; $n]; $n];
                for (i, row) in m.iter_mut().enumerate() {
                    for (j, entry) in row.iter_mut().enumerate() {
                        *entry = (0..$n).map(|k| self.m[i][k] * rhs.m[k][j]).sum();
                    }
                }
                Self { m }
            }

            /// Inverse through the adjugate. `None` when the determinant is
            /// zero or not finite.
            #[must_use]
            pub fn inverse(&self) -> Option<Self> {
                let det = self.determinant();
                if det == 0.0 || !det.is_finite() {
                    return None;
                }
                Some(self.adjugate().mul_scalar(1.0 / det))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::identity()
            }
        }

        impl From<[[f64; $n]; $n]> for $name {
            fn from(rows: [[f64; $n]; $n]) -> Self {
                Self::new(rows)
            }
        }

        impl Add for $name {
            type Output = Self;
            fn add(mut self, rhs: Self) -> Self::Output {
                for (row, rhs_row) in self.m.iter_mut().zip(rhs.m.iter()) {
                    for (entry, rhs_entry) in row.iter_mut().zip(rhs_row.iter()) {
                        *entry += rhs_entry;
                    }
                }
                self
            }
        }

        impl Mul<f64> for $name {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                self.mul_scalar(rhs)
            }
        }

        impl Mul for $name {
            type Output = Self;
            fn mul(self, rhs: Self) -> Self::Output {
                self.mul_mat(&rhs)
            }
        }

        impl MulAssign for $name {
            fn mul_assign(&mut self, rhs: Self) {
                *self = self.mul_mat(&rhs);
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                for (i, row) in self.m.iter().enumerate() {
                    if i > 0 {
                        f.write_str("\n")?;
                    }
                    for (j, entry) in row.iter().enumerate() {
                        if j > 0 {
                            f.write_str(", \t")?;
                        }
                        write!(f, "{entry}")?;
                    }
                }
                Ok(())
            }
        }
    };
}

square_matrix!(Mat2x2, 2);
square_matrix!(Mat3x3, 3);
square_matrix!(Mat4x4, 4);

// ─────────────────────────────────────────────────────────────────────────────
// Mat2x2
// ─────────────────────────────────────────────────────────────────────────────

impl Mat2x2 {
    /// Counter-clockwise rotation for row vectors.
    #[must_use]
    pub fn rotation(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new([[cos, sin], [-sin, cos]])
    }

    #[must_use]
    pub fn determinant(&self) -> f64 {
        let m = &self.m;
        m[0][0] * m[1][1] - m[1][0] * m[0][1]
    }

    fn adjugate(&self) -> Self {
        let m = &self.m;
        Self::new([[m[1][1], -m[0][1]], [-m[1][0], m[0][0]]])
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Mat3x3
// ─────────────────────────────────────────────────────────────────────────────

impl Mat3x3 {
    #[must_use]
    pub fn rotation_x(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new([[1.0, 0.0, 0.0], [0.0, cos, sin], [0.0, -sin, cos]])
    }

    #[must_use]
    pub fn rotation_y(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new([[cos, 0.0, -sin], [0.0, 1.0, 0.0], [sin, 0.0, cos]])
    }

    #[must_use]
    pub fn rotation_z(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new([[cos, sin, 0.0], [-sin, cos, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Uniform scale matrix.
    #[must_use]
    pub fn scale(factor: f64) -> Self {
        Self::identity().mul_scalar(factor)
    }

    #[must_use]
    pub fn determinant(&self) -> f64 {
        let m = &self.m;
        m[0][0] * (m[1][1] * m[2][2] - m[2][1] * m[1][2])
            - m[1][0] * (m[0][1] * m[2][2] - m[0][2] * m[2][1])
            + m[2][0] * (m[0][1] * m[1][2] - m[0][2] * m[1][1])
    }

    fn adjugate(&self) -> Self {
        let m = &self.m;
        Self::new([
            [
                m[1][1] * m[2][2] - m[1][2] * m[2][1],
                m[0][2] * m[2][1] - m[0][1] * m[2][2],
                m[0][1] * m[1][2] - m[0][2] * m[1][1],
            ],
            [
                m[1][2] * m[2][0] - m[1][0] * m[2][2],
                m[0][0] * m[2][2] - m[0][2] * m[2][0],
                m[0][2] * m[1][0] - m[0][0] * m[1][2],
            ],
            [
                m[1][0] * m[2][1] - m[1][1] * m[2][0],
                m[0][1] * m[2][0] - m[0][0] * m[2][1],
                m[0][0] * m[1][1] - m[0][1] * m[1][0],
            ],
        ])
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Mat4x4
// ─────────────────────────────────────────────────────────────────────────────

impl Mat4x4 {
    /// Translation for row vectors: the offset lives in row 3.
    #[must_use]
    pub fn translation(offset: Vec3) -> Self {
        Self::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [offset.x, offset.y, offset.z, 1.0],
        ])
    }

    #[must_use]
    pub fn scale(factors: Vec3) -> Self {
        Self::new([
            [factors.x, 0.0, 0.0, 0.0],
            [0.0, factors.y, 0.0, 0.0],
            [0.0, 0.0, factors.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    #[must_use]
    pub fn rotation_x(angle: f64) -> Self {
        Self::from(Mat3x3::rotation_x(angle))
    }

    #[must_use]
    pub fn rotation_y(angle: f64) -> Self {
        Self::from(Mat3x3::rotation_y(angle))
    }

    #[must_use]
    pub fn rotation_z(angle: f64) -> Self {
        Self::from(Mat3x3::rotation_z(angle))
    }

    #[must_use]
    pub fn determinant(&self) -> f64 {
        let (s, c) = self.sub_determinants();
        s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0]
    }

    /// 2x2 minors of the top two rows (`s`) and the bottom two rows (`c`).
    fn sub_determinants(&self) -> ([f64; 6], [f64; 6]) {
        let m = &self.m;
        let s = [
            m[0][0] * m[1][1] - m[1][0] * m[0][1],
            m[0][0] * m[1][2] - m[1][0] * m[0][2],
            m[0][0] * m[1][3] - m[1][0] * m[0][3],
            m[0][1] * m[1][2] - m[1][1] * m[0][2],
            m[0][1] * m[1][3] - m[1][1] * m[0][3],
            m[0][2] * m[1][3] - m[1][2] * m[0][3],
        ];
        let c = [
            m[2][0] * m[3][1] - m[3][0] * m[2][1],
            m[2][0] * m[3][2] - m[3][0] * m[2][2],
            m[2][0] * m[3][3] - m[3][0] * m[2][3],
            m[2][1] * m[3][2] - m[3][1] * m[2][2],
            m[2][1] * m[3][3] - m[3][1] * m[2][3],
            m[2][2] * m[3][3] - m[3][2] * m[2][3],
        ];
        (s, c)
    }

    fn adjugate(&self) -> Self {
        let m = &self.m;
        let (s, c) = self.sub_determinants();
        Self::new([
            [
                m[1][1] * c[5] - m[1][2] * c[4] + m[1][3] * c[3],
                -m[0][1] * c[5] + m[0][2] * c[4] - m[0][3] * c[3],
                m[3][1] * s[5] - m[3][2] * s[4] + m[3][3] * s[3],
                -m[2][1] * s[5] + m[2][2] * s[4] - m[2][3] * s[3],
            ],
            [
                -m[1][0] * c[5] + m[1][2] * c[2] - m[1][3] * c[1],
                m[0][0] * c[5] - m[0][2] * c[2] + m[0][3] * c[1],
                -m[3][0] * s[5] + m[3][2] * s[2] - m[3][3] * s[1],
                m[2][0] * s[5] - m[2][2] * s[2] + m[2][3] * s[1],
            ],
            [
                m[1][0] * c[4] - m[1][1] * c[2] + m[1][3] * c[0],
                -m[0][0] * c[4] + m[0][1] * c[2] - m[0][3] * c[0],
                m[3][0] * s[4] - m[3][1] * s[2] + m[3][3] * s[0],
                -m[2][0] * s[4] + m[2][1] * s[2] - m[2][3] * s[0],
            ],
            [
                -m[1][0] * c[3] + m[1][1] * c[1] - m[1][2] * c[0],
                m[0][0] * c[3] - m[0][1] * c[1] + m[0][2] * c[0],
                -m[3][0] * s[3] + m[3][1] * s[1] - m[3][2] * s[0],
                m[2][0] * s[3] - m[2][1] * s[1] + m[2][2] * s[0],
            ],
        ])
    }
}

impl From<Mat3x3> for Mat4x4 {
    fn from(mat: Mat3x3) -> Self {
        let m = mat.rows();
        Self::new([
            [m[0][0], m[0][1], m[0][2], 0.0],
            [m[1][0], m[1][1], m[1][2], 0.0],
            [m[2][0], m[2][1], m[2][2], 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }
}
