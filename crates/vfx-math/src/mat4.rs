//! 4x4 matrix type for RGBA color transforms.
//!
//! [`Mat4`] backs matrix transforms, saturation/view/fit factories and
//! the flattening of matrix chains in the processor.
//!
//! # Convention
//!
//! Matrices are stored in **row-major** order and use **column vectors**,
//! the same layout used by OCIO `MatrixTransform` values:
//!
//! ```text
//! | m0  m1  m2  m3  |   | r |
//! | m4  m5  m6  m7  | * | g |
//! | m8  m9  m10 m11 |   | b |
//! | m12 m13 m14 m15 |   | a |
//! ```
//!
//! # Usage
//!
//! ```rust
//! use vfx_math::Mat4;
//!
//! let m = Mat4::diagonal([2.0, 2.0, 2.0, 1.0]);
//! assert_eq!(m.mul_vec4([0.5, 0.25, 1.0, 1.0]), [1.0, 0.5, 2.0, 1.0]);
//! ```

use glam::DMat4;
use std::ops::{Index, Mul};

/// A 4x4 row-major matrix of `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Mat4 {
    /// Elements in row-major order.
    pub m: [f64; 16],
}

impl Mat4 {
    /// Zero matrix.
    pub const ZERO: Self = Self { m: [0.0; 16] };

    /// Identity matrix.
    pub const IDENTITY: Self = Self {
        m: [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Creates a matrix from 16 row-major values.
    #[inline]
    pub const fn from_row_major(m: [f64; 16]) -> Self {
        Self { m }
    }

    /// Creates a diagonal matrix.
    #[inline]
    pub const fn diagonal(d: [f64; 4]) -> Self {
        Self {
            m: [
                d[0], 0.0, 0.0, 0.0,
                0.0, d[1], 0.0, 0.0,
                0.0, 0.0, d[2], 0.0,
                0.0, 0.0, 0.0, d[3],
            ],
        }
    }

    /// Returns the row-major values.
    #[inline]
    pub const fn to_row_major(&self) -> [f64; 16] {
        self.m
    }

    /// Element at `row`, `col`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.m[row * 4 + col]
    }

    /// Multiplies by a column vector.
    #[inline]
    pub fn mul_vec4(&self, v: [f64; 4]) -> [f64; 4] {
        let m = &self.m;
        [
            m[0] * v[0] + m[1] * v[1] + m[2] * v[2] + m[3] * v[3],
            m[4] * v[0] + m[5] * v[1] + m[6] * v[2] + m[7] * v[3],
            m[8] * v[0] + m[9] * v[1] + m[10] * v[2] + m[11] * v[3],
            m[12] * v[0] + m[13] * v[1] + m[14] * v[2] + m[15] * v[3],
        ]
    }

    /// Returns the transpose.
    pub fn transpose(&self) -> Self {
        let mut out = [0.0; 16];
        for row in 0..4 {
            for col in 0..4 {
                out[col * 4 + row] = self.m[row * 4 + col];
            }
        }
        Self { m: out }
    }

    /// Computes the determinant.
    pub fn determinant(&self) -> f64 {
        self.to_glam().determinant()
    }

    /// Computes the inverse.
    ///
    /// Returns `None` if the matrix is singular: |det| below `1e-12` times the
    /// product of the row norms, so uniformly small gains still invert.
    ///
    /// ```rust
    /// use vfx_math::Mat4;
    ///
    /// let m = Mat4::diagonal([2.0, 4.0, 0.5, 1.0]);
    /// let inv = m.inverse().unwrap();
    /// assert!((m * inv).approx_eq(&Mat4::IDENTITY, 1e-12));
    /// ```
    pub fn inverse(&self) -> Option<Self> {
        let g = self.to_glam();
        let rows: f64 = self
            .m
            .chunks_exact(4)
            .map(|row| row.iter().map(|v| v * v).sum::<f64>().sqrt())
            .product();
        if rows == 0.0 || g.determinant().abs() < 1e-12 * rows {
            return None;
        }
        Some(Self::from_glam(g.inverse()))
    }

    /// True if every element is within `eps` of `other`.
    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        self.m.iter().zip(other.m.iter()).all(|(a, b)| (a - b).abs() <= eps)
    }

    /// True if this is the identity within `eps`.
    #[inline]
    pub fn is_identity(&self, eps: f64) -> bool {
        self.approx_eq(&Self::IDENTITY, eps)
    }

    // glam stores columns; a transpose maps between the two layouts.
    fn to_glam(self) -> DMat4 {
        DMat4::from_cols_array(&self.m).transpose()
    }

    fn from_glam(g: DMat4) -> Self {
        Self { m: g.transpose().to_cols_array() }
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<[f64; 16]> for Mat4 {
    fn from(m: [f64; 16]) -> Self {
        Self { m }
    }
}

impl Mul for Mat4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::from_glam(self.to_glam() * rhs.to_glam())
    }
}

impl Index<(usize, usize)> for Mat4 {
    type Output = f64;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.m[row * 4 + col]
    }
}
