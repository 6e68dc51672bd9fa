//! Matrix transform: `out = M * in + offset` on RGBA.
//!
//! The derived factories ([`identity`](MatrixTransform::identity),
//! [`sat`](MatrixTransform::sat), [`scale`](MatrixTransform::scale),
//! [`view`](MatrixTransform::view), [`fit`](MatrixTransform::fit)) are
//! associated functions returning `(matrix, offset)`; they never touch a
//! transform instance.

use serde::{Deserialize, Serialize};
use vfx_math::Mat4;

use crate::{OcioError, OcioResult, TransformDirection};

/// Row-major 4x4 matrix and RGBA offset.
pub type MatrixValue = ([f64; 16], [f64; 4]);

/// Matrix transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatrixTransform {
    /// 4x4 matrix, row-major.
    pub matrix: [f64; 16],
    /// Offset added after the multiply.
    pub offset: [f64; 4],
    /// Transform direction.
    pub direction: TransformDirection,
}

impl Default for MatrixTransform {
    fn default() -> Self {
        Self {
            matrix: Mat4::IDENTITY.m,
            offset: [0.0; 4],
            direction: TransformDirection::Forward,
        }
    }
}

impl MatrixTransform {
    /// Creates a matrix transform.
    pub fn new(matrix: [f64; 16], offset: [f64; 4], direction: TransformDirection) -> Self {
        Self {
            matrix,
            offset,
            direction,
        }
    }

    /// Creates a forward transform from a factory result.
    pub fn from_value((matrix, offset): MatrixValue) -> Self {
        Self::new(matrix, offset, TransformDirection::Forward)
    }

    /// Matrix and offset together.
    #[inline]
    pub fn value(&self) -> MatrixValue {
        (self.matrix, self.offset)
    }

    /// Sets matrix and offset together.
    #[inline]
    pub fn set_value(&mut self, matrix: [f64; 16], offset: [f64; 4]) {
        self.matrix = matrix;
        self.offset = offset;
    }

    /// The 4x4 matrix.
    #[inline]
    pub fn matrix(&self) -> [f64; 16] {
        self.matrix
    }

    /// Sets the 4x4 matrix, keeping the offset.
    #[inline]
    pub fn set_matrix(&mut self, matrix: [f64; 16]) {
        self.matrix = matrix;
    }

    /// The RGBA offset.
    #[inline]
    pub fn offset(&self) -> [f64; 4] {
        self.offset
    }

    /// Sets the RGBA offset, keeping the matrix.
    #[inline]
    pub fn set_offset(&mut self, offset: [f64; 4]) {
        self.offset = offset;
    }

    /// Matrix and offset undoing this transform's forward direction:
    /// `M^-1 * (in - offset)`.
    pub fn inverted_value(&self) -> OcioResult<MatrixValue> {
        let m = Mat4::from_row_major(self.matrix);
        let inv = m.inverse().ok_or_else(|| {
            OcioError::validation(format!(
                "cannot invert singular matrix (determinant {})",
                m.determinant()
            ))
        })?;
        let o = inv.mul_vec4(self.offset);
        Ok((inv.to_row_major(), [-o[0], -o[1], -o[2], -o[3]]))
    }

    // ------------------------------------------------------------------
    // Derived factories
    // ------------------------------------------------------------------

    /// Identity matrix, zero offset.
    pub fn identity() -> MatrixValue {
        (Mat4::IDENTITY.m, [0.0; 4])
    }

    /// Saturation matrix around the given luma weights.
    ///
    /// `sat = 0` is fully desaturated, `sat = 1` is identity. Alpha is kept.
    pub fn sat(sat: f64, luma: [f64; 3]) -> MatrixValue {
        let mut m = Mat4::IDENTITY.m;
        for row in 0..3 {
            for col in 0..3 {
                let diag = if row == col { sat } else { 0.0 };
                m[row * 4 + col] = luma[col] * (1.0 - sat) + diag;
            }
        }
        (m, [0.0; 4])
    }

    /// Per-channel scale.
    pub fn scale(scale: [f64; 4]) -> MatrixValue {
        (Mat4::diagonal(scale).m, [0.0; 4])
    }

    /// Channel view matrix.
    ///
    /// - all four channels hot: identity
    /// - alpha hot: alpha shown in every channel
    /// - otherwise: gray from the hot RGB channels, weighted by `luma`
    ///   normalized over the hot set; alpha passes through
    pub fn view(channel_hot: [bool; 4], luma: [f64; 3]) -> MatrixValue {
        if channel_hot.iter().all(|h| *h) {
            return Self::identity();
        }

        let mut m = [0.0; 16];
        if channel_hot[3] {
            for row in 0..4 {
                m[row * 4 + 3] = 1.0;
            }
            return (m, [0.0; 4]);
        }

        let mut w = [0.0; 3];
        for c in 0..3 {
            if channel_hot[c] {
                w[c] = luma[c];
            }
        }
        let sum: f64 = w.iter().sum();
        if sum != 0.0 {
            for v in &mut w {
                *v /= sum;
            }
        }
        for row in 0..3 {
            m[row * 4..row * 4 + 3].copy_from_slice(&w);
        }
        m[15] = 1.0;
        (m, [0.0; 4])
    }

    /// Linear remap of `[oldmin, oldmax]` onto `[newmin, newmax]` per channel.
    pub fn fit(
        oldmin: [f64; 4],
        oldmax: [f64; 4],
        newmin: [f64; 4],
        newmax: [f64; 4],
    ) -> OcioResult<MatrixValue> {
        let mut scale = [0.0; 4];
        let mut offset = [0.0; 4];
        for c in 0..4 {
            let denom = oldmax[c] - oldmin[c];
            if denom == 0.0 {
                return Err(OcioError::validation(format!(
                    "fit: channel {c} has oldmin == oldmax ({})",
                    oldmin[c]
                )));
            }
            scale[c] = (newmax[c] - newmin[c]) / denom;
            offset[c] = (newmin[c] * oldmax[c] - newmax[c] * oldmin[c]) / denom;
        }
        Ok((Mat4::diagonal(scale).m, offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use vfx_math::REC709_LUMA;

    #[test]
    fn default_is_identity() {
        let t = MatrixTransform::default();
        assert_eq!(t.value(), MatrixTransform::identity());
        assert_eq!(t.matrix()[1], 0.0);
    }

    #[test]
    fn value_accessors() {
        let m = [
            0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0, 1.1, 1.2, 1.3, 1.4, 1.5, 1.6,
        ];
        let o = [0.1, 0.2, 0.3, 0.4];
        let mut t = MatrixTransform::default();
        t.set_value(m, o);
        assert_eq!(t.value(), (m, o));

        t.set_offset([0.0; 4]);
        assert_eq!(t.matrix(), m);
        t.set_matrix(MatrixTransform::identity().0);
        assert_eq!(t.offset(), [0.0; 4]);
    }

    #[test]
    fn sat_matrix() {
        let (m, o) = MatrixTransform::sat(0.5, REC709_LUMA);
        assert_eq!(m[1], 0.3576);
        assert_relative_eq!(m[0], 0.2126 * 0.5 + 0.5);
        assert_eq!(m[15], 1.0);
        assert_eq!(m[3], 0.0);
        assert_eq!(o, [0.0; 4]);
    }

    #[test]
    fn scale_matrix() {
        let (m, _) = MatrixTransform::scale([0.9, 0.8, 0.7, 1.0]);
        assert_eq!(m[0], 0.9);
        assert_eq!(m[5], 0.8);
        assert_eq!(m[10], 0.7);
        assert_eq!(m[1], 0.0);
    }

    #[test]
    fn view_gray() {
        let (m, _) = MatrixTransform::view([true, true, true, false], REC709_LUMA);
        assert_relative_eq!(m[2], 0.0722, epsilon = 1e-12);
        assert_relative_eq!(m[4], 0.2126, epsilon = 1e-12);
        assert_eq!(m[15], 1.0);
        assert_eq!(m[3], 0.0);
    }

    #[test]
    fn view_single_channel() {
        // Only green hot: gray copy of green
        let (m, _) = MatrixTransform::view([false, true, false, false], REC709_LUMA);
        for row in 0..3 {
            assert_relative_eq!(m[row * 4 + 1], 1.0, epsilon = 1e-12);
            assert_eq!(m[row * 4], 0.0);
        }
    }

    #[test]
    fn view_alpha_and_all() {
        let (m, _) = MatrixTransform::view([true, false, false, true], REC709_LUMA);
        assert_eq!(m[3], 1.0);
        assert_eq!(m[7], 1.0);
        assert_eq!(m[0], 0.0);

        assert_eq!(MatrixTransform::view([true; 4], REC709_LUMA), MatrixTransform::identity());
    }

    #[test]
    fn fit_is_pure() {
        let t = MatrixTransform::new(
            [
                0.1, 0.2, 1.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0, 1.1, 1.2, 1.3, 1.4, 1.5, 1.6,
            ],
            [0.0; 4],
            TransformDirection::Forward,
        );
        let (m, o) = MatrixTransform::fit([0.1; 4], [0.9; 4], [0.0; 4], [1.1; 4]).unwrap();
        assert_relative_eq!(m[0], 1.375, epsilon = 1e-12);
        assert_relative_eq!(m[15], 1.375, epsilon = 1e-12);
        assert_relative_eq!(o[0], -0.1375, epsilon = 1e-12);
        assert_eq!(t.matrix()[2], 1.3);
    }

    #[test]
    fn fit_degenerate() {
        let err = MatrixTransform::fit([0.5; 4], [0.5; 4], [0.0; 4], [1.0; 4]).unwrap_err();
        assert!(matches!(err, OcioError::Validation(_)));
    }

    #[test]
    fn inverted_value() {
        let t = MatrixTransform::new(
            MatrixTransform::scale([2.0, 4.0, 0.5, 1.0]).0,
            [0.1, 0.2, 0.3, 0.0],
            TransformDirection::Forward,
        );
        let (m, o) = t.inverted_value().unwrap();
        assert_relative_eq!(m[0], 0.5, epsilon = 1e-12);
        assert_relative_eq!(m[5], 0.25, epsilon = 1e-12);
        assert_relative_eq!(m[10], 2.0, epsilon = 1e-12);
        assert_relative_eq!(o[0], -0.05, epsilon = 1e-12);
        assert_relative_eq!(o[2], -0.6, epsilon = 1e-12);

        let singular = MatrixTransform::from_value(MatrixTransform::scale([1.0, 0.0, 1.0, 1.0]));
        assert!(singular.inverted_value().is_err());
    }
}
