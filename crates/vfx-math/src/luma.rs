//! Rec.709 luma weights.

/// Rec.709 luma coefficient for red.
pub const REC709_LUMA_R: f64 = 0.2126;

/// Rec.709 luma coefficient for green.
pub const REC709_LUMA_G: f64 = 0.7152;

/// Rec.709 luma coefficient for blue.
pub const REC709_LUMA_B: f64 = 0.0722;

/// Rec.709 luma coefficients as `[R, G, B]`.
pub const REC709_LUMA: [f64; 3] = [REC709_LUMA_R, REC709_LUMA_G, REC709_LUMA_B];

/// Weighted sum of an RGB triplet.
///
/// ```
/// use vfx_math::{luma, REC709_LUMA};
/// let y = luma([0.5, 0.3, 0.2], REC709_LUMA);
/// assert!((y - 0.3353).abs() < 1e-4);
/// ```
#[inline]
pub fn luma(rgb: [f32; 3], coefs: [f64; 3]) -> f32 {
    rgb[0] * coefs[0] as f32 + rgb[1] * coefs[1] as f32 + rgb[2] * coefs[2] as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one() {
        let sum: f64 = REC709_LUMA.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn gray_is_preserved() {
        let y = luma([0.18, 0.18, 0.18], REC709_LUMA);
        assert!((y - 0.18).abs() < 1e-6);
    }
}
