//! Transform processor - compiles and applies transforms to pixels.
//!
//! A [`Processor`] is a transform tree flattened into a list of
//! [`ProcessorOp`]s: groups are expanded, directions resolved and inverses
//! precomputed once, so applying it is a tight loop over pixels.
//!
//! # Example
//!
//! ```
//! use vfx_ocio::{MatrixTransform, Processor, Transform, TransformDirection};
//!
//! let t = Transform::from(MatrixTransform::from_value(MatrixTransform::scale([2.0, 2.0, 2.0, 1.0])));
//! let proc = Processor::from_transform(&t, TransformDirection::Inverse).unwrap();
//!
//! let mut pixels = [[0.5_f32, 1.0, 2.0]];
//! proc.apply_rgb(&mut pixels);
//! assert_eq!(pixels[0], [0.25, 0.5, 1.0]);
//! ```

use tracing::{debug, trace};
use vfx_math::Mat4;

use crate::allocation::Allocation;
use crate::log::MIN_LOG;
use crate::{
    AllocationTransform, CdlTransform, OcioError, OcioResult, SAT_LUMA_COEFS, Transform,
    TransformDirection,
};

/// Processor optimization level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptimizationLevel {
    /// No optimization.
    None,
    /// Lossless optimization only (identity removal, matrix combination).
    #[default]
    Lossless,
}

/// Compiled operation.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum ProcessorOp {
    /// 4x4 matrix + offset on RGBA.
    Matrix { matrix: Mat4, offset: [f64; 4] },
    /// Per-channel power on RGBA, no clamping.
    Exponent { value: [f32; 4] },
    /// `log_base(max(v, MIN_LOG))` on RGB.
    Log { base: f64 },
    /// `base ^ v` on RGB.
    Antilog { base: f64 },
    /// Forward ASC CDL.
    Cdl {
        slope: [f32; 3],
        offset: [f32; 3],
        power: [f32; 3],
        sat: f32,
    },
    /// Inverse ASC CDL.
    CdlInverse {
        slope: [f32; 3],
        offset: [f32; 3],
        power: [f32; 3],
        sat: f32,
    },
}

impl ProcessorOp {
    /// True if the op leaves every pixel unchanged.
    pub fn is_identity(&self) -> bool {
        match self {
            Self::Matrix { matrix, offset } => *matrix == Mat4::IDENTITY && *offset == [0.0; 4],
            Self::Exponent { value } => *value == [1.0; 4],
            // CDL clamps negatives even with neutral parameters
            _ => false,
        }
    }

    fn rgb_matrix(scale: [f64; 3], offset: [f64; 3]) -> Self {
        Self::Matrix {
            matrix: Mat4::diagonal([scale[0], scale[1], scale[2], 1.0]),
            offset: [offset[0], offset[1], offset[2], 0.0],
        }
    }

    fn cdl(t: &CdlTransform, inverse: bool) -> Self {
        let slope = t.slope.map(|v| v as f32);
        let offset = t.offset.map(|v| v as f32);
        let power = t.power.map(|v| v as f32);
        let sat = t.sat as f32;
        if inverse {
            Self::CdlInverse { slope, offset, power, sat }
        } else {
            Self::Cdl { slope, offset, power, sat }
        }
    }
}

/// Compiled transform processor.
#[derive(Debug, Clone, Default)]
pub struct Processor {
    ops: Vec<ProcessorOp>,
}

impl Processor {
    /// Creates a processor from a transform.
    pub fn from_transform(transform: &Transform, direction: TransformDirection) -> OcioResult<Self> {
        Self::from_transform_with_opts(transform, direction, OptimizationLevel::default())
    }

    /// Creates a processor from a transform with optimization level.
    pub fn from_transform_with_opts(
        transform: &Transform,
        direction: TransformDirection,
        optimization: OptimizationLevel,
    ) -> OcioResult<Self> {
        if direction == TransformDirection::Unknown {
            return Err(OcioError::validation("cannot build a processor for an unknown direction"));
        }
        let mut processor = Self::default();
        processor.compile_transform(transform, direction)?;
        let compiled = processor.ops.len();
        processor.optimize(optimization);
        debug!(
            kind = transform.kind_name(),
            ?direction,
            compiled,
            ops = processor.ops.len(),
            "built processor"
        );
        Ok(processor)
    }

    /// Creates a processor from pre-compiled ops.
    pub fn from_ops(ops: Vec<ProcessorOp>) -> Self {
        Self { ops }
    }

    /// Returns the compiled operations.
    pub fn ops(&self) -> &[ProcessorOp] {
        &self.ops
    }

    /// Number of compiled operations.
    #[inline]
    pub fn num_ops(&self) -> usize {
        self.ops.len()
    }

    /// True if the processor does nothing.
    #[inline]
    pub fn is_noop(&self) -> bool {
        self.ops.is_empty()
    }

    /// Optimizes the op list.
    pub fn optimize(&mut self, level: OptimizationLevel) {
        if level == OptimizationLevel::None {
            return;
        }
        self.ops.retain(|op| !op.is_identity());
        self.combine_matrices();
        // Fusion can cancel a matrix out entirely
        self.ops.retain(|op| !op.is_identity());
    }

    /// Combines adjacent matrix operations into one.
    fn combine_matrices(&mut self) {
        if self.ops.len() < 2 {
            return;
        }

        let mut result = Vec::with_capacity(self.ops.len());
        let mut pending: Option<(Mat4, [f64; 4])> = None;

        for op in self.ops.drain(..) {
            if let ProcessorOp::Matrix { matrix, offset } = op {
                pending = Some(match pending.take() {
                    // next * prev, next * prev_offset + next_offset
                    Some((prev_m, prev_o)) => {
                        let o = matrix.mul_vec4(prev_o);
                        (
                            matrix * prev_m,
                            [o[0] + offset[0], o[1] + offset[1], o[2] + offset[2], o[3] + offset[3]],
                        )
                    }
                    None => (matrix, offset),
                });
            } else {
                if let Some((matrix, offset)) = pending.take() {
                    result.push(ProcessorOp::Matrix { matrix, offset });
                }
                result.push(op);
            }
        }
        if let Some((matrix, offset)) = pending {
            result.push(ProcessorOp::Matrix { matrix, offset });
        }

        self.ops = result;
    }

    fn push(&mut self, op: ProcessorOp) {
        trace!(?op, "compiled op");
        self.ops.push(op);
    }

    fn compile_transform(&mut self, transform: &Transform, parent: TransformDirection) -> OcioResult<()> {
        let dir = parent.combine(transform.direction());
        if dir == TransformDirection::Unknown {
            return Err(OcioError::validation(format!(
                "{} has unknown direction",
                transform.kind_name()
            )));
        }
        let inverse = dir == TransformDirection::Inverse;

        match transform {
            Transform::Matrix(m) => {
                let (matrix, offset) = if inverse { m.inverted_value()? } else { m.value() };
                self.push(ProcessorOp::Matrix {
                    matrix: Mat4::from_row_major(matrix),
                    offset,
                });
            }

            Transform::Exponent(e) => {
                let value = if inverse { e.inverted_value()? } else { e.value };
                self.push(ProcessorOp::Exponent {
                    value: value.map(|v| v as f32),
                });
            }

            Transform::Log(l) => {
                l.validate()?;
                self.push(if inverse {
                    ProcessorOp::Antilog { base: l.base }
                } else {
                    ProcessorOp::Log { base: l.base }
                });
            }

            Transform::Cdl(c) => {
                if inverse {
                    c.validate_inverse()?;
                }
                self.push(ProcessorOp::cdl(c, inverse));
            }

            Transform::Allocation(a) => self.compile_allocation(a, inverse)?,

            Transform::Group(g) => {
                if inverse {
                    for child in g.iter().rev() {
                        self.compile_transform(child, TransformDirection::Inverse)?;
                    }
                } else {
                    for child in g.iter() {
                        self.compile_transform(child, TransformDirection::Forward)?;
                    }
                }
            }

            Transform::File(f) => {
                // The resolved transform carries the file transform's direction
                let resolved = f.resolve()?;
                self.compile_transform(&resolved, parent)?;
            }

            Transform::ColorSpace(_) | Transform::Look(_) | Transform::Display(_) => {
                return Err(OcioError::Unresolved {
                    kind: transform.kind_name(),
                });
            }
        }
        Ok(())
    }

    /// Lowers an allocation into matrix and log ops.
    fn compile_allocation(&mut self, a: &AllocationTransform, inverse: bool) -> OcioResult<()> {
        a.validate()?;
        let [min, max, offset] = a.resolved_vars();
        let range = max - min;
        let to_unit = ProcessorOp::rgb_matrix([1.0 / range; 3], [-min / range; 3]);
        let from_unit = ProcessorOp::rgb_matrix([range; 3], [min; 3]);

        match (a.allocation(), inverse) {
            (Allocation::Uniform, false) => self.push(to_unit),
            (Allocation::Uniform, true) => self.push(from_unit),
            (Allocation::Lg2, false) => {
                self.push(ProcessorOp::rgb_matrix([1.0; 3], [offset; 3]));
                self.push(ProcessorOp::Log { base: 2.0 });
                self.push(to_unit);
            }
            (Allocation::Lg2, true) => {
                self.push(from_unit);
                self.push(ProcessorOp::Antilog { base: 2.0 });
                self.push(ProcessorOp::rgb_matrix([1.0; 3], [-offset; 3]));
            }
        }
        Ok(())
    }

    // ========================================================================
    // Pixel application
    // ========================================================================

    /// Applies the processor to one RGBA pixel.
    pub fn apply_pixel(&self, mut rgba: [f32; 4]) -> [f32; 4] {
        self.apply_one(&mut rgba);
        rgba
    }

    /// Applies the processor to RGBA pixels in place.
    pub fn apply_rgba(&self, pixels: &mut [[f32; 4]]) {
        for pixel in pixels.iter_mut() {
            self.apply_one(pixel);
        }
    }

    /// Applies the processor to RGB pixels in place, with alpha taken as 1.
    pub fn apply_rgb(&self, pixels: &mut [[f32; 3]]) {
        for pixel in pixels.iter_mut() {
            let [r, g, b] = *pixel;
            let mut rgba = [r, g, b, 1.0];
            self.apply_one(&mut rgba);
            *pixel = [rgba[0], rgba[1], rgba[2]];
        }
    }

    #[inline]
    fn apply_one(&self, pixel: &mut [f32; 4]) {
        for op in &self.ops {
            match op {
                ProcessorOp::Matrix { matrix, offset } => {
                    let out = matrix.mul_vec4(pixel.map(f64::from));
                    for c in 0..4 {
                        pixel[c] = (out[c] + offset[c]) as f32;
                    }
                }

                ProcessorOp::Exponent { value } => {
                    for c in 0..4 {
                        pixel[c] = pixel[c].powf(value[c]);
                    }
                }

                ProcessorOp::Log { base } => {
                    let ln_base = base.ln();
                    for v in &mut pixel[..3] {
                        *v = (f64::from(v.max(MIN_LOG)).ln() / ln_base) as f32;
                    }
                }

                ProcessorOp::Antilog { base } => {
                    for v in &mut pixel[..3] {
                        *v = base.powf(f64::from(*v)) as f32;
                    }
                }

                ProcessorOp::Cdl { slope, offset, power, sat } => {
                    for c in 0..3 {
                        pixel[c] = (pixel[c] * slope[c] + offset[c]).max(0.0).powf(power[c]);
                    }
                    let luma = vfx_math::luma([pixel[0], pixel[1], pixel[2]], SAT_LUMA_COEFS);
                    for v in &mut pixel[..3] {
                        *v = luma + sat * (*v - luma);
                    }
                }

                ProcessorOp::CdlInverse { slope, offset, power, sat } => {
                    let luma = vfx_math::luma([pixel[0], pixel[1], pixel[2]], SAT_LUMA_COEFS);
                    for c in 0..3 {
                        let v = luma + (pixel[c] - luma) / sat;
                        pixel[c] = (v.max(0.0).powf(1.0 / power[c]) - offset[c]) / slope[c];
                    }
                }
            }
        }
    }
}
