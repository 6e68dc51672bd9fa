//! Transform definitions shared by every transform kind.
//!
//! A [`Transform`] is one of a fixed set of kinds:
//! - Numeric primitives (matrix, exponent, allocation, log)
//! - ASC CDL color correction
//! - Ordered composition via [`GroupTransform`]
//! - Descriptors naming things an OCIO config resolves (file, color space,
//!   look, display)
//!
//! Every kind carries a [`TransformDirection`]. Evaluation goes through
//! [`Processor`](crate::Processor), which flattens the tree and resolves
//! directions once.

use serde::{Deserialize, Serialize};

use crate::{
    AllocationTransform, CdlTransform, ColorSpaceTransform, DisplayTransform, ExponentTransform,
    FileTransform, GroupTransform, LogTransform, LookTransform, MatrixTransform, OcioError,
    OcioResult, Processor,
};

/// Transform application direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformDirection {
    /// Forward transform.
    #[default]
    Forward,
    /// Inverse transform.
    Inverse,
    /// Not specified. Cannot be evaluated.
    Unknown,
}

impl TransformDirection {
    /// Returns the opposite direction. `Unknown` stays `Unknown`.
    #[inline]
    pub fn inverse(self) -> Self {
        match self {
            Self::Forward => Self::Inverse,
            Self::Inverse => Self::Forward,
            Self::Unknown => Self::Unknown,
        }
    }

    /// Composes a parent direction with a child direction.
    ///
    /// `Unknown` if either side is unknown, `Forward` when both agree,
    /// `Inverse` otherwise.
    #[inline]
    pub fn combine(self, other: Self) -> Self {
        match (self, other) {
            (Self::Unknown, _) | (_, Self::Unknown) => Self::Unknown,
            (a, b) if a == b => Self::Forward,
            _ => Self::Inverse,
        }
    }
}

/// Interpolation method requested by a file transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    /// No explicit choice.
    #[default]
    Unknown,
    /// Nearest neighbor.
    Nearest,
    /// Linear interpolation.
    Linear,
    /// Tetrahedral interpolation (3D LUTs).
    Tetrahedral,
    /// Best available (context-dependent).
    Best,
}

/// Color transform definition.
///
/// This enum represents all transform kinds the engine knows about.
/// Serialized with OCIO-style YAML tags (`!MatrixTransform {...}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Transform {
    /// Value encoding remap (uniform / log2).
    #[serde(rename = "AllocationTransform")]
    Allocation(AllocationTransform),

    /// CDL (slope/offset/power/sat).
    #[serde(rename = "CDLTransform")]
    Cdl(CdlTransform),

    /// Reference to a pair of named color spaces.
    #[serde(rename = "ColorSpaceTransform")]
    ColorSpace(ColorSpaceTransform),

    /// Display/view pipeline description.
    #[serde(rename = "DisplayTransform")]
    Display(DisplayTransform),

    /// Per-channel exponent.
    #[serde(rename = "ExponentTransform")]
    Exponent(ExponentTransform),

    /// Reference to an external file.
    #[serde(rename = "FileTransform")]
    File(FileTransform),

    /// Ordered chain of transforms.
    #[serde(rename = "GroupTransform")]
    Group(GroupTransform),

    /// Log base conversion.
    #[serde(rename = "LogTransform")]
    Log(LogTransform),

    /// Reference to named looks.
    #[serde(rename = "LookTransform")]
    Look(LookTransform),

    /// 4x4 matrix + offset.
    #[serde(rename = "MatrixTransform")]
    Matrix(MatrixTransform),
}

macro_rules! with_kind {
    ($self:expr, $t:ident => $body:expr) => {
        match $self {
            Transform::Allocation($t) => $body,
            Transform::Cdl($t) => $body,
            Transform::ColorSpace($t) => $body,
            Transform::Display($t) => $body,
            Transform::Exponent($t) => $body,
            Transform::File($t) => $body,
            Transform::Group($t) => $body,
            Transform::Log($t) => $body,
            Transform::Look($t) => $body,
            Transform::Matrix($t) => $body,
        }
    };
}

impl Transform {
    /// Creates a matrix transform from a row-major 4x4 array.
    pub fn matrix(m: [f64; 16]) -> Self {
        Self::Matrix(MatrixTransform {
            matrix: m,
            ..Default::default()
        })
    }

    /// Creates a group transform.
    pub fn group(children: Vec<Transform>) -> Self {
        Self::Group(GroupTransform::from(children))
    }

    /// Creates a file transform.
    pub fn file(src: impl Into<String>) -> Self {
        Self::File(FileTransform {
            src: src.into(),
            ..Default::default()
        })
    }

    /// Transform kind as it appears in YAML tags.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Allocation(_) => "AllocationTransform",
            Self::Cdl(_) => "CDLTransform",
            Self::ColorSpace(_) => "ColorSpaceTransform",
            Self::Display(_) => "DisplayTransform",
            Self::Exponent(_) => "ExponentTransform",
            Self::File(_) => "FileTransform",
            Self::Group(_) => "GroupTransform",
            Self::Log(_) => "LogTransform",
            Self::Look(_) => "LookTransform",
            Self::Matrix(_) => "MatrixTransform",
        }
    }

    /// Direction of this transform.
    pub fn direction(&self) -> TransformDirection {
        with_kind!(self, t => t.direction())
    }

    /// Sets the direction of this transform.
    pub fn set_direction(&mut self, direction: TransformDirection) {
        with_kind!(self, t => t.set_direction(direction))
    }

    /// Returns a copy with the direction flipped.
    pub fn inverse(&self) -> Self {
        let mut t = self.clone();
        t.set_direction(self.direction().inverse());
        t
    }

    /// Checks structural invariants without evaluating anything.
    ///
    /// Fails on an unknown direction anywhere in the tree and on field
    /// values no direction could evaluate (degenerate allocation range,
    /// non-positive log base).
    pub fn validate(&self) -> OcioResult<()> {
        if self.direction() == TransformDirection::Unknown {
            return Err(OcioError::validation(format!(
                "{} has unknown direction",
                self.kind_name()
            )));
        }
        match self {
            Self::Allocation(t) => t.validate(),
            Self::Log(t) => t.validate(),
            Self::Group(g) => g.iter().try_for_each(Transform::validate),
            Self::Display(d) => d.sub_transforms().try_for_each(Transform::validate),
            _ => Ok(()),
        }
    }

    /// Applies this transform to a single RGBA pixel.
    ///
    /// Compiles a [`Processor`] on every call; build one explicitly when
    /// processing more than a handful of pixels.
    pub fn apply(&self, rgba: [f32; 4]) -> OcioResult<[f32; 4]> {
        let processor = Processor::from_transform(self, TransformDirection::Forward)?;
        Ok(processor.apply_pixel(rgba))
    }
}

macro_rules! impl_from_kind {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Transform {
                fn from(t: $ty) -> Self {
                    Self::$variant(t)
                }
            }
        )*
    };
}

impl_from_kind!(
    Allocation(AllocationTransform),
    Cdl(CdlTransform),
    ColorSpace(ColorSpaceTransform),
    Display(DisplayTransform),
    Exponent(ExponentTransform),
    File(FileTransform),
    Group(GroupTransform),
    Log(LogTransform),
    Look(LookTransform),
    Matrix(MatrixTransform),
);

/// Direction accessors shared by the kinds with a public `direction` field.
macro_rules! impl_direction {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $ty {
                /// Direction of this transform.
                #[inline]
                pub fn direction(&self) -> TransformDirection {
                    self.direction
                }

                /// Sets the direction of this transform.
                #[inline]
                pub fn set_direction(&mut self, direction: TransformDirection) {
                    self.direction = direction;
                }
            }
        )*
    };
}

impl_direction!(
    CdlTransform,
    ColorSpaceTransform,
    DisplayTransform,
    ExponentTransform,
    FileTransform,
    GroupTransform,
    LogTransform,
    LookTransform,
    MatrixTransform,
);
