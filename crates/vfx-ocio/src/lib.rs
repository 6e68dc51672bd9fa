//! OpenColorIO-style transforms for VFX.
//!
//! This crate provides the OCIO v1 transform surface in Rust:
//! - Numeric transforms: matrix, exponent, log, allocation
//! - ASC CDL with a lossless `<ColorCorrection>` XML record
//! - Ordered composition with [`GroupTransform`]
//! - Descriptors (file, color space, look, display) for config-driven
//!   pipelines
//! - YAML (de)serialization with OCIO-style tags
//!
//! # Quick Start
//!
//! ```
//! use vfx_ocio::{CdlTransform, ExponentTransform, Processor, Transform, TransformDirection};
//!
//! let grade = Transform::group(vec![
//!     CdlTransform::new([1.1, 1.0, 0.9], [0.0; 3], [1.0; 3], 0.9).into(),
//!     ExponentTransform::new([2.2, 2.2, 2.2, 1.0]).into(),
//! ]);
//!
//! let processor = Processor::from_transform(&grade, TransformDirection::Forward).unwrap();
//! let mut pixels = [[0.18_f32, 0.18, 0.18]];
//! processor.apply_rgb(&mut pixels);
//! ```
//!
//! # CDL Records
//!
//! ```
//! use vfx_ocio::CdlTransform;
//!
//! let mut cdl = CdlTransform::default();
//! cdl.set_xml(concat!(
//!     r#"<ColorCorrection id="sh010"><SOPNode><Slope>1.1 1 0.9</Slope>"#,
//!     "<Offset>0 0 0</Offset><Power>1 1 1</Power></SOPNode>",
//!     "<SatNode><Saturation>0.8</Saturation></SatNode></ColorCorrection>",
//! )).unwrap();
//! assert_eq!(cdl.id, "sh010");
//! assert_eq!(cdl.sat, 0.8);
//! ```
//!
//! # YAML
//!
//! ```
//! use vfx_ocio::Transform;
//!
//! let t = Transform::from_yaml("!ExponentTransform {value: [2.2, 2.2, 2.2, 1], direction: inverse}").unwrap();
//! assert_eq!(t.kind_name(), "ExponentTransform");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod transform;
mod allocation;
mod cdl;
mod matrix;
mod exponent;
mod log;
mod group;
mod descriptor;
mod processor;
mod config;

pub use error::{OcioError, OcioResult};
pub use transform::{Interpolation, Transform, TransformDirection};
pub use allocation::{Allocation, AllocationTransform};
pub use cdl::{CdlTransform, SAT_LUMA_COEFS};
pub use matrix::{MatrixTransform, MatrixValue};
pub use exponent::ExponentTransform;
pub use log::{LogTransform, MIN_LOG};
pub use group::GroupTransform;
pub use descriptor::{ColorSpaceTransform, DisplayTransform, FileTransform, LookTransform};
pub use processor::{OptimizationLevel, Processor, ProcessorOp};
