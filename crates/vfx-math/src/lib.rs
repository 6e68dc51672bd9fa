//! # vfx-math
//!
//! Math utilities for VFX color transforms.
//!
//! - [`Mat4`] - 4x4 row-major matrices for RGBA matrix transforms
//! - Rec.709 luma weights and [`luma`]
//!
//! # Design
//!
//! This crate wraps [`glam`] types with VFX-specific conventions.
//! All matrix operations assume **row-major** storage and **column vectors**:
//!
//! ```text
//! result = matrix * vector
//! ```
//!
//! # Usage
//!
//! ```rust
//! use vfx_math::Mat4;
//!
//! let m = Mat4::diagonal([0.5, 0.5, 0.5, 1.0]);
//! let inv = m.inverse().unwrap();
//! assert_eq!(inv.get(0, 0), 2.0);
//! ```
//!
//! # Dependencies
//!
//! - [`glam`] - determinant and inverse in `f64`
//!
//! # Used By
//!
//! - `vfx-ocio` - matrix, saturation and fit transforms

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod luma;
mod mat4;

pub use luma::*;
pub use mat4::*;
