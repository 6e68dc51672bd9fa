//! # vfx-lut
//!
//! Color-correction file formats for VFX color pipelines.
//!
//! - [`cdl`] - ASC CDL records: `.cc`, `.ccc`, `.cdl` files and the compact
//!   `<ColorCorrection>` record carried by CDL transforms
//! - [`formats`] - the fixed registry of file formats a file transform can
//!   reference, queried by index
//!
//! # Usage
//!
//! ```rust
//! use vfx_lut::cdl::{parse_record, to_xml_record};
//!
//! let xml = concat!(
//!     r#"<ColorCorrection id="sh010"><SOPNode><Slope>1.1 1 0.9</Slope>"#,
//!     "<Offset>0 0 0</Offset><Power>1 1 1</Power></SOPNode>",
//!     "<SatNode><Saturation>0.8</Saturation></SatNode></ColorCorrection>",
//! );
//! let cc = parse_record(xml).unwrap();
//! assert_eq!(cc.slope, [1.1, 1.0, 0.9]);
//! assert_eq!(to_xml_record(&cc), xml);
//! ```
//!
//! # Dependencies
//!
//! - [`quick-xml`] - XML reader and escaping
//! - [`thiserror`] - Error handling
//! - [`tracing`] - diagnostics for skipped content
//!
//! # Used By
//!
//! - `vfx-ocio` - CDL transforms and file transforms

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod cdl;
pub mod formats;

pub use error::{LutError, LutResult};
pub use cdl::{ColorCorrection, ColorCorrectionCollection, ColorDecision, ColorDecisionList};
pub use formats::FileFormat;
