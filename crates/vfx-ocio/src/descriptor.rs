//! Descriptor transforms.
//!
//! These name things an OCIO config or the file system resolves: color
//! spaces, looks, display/view pairs and external files. They carry no math
//! of their own. [`FileTransform`] resolves CDL-family files directly; the
//! others need a config and fail with [`OcioError::Unresolved`] when
//! compiled.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;
use vfx_lut::{FileFormat, formats};

use crate::{CdlTransform, Interpolation, OcioError, OcioResult, Transform, TransformDirection};

/// Reference to an external file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTransform {
    /// Path to the file.
    pub src: String,
    /// Correction id inside a `.ccc`/`.cdl` file.
    #[serde(rename = "cccid", skip_serializing_if = "String::is_empty")]
    pub ccc_id: String,
    /// Requested interpolation.
    pub interpolation: Interpolation,
    /// Transform direction.
    pub direction: TransformDirection,
}

impl FileTransform {
    /// Number of registered file formats.
    pub fn num_formats() -> usize {
        formats::num_formats()
    }

    /// Name of the format at `index`.
    pub fn format_name_by_index(index: usize) -> OcioResult<&'static str> {
        formats::format_name_by_index(index).map_err(|_| OcioError::OutOfRange {
            index,
            len: formats::num_formats(),
        })
    }

    /// Extension of the format at `index`.
    pub fn format_extension_by_index(index: usize) -> OcioResult<&'static str> {
        formats::format_extension_by_index(index).map_err(|_| OcioError::OutOfRange {
            index,
            len: formats::num_formats(),
        })
    }

    /// Formats matching the extension of [`src`](Self::src).
    pub fn formats(&self) -> impl Iterator<Item = &'static FileFormat> {
        formats::formats_for_extension(self.extension())
    }

    fn extension(&self) -> &str {
        Path::new(&self.src)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
    }

    /// Loads the referenced file as a transform.
    ///
    /// Only CDL files (`.cc`, `.ccc`, `.cdl`) are evaluated here; the
    /// result carries this transform's direction.
    pub fn resolve(&self) -> OcioResult<Transform> {
        let ext = self.extension();
        if !vfx_lut::cdl::is_cdl_extension(ext) {
            return Err(OcioError::Unsupported(if ext.is_empty() {
                self.src.clone()
            } else {
                format!("{} (.{ext})", self.src)
            }));
        }
        debug!(src = %self.src, cccid = %self.ccc_id, "resolving file transform");
        let mut cdl = CdlTransform::from_file(&self.src, &self.ccc_id)?;
        cdl.direction = self.direction;
        Ok(Transform::Cdl(cdl))
    }
}

/// Conversion between two named color spaces.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorSpaceTransform {
    /// Source color space.
    pub src: String,
    /// Destination color space.
    pub dst: String,
    /// Transform direction.
    pub direction: TransformDirection,
}

/// Named looks applied between two color spaces.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LookTransform {
    /// Source color space.
    pub src: String,
    /// Destination color space.
    pub dst: String,
    /// Look names as given (e.g. `"bar;foo"`).
    pub looks: String,
    /// Transform direction.
    pub direction: TransformDirection,
}

/// Display/view pipeline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayTransform {
    /// Input color space.
    #[serde(rename = "input_colorspace")]
    pub input_colorspace_name: String,
    /// Correction in scene-linear.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linear_cc: Option<Box<Transform>>,
    /// Correction in the color-timing space.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_timing_cc: Option<Box<Transform>>,
    /// Channel isolation (usually a view matrix).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_view: Option<Box<Transform>>,
    /// Display device name.
    pub display: String,
    /// View name.
    pub view: String,
    /// Correction in display space.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_cc: Option<Box<Transform>>,
    /// Looks replacing the view's own.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub looks_override: String,
    /// Whether [`looks_override`](Self::looks_override) applies.
    pub looks_override_enabled: bool,
    /// Transform direction.
    pub direction: TransformDirection,
}

impl DisplayTransform {
    /// Creates a display transform for an input color space and display/view.
    pub fn new(
        input_colorspace_name: impl Into<String>,
        display: impl Into<String>,
        view: impl Into<String>,
    ) -> Self {
        Self {
            input_colorspace_name: input_colorspace_name.into(),
            display: display.into(),
            view: view.into(),
            ..Default::default()
        }
    }

    /// Sub-transforms that are set, in pipeline order.
    pub fn sub_transforms(&self) -> impl Iterator<Item = &Transform> {
        [
            &self.linear_cc,
            &self.color_timing_cc,
            &self.channel_view,
            &self.display_cc,
        ]
        .into_iter()
        .filter_map(|t| t.as_deref())
    }
}
