//! ASC CDL transform (slope/offset/power/saturation).
//!
//! Forward, per RGB channel:
//!
//! ```text
//! out = max(in * slope + offset, 0) ^ power
//! out = luma + sat * (out - luma)
//! ```
//!
//! with Rec.709 luma weights. Alpha passes through. The record form is the
//! compact `<ColorCorrection>` XML written by [`vfx_lut::cdl::to_xml_record`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;
use vfx_lut::{ColorCorrection, LutError, cdl};

use crate::{OcioError, OcioResult, TransformDirection};

/// Luma weights used by the saturation stage.
pub const SAT_LUMA_COEFS: [f64; 3] = vfx_math::REC709_LUMA;

/// CDL transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CdlTransform {
    /// Correction id (`id` attribute of the record).
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Free-form description.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Slope (multiply) per channel.
    pub slope: [f64; 3],
    /// Offset (add) per channel.
    pub offset: [f64; 3],
    /// Power per channel.
    pub power: [f64; 3],
    /// Saturation (1.0 = unchanged).
    pub sat: f64,
    /// Transform direction.
    pub direction: TransformDirection,
}

impl Default for CdlTransform {
    fn default() -> Self {
        Self {
            id: String::new(),
            description: String::new(),
            slope: [1.0; 3],
            offset: [0.0; 3],
            power: [1.0; 3],
            sat: 1.0,
            direction: TransformDirection::Forward,
        }
    }
}

impl CdlTransform {
    /// Creates a CDL transform from SOP values and saturation.
    pub fn new(slope: [f64; 3], offset: [f64; 3], power: [f64; 3], sat: f64) -> Self {
        Self {
            slope,
            offset,
            power,
            sat,
            ..Default::default()
        }
    }

    /// Luma weights of the saturation stage.
    #[inline]
    pub fn sat_luma_coefs(&self) -> [f64; 3] {
        SAT_LUMA_COEFS
    }

    /// Slope, offset and power packed as 9 values.
    pub fn sop(&self) -> [f64; 9] {
        let mut v = [0.0; 9];
        v[0..3].copy_from_slice(&self.slope);
        v[3..6].copy_from_slice(&self.offset);
        v[6..9].copy_from_slice(&self.power);
        v
    }

    /// Sets slope, offset and power from 9 packed values.
    pub fn set_sop(&mut self, sop: [f64; 9]) {
        self.slope = [sop[0], sop[1], sop[2]];
        self.offset = [sop[3], sop[4], sop[5]];
        self.power = [sop[6], sop[7], sop[8]];
    }

    /// Serializes the correction as a compact `<ColorCorrection>` record.
    pub fn xml(&self) -> String {
        cdl::to_xml_record(&self.to_color_correction())
    }

    /// Replaces the correction fields from a `<ColorCorrection>` record.
    ///
    /// On a parse error no field changes. Direction is never touched.
    pub fn set_xml(&mut self, xml: &str) -> OcioResult<()> {
        let cc = cdl::parse_record(xml).map_err(|e| match e {
            LutError::ParseError(msg) => OcioError::Parse(msg),
            other => OcioError::Lut(other),
        })?;
        self.assign(&cc);
        Ok(())
    }

    /// Loads a correction from a `.cc`, `.ccc` or `.cdl` file.
    ///
    /// An empty `ccc_id` selects the first correction in the file.
    pub fn from_file(path: impl AsRef<Path>, ccc_id: &str) -> OcioResult<Self> {
        let path = path.as_ref();
        let collection = cdl::read_any(path)?;
        let cc = collection.select(ccc_id).map_err(|e| match e {
            LutError::NotFound(what) => {
                OcioError::validation(format!("{}: {what} not found", path.display()))
            }
            other => OcioError::Lut(other),
        })?;
        debug!(path = %path.display(), id = ?cc.id, "loaded CDL record");
        let mut t = Self::default();
        t.assign(cc);
        Ok(t)
    }

    /// Record form of the correction fields.
    pub fn to_color_correction(&self) -> ColorCorrection {
        ColorCorrection {
            id: Some(self.id.clone()).filter(|s| !s.is_empty()),
            sop_description: Some(self.description.clone()).filter(|s| !s.is_empty()),
            slope: self.slope,
            offset: self.offset,
            power: self.power,
            saturation: self.sat,
            ..Default::default()
        }
    }

    fn assign(&mut self, cc: &ColorCorrection) {
        self.id = cc.id.clone().unwrap_or_default();
        self.description = cc.description().unwrap_or_default().to_string();
        self.slope = cc.slope;
        self.offset = cc.offset;
        self.power = cc.power;
        self.sat = cc.saturation;
    }

    /// Checks the fields the inverse divides by.
    pub(crate) fn validate_inverse(&self) -> OcioResult<()> {
        if let Some(s) = self.slope.iter().find(|s| **s <= 0.0) {
            return Err(OcioError::validation(format!("CDL slope {s} is not invertible")));
        }
        if let Some(p) = self.power.iter().find(|p| **p <= 0.0) {
            return Err(OcioError::validation(format!("CDL power {p} is not invertible")));
        }
        if self.sat == 0.0 {
            return Err(OcioError::validation("CDL saturation 0 is not invertible"));
        }
        Ok(())
    }
}

impl From<&ColorCorrection> for CdlTransform {
    fn from(cc: &ColorCorrection) -> Self {
        let mut t = Self::default();
        t.assign(cc);
        t
    }
}
