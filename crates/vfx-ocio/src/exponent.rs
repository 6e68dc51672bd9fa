//! Exponent transform: `out = in ^ value` on all four channels.
//!
//! No clamping: a negative base with a non-integer exponent yields NaN.

use serde::{Deserialize, Serialize};

use crate::{OcioError, OcioResult, TransformDirection};

/// Per-channel exponent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExponentTransform {
    /// RGBA exponents.
    pub value: [f64; 4],
    /// Transform direction.
    pub direction: TransformDirection,
}

impl Default for ExponentTransform {
    fn default() -> Self {
        Self {
            value: [1.0; 4],
            direction: TransformDirection::Forward,
        }
    }
}

impl ExponentTransform {
    /// Creates a forward exponent transform.
    pub fn new(value: [f64; 4]) -> Self {
        Self {
            value,
            ..Default::default()
        }
    }

    /// RGBA exponents.
    #[inline]
    pub fn value(&self) -> [f64; 4] {
        self.value
    }

    /// Sets the RGBA exponents.
    #[inline]
    pub fn set_value(&mut self, value: [f64; 4]) {
        self.value = value;
    }

    /// Exponents undoing the forward direction.
    pub(crate) fn inverted_value(&self) -> OcioResult<[f64; 4]> {
        if self.value.contains(&0.0) {
            return Err(OcioError::validation(format!(
                "exponent {:?} contains 0 and cannot be inverted",
                self.value
            )));
        }
        Ok(self.value.map(|v| 1.0 / v))
    }
}
