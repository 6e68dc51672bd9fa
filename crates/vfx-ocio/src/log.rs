//! Log transform: `out = log_base(max(in, MIN_LOG))` on RGB.

use serde::{Deserialize, Serialize};

use crate::{OcioError, OcioResult, TransformDirection};

/// Smallest value fed to a logarithm.
pub const MIN_LOG: f32 = f32::MIN_POSITIVE;

/// Base-N logarithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogTransform {
    /// Logarithm base.
    pub base: f64,
    /// Transform direction.
    pub direction: TransformDirection,
}

impl Default for LogTransform {
    fn default() -> Self {
        Self {
            base: 2.0,
            direction: TransformDirection::Forward,
        }
    }
}

impl LogTransform {
    /// Creates a forward log transform.
    pub fn new(base: f64) -> Self {
        Self {
            base,
            ..Default::default()
        }
    }

    /// Logarithm base.
    #[inline]
    pub fn base(&self) -> f64 {
        self.base
    }

    /// Sets the logarithm base.
    #[inline]
    pub fn set_base(&mut self, base: f64) {
        self.base = base;
    }

    pub(crate) fn validate(&self) -> OcioResult<()> {
        if self.base.is_nan() || self.base <= 0.0 || self.base == 1.0 {
            return Err(OcioError::validation(format!("invalid log base {}", self.base)));
        }
        Ok(())
    }
}
