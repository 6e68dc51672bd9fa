//! Allocation transform - value encoding remap.
//!
//! Used to prepare values before LUT sampling so the sampled domain covers
//! the interesting range. Two allocation types:
//! - Uniform: linear remapping from [min, max] to [0, 1]
//! - Lg2: log2(x + offset), then the same linear fit
//!
//! Variables are either absent (type defaults apply) or exactly
//! `[min, max, offset]`.

use serde::{Deserialize, Serialize};

use crate::{OcioError, OcioResult, TransformDirection};

/// Allocation type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Allocation {
    /// Linear allocation: maps [min, max] to [0, 1].
    #[default]
    Uniform,
    /// Log2 allocation. Default range is [-10, 6] stops.
    Lg2,
}

impl Allocation {
    /// `[min, max, offset]` used when no variables are set.
    pub fn default_vars(self) -> [f64; 3] {
        match self {
            Self::Uniform => [0.0, 1.0, 0.0],
            Self::Lg2 => [-10.0, 6.0, 0.0],
        }
    }
}

/// Allocation transform.
///
/// Fields are private: the variable count is an invariant maintained by
/// [`new`](Self::new) and [`set_vars`](Self::set_vars).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationTransform {
    allocation: Allocation,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    vars: Vec<f64>,
    direction: TransformDirection,
}

impl AllocationTransform {
    /// Creates an allocation transform, validating the variable count.
    pub fn new(
        allocation: Allocation,
        vars: &[f64],
        direction: TransformDirection,
    ) -> OcioResult<Self> {
        let mut t = Self {
            allocation,
            vars: Vec::new(),
            direction,
        };
        t.set_vars(vars)?;
        Ok(t)
    }

    /// Allocation type.
    #[inline]
    pub fn allocation(&self) -> Allocation {
        self.allocation
    }

    /// Sets the allocation type. Existing variables are kept.
    #[inline]
    pub fn set_allocation(&mut self, allocation: Allocation) {
        self.allocation = allocation;
    }

    /// Variables as set (empty when defaults apply).
    #[inline]
    pub fn vars(&self) -> &[f64] {
        &self.vars
    }

    /// Number of variables set.
    #[inline]
    pub fn num_vars(&self) -> usize {
        self.vars.len()
    }

    /// Sets the variables. Accepts 0 or 3 values; on error nothing changes.
    pub fn set_vars(&mut self, vars: &[f64]) -> OcioResult<()> {
        check_var_count(vars.len())?;
        self.vars = vars.to_vec();
        Ok(())
    }

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

    /// Effective `[min, max, offset]`.
    pub fn resolved_vars(&self) -> [f64; 3] {
        match self.vars.as_slice() {
            &[min, max, offset] => [min, max, offset],
            _ => self.allocation.default_vars(),
        }
    }

    pub(crate) fn validate(&self) -> OcioResult<()> {
        check_var_count(self.vars.len())?;
        let [min, max, _] = self.resolved_vars();
        if min == max {
            return Err(OcioError::validation(format!(
                "allocation range is empty (min == max == {min})"
            )));
        }
        Ok(())
    }
}

fn check_var_count(n: usize) -> OcioResult<()> {
    if n != 0 && n != 3 {
        return Err(OcioError::validation(format!(
            "allocation takes 0 or 3 vars [min, max, offset], got {n}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let t = AllocationTransform::default();
        assert_eq!(t.allocation(), Allocation::Uniform);
        assert_eq!(t.num_vars(), 0);
        assert_eq!(t.resolved_vars(), [0.0, 1.0, 0.0]);
        assert_eq!(t.direction(), TransformDirection::Forward);
    }

    #[test]
    fn set_vars_checks_count() {
        let mut t = AllocationTransform::default();
        t.set_vars(&[0.1, 0.2, 0.3]).unwrap();
        assert_eq!(t.num_vars(), 3);
        assert_eq!(t.vars(), &[0.1, 0.2, 0.3]);

        // Failure keeps the previous vars
        assert!(t.set_vars(&[1.0, 2.0]).is_err());
        assert_eq!(t.vars(), &[0.1, 0.2, 0.3]);

        t.set_vars(&[]).unwrap();
        assert_eq!(t.num_vars(), 0);
    }

    #[test]
    fn new_validates() {
        assert!(AllocationTransform::new(Allocation::Lg2, &[1.0], TransformDirection::Forward).is_err());
        let t = AllocationTransform::new(Allocation::Lg2, &[], TransformDirection::Inverse).unwrap();
        assert_eq!(t.resolved_vars(), [-10.0, 6.0, 0.0]);
    }

    #[test]
    fn empty_range_is_invalid() {
        let t = AllocationTransform::new(Allocation::Uniform, &[0.5, 0.5, 0.0], TransformDirection::Forward)
            .unwrap();
        assert!(matches!(t.validate(), Err(OcioError::Validation(_))));
    }

    #[test]
    fn unknown_direction_is_storable() {
        let mut t = AllocationTransform::default();
        t.set_direction(TransformDirection::Unknown);
        assert_eq!(t.direction(), TransformDirection::Unknown);
    }
}
