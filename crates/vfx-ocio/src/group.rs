//! Ordered composition of transforms.

use serde::{Deserialize, Serialize};

use crate::{OcioError, OcioResult, Transform, TransformDirection};

/// Group of chained transforms.
///
/// Forward applies children from first to last. Inverse applies them from
/// last to first, each with its own direction flipped.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupTransform {
    /// Child transforms, in application order.
    pub children: Vec<Transform>,
    /// Transform direction.
    pub direction: TransformDirection,
}

impl GroupTransform {
    /// Creates an empty forward group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a transform.
    pub fn push(&mut self, transform: impl Into<Transform>) {
        self.children.push(transform.into());
    }

    /// Child at `index`.
    pub fn transform(&self, index: usize) -> OcioResult<&Transform> {
        let len = self.children.len();
        self.children
            .get(index)
            .ok_or(OcioError::OutOfRange { index, len })
    }

    /// Mutable child at `index`.
    pub fn transform_mut(&mut self, index: usize) -> OcioResult<&mut Transform> {
        let len = self.children.len();
        self.children
            .get_mut(index)
            .ok_or(OcioError::OutOfRange { index, len })
    }

    /// Number of children.
    #[inline]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// True when the group has no children.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Removes every child.
    pub fn clear(&mut self) {
        self.children.clear();
    }

    /// Iterates over the children in application order.
    pub fn iter(&self) -> std::slice::Iter<'_, Transform> {
        self.children.iter()
    }
}

impl From<Vec<Transform>> for GroupTransform {
    fn from(children: Vec<Transform>) -> Self {
        Self {
            children,
            direction: TransformDirection::Forward,
        }
    }
}

impl FromIterator<Transform> for GroupTransform {
    fn from_iter<I: IntoIterator<Item = Transform>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<'a> IntoIterator for &'a GroupTransform {
    type Item = &'a Transform;
    type IntoIter = std::slice::Iter<'a, Transform>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExponentTransform, MatrixTransform};

    #[test]
    fn push_len_clear() {
        let mut g = GroupTransform::new();
        assert!(g.is_empty());
        g.push(MatrixTransform::default());
        g.push(ExponentTransform::default());
        assert_eq!(g.len(), 2);
        assert!(!g.is_empty());
        assert_eq!(g.transform(0).unwrap().direction(), TransformDirection::Forward);
        assert_eq!(g.transform(1).unwrap().kind_name(), "ExponentTransform");

        g.clear();
        assert_eq!(g.len(), 0);
        assert!(g.is_empty());
    }

    #[test]
    fn out_of_range() {
        let mut g: GroupTransform = vec![Transform::from(MatrixTransform::default())].into();
        assert!(matches!(
            g.transform(1),
            Err(OcioError::OutOfRange { index: 1, len: 1 })
        ));
        assert!(g.transform_mut(5).is_err());
    }

    #[test]
    fn transform_mut_edits_in_place() {
        let mut g: GroupTransform = std::iter::once(Transform::from(ExponentTransform::default())).collect();
        g.transform_mut(0)
            .unwrap()
            .set_direction(TransformDirection::Inverse);
        assert_eq!(g.transform(0).unwrap().direction(), TransformDirection::Inverse);
    }

    #[test]
    fn clone_is_deep() {
        let mut a = GroupTransform::new();
        a.push(ExponentTransform::new([2.0; 4]));
        let mut b = a.clone();
        b.push(MatrixTransform::default());
        if let Transform::Exponent(e) = b.transform_mut(0).unwrap() {
            e.value = [3.0; 4];
        }
        assert_eq!(a.len(), 1);
        assert_eq!(a.transform(0).unwrap(), &Transform::from(ExponentTransform::new([2.0; 4])));
    }
}
