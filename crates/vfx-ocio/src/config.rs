//! YAML transform documents.
//!
//! Transforms use OCIO-style tags:
//!
//! ```yaml
//! !GroupTransform
//! children:
//!   - !CDLTransform {slope: [1.1, 1.0, 0.9], sat: 0.8}
//!   - !MatrixTransform {matrix: [2, 0, 0, 0, 0, 2, 0, 0, 0, 0, 2, 0, 0, 0, 0, 1]}
//!   - !ExponentTransform {value: [2.2, 2.2, 2.2, 1], direction: inverse}
//! ```
//!
//! Every field is optional and defaults like the Rust `Default` impls. A
//! top-level sequence is read as a forward group of its items.

use std::fs;
use std::path::Path;

use serde_yaml::Value;
use tracing::debug;

use crate::{GroupTransform, OcioResult, Transform};

impl Transform {
    /// Parses and validates a YAML transform document.
    pub fn from_yaml(yaml: &str) -> OcioResult<Self> {
        let transform = match serde_yaml::from_str::<Value>(yaml)? {
            Value::Sequence(items) => {
                let children = items
                    .into_iter()
                    .map(serde_yaml::from_value)
                    .collect::<Result<Vec<Transform>, _>>()?;
                Transform::Group(GroupTransform::from(children))
            }
            value => serde_yaml::from_value(value)?,
        };
        transform.validate()?;
        Ok(transform)
    }

    /// Reads a YAML transform document from a file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> OcioResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let transform = Self::from_yaml(&text)?;
        debug!(path = %path.display(), kind = transform.kind_name(), "loaded transform");
        Ok(transform)
    }

    /// Serializes to a YAML transform document.
    pub fn to_yaml(&self) -> OcioResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
