//! Identity field sanitizer
//!
//! Removes identity and audit fields from records before they are written
//! to the project tree.

use crate::etl::Transformer;
use eyre::Result;
use serde_json::Value;

/// Fields removed from every record level
pub const IDENTITY_FIELDS: [&str; 6] = ["id", "_id", "branchId", "userId", "createdAt", "updatedAt"];

/// Field removed unless the record belongs to the `project` category
pub const PROJECT_ID_FIELD: &str = "projectId";

/// Transformer that recursively drops identity fields
///
/// # Example
/// ```
/// use digia_sync::transform::Sanitizer;
/// use serde_json::json;
///
/// let sanitizer = Sanitizer::new(false);
/// let output = sanitizer.sanitize(json!({
///     "id": "c1",
///     "projectId": "p1",
///     "name": "Button",
///     "props": [{"_id": "x", "label": "Go"}]
/// }));
///
/// assert_eq!(output, json!({"name": "Button", "props": [{"label": "Go"}]}));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Sanitizer {
    preserve_project_id: bool,
}

impl Sanitizer {
    /// Create a sanitizer; `preserve_project_id` keeps `projectId` keys
    pub fn new(preserve_project_id: bool) -> Self {
        Self {
            preserve_project_id,
        }
    }

    /// Strip identity fields at every level of `value`
    ///
    /// Scalars pass through unchanged.
    pub fn sanitize(&self, value: Value) -> Value {
        match value {
            Value::Array(items) => Value::Array(items.into_iter().map(|v| self.sanitize(v)).collect()),
            Value::Object(map) => Value::Object(
                map.into_iter()
                    .filter(|(key, _)| !self.is_stripped(key))
                    .map(|(key, v)| (key, self.sanitize(v)))
                    .collect(),
            ),
            other => other,
        }
    }

    fn is_stripped(&self, key: &str) -> bool {
        IDENTITY_FIELDS.contains(&key) || (!self.preserve_project_id && key == PROJECT_ID_FIELD)
    }
}

impl Transformer for Sanitizer {
    type Input = Value;
    type Output = Value;

    fn transform(&self, input: Self::Input) -> Result<Self::Output> {
        Ok(self.sanitize(input))
    }
}
