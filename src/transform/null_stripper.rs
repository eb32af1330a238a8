//! Null value stripper

use crate::etl::Transformer;
use eyre::Result;
use serde_json::Value;

/// Transformer that recursively drops keys whose value is `null`
///
/// Sequence elements are recursed into but never removed, so a `null`
/// inside an array survives.
///
/// # Example
/// ```
/// use digia_sync::transform::NullStripper;
/// use serde_json::json;
///
/// let output = NullStripper.strip(json!({"a": null, "b": {"c": null, "d": 1}}));
/// assert_eq!(output, json!({"b": {"d": 1}}));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStripper;

impl NullStripper {
    pub fn strip(&self, value: Value) -> Value {
        match value {
            Value::Array(items) => Value::Array(items.into_iter().map(|v| self.strip(v)).collect()),
            Value::Object(map) => Value::Object(
                map.into_iter()
                    .filter(|(_, v)| !v.is_null())
                    .map(|(key, v)| (key, self.strip(v)))
                    .collect(),
            ),
            other => other,
        }
    }
}

impl Transformer for NullStripper {
    type Input = Value;
    type Output = Value;

    fn transform(&self, input: Self::Input) -> Result<Self::Output> {
        Ok(self.strip(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_nested_nulls() {
        let input = json!({
            "name": "Card",
            "description": null,
            "props": {"color": null, "size": 2},
            "items": [{"a": null, "b": "x"}, null, {"c": false}]
        });

        let output = NullStripper.strip(input);

        assert_eq!(
            output,
            json!({
                "name": "Card",
                "props": {"size": 2},
                "items": [{"b": "x"}, null, {"c": false}]
            })
        );
    }

    #[test]
    fn test_keeps_falsy_values() {
        let input = json!({"zero": 0, "empty": "", "no": false, "list": []});
        assert_eq!(NullStripper.strip(input.clone()), input);
    }

    #[test]
    fn test_top_level_null_unchanged() {
        assert_eq!(NullStripper.transform(Value::Null).unwrap(), Value::Null);
    }
}
