//! YAML file reading and writing
//!
//! Every file in the project tree is a single YAML document with keys in
//! alphabetical order.

use crate::error::SyncError;
use eyre::{Context, Result};
use serde_json::{Map, Value};
use std::path::Path;

/// Serialize `value` as YAML with sorted keys and write it to `path`
pub fn write_yaml_file(path: impl AsRef<Path>, value: &Value) -> Result<()> {
    let path = path.as_ref();
    let yaml = to_sorted_yaml(value)
        .with_context(|| format!("Failed to serialize YAML for {}", path.display()))?;
    std::fs::write(path, yaml).map_err(|e| SyncError::io(path, e))?;
    Ok(())
}

/// Read and parse a YAML file
///
/// # Errors
/// [`SyncError::Parse`] when the content is not valid YAML, [`SyncError::Io`]
/// when the file cannot be read.
pub fn read_yaml_file(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| SyncError::io(path, e))?;
    let value = serde_yaml::from_str(&content).map_err(|source| SyncError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(value)
}

/// Serialize a value to a YAML string with sorted keys
pub fn to_sorted_yaml(value: &Value) -> Result<String> {
    Ok(serde_yaml::to_string(&sort_keys(value.clone()))?)
}

/// Rebuild every mapping with its keys in alphabetical order
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, sort_keys(v)))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// Check whether a path has the `.yaml` extension
pub fn is_yaml_file(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("yaml")
}
