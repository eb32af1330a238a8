//! Page node splitting and node file identity
//!
//! A page's `layout.nodes` map is written as one file per node. The node id
//! is stripped from node content, so it travels in the file name instead:
//! `<varName>_<nodeId>.yaml`.

use super::naming::safe_segment;
use crate::error::SyncError;
use eyre::Result;
use serde_json::Value;
use std::fmt;

/// Separator between the human name and the node id in node file names
pub const NODE_SEPARATOR: char = '_';

/// Name of the per-page folder holding node files
pub const NODES_DIR: &str = "nodes";

/// Human name used when a node has no `varName`
const FALLBACK_VAR_NAME: &str = "node";

/// Composite identity of a node file: a readable name plus the stable map key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeKey {
    pub var_name: String,
    pub node_id: String,
}

impl NodeKey {
    pub fn new(var_name: impl Into<String>, node_id: impl Into<String>) -> Self {
        Self {
            var_name: var_name.into(),
            node_id: node_id.into(),
        }
    }

    /// Encode as a file stem, `<var_name>_<node_id>`
    ///
    /// # Errors
    /// Fails when the node id is empty or contains the separator or a path
    /// separator, since such a stem could not be decoded back.
    pub fn encode(&self) -> Result<String> {
        if self.node_id.is_empty() {
            return Err(self.invalid("node id is empty"));
        }
        if self.node_id.contains(NODE_SEPARATOR) {
            return Err(self.invalid("node id contains the '_' separator"));
        }
        if self.node_id.contains(['/', '\\']) {
            return Err(self.invalid("node id contains a path separator"));
        }
        Ok(format!(
            "{}{}{}",
            safe_segment(&self.var_name),
            NODE_SEPARATOR,
            self.node_id
        ))
    }

    /// Encode as a YAML file name
    pub fn file_name(&self) -> Result<String> {
        Ok(format!("{}.yaml", self.encode()?))
    }

    /// Decode a file stem; the node id is everything after the last `_`
    ///
    /// # Example
    /// ```
    /// use digia_sync::layout::NodeKey;
    ///
    /// let key = NodeKey::decode("submit_button_a1b2").unwrap();
    /// assert_eq!(key.var_name, "submit_button");
    /// assert_eq!(key.node_id, "a1b2");
    /// assert!(NodeKey::decode("nodash").is_err());
    /// ```
    pub fn decode(stem: &str) -> Result<Self> {
        match stem.rsplit_once(NODE_SEPARATOR) {
            Some((_, "")) => Err(SyncError::NodeKey {
                key: stem.to_string(),
                reason: "node id after the '_' separator is empty",
            }
            .into()),
            Some((var_name, node_id)) => Ok(Self::new(var_name, node_id)),
            None => Err(SyncError::NodeKey {
                key: stem.to_string(),
                reason: "missing the '_' separator",
            }
            .into()),
        }
    }

    fn invalid(&self, reason: &'static str) -> eyre::Report {
        SyncError::NodeKey {
            key: self.node_id.clone(),
            reason,
        }
        .into()
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.var_name, NODE_SEPARATOR, self.node_id)
    }
}

/// Folder name for a page: `displayName`, then `slug`, then raw `id`
///
/// Must be called before sanitization, which strips `id`.
pub fn page_folder_name(page: &Value) -> Option<String> {
    ["displayName", "slug", "id"].iter().find_map(|field| match page.get(field) {
        Some(Value::String(s)) if !s.is_empty() => Some(safe_segment(s)),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Remove `layout.nodes` from a page and return it alongside the node list
///
/// Pages without `layout` or `nodes` produce an empty list. A `nodes` value
/// that is not a mapping is left in place. Null node entries are dropped.
pub fn split_nodes(mut page: Value) -> Result<(Value, Vec<(NodeKey, Value)>)> {
    let Some(layout) = page.get_mut("layout").and_then(Value::as_object_mut) else {
        return Ok((page, Vec::new()));
    };

    let nodes = match layout.remove("nodes") {
        Some(Value::Object(nodes)) => nodes,
        Some(Value::Null) | None => return Ok((page, Vec::new())),
        Some(other) => {
            log::warn!("Page layout.nodes is not a mapping, keeping it inline");
            layout.insert("nodes".to_string(), other);
            return Ok((page, Vec::new()));
        }
    };

    let mut split = Vec::with_capacity(nodes.len());
    for (node_id, node) in nodes {
        if node.is_null() {
            log::debug!("Dropping null node '{}'", node_id);
            continue;
        }
        let var_name = match node.get("varName").and_then(Value::as_str) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => {
                log::warn!("Node '{}' has no varName, using '{}'", node_id, FALLBACK_VAR_NAME);
                FALLBACK_VAR_NAME.to_string()
            }
        };
        let key = NodeKey::new(var_name, node_id);
        key.encode()?;
        split.push((key, node));
    }

    Ok((page, split))
}
