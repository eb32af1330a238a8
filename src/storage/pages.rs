//! Page reassembly
//!
//! Rebuilds each page's `layout.nodes` map from its per-node files.

use super::collector::sorted_entries;
use super::yaml::{is_yaml_file, read_yaml_file};
use crate::layout::{NODES_DIR, NodeKey};
use eyre::{Context, Result};
use owo_colors::OwoColorize;
use serde_json::{Map, Value};
use std::path::Path;

/// Rebuild every page stored under `pages_dir`
///
/// Each immediate subfolder is one page: `<page>/<page>.yaml` is the base
/// record and `<page>/nodes/*.yaml` are its nodes, keyed by the id decoded
/// from each file name. A missing pages folder yields no pages.
pub fn reassemble_pages(pages_dir: impl AsRef<Path>) -> Result<Vec<Value>> {
    let pages_dir = pages_dir.as_ref();
    if !pages_dir.is_dir() {
        log::warn!("Folder not found: {}", pages_dir.display().bright_black());
        return Ok(Vec::new());
    }

    let mut pages = Vec::new();
    for path in sorted_entries(pages_dir)? {
        if path.is_dir() {
            pages.push(reassemble_page(&path)?);
        }
    }

    log::debug!("Reassembled {} page(s)", pages.len());
    Ok(pages)
}

/// Rebuild a single page folder
pub fn reassemble_page(page_dir: &Path) -> Result<Value> {
    let folder = page_dir
        .file_name()
        .and_then(|s| s.to_str())
        .ok_or_else(|| eyre::eyre!("Invalid page folder name: {}", page_dir.display()))?;

    let main_file = page_dir.join(format!("{folder}.yaml"));
    let mut page = if main_file.is_file() {
        match read_yaml_file(&main_file)? {
            Value::Object(map) => map,
            _ => eyre::bail!("Page file is not a mapping: {}", main_file.display()),
        }
    } else {
        log::warn!("Page {} has no main file", folder.cyan());
        Map::new()
    };

    let nodes_dir = page_dir.join(NODES_DIR);
    if nodes_dir.is_dir() {
        let nodes = read_nodes(&nodes_dir)?;
        let layout = page
            .entry("layout")
            .or_insert_with(|| Value::Object(Map::new()));
        match layout {
            Value::Object(layout) => {
                layout.insert("nodes".to_string(), Value::Object(nodes));
            }
            _ => eyre::bail!("Page layout is not a mapping: {}", main_file.display()),
        }
    }

    Ok(Value::Object(page))
}

fn read_nodes(nodes_dir: &Path) -> Result<Map<String, Value>> {
    let mut nodes = Map::new();
    for path in sorted_entries(nodes_dir)? {
        if !path.is_file() || !is_yaml_file(&path) {
            continue;
        }

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| eyre::eyre!("Invalid node file name: {}", path.display()))?;
        let key = NodeKey::decode(stem)
            .with_context(|| format!("Failed to decode node file {}", path.display()))?;

        let node = read_yaml_file(&path)?;
        if nodes.insert(key.node_id.clone(), node).is_some() {
            log::warn!("Duplicate node id {} in {}", key.node_id.cyan(), nodes_dir.display());
        }
    }
    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyncError;
    use serde_json::json;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_reassemble_page_with_nodes() {
        let temp = TempDir::new().unwrap();
        let pages = temp.path().join("pages");
        write(&pages.join("Home/Home.yaml"), "displayName: Home\nlayout:\n  root: n1\n");
        write(&pages.join("Home/nodes/btn_n1.yaml"), "varName: btn\nlabel: Go\n");
        write(&pages.join("Home/nodes/txt_n2.yaml"), "varName: txt\n");

        let result = reassemble_pages(&pages).unwrap();

        assert_eq!(
            result,
            vec![json!({
                "displayName": "Home",
                "layout": {
                    "root": "n1",
                    "nodes": {
                        "n1": {"varName": "btn", "label": "Go"},
                        "n2": {"varName": "txt"}
                    }
                }
            })]
        );
    }

    #[test]
    fn test_nodes_folder_creates_layout() {
        let temp = TempDir::new().unwrap();
        let pages = temp.path().join("pages");
        write(&pages.join("About/About.yaml"), "slug: about\n");
        std::fs::create_dir_all(pages.join("About/nodes")).unwrap();

        let result = reassemble_pages(&pages).unwrap();
        assert_eq!(result, vec![json!({"slug": "about", "layout": {"nodes": {}}})]);
    }

    #[test]
    fn test_page_without_nodes_folder_untouched() {
        let temp = TempDir::new().unwrap();
        let pages = temp.path().join("pages");
        write(&pages.join("Plain/Plain.yaml"), "displayName: Plain\n");
        write(&pages.join("stray.yaml"), "ignored: true\n");

        let result = reassemble_pages(&pages).unwrap();
        assert_eq!(result, vec![json!({"displayName": "Plain"})]);
    }

    #[test]
    fn test_node_file_without_separator_fails() {
        let temp = TempDir::new().unwrap();
        let pages = temp.path().join("pages");
        write(&pages.join("Home/Home.yaml"), "displayName: Home\n");
        write(&pages.join("Home/nodes/button.yaml"), "varName: button\n");

        let err = reassemble_pages(&pages).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SyncError>(),
            Some(SyncError::NodeKey { .. })
        ));
    }

    #[test]
    fn test_missing_pages_folder() {
        let temp = TempDir::new().unwrap();
        assert!(reassemble_pages(temp.path().join("pages")).unwrap().is_empty());
    }
}
