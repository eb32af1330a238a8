//! Project tree writer
//!
//! Materializes planned [`CategoryTree`]s under the tree root. Every export
//! is a full rewrite: the category folders are deleted before anything is
//! written.

use super::yaml::write_yaml_file;
use crate::config::TreeOptions;
use crate::error::SyncError;
use crate::etl::{Loader, Transformer};
use crate::layout::{
    CategoryTree, CollisionPolicy, NODES_DIR, NameRegistry, PageBundle, TreeEntry, TreeFile,
    TreePlanner,
};
use crate::project::{CategoryBatch, TREE_FOLDERS};
use eyre::Result;
use owo_colors::OwoColorize;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Writes project trees to disk
///
/// # Example
/// ```no_run
/// use digia_sync::config::TreeOptions;
/// use digia_sync::storage::TreeWriter;
/// use serde_json::json;
///
/// # fn example() -> eyre::Result<()> {
/// let writer = TreeWriter::new(&TreeOptions::new("./my-project"));
/// let files = writer.export_document(&json!({
///     "components": [{"name": "Button"}],
///     "project": {"projectId": "p1"}
/// }))?;
/// assert_eq!(files, 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TreeWriter {
    root: PathBuf,
    policy: CollisionPolicy,
}

impl TreeWriter {
    pub fn new(options: &TreeOptions) -> Self {
        Self {
            root: options.root.clone(),
            policy: options.collision_policy,
        }
    }

    /// Delete every top-level category folder under the root
    pub fn clear(&self) -> Result<()> {
        for folder in TREE_FOLDERS {
            let path = self.root.join(folder);
            if path.exists() {
                std::fs::remove_dir_all(&path).map_err(|e| SyncError::io(&path, e))?;
                log::debug!("Deleted folder: {}", path.display().bright_black());
            }
        }
        Ok(())
    }

    /// Export a whole fetched project document
    ///
    /// Returns the number of files written.
    pub fn export_document(&self, document: &Value) -> Result<usize> {
        let batches = CategoryBatch::from_document(document);
        let trees = TreePlanner.transform_many(batches)?;
        self.write_all(&trees)
    }

    /// Clear the tree, then write every planned category
    ///
    /// Returns the number of files written. Any failure aborts the export;
    /// a partially rewritten tree is left behind.
    pub fn write_all(&self, trees: &[CategoryTree]) -> Result<usize> {
        self.clear()?;

        let mut registry = NameRegistry::new(self.policy);
        let mut count = 0;

        for tree in trees {
            self.create_dir(&tree.dir)?;
            for entry in &tree.entries {
                count += match entry {
                    TreeEntry::File(file) => self.write_file(file, &mut registry)?,
                    TreeEntry::Page(bundle) => self.write_page(bundle, &mut registry)?,
                };
            }
            log::info!(
                "Wrote {} file(s) for {}",
                tree.file_count().cyan(),
                tree.category.to_string().bright_black()
            );
        }

        Ok(count)
    }

    fn write_file(&self, file: &TreeFile, registry: &mut NameRegistry) -> Result<usize> {
        let stem = registry.claim(&file.dir, &file.stem)?;
        self.create_dir(&file.dir)?;

        let path = self.root.join(&file.dir).join(format!("{stem}.yaml"));
        write_yaml_file(&path, &file.content)?;
        log::debug!("Created: {}", path.display().bright_black());
        Ok(1)
    }

    fn write_page(&self, bundle: &PageBundle, registry: &mut NameRegistry) -> Result<usize> {
        let pages_dir = PathBuf::from("pages");
        let stem = registry.claim(&pages_dir, &bundle.stem)?;
        let page_dir = pages_dir.join(&stem);
        let nodes_dir = page_dir.join(NODES_DIR);
        self.create_dir(&nodes_dir)?;

        for (key, node) in &bundle.nodes {
            let path = self.root.join(&nodes_dir).join(key.file_name()?);
            write_yaml_file(&path, node)?;
        }

        let path = self.root.join(&page_dir).join(format!("{stem}.yaml"));
        write_yaml_file(&path, &bundle.page)?;
        log::debug!(
            "Created folder and files for page: {} ({} node(s))",
            stem.cyan(),
            bundle.nodes.len()
        );

        Ok(1 + bundle.nodes.len())
    }

    fn create_dir(&self, relative: &Path) -> Result<()> {
        let path = self.root.join(relative);
        std::fs::create_dir_all(&path).map_err(|e| SyncError::io(&path, e))?;
        Ok(())
    }
}

impl Loader for TreeWriter {
    type Item = CategoryTree;

    async fn load(&self, items: Vec<Self::Item>) -> Result<usize> {
        self.write_all(&items)
    }
}
