//! Export planning
//!
//! Turns a fetched [`CategoryBatch`] into a [`CategoryTree`]: the sanitized
//! records, the folder each one goes to and the name it is written under.
//! Planning is pure; [`TreeWriter`](crate::storage::TreeWriter) does the I/O.

use super::naming::{DEFAULT_NAME, resolve_name};
use super::nodes::{NodeKey, page_folder_name, split_nodes};
use super::router::route;
use crate::etl::Transformer;
use crate::project::{Category, CategoryBatch};
use crate::transform::{NullStripper, Sanitizer};
use eyre::{Context, Result};
use serde_json::Value;
use std::path::PathBuf;

/// A single YAML file to write
#[derive(Debug, Clone, PartialEq)]
pub struct TreeFile {
    /// Folder relative to the tree root
    pub dir: PathBuf,
    /// File name without the `.yaml` extension
    pub stem: String,
    pub content: Value,
}

/// A page folder: the main page file plus one file per node
#[derive(Debug, Clone, PartialEq)]
pub struct PageBundle {
    /// Page folder name, also the main file's stem
    pub stem: String,
    /// Page content without `layout.nodes`
    pub page: Value,
    pub nodes: Vec<(NodeKey, Value)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TreeEntry {
    File(TreeFile),
    Page(PageBundle),
}

/// Everything one category contributes to the tree
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTree {
    pub category: Category,
    /// The category's default folder, created even when `entries` is empty
    pub dir: PathBuf,
    pub entries: Vec<TreeEntry>,
}

impl CategoryTree {
    /// Number of YAML files this tree will produce
    pub fn file_count(&self) -> usize {
        self.entries
            .iter()
            .map(|entry| match entry {
                TreeEntry::File(_) => 1,
                TreeEntry::Page(bundle) => 1 + bundle.nodes.len(),
            })
            .sum()
    }
}

/// Transformer from fetched category data to a write plan
///
/// # Example
/// ```
/// use digia_sync::etl::Transformer;
/// use digia_sync::layout::{TreeEntry, TreePlanner};
/// use digia_sync::project::{Category, CategoryBatch};
/// use serde_json::json;
///
/// let batch = CategoryBatch::new(
///     Category::Components,
///     json!([{"id": "c1", "name": "Button", "props": null}]),
/// );
/// let tree = TreePlanner.transform(batch).unwrap();
///
/// match &tree.entries[0] {
///     TreeEntry::File(file) => {
///         assert_eq!(file.stem, "Button");
///         assert_eq!(file.content, json!({"name": "Button"}));
///     }
///     TreeEntry::Page(_) => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TreePlanner;

impl TreePlanner {
    pub fn plan(&self, batch: CategoryBatch) -> Result<CategoryTree> {
        let CategoryBatch { category, data } = batch;
        let cleaner = Cleaner::for_category(category);

        let entries = match (category, data) {
            (Category::Pages, Value::Array(pages)) => pages
                .into_iter()
                .map(|page| plan_page(page, &cleaner))
                .collect::<Result<Vec<_>>>()?,
            (Category::Pages, page) => vec![plan_page(page, &cleaner)?],
            (_, Value::Array(items)) => items
                .into_iter()
                .map(|item| {
                    let content = cleaner.clean(item);
                    TreeEntry::File(TreeFile {
                        dir: category.relative_dir(),
                        stem: resolve_name(&content, category.folder_name(), DEFAULT_NAME),
                        content,
                    })
                })
                .collect(),
            (_, singleton) => {
                let destination = route(category.parent_folder(), &singleton, category.folder_name());
                let dir = match category.sub_folder() {
                    Some(_) => PathBuf::from(category.parent_folder()).join(destination),
                    None => PathBuf::from(category.parent_folder()),
                };
                vec![TreeEntry::File(TreeFile {
                    dir,
                    stem: destination.to_string(),
                    content: cleaner.clean(singleton),
                })]
            }
        };

        log::debug!("Planned {} entries for '{}'", entries.len(), category);

        Ok(CategoryTree {
            category,
            dir: category.relative_dir(),
            entries,
        })
    }
}

impl Transformer for TreePlanner {
    type Input = CategoryBatch;
    type Output = CategoryTree;

    fn transform(&self, input: Self::Input) -> Result<Self::Output> {
        let category = input.category;
        self.plan(input)
            .with_context(|| format!("Failed to plan category '{}'", category))
    }
}

fn plan_page(page: Value, cleaner: &Cleaner) -> Result<TreeEntry> {
    let stem = page_folder_name(&page).unwrap_or_else(|| {
        log::warn!("Page has no displayName, slug or id, using '{}'", DEFAULT_NAME);
        DEFAULT_NAME.to_string()
    });

    let (page, nodes) =
        split_nodes(page).with_context(|| format!("Failed to split nodes of page '{}'", stem))?;

    Ok(TreeEntry::Page(PageBundle {
        stem,
        page: cleaner.clean(page),
        nodes: nodes
            .into_iter()
            .map(|(key, node)| (key, cleaner.clean(node)))
            .collect(),
    }))
}

/// Per-category sanitization: identity fields always, nulls outside `project`
struct Cleaner {
    sanitizer: Sanitizer,
    strip_nulls: bool,
}

impl Cleaner {
    fn for_category(category: Category) -> Self {
        Self {
            sanitizer: Sanitizer::new(category.preserves_project_id()),
            strip_nulls: !category.preserves_project_id(),
        }
    }

    fn clean(&self, value: Value) -> Value {
        let value = self.sanitizer.sanitize(value);
        match self.strip_nulls {
            true => NullStripper.strip(value),
            false => value,
        }
    }
}
