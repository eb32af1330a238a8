//! Import aggregation
//!
//! Walks a project tree and rebuilds the JSON document the backend expects.

use super::collector::collect_folder;
use super::pages::reassemble_pages;
use crate::etl::Extractor;
use crate::project::Category;
use crate::transform::PROJECT_ID_FIELD;
use eyre::Result;
use owo_colors::OwoColorize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// A project tree read back from disk
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSnapshot {
    /// Collected records keyed by push-payload category name
    pub data: Map<String, Value>,
    /// `projectId` found in the `project` folder, if any
    pub project_id: Option<String>,
}

impl ProjectSnapshot {
    /// Records collected for `category` (empty when none)
    pub fn records(&self, category: Category) -> &[Value] {
        self.data
            .get(category.import_key())
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Reads a whole project tree
///
/// # Example
/// ```no_run
/// use digia_sync::storage::ImportAggregator;
///
/// # fn example() -> eyre::Result<()> {
/// let snapshot = ImportAggregator::new("./my-project").collect_all()?;
/// println!("project: {:?}", snapshot.project_id);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ImportAggregator {
    root: PathBuf,
}

impl ImportAggregator {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Collect every category folder and reassemble all pages
    pub fn collect_all(&self) -> Result<ProjectSnapshot> {
        let mut data = Map::new();
        let mut project_id = None;

        for category in Category::IMPORT_ORDER {
            let folder = self.root.join(category.relative_dir());
            let records = match category {
                Category::Pages => reassemble_pages(&folder)?,
                _ => collect_folder(&folder)?,
            };

            if category == Category::Project {
                for record in &records {
                    if let Some(id) = extract_project_id(record) {
                        project_id = Some(id);
                    }
                }
            }

            log::info!(
                "Collected {} record(s) for {}",
                records.len().cyan(),
                category.to_string().bright_black()
            );
            data.insert(category.import_key().to_string(), Value::Array(records));
        }

        if project_id.is_none() {
            log::warn!("No projectId found under {}", self.root.join("project").display());
        }

        Ok(ProjectSnapshot { data, project_id })
    }
}

fn extract_project_id(record: &Value) -> Option<String> {
    match record.get(PROJECT_ID_FIELD)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl Extractor for ImportAggregator {
    type Item = ProjectSnapshot;

    async fn extract(&self) -> Result<Vec<Self::Item>> {
        Ok(vec![self.collect_all()?])
    }
}
