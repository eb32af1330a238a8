//! Project categories and their folder/field mappings
//!
//! Each backend category maps to a folder in the project tree and to a key
//! in the push payload. Most keys match the fetch response; `filteredAppAsset`
//! is pushed back as `appAssets`.

use serde_json::Value;
use std::fmt;
use std::path::PathBuf;

/// Top-level folders owned by the export; all of them are deleted before a pull
pub const TREE_FOLDERS: [&str; 7] = [
    "datasources",
    "components",
    "design",
    "functions",
    "pages",
    "project",
    "widgets",
];

/// A top-level grouping of project data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Datasources,
    Environments,
    Components,
    Functions,
    Pages,
    Project,
    Typography,
    ThemeData,
    AppSettings,
    AppState,
    AppAssets,
    Widgets,
}

impl Category {
    /// Categories in the order they are exported
    pub const EXPORT_ORDER: [Category; 12] = [
        Category::Datasources,
        Category::Environments,
        Category::Components,
        Category::Functions,
        Category::Pages,
        Category::Project,
        Category::Typography,
        Category::ThemeData,
        Category::AppSettings,
        Category::AppState,
        Category::AppAssets,
        Category::Widgets,
    ];

    /// Categories in the order they are collected on import (pages last)
    pub const IMPORT_ORDER: [Category; 12] = [
        Category::Project,
        Category::Datasources,
        Category::Environments,
        Category::Components,
        Category::Typography,
        Category::ThemeData,
        Category::AppSettings,
        Category::AppState,
        Category::AppAssets,
        Category::Widgets,
        Category::Functions,
        Category::Pages,
    ];

    /// Key of this category in the backend fetch response
    pub fn response_key(self) -> &'static str {
        match self {
            Category::AppAssets => "filteredAppAsset",
            other => other.import_key(),
        }
    }

    /// Key of this category in the push payload
    pub fn import_key(self) -> &'static str {
        match self {
            Category::Datasources => "datasources",
            Category::Environments => "environments",
            Category::Components => "components",
            Category::Functions => "functions",
            Category::Pages => "pages",
            Category::Project => "project",
            Category::Typography => "typography",
            Category::ThemeData => "themeData",
            Category::AppSettings => "appSettings",
            Category::AppState => "appState",
            Category::AppAssets => "appAssets",
            Category::Widgets => "widgets",
        }
    }

    /// Top-level folder of the tree this category lives under
    pub fn parent_folder(self) -> &'static str {
        match self {
            Category::Datasources | Category::Environments => "datasources",
            Category::Components => "components",
            Category::Functions => "functions",
            Category::Pages => "pages",
            Category::Project => "project",
            Category::Typography
            | Category::ThemeData
            | Category::AppSettings
            | Category::AppState
            | Category::AppAssets => "design",
            Category::Widgets => "widgets",
        }
    }

    /// Sub folder under the parent, if the category has one
    pub fn sub_folder(self) -> Option<&'static str> {
        match self {
            Category::Datasources => Some("rest"),
            Category::Environments => Some("environment"),
            Category::Typography => Some("font-tokens"),
            Category::ThemeData => Some("color-tokens"),
            Category::AppSettings => Some("app-settings"),
            Category::AppState => Some("app-state"),
            Category::AppAssets => Some("app-assets"),
            _ => None,
        }
    }

    /// Folder name used for routing defaults and naming overrides
    pub fn folder_name(self) -> &'static str {
        self.sub_folder().unwrap_or_else(|| self.parent_folder())
    }

    /// Path of this category's folder relative to the tree root
    pub fn relative_dir(self) -> PathBuf {
        let parent = PathBuf::from(self.parent_folder());
        match self.sub_folder() {
            Some(sub) => parent.join(sub),
            None => parent,
        }
    }

    /// Only the `project` category keeps its `projectId` and null values
    pub fn preserves_project_id(self) -> bool {
        self == Category::Project
    }

    /// Optional categories are skipped silently when the backend omits them
    pub fn is_optional(self) -> bool {
        matches!(self, Category::AppState | Category::AppAssets)
    }

    /// Look up this category's data in a fetched project document
    ///
    /// Missing keys and explicit `null` are both treated as absent.
    pub fn select(self, document: &Value) -> Option<&Value> {
        document.get(self.response_key()).filter(|v| !v.is_null())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.import_key())
    }
}

/// Data fetched for one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBatch {
    pub category: Category,
    pub data: Value,
}

impl CategoryBatch {
    pub fn new(category: Category, data: Value) -> Self {
        Self { category, data }
    }

    /// Split a fetched project document into one batch per present category
    ///
    /// Absent optional categories are skipped quietly; absent required
    /// categories are skipped with a warning.
    pub fn from_document(document: &Value) -> Vec<CategoryBatch> {
        Category::EXPORT_ORDER
            .iter()
            .filter_map(|&category| match category.select(document) {
                Some(data) => Some(CategoryBatch::new(category, data.clone())),
                None if category.is_optional() => {
                    log::debug!("Optional category '{}' not present, skipping", category);
                    None
                }
                None => {
                    log::warn!("Category '{}' missing from project document", category);
                    None
                }
            })
            .collect()
    }
}
