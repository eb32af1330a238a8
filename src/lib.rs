//! Digia Sync
//!
//! A bidirectional codec between a Digia project document and a tree of
//! YAML files suitable for version control.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod etl;
pub mod layout;
pub mod project;
pub mod storage;
pub mod transform;

// Re-exports for convenience
pub use client::BackendClient;
pub use config::{BackendConfig, TreeOptions};
pub use error::SyncError;
pub use etl::{Extractor, Loader, Pipeline, Transformer};
pub use layout::{CollisionPolicy, NodeKey, TreePlanner};
pub use project::{Category, CategoryBatch, ProjectExtractor, ProjectLoader, PushRequest};
pub use storage::{ImportAggregator, ProjectSnapshot, TreeWriter};
