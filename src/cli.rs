//! CLI helper functions

use crate::{
    client::BackendClient,
    config::{BackendConfig, TreeOptions},
    error::SyncError,
    etl::{Pipeline, Transformer},
    layout::TreePlanner,
    project::{ProjectExtractor, ProjectLoader, PushRequestBuilder, response_document},
    storage::{ImportAggregator, TreeWriter},
};
use eyre::{Context, Result};
use owo_colors::OwoColorize;
use serde_json::Value;
use std::path::Path;
use url::Url;

/// Load backend settings from environment variables
///
/// Expected environment variables:
/// - BASE_URL: Backend base URL (required)
/// - DIGIA_TOKEN: Access token sent with every request (required)
pub fn load_backend_config() -> Result<BackendConfig> {
    let url_str = std::env::var("BASE_URL").map_err(|_| {
        SyncError::Configuration("BASE_URL environment variable not set".to_string())
    })?;
    let url = Url::parse(&url_str)
        .map_err(|e| SyncError::Configuration(format!("Invalid BASE_URL '{}': {}", url_str, e)))?;

    let token = std::env::var("DIGIA_TOKEN")
        .ok()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            SyncError::Configuration("DIGIA_TOKEN environment variable not set".to_string())
        })?;

    Ok(BackendConfig::new(url, token))
}

/// Build a backend client from environment variables
pub fn load_backend_client() -> Result<BackendClient> {
    let config = load_backend_config()?;
    BackendClient::try_new(&config).context("Failed to create backend client")
}

/// Pull a project from the backend into the tree
///
/// Pipeline: ProjectExtractor → TreePlanner → TreeWriter
///
/// The tree is only cleared once the fetch has succeeded.
pub async fn pull_project(
    options: &TreeOptions,
    project_id: &str,
    branch_id: Option<String>,
) -> Result<usize> {
    log::info!("Connecting to {}...", "backend".cyan());
    let client = load_backend_client()?;
    log::info!("Using backend: {}", client.url().as_str().bright_black());

    let extractor = ProjectExtractor::new(client, project_id).with_branch(branch_id);
    let writer = TreeWriter::new(options);

    let count = Pipeline::new(extractor, TreePlanner, writer).run().await?;

    log::info!(
        "✓ Pulled {} file(s) to {}",
        count,
        options.root.display().bright_black()
    );
    Ok(count)
}

/// Export a saved backend response without network access
///
/// Accepts either the full `{data: {response: ...}}` envelope or the bare
/// response object.
pub fn unpack_document(options: &TreeOptions, document: impl AsRef<Path>) -> Result<usize> {
    let document = document.as_ref();
    log::info!("Reading project document {}", document.display().bright_black());

    let content = std::fs::read_to_string(document).map_err(|e| SyncError::io(document, e))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON from {}", document.display()))?;

    let project = if value.pointer("/data/response").is_some() {
        response_document(value)?
    } else if value.is_object() {
        value
    } else {
        eyre::bail!("Expected a JSON object in {}", document.display());
    };

    let count = TreeWriter::new(options).export_document(&project)?;

    log::info!(
        "✓ Unpacked {} file(s) to {}",
        count,
        options.root.display().bright_black()
    );
    Ok(count)
}

/// Push the tree to the backend
///
/// Pipeline: ImportAggregator → PushRequestBuilder → ProjectLoader
pub async fn push_project(project_dir: impl AsRef<Path>, branch_name: &str) -> Result<usize> {
    let project_dir = project_dir.as_ref();

    log::info!("Connecting to {}...", "backend".cyan());
    let client = load_backend_client()?;

    let extractor = ImportAggregator::new(project_dir);
    let builder = PushRequestBuilder::new(branch_name);
    let loader = ProjectLoader::new(client);

    let count = Pipeline::new(extractor, builder, loader).run().await?;

    log::info!(
        "✓ Pushed {} to branch {}",
        project_dir.display().bright_black(),
        branch_name.cyan()
    );
    Ok(count)
}

/// Write the push payload to a file instead of sending it
///
/// Returns the number of records bundled.
pub fn bundle_project(
    project_dir: impl AsRef<Path>,
    output_file: impl AsRef<Path>,
    branch_name: &str,
) -> Result<usize> {
    let project_dir = project_dir.as_ref();
    let output_file = output_file.as_ref();

    log::info!("Loading project tree from {}", project_dir.display());
    let snapshot = ImportAggregator::new(project_dir).collect_all()?;
    let request = PushRequestBuilder::new(branch_name).transform(snapshot)?;

    let count = request
        .data
        .values()
        .filter_map(Value::as_array)
        .map(Vec::len)
        .sum::<usize>();

    let json = serde_json::to_string_pretty(&request)?;
    std::fs::write(output_file, json).map_err(|e| SyncError::io(output_file, e))?;

    log::info!(
        "✓ Bundled {} record(s) to {}",
        count,
        output_file.display().bright_black()
    );
    Ok(count)
}
