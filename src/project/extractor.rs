//! Project fetch
//!
//! Pulls a project's full data set from the backend via
//! POST /api/v1/project/syncProjectDataForGithub

use super::category::CategoryBatch;
use crate::client::BackendClient;
use crate::error::SyncError;
use crate::etl::Extractor;
use eyre::{Context, Result};
use serde_json::{Value, json};
use std::collections::HashMap;

pub(crate) const FETCH_PATH: &str = "api/v1/project/syncProjectDataForGithub";

/// Header naming the project on fetch and push requests
pub(crate) const PROJECT_HEADER: &str = "projectid";

/// Extractor for a project's categories
///
/// # Example
/// ```no_run
/// use digia_sync::client::BackendClient;
/// use digia_sync::config::BackendConfig;
/// use digia_sync::etl::Extractor;
/// use digia_sync::project::ProjectExtractor;
/// use url::Url;
///
/// # async fn example() -> eyre::Result<()> {
/// let config = BackendConfig::new(Url::parse("https://api.example.com")?, "token");
/// let client = BackendClient::try_new(&config)?;
/// let extractor = ProjectExtractor::new(client, "p1").with_branch(Some("main-branch-id"));
///
/// for batch in extractor.extract().await? {
///     println!("{}: {}", batch.category, batch.data);
/// }
/// # Ok(())
/// # }
/// ```
pub struct ProjectExtractor {
    client: BackendClient,
    project_id: String,
    branch_id: Option<String>,
}

impl ProjectExtractor {
    pub fn new(client: BackendClient, project_id: impl Into<String>) -> Self {
        Self {
            client,
            project_id: project_id.into(),
            branch_id: None,
        }
    }

    /// Fetch a specific branch instead of the backend's default
    pub fn with_branch(mut self, branch_id: Option<impl Into<String>>) -> Self {
        self.branch_id = branch_id.map(Into::into);
        self
    }

    /// Fetch the raw project document (`data.response`)
    pub async fn fetch_document(&self) -> Result<Value> {
        let mut headers = HashMap::new();
        headers.insert(PROJECT_HEADER.to_string(), self.project_id.clone());

        let body = match &self.branch_id {
            Some(branch_id) => json!({ "branchId": branch_id }),
            None => json!({}),
        };

        log::debug!(
            "Fetching project '{}' (branch: {})",
            self.project_id,
            self.branch_id.as_deref().unwrap_or("default")
        );

        let response = self
            .client
            .post_json_value(FETCH_PATH, &headers, &body)
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::Transport(format!(
                "Failed to fetch project ({}): {}",
                status, body
            ))
            .into());
        }

        let envelope: Value = response
            .json()
            .await
            .map_err(|e| SyncError::Transport(format!("Invalid JSON in response: {}", e)))?;

        response_document(envelope)
    }
}

/// Unwrap `data.response` from a backend envelope
///
/// The response must be an object; anything else is a transport error.
pub fn response_document(mut envelope: Value) -> Result<Value> {
    match envelope.pointer_mut("/data/response").map(Value::take) {
        Some(document @ Value::Object(_)) => Ok(document),
        _ => Err(SyncError::Transport(
            "Unexpected response format: missing data.response".to_string(),
        )
        .into()),
    }
}

impl Extractor for ProjectExtractor {
    type Item = CategoryBatch;

    async fn extract(&self) -> Result<Vec<Self::Item>> {
        let document = self
            .fetch_document()
            .await
            .with_context(|| format!("Failed to fetch project '{}'", self.project_id))?;

        let batches = CategoryBatch::from_document(&document);
        log::info!("Fetched {} categories from backend", batches.len());
        Ok(batches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendConfig;
    use url::Url;

    fn client() -> BackendClient {
        let config = BackendConfig::new(Url::parse("http://localhost:3000").unwrap(), "t");
        BackendClient::try_new(&config).unwrap()
    }

    #[test]
    fn test_extractor_creation() {
        let extractor = ProjectExtractor::new(client(), "p1");
        assert_eq!(extractor.project_id, "p1");
        assert_eq!(extractor.branch_id, None);

        let extractor = extractor.with_branch(Some("b1"));
        assert_eq!(extractor.branch_id.as_deref(), Some("b1"));
    }

    #[test]
    fn test_response_document_unwraps_envelope() {
        let envelope = json!({"data": {"response": {"components": []}}});
        assert_eq!(response_document(envelope).unwrap(), json!({"components": []}));
    }

    #[test]
    fn test_response_document_rejects_bad_shapes() {
        for envelope in [
            json!({}),
            json!({"data": null}),
            json!({"data": {"response": null}}),
            json!({"data": {"response": [1, 2]}}),
        ] {
            let err = response_document(envelope).unwrap_err();
            assert!(matches!(
                err.downcast_ref::<SyncError>(),
                Some(SyncError::Transport(_))
            ));
        }
    }
}
