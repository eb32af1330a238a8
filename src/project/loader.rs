//! Project push
//!
//! Sends a collected project to the backend via
//! POST /api/v1/project/updateProjectDataForGithub

use super::extractor::PROJECT_HEADER;
use super::request::PushRequest;
use crate::client::BackendClient;
use crate::error::SyncError;
use crate::etl::Loader;
use eyre::{Context, Result};
use std::collections::HashMap;

pub(crate) const PUSH_PATH: &str = "api/v1/project/updateProjectDataForGithub";

/// Loader that pushes projects to the backend
///
/// # Example
/// ```no_run
/// use digia_sync::client::BackendClient;
/// use digia_sync::config::BackendConfig;
/// use digia_sync::etl::Loader;
/// use digia_sync::project::{ProjectLoader, PushRequest};
/// use serde_json::Map;
/// use url::Url;
///
/// # async fn example() -> eyre::Result<()> {
/// let config = BackendConfig::new(Url::parse("https://api.example.com")?, "token");
/// let loader = ProjectLoader::new(BackendClient::try_new(&config)?);
///
/// let request = PushRequest {
///     data: Map::new(),
///     project_id: "p1".to_string(),
///     branch_name: "main".to_string(),
/// };
/// loader.load(vec![request]).await?;
/// # Ok(())
/// # }
/// ```
pub struct ProjectLoader {
    client: BackendClient,
}

impl ProjectLoader {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    async fn push(&self, request: &PushRequest) -> Result<()> {
        let mut headers = HashMap::new();
        headers.insert(PROJECT_HEADER.to_string(), request.project_id.clone());

        let body = serde_json::to_value(request).context("Failed to serialize push payload")?;

        log::debug!(
            "Pushing project '{}' to branch '{}'",
            request.project_id,
            request.branch_name
        );

        let response = self
            .client
            .post_json_value(PUSH_PATH, &headers, &body)
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::Transport(format!(
                "Failed to update project ({}): {}",
                status, body
            ))
            .into());
        }

        Ok(())
    }
}

impl Loader for ProjectLoader {
    type Item = PushRequest;

    async fn load(&self, items: Vec<Self::Item>) -> Result<usize> {
        for request in &items {
            self.push(request)
                .await
                .with_context(|| format!("Failed to push project '{}'", request.project_id))?;
            log::info!("Pushed project '{}' ({})", request.project_id, request.branch_name);
        }
        Ok(items.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendConfig;
    use url::Url;

    #[tokio::test]
    async fn test_load_nothing_sends_nothing() {
        let config = BackendConfig::new(Url::parse("http://127.0.0.1:9").unwrap(), "t");
        let loader = ProjectLoader::new(BackendClient::try_new(&config).unwrap());
        assert_eq!(loader.load(vec![]).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let config = BackendConfig::new(Url::parse("http://127.0.0.1:9").unwrap(), "t");
        let loader = ProjectLoader::new(BackendClient::try_new(&config).unwrap());
        let request = PushRequest {
            data: serde_json::Map::new(),
            project_id: "p1".to_string(),
            branch_name: "main".to_string(),
        };

        let err = loader.load(vec![request]).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SyncError>(),
            Some(SyncError::Transport(_))
        ));
    }
}
