//! Push payload construction

use crate::error::SyncError;
use crate::etl::Transformer;
use crate::storage::ProjectSnapshot;
use eyre::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of an update request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushRequest {
    pub data: Map<String, Value>,
    pub project_id: String,
    pub branch_name: String,
}

/// Builds a [`PushRequest`] from a collected tree
///
/// # Example
/// ```
/// use digia_sync::etl::Transformer;
/// use digia_sync::project::PushRequestBuilder;
/// use digia_sync::storage::ProjectSnapshot;
/// use serde_json::Map;
///
/// let snapshot = ProjectSnapshot { data: Map::new(), project_id: Some("p1".into()) };
/// let request = PushRequestBuilder::new("main").transform(snapshot).unwrap();
/// assert_eq!(request.branch_name, "main");
/// ```
#[derive(Debug, Clone)]
pub struct PushRequestBuilder {
    branch_name: String,
}

impl PushRequestBuilder {
    pub fn new(branch_name: impl Into<String>) -> Self {
        Self {
            branch_name: branch_name.into(),
        }
    }
}

impl Transformer for PushRequestBuilder {
    type Input = ProjectSnapshot;
    type Output = PushRequest;

    fn transform(&self, snapshot: Self::Input) -> Result<Self::Output> {
        let project_id = snapshot.project_id.ok_or_else(|| {
            SyncError::Configuration(
                "projectId not found in the project folder; pull the project first".to_string(),
            )
        })?;

        Ok(PushRequest {
            data: snapshot.data,
            project_id,
            branch_name: self.branch_name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_camel_case() {
        let mut data = Map::new();
        data.insert("widgets".to_string(), json!([]));
        let request = PushRequestBuilder::new("feature/x")
            .transform(ProjectSnapshot {
                data,
                project_id: Some("p1".to_string()),
            })
            .unwrap();

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"data": {"widgets": []}, "projectId": "p1", "branchName": "feature/x"})
        );
    }

    #[test]
    fn test_missing_project_id_is_configuration_error() {
        let err = PushRequestBuilder::new("main")
            .transform(ProjectSnapshot {
                data: Map::new(),
                project_id: None,
            })
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<SyncError>(),
            Some(SyncError::Configuration(_))
        ));
    }
}
