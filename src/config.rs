//! Run configuration
//!
//! Built once at the program boundary (see [`crate::cli`]) and passed into
//! the export and import pipelines. Nothing below this layer reads the
//! process environment.

use crate::layout::CollisionPolicy;
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

/// Backend connection settings
#[derive(Clone)]
pub struct BackendConfig {
    /// Base URL of the backend, e.g. `https://api.example.com`
    pub url: Url,
    /// Value of the token header sent with every request
    pub token: String,
}

impl BackendConfig {
    pub fn new(url: Url, token: impl Into<String>) -> Self {
        Self {
            url,
            token: token.into(),
        }
    }
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("url", &self.url.as_str())
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Where the project tree lives and how name collisions are handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeOptions {
    pub root: PathBuf,
    pub collision_policy: CollisionPolicy,
}

impl TreeOptions {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            collision_policy: CollisionPolicy::default(),
        }
    }

    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_options_default_policy() {
        let options = TreeOptions::new("tree");
        assert_eq!(options.root, PathBuf::from("tree"));
        assert_eq!(options.collision_policy, CollisionPolicy::Overwrite);

        let options = options.with_collision_policy(CollisionPolicy::Fail);
        assert_eq!(options.collision_policy, CollisionPolicy::Fail);
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = BackendConfig::new(Url::parse("https://api.example.com").unwrap(), "secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("api.example.com"));
    }
}
