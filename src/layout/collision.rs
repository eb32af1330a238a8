//! Handling of records that resolve to the same file name

use crate::error::SyncError;
use clap::ValueEnum;
use eyre::Result;
use owo_colors::OwoColorize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};

/// What to do when two records resolve to the same file during one export
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum CollisionPolicy {
    /// Last write wins (a warning is logged)
    #[default]
    Overwrite,
    /// Abort the export
    Fail,
    /// Append `-2`, `-3`, ... to the later names
    Disambiguate,
}

impl fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overwrite => write!(f, "overwrite"),
            Self::Fail => write!(f, "fail"),
            Self::Disambiguate => write!(f, "disambiguate"),
        }
    }
}

/// Tracks the stems claimed in each folder during a single export
#[derive(Debug, Default)]
pub struct NameRegistry {
    policy: CollisionPolicy,
    used: HashMap<PathBuf, HashSet<String>>,
}

impl NameRegistry {
    pub fn new(policy: CollisionPolicy) -> Self {
        Self {
            policy,
            used: HashMap::new(),
        }
    }

    /// Claim `stem` inside `dir`, returning the stem to actually write under
    ///
    /// # Errors
    /// Returns [`SyncError::NameCollision`] under [`CollisionPolicy::Fail`]
    /// when the stem is already taken.
    pub fn claim(&mut self, dir: &Path, stem: &str) -> Result<String> {
        let used = self.used.entry(dir.to_path_buf()).or_default();

        if used.insert(stem.to_string()) {
            return Ok(stem.to_string());
        }

        let path = dir.join(format!("{stem}.yaml"));
        match self.policy {
            CollisionPolicy::Overwrite => {
                log::warn!(
                    "Name collision, overwriting {}",
                    path.display().bright_black()
                );
                Ok(stem.to_string())
            }
            CollisionPolicy::Fail => Err(SyncError::NameCollision { path }.into()),
            CollisionPolicy::Disambiguate => {
                let mut n = 2;
                let unique = loop {
                    let candidate = format!("{stem}-{n}");
                    if !used.contains(&candidate) {
                        break candidate;
                    }
                    n += 1;
                };
                log::warn!(
                    "Name collision at {}, writing as {}",
                    path.display().bright_black(),
                    unique.cyan()
                );
                used.insert(unique.clone());
                Ok(unique)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_names_untouched() {
        let mut registry = NameRegistry::new(CollisionPolicy::Fail);
        let dir = Path::new("components");
        assert_eq!(registry.claim(dir, "Button").unwrap(), "Button");
        assert_eq!(registry.claim(dir, "Card").unwrap(), "Card");
        assert_eq!(registry.claim(Path::new("widgets"), "Button").unwrap(), "Button");
    }

    #[test]
    fn test_overwrite_reuses_name() {
        let mut registry = NameRegistry::new(CollisionPolicy::Overwrite);
        let dir = Path::new("components");
        registry.claim(dir, "Button").unwrap();
        assert_eq!(registry.claim(dir, "Button").unwrap(), "Button");
    }

    #[test]
    fn test_fail_reports_collision_path() {
        let mut registry = NameRegistry::new(CollisionPolicy::Fail);
        let dir = Path::new("components");
        registry.claim(dir, "Button").unwrap();

        let err = registry.claim(dir, "Button").unwrap_err();
        match err.downcast_ref::<SyncError>() {
            Some(SyncError::NameCollision { path }) => {
                assert_eq!(path, &PathBuf::from("components/Button.yaml"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_disambiguate_appends_suffix() {
        let mut registry = NameRegistry::new(CollisionPolicy::Disambiguate);
        let dir = Path::new("components");
        assert_eq!(registry.claim(dir, "Button").unwrap(), "Button");
        assert_eq!(registry.claim(dir, "Button").unwrap(), "Button-2");
        assert_eq!(registry.claim(dir, "Button").unwrap(), "Button-3");
        assert_eq!(registry.claim(dir, "Button-2").unwrap(), "Button-2-2");
    }

    #[test]
    fn test_policy_parses_from_cli_value() {
        assert_eq!(
            CollisionPolicy::from_str("disambiguate", true).unwrap(),
            CollisionPolicy::Disambiguate
        );
        assert_eq!(CollisionPolicy::default().to_string(), "overwrite");
    }
}
