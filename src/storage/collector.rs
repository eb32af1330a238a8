//! Recursive YAML folder collector

use super::yaml::{is_yaml_file, read_yaml_file};
use crate::error::SyncError;
use eyre::Result;
use owo_colors::OwoColorize;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Read every `.yaml` file under `folder`, descending into subfolders
///
/// Entries are visited in file-name order. Symbolic links are skipped. A
/// missing folder is not an error: a warning is logged and nothing is
/// collected.
///
/// # Errors
/// Fails with [`SyncError::Parse`] on the first file that is not valid YAML.
pub fn collect_folder(folder: impl AsRef<Path>) -> Result<Vec<Value>> {
    let folder = folder.as_ref();
    if !folder.is_dir() {
        log::warn!("Folder not found: {}", folder.display().bright_black());
        return Ok(Vec::new());
    }

    let mut records = Vec::new();
    walk(folder, &mut records)?;
    Ok(records)
}

fn walk(dir: &Path, records: &mut Vec<Value>) -> Result<()> {
    for path in sorted_entries(dir)? {
        let file_type = std::fs::symlink_metadata(&path)
            .map_err(|e| SyncError::io(&path, e))?
            .file_type();

        if file_type.is_symlink() {
            log::warn!("Skipping symbolic link: {}", path.display().bright_black());
        } else if file_type.is_dir() {
            walk(&path, records)?;
        } else if is_yaml_file(&path) {
            records.push(read_yaml_file(&path)?);
        }
    }
    Ok(())
}

/// List a directory's entries sorted by path
pub(crate) fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = std::fs::read_dir(dir)
        .map_err(|e| SyncError::io(dir, e))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| SyncError::io(dir, e))?;
    paths.sort();
    Ok(paths)
}
