//! Loader trait for writing records to a destination

use eyre::Result;

/// Loader trait for loading data to a destination
///
/// Implementors in this crate:
/// - [`TreeWriter`](crate::storage::TreeWriter) writes planned YAML files to disk
/// - [`ProjectLoader`](crate::project::ProjectLoader) pushes a project to the backend
///
/// # Example
/// ```no_run
/// use digia_sync::etl::Loader;
/// use eyre::Result;
/// use std::path::PathBuf;
///
/// struct FileLoader {
///     output_dir: PathBuf,
/// }
///
/// impl Loader for FileLoader {
///     type Item = String;
///
///     async fn load(&self, items: Vec<Self::Item>) -> Result<usize> {
///         for (i, item) in items.iter().enumerate() {
///             std::fs::write(self.output_dir.join(format!("{i}.txt")), item)?;
///         }
///         Ok(items.len())
///     }
/// }
/// ```
pub trait Loader: Send + Sync {
    /// The type of items to load
    type Item: Send;

    /// Load items to the destination
    ///
    /// Returns the number of items successfully loaded
    ///
    /// # Errors
    /// Returns an error if loading fails (network, I/O, validation, etc.)
    fn load(
        &self,
        items: Vec<Self::Item>,
    ) -> impl std::future::Future<Output = Result<usize>> + Send;
}
