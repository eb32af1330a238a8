//! Extractor trait for pulling records out of a source

use eyre::Result;

/// Extractor trait for extracting data from a source
///
/// Implementors in this crate:
/// - [`ProjectExtractor`](crate::project::ProjectExtractor) fetches a project from the backend
/// - [`ImportAggregator`](crate::storage::ImportAggregator) reads a project tree from disk
///
/// # Example
/// ```no_run
/// use digia_sync::etl::Extractor;
/// use eyre::Result;
/// use std::path::PathBuf;
///
/// struct FileExtractor {
///     path: PathBuf,
/// }
///
/// impl Extractor for FileExtractor {
///     type Item = String;
///
///     async fn extract(&self) -> Result<Vec<Self::Item>> {
///         Ok(vec![std::fs::read_to_string(&self.path)?])
///     }
/// }
/// ```
pub trait Extractor: Send + Sync {
    /// The type of items extracted
    type Item: Send;

    /// Extract items from the source
    ///
    /// # Errors
    /// Returns an error if extraction fails (network, I/O, parsing, etc.)
    fn extract(&self) -> impl std::future::Future<Output = Result<Vec<Self::Item>>> + Send;
}
